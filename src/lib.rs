/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 G3-OSS developers.
 */

mod types;
pub use types::{MetricRecord, MetricType, TagMap};

mod encode;
pub use encode::{
    EncodeOptions, StatsdTagGroup, WireValue, encode, encode_parts, encode_parts_to_string,
    encode_to_string,
};

mod decode;
pub use decode::{StatsdDecodeError, decode, must_decode};
