/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 G3-OSS developers.
 */

use std::fmt;

mod tag;
pub use tag::TagMap;

/// Wire code table, longest codes first so that prefix matching can never
/// take `ms` as `m` followed by a stray `s`.
const WIRE_CODE_TABLE: &[(&str, MetricType)] = &[
    ("ms", MetricType::Timer),
    ("c", MetricType::Counter),
    ("g", MetricType::Gauge),
    ("h", MetricType::Histogram),
    ("s", MetricType::Set),
    ("m", MetricType::Meter),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
    Timer,
    Set,
    Meter,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Counter => "c",
            MetricType::Gauge => "g",
            MetricType::Histogram => "h",
            MetricType::Timer => "ms",
            MetricType::Set => "s",
            MetricType::Meter => "m",
        }
    }

    /// Match a wire code at the start of `buf` and return it together with
    /// the number of bytes it occupies.
    pub(crate) fn match_wire_prefix(buf: &[u8]) -> Option<(MetricType, usize)> {
        for (code, t) in WIRE_CODE_TABLE {
            if buf.starts_with(code.as_bytes()) {
                return Some((*t, code.len()));
            }
        }
        None
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single metric as carried on the wire.
///
/// The wire value is always re-expressed as `f64` on decode, even when it
/// was written as an integer literal. An empty `tag_map` means no tags and
/// produces no `|#` segment on encode.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricRecord {
    pub r#type: MetricType,
    pub name: String,
    pub value: f64,
    pub sample_rate: Option<f64>,
    pub tag_map: TagMap,
}

impl MetricRecord {
    pub fn new(r#type: MetricType, name: impl Into<String>, value: f64) -> Self {
        MetricRecord {
            r#type,
            name: name.into(),
            value,
            sample_rate: None,
            tag_map: TagMap::default(),
        }
    }

    pub fn with_sample_rate(mut self, rate: f64) -> Self {
        self.sample_rate = Some(rate);
        self
    }

    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tag_map.insert(name, value);
        self
    }
}
