/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 G3-OSS developers.
 */

use smallvec::SmallVec;

use crate::types::{MetricRecord, MetricType};

mod tag;
pub use tag::StatsdTagGroup;

/// The value part of a metric as accepted by [`encode_parts`].
///
/// Numeric variants are formatted with the default shortest round-trip
/// form, `Text` is passed through untouched.
#[derive(Clone, Copy, Debug)]
pub enum WireValue<'a> {
    Unsigned(u64),
    Signed(i64),
    Double(f64),
    Text(&'a str),
}

impl From<u64> for WireValue<'static> {
    fn from(value: u64) -> Self {
        WireValue::Unsigned(value)
    }
}

impl From<i64> for WireValue<'static> {
    fn from(value: i64) -> Self {
        WireValue::Signed(value)
    }
}

impl From<f64> for WireValue<'static> {
    fn from(value: f64) -> Self {
        WireValue::Double(value)
    }
}

impl<'a> From<&'a str> for WireValue<'a> {
    fn from(value: &'a str) -> Self {
        WireValue::Text(value)
    }
}

impl WireValue<'_> {
    fn format(&self) -> SmallVec<[u8; 24]> {
        let mut buf = SmallVec::new();
        match self {
            WireValue::Unsigned(u) => {
                buf.extend_from_slice(itoa::Buffer::new().format(*u).as_bytes())
            }
            WireValue::Signed(i) => {
                buf.extend_from_slice(itoa::Buffer::new().format(*i).as_bytes())
            }
            WireValue::Double(v) => {
                buf.extend_from_slice(ryu::Buffer::new().format(*v).as_bytes())
            }
            WireValue::Text(s) => buf.extend_from_slice(s.as_bytes()),
        }
        buf
    }
}

/// Optional trailing segments for [`encode_parts`].
#[derive(Clone, Default)]
pub struct EncodeOptions {
    sample_rate: Option<f64>,
    tags: StatsdTagGroup,
}

impl EncodeOptions {
    pub fn with_sample_rate(mut self, rate: f64) -> Self {
        self.sample_rate = Some(rate);
        self
    }

    pub fn with_tag<T: AsRef<str>>(mut self, key: &str, value: T) -> Self {
        self.tags.add_tag(key, value);
        self
    }

    pub fn with_tag_bool(mut self, key: &str, value: bool) -> Self {
        self.tags.add_tag_bool(key, value);
        self
    }

    pub fn with_tag_value<T: AsRef<str>>(mut self, value: T) -> Self {
        self.tags.add_tag_value(value);
        self
    }

    pub fn with_tag_group(mut self, tags: &StatsdTagGroup) -> Self {
        self.tags.add_tag_group(tags);
        self
    }
}

/// Build the wire form of a single metric from raw parts.
///
/// The caller is responsible for `name` not containing `:` or `|`. Tags
/// are emitted in the exact order they were added to the options, an empty
/// tag group produces no `|#` segment at all.
pub fn encode_parts<'a, V: Into<WireValue<'a>>>(
    name: &str,
    value: V,
    r#type: MetricType,
    options: &EncodeOptions,
) -> Vec<u8> {
    let value = value.into().format();

    let mut buf = Vec::with_capacity(name.len() + value.len() + 16 + options.tags.len());
    buf.extend_from_slice(name.as_bytes());
    buf.push(b':');
    buf.extend_from_slice(value.as_slice());
    buf.push(b'|');
    buf.extend_from_slice(r#type.as_str().as_bytes());

    if let Some(rate) = options.sample_rate {
        buf.extend_from_slice(b"|@");
        buf.extend_from_slice(ryu::Buffer::new().format(rate).as_bytes());
    }

    if !options.tags.is_empty() {
        buf.extend_from_slice(b"|#");
        buf.extend_from_slice(options.tags.as_bytes());
    }

    buf
}

pub fn encode_parts_to_string<'a, V: Into<WireValue<'a>>>(
    name: &str,
    value: V,
    r#type: MetricType,
    options: &EncodeOptions,
) -> String {
    let buf = encode_parts(name, value, r#type, options);
    // every appended segment is either a str slice or ascii digits
    String::from_utf8(buf).unwrap()
}

/// Build the wire form of a [`MetricRecord`].
///
/// Tags from the record's map are emitted in map order.
pub fn encode(record: &MetricRecord) -> Vec<u8> {
    encode_parts(
        &record.name,
        record.value,
        record.r#type,
        &record_options(record),
    )
}

pub fn encode_to_string(record: &MetricRecord) -> String {
    encode_parts_to_string(
        &record.name,
        record.value,
        record.r#type,
        &record_options(record),
    )
}

fn record_options(record: &MetricRecord) -> EncodeOptions {
    let mut options = EncodeOptions::default();
    if let Some(rate) = record.sample_rate {
        options = options.with_sample_rate(rate);
    }
    options.tags.add_tag_map(&record.tag_map);
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain() {
        let buf = encode_parts("namespaced.value", 10u64, MetricType::Counter, &Default::default());
        assert_eq!(buf.as_slice(), b"namespaced.value:10|c");

        let s = encode_parts_to_string("some.gauge", -3i64, MetricType::Gauge, &Default::default());
        assert_eq!(s, "some.gauge:-3|g");
    }

    #[test]
    fn float_value() {
        let s = encode_parts_to_string("io.wait", 0.25f64, MetricType::Timer, &Default::default());
        assert_eq!(s, "io.wait:0.25|ms");
    }

    #[test]
    fn text_value() {
        let s = encode_parts_to_string("raw", "42", MetricType::Set, &Default::default());
        assert_eq!(s, "raw:42|s");
    }

    #[test]
    fn sample_rate_and_tags() {
        let options = EncodeOptions::default()
            .with_sample_rate(1.0)
            .with_tag("node", "x")
            .with_tag_bool("tagged", true);
        let s = encode_parts_to_string("namespaced.value", 10u64, MetricType::Counter, &options);
        assert_eq!(s, "namespaced.value:10|c|@1.0|#node:x,tagged:true");
    }

    #[test]
    fn preformatted_tag() {
        let options = EncodeOptions::default()
            .with_tag_value("node:x")
            .with_tag("env", "prod");
        let s = encode_parts_to_string("a", 1u64, MetricType::Meter, &options);
        assert_eq!(s, "a:1|m|#node:x,env:prod");
    }

    #[test]
    fn compact_sample_rate() {
        let options = EncodeOptions::default().with_sample_rate(0.5);
        let s = encode_parts_to_string("a", 1u64, MetricType::Counter, &options);
        assert_eq!(s, "a:1|c|@0.5");
    }

    #[test]
    fn record() {
        let r = crate::MetricRecord::new(MetricType::Gauge, "gaugor", 333.0);
        assert_eq!(encode_to_string(&r), "gaugor:333.0|g");

        let r = r.with_sample_rate(1.0).with_tag("node", "x");
        assert_eq!(encode_to_string(&r), "gaugor:333.0|g|@1.0|#node:x");
    }

    #[test]
    fn empty_tag_group_omitted() {
        let options = EncodeOptions::default().with_tag_group(&StatsdTagGroup::default());
        let buf = encode_parts("a", 1u64, MetricType::Counter, &options);
        assert_eq!(buf.as_slice(), b"a:1|c");
    }
}
