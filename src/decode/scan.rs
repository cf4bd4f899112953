/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 G3-OSS developers.
 */

use std::str::FromStr;

use memchr::{memchr2, memchr3};

use super::StatsdDecodeError;
use crate::types::{MetricRecord, MetricType, TagMap};

/// Single pass scanner over a metrics buffer.
///
/// Each byte is consumed exactly once, fields are captured as subslices of
/// the input and converted at segment boundaries.
pub(super) struct Scanner<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Scanner<'a> {
    pub(super) fn new(buf: &'a [u8]) -> Self {
        Scanner { buf, offset: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.buf.get(self.offset).copied()
    }

    pub(super) fn next_record(
        &mut self,
    ) -> Result<Option<MetricRecord>, StatsdDecodeError> {
        while self.peek() == Some(b'\n') {
            self.offset += 1;
        }
        if self.offset >= self.buf.len() {
            return Ok(None);
        }

        let name = self.scan_name()?;
        let value = self.scan_value()?;
        let r#type = self.scan_type()?;

        let mut record = MetricRecord::new(r#type, name, value);
        self.scan_segments(&mut record)?;
        Ok(Some(record))
    }

    fn scan_name(&mut self) -> Result<String, StatsdDecodeError> {
        let left = &self.buf[self.offset..];
        match memchr3(b':', b'|', b'\n', left) {
            Some(p) if left[p] == b':' => {
                if p == 0 {
                    return Err(StatsdDecodeError::NoKey);
                }
                self.offset += p + 1;
                Ok(String::from_utf8_lossy(&left[..p]).into_owned())
            }
            // a `|` or metric boundary before any `:`
            Some(_) => Err(StatsdDecodeError::NoValue),
            None => Err(StatsdDecodeError::NoValue),
        }
    }

    fn scan_value(&mut self) -> Result<f64, StatsdDecodeError> {
        let start = self.offset;
        loop {
            match self.peek() {
                Some(b'|') => {
                    if self.offset == start {
                        return Err(StatsdDecodeError::NoValue);
                    }
                    break;
                }
                Some(b'+' | b'-' | b'.' | b'e' | b'E' | b'0'..=b'9') => self.offset += 1,
                Some(_) => return Err(StatsdDecodeError::BadValue),
                None => {
                    return if self.offset == start {
                        Err(StatsdDecodeError::NoValue)
                    } else {
                        Err(StatsdDecodeError::NoType)
                    };
                }
            }
        }

        let text = &self.buf[start..self.offset];
        self.offset += 1; // the `|`
        parse_float(text).ok_or(StatsdDecodeError::BadValue)
    }

    fn scan_type(&mut self) -> Result<MetricType, StatsdDecodeError> {
        match MetricType::match_wire_prefix(&self.buf[self.offset..]) {
            Some((t, len)) => {
                self.offset += len;
                Ok(t)
            }
            None => Err(StatsdDecodeError::NoType),
        }
    }

    /// Consume the optional `|@<rate>` and `|#<tags>` segments up to the
    /// end of the current metric. A newline here completes the metric and
    /// leaves the scanner at the start of the next one.
    fn scan_segments(
        &mut self,
        record: &mut MetricRecord,
    ) -> Result<(), StatsdDecodeError> {
        loop {
            match self.peek() {
                None => return Ok(()),
                Some(b'\n') => {
                    self.offset += 1;
                    return Ok(());
                }
                Some(b'|') => {
                    self.offset += 1;
                    match self.peek() {
                        Some(b'@') => {
                            self.offset += 1;
                            record.sample_rate = Some(self.scan_sample_rate()?);
                        }
                        Some(b'#') => {
                            self.offset += 1;
                            self.scan_tags(&mut record.tag_map);
                        }
                        // not a rate or tag segment, the metric is
                        // complete and scanning resumes at this byte
                        _ => return Ok(()),
                    }
                }
                Some(_) => return Ok(()),
            }
        }
    }

    fn scan_sample_rate(&mut self) -> Result<f64, StatsdDecodeError> {
        let left = &self.buf[self.offset..];
        let end = memchr2(b'|', b'\n', left).unwrap_or(left.len());
        self.offset += end;
        // no character class check here, the float conversion decides
        parse_float(&left[..end]).ok_or(StatsdDecodeError::BadValue)
    }

    fn scan_tags(&mut self, tag_map: &mut TagMap) {
        loop {
            let left = &self.buf[self.offset..];
            if left.is_empty() || left[0] == b'\n' {
                return;
            }

            match memchr3(b':', b',', b'\n', left) {
                Some(p) if left[p] == b':' => {
                    let key = &left[..p];
                    let rest = &left[p + 1..];
                    let v_end = memchr2(b',', b'\n', rest).unwrap_or(rest.len());
                    self.offset += p + 1 + v_end;
                    if !key.is_empty() {
                        tag_map.insert(lossy(key), lossy(&rest[..v_end]));
                    }
                }
                Some(p) => {
                    // `,` or newline before any `:`, take it as a tag
                    // with an empty value
                    self.offset += p;
                    if p > 0 {
                        tag_map.insert(lossy(&left[..p]), String::new());
                    }
                }
                None => {
                    // trailing incomplete tag at end of input
                    self.offset = self.buf.len();
                    tag_map.insert(lossy(left), String::new());
                    return;
                }
            }

            match self.peek() {
                Some(b',') => self.offset += 1,
                _ => return,
            }
        }
    }
}

fn parse_float(buf: &[u8]) -> Option<f64> {
    let s = std::str::from_utf8(buf).ok()?;
    f64::from_str(s).ok()
}

fn lossy(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_record_at_a_time() {
        let mut scanner = Scanner::new(b"a:1|c\nb:2|g\n");

        let r = scanner.next_record().unwrap().unwrap();
        assert_eq!(r.name, "a");
        let r = scanner.next_record().unwrap().unwrap();
        assert_eq!(r.name, "b");
        assert!(scanner.next_record().unwrap().is_none());
    }

    #[test]
    fn tag_value_keeps_extra_colon() {
        let mut scanner = Scanner::new(b"a:1|c|#path:/srv:data");
        let r = scanner.next_record().unwrap().unwrap();
        assert_eq!(r.tag_map.get("path"), Some("/srv:data"));
    }

    #[test]
    fn empty_tag_fragments_skipped() {
        let mut scanner = Scanner::new(b"a:1|c|#,node:x,");
        let r = scanner.next_record().unwrap().unwrap();
        assert_eq!(r.tag_map.len(), 1);
        assert_eq!(r.tag_map.get("node"), Some("x"));
    }

    #[test]
    fn sample_rate_stops_at_segment() {
        let mut scanner = Scanner::new(b"a:1|c|@0.5|#node:x");
        let r = scanner.next_record().unwrap().unwrap();
        assert_eq!(r.sample_rate, Some(0.5));
        assert_eq!(r.tag_map.get("node"), Some("x"));
    }

    #[test]
    fn value_with_sign() {
        let mut scanner = Scanner::new(b"a:+12|g");
        let r = scanner.next_record().unwrap().unwrap();
        assert_eq!(r.value, 12.0);
    }

    #[test]
    fn newline_inside_value_is_rejected() {
        let mut scanner = Scanner::new(b"a:1\n2|c");
        assert_eq!(scanner.next_record(), Err(StatsdDecodeError::BadValue));
    }
}
