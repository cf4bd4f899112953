/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 G3-OSS developers.
 */

use log::debug;
use thiserror::Error;

use crate::types::MetricRecord;

mod scan;
use scan::Scanner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsdDecodeError {
    #[error("empty input")]
    Empty,
    #[error("no key field")]
    NoKey,
    #[error("no value field")]
    NoValue,
    #[error("invalid value field")]
    BadValue,
    #[error("no type field")]
    NoType,
}

/// Decode a buffer of one or more newline separated metrics.
///
/// Returns the metrics in input order. The first malformed metric aborts
/// the whole call, metrics parsed before it are discarded.
pub fn decode(buf: &[u8]) -> Result<Vec<MetricRecord>, StatsdDecodeError> {
    let mut scanner = Scanner::new(buf);
    let mut records = Vec::new();
    loop {
        match scanner.next_record() {
            Ok(Some(record)) => records.push(record),
            Ok(None) => break,
            Err(e) => {
                debug!("statsd decode aborted: {e}");
                return Err(e);
            }
        }
    }
    if records.is_empty() {
        return Err(StatsdDecodeError::Empty);
    }
    Ok(records)
}

/// Same as [`decode`] but panics on malformed input, for callers that
/// prefer fail-fast semantics over explicit result handling.
pub fn must_decode(buf: &[u8]) -> Vec<MetricRecord> {
    match decode(buf) {
        Ok(records) => records,
        Err(e) => panic!("statsd decode failed: {e}"),
    }
}
