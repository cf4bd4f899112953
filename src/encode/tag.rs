/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 G3-OSS developers.
 */

use crate::types::TagMap;

/// An ordered group of tags, pre-joined into wire form.
///
/// Tags keep the order they were added in. Boolean values are rendered as
/// `true` / `false`.
#[derive(Clone, Default)]
pub struct StatsdTagGroup {
    buf: Vec<u8>,
}

impl StatsdTagGroup {
    pub fn add_tag<T: AsRef<str>>(&mut self, key: &str, value: T) {
        if !self.buf.is_empty() {
            self.buf.push(b',');
        }
        self.buf.extend_from_slice(key.as_bytes());
        self.buf.push(b':');
        self.buf.extend_from_slice(value.as_ref().as_bytes());
    }

    pub fn add_tag_bool(&mut self, key: &str, value: bool) {
        self.add_tag(key, if value { "true" } else { "false" });
    }

    /// Add an already formatted `key:value` tag, passed through unchanged.
    pub fn add_tag_value<T: AsRef<str>>(&mut self, value: T) {
        if !self.buf.is_empty() {
            self.buf.push(b',');
        }
        self.buf.extend_from_slice(value.as_ref().as_bytes());
    }

    pub fn add_tag_map(&mut self, tags: &TagMap) {
        for (k, v) in tags.iter() {
            self.add_tag(k, v);
        }
    }

    pub fn add_tag_group(&mut self, tags: &StatsdTagGroup) {
        if tags.is_empty() {
            return;
        }
        if !self.buf.is_empty() {
            self.buf.push(b',');
        }
        self.buf.extend_from_slice(&tags.buf);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order() {
        let mut tags = StatsdTagGroup::default();
        tags.add_tag("zz", "1");
        tags.add_tag("aa", "2");
        tags.add_tag_value("mm:3");
        assert_eq!(tags.as_bytes(), b"zz:1,aa:2,mm:3");
    }

    #[test]
    fn bool_value() {
        let mut tags = StatsdTagGroup::default();
        tags.add_tag_bool("tagged", true);
        tags.add_tag_bool("hidden", false);
        assert_eq!(tags.as_bytes(), b"tagged:true,hidden:false");
    }

    #[test]
    fn from_tag_map() {
        let map = TagMap::from_iter([("node", "x"), ("az", "eu-1")]);
        let mut tags = StatsdTagGroup::default();
        tags.add_tag_map(&map);
        assert_eq!(tags.as_bytes(), b"az:eu-1,node:x");
    }

    #[test]
    fn merge_groups() {
        let mut common = StatsdTagGroup::default();
        common.add_tag("env", "prod");

        let mut tags = StatsdTagGroup::default();
        tags.add_tag("node", "x");
        tags.add_tag_group(&common);
        assert_eq!(tags.as_bytes(), b"node:x,env:prod");

        let mut empty = StatsdTagGroup::default();
        empty.add_tag_group(&StatsdTagGroup::default());
        assert!(empty.is_empty());
    }
}
