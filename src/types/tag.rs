/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 G3-OSS developers.
 */

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

/// Tags attached to a decoded metric.
///
/// Keys are unordered on the wire, duplicate keys take the last value seen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagMap {
    inner: BTreeMap<String, String>,
}

impl TagMap {
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.inner.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> TagIter<'_> {
        TagIter {
            inner: self.inner.iter(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for TagMap
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut map = TagMap::default();
        for (n, v) in iter {
            map.insert(n, v);
        }
        map
    }
}

impl fmt::Display for TagMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.inner.iter();
        let Some((name, value)) = iter.next() else {
            return Ok(());
        };
        f.write_str(name)?;
        f.write_str(":")?;
        f.write_str(value)?;

        for (name, value) in iter {
            f.write_str(",")?;
            f.write_str(name)?;
            f.write_str(":")?;
            f.write_str(value)?;
        }
        Ok(())
    }
}

pub struct TagIter<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for TagIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_wins() {
        let mut map = TagMap::default();
        assert_eq!(map.insert("node", "a"), None);
        assert_eq!(map.insert("node", "b"), Some("a".to_string()));
        assert_eq!(map.get("node"), Some("b"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn display() {
        let map = TagMap::from_iter([("node", "x"), ("az", "eu-1")]);
        assert_eq!(map.to_string(), "az:eu-1,node:x");

        let empty = TagMap::default();
        assert!(empty.to_string().is_empty());
    }
}
