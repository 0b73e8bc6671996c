//! Header collection for [`Message`](crate::http::message::Message).
//!
//! Header names are matched ASCII case-insensitively but keep the casing
//! under which they were first stored; that canonical casing is what
//! enumeration returns. Each name maps to an ordered list of values and
//! repeated appends are kept as separate values, never merged.
//!
//! Entries are stored in an ordered map keyed by the lower-cased name. The
//! map sits behind an [`Arc`] so cloning a collection is cheap and the
//! first write after a clone copies it (see [`Arc::make_mut`]).
//!
//! Nothing here validates names or values; that is the job of the
//! [`validator`](crate::http::validator) module, applied by the message
//! mutators before they reach this structure.

use indexmap::IndexMap;
use indexmap::map::Entry;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderEntry {
    name: String,
    values: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    entries: Arc<IndexMap<String, HeaderEntry>>,
}

/// Two collections are equal when they hold the same entries in the same order.
impl PartialEq for HeaderMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for HeaderMap {}

/// Separator used by [`HeaderMap::line`].
pub const LINE_SEPARATOR: &str = ", ";

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&fold(name))
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(&fold(name)).map(|e| e.values.as_slice())
    }

    /// Values stored under `name`, or an empty list.
    pub fn get_all(&self, name: &str) -> Vec<String> {
        self.get(name).map(<[String]>::to_vec).unwrap_or_default()
    }

    /// Values stored under `name` joined with [`LINE_SEPARATOR`], or an empty string.
    pub fn line(&self, name: &str) -> String {
        self.get(name)
            .map(|values| values.join(LINE_SEPARATOR))
            .unwrap_or_default()
    }

    /// Canonical name under which `name` is stored.
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        self.entries.get(&fold(name)).map(|e| e.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .values()
            .map(|e| (e.name.as_str(), e.values.as_slice()))
    }

    /// Snapshot keyed by canonical name.
    pub fn to_map(&self) -> IndexMap<String, Vec<String>> {
        self.iter()
            .map(|(name, values)| (name.to_string(), values.to_vec()))
            .collect()
    }

    /// Replace every value stored under `name`.
    /// The entry keeps its position but takes the casing of `name`.
    pub fn set(&mut self, name: &str, values: Vec<String>) {
        Arc::make_mut(&mut self.entries).insert(
            fold(name),
            HeaderEntry {
                name: name.to_string(),
                values,
            },
        );
    }

    /// Append values to `name`, creating the entry if needed.
    /// An existing entry keeps its canonical casing.
    pub fn append(&mut self, name: &str, values: Vec<String>) {
        match Arc::make_mut(&mut self.entries).entry(fold(name)) {
            Entry::Occupied(mut e) => e.get_mut().values.extend(values),
            Entry::Vacant(e) => {
                e.insert(HeaderEntry {
                    name: name.to_string(),
                    values,
                });
            }
        }
    }

    /// Remove `name`; returns whether an entry existed.
    pub fn remove(&mut self, name: &str) -> bool {
        if !self.contains(name) {
            return false;
        }
        Arc::make_mut(&mut self.entries)
            .shift_remove(&fold(name))
            .is_some()
    }
}

fn fold(name: &str) -> String {
    name.to_ascii_lowercase()
}
