//! Case-insensitive flat property store.

use std::collections::BTreeMap;

use tracing::trace;

use crate::value::{Value, flatten_into};

/// Lookup abstraction consumed by the binder.
pub trait Properties {
    /// Case-insensitive lookup of `key`.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Every entry whose key equals `prefix` or starts with `prefix.`.
    fn get_by_prefix(&self, prefix: &str) -> BTreeMap<String, Value>;

    /// Returns the stored value and `true`, or `fallback` and `false`.
    fn get_or<'a>(&'a self, key: &str, fallback: &'a Value) -> (&'a Value, bool) {
        self.get(key).map_or((fallback, false), |value| (value, true))
    }
}

/// Flat mapping from lower-cased dotted keys to [`Value`]s.
///
/// Keys are normalized to lower case on every write and lookup, so writes
/// differing only by case overwrite one another.
///
/// # Examples
///
/// ```
/// use prop_bind::{PropertyStore, Value};
/// let mut store = PropertyStore::new();
/// store.set("Server.Port", "8080");
/// assert_eq!(store.get("server.port"), Some(&Value::from("8080")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyStore {
    entries: BTreeMap<String, Value>,
}

impl PropertyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a nested mapping, flattening it into dotted keys.
    #[must_use]
    pub fn from_mapping(entries: &BTreeMap<String, Value>) -> Self {
        let mut flat = BTreeMap::new();
        flatten_into("", entries, &mut flat);
        Self { entries: flat }
    }

    /// Stores `value` under the lower-cased `key`, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let normalized = key.to_lowercase();
        let stored = value.into();
        trace!(key = %normalized, value = ?stored, "set property");
        self.entries.insert(normalized, stored);
    }

    /// Case-insensitive lookup of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(&key.to_lowercase())
    }

    /// Returns the value of the first configured key in `keys`.
    #[must_use]
    pub fn get_first(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().find_map(|key| self.get(key))
    }

    /// Every entry whose key equals `prefix` or starts with `prefix.`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prop_bind::PropertyStore;
    /// let store: PropertyStore = [("db.host", "h"), ("db.port", "1"), ("dbx", "x")]
    ///     .into_iter()
    ///     .collect();
    /// let db = store.get_by_prefix("DB");
    /// assert_eq!(db.len(), 2);
    /// assert!(db.contains_key("db.host"));
    /// ```
    #[must_use]
    pub fn get_by_prefix(&self, prefix: &str) -> BTreeMap<String, Value> {
        let exact = prefix.to_lowercase();
        let dotted = format!("{exact}.");
        self.entries
            .range(exact.clone()..)
            .take_while(|(key, _)| key.starts_with(&exact))
            .filter(|(key, _)| **key == exact || key.starts_with(&dotted))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattens `entries` below `base` and stores every leaf.
    pub(crate) fn merge_mapping(&mut self, base: &str, entries: &BTreeMap<String, Value>) {
        let mut flat = BTreeMap::new();
        flatten_into(&base.to_lowercase(), entries, &mut flat);
        for (key, value) in flat {
            self.set(&key, value);
        }
    }
}

impl Properties for PropertyStore {
    fn get(&self, key: &str) -> Option<&Value> {
        Self::get(self, key)
    }

    fn get_by_prefix(&self, prefix: &str) -> BTreeMap<String, Value> {
        Self::get_by_prefix(self, prefix)
    }
}

impl<K: AsRef<str>, V: Into<Value>> Extend<(K, V)> for PropertyStore {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key.as_ref(), value);
        }
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for PropertyStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}
