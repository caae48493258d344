//! Client-side result cache for procedure queries.
//!
//! Entries are keyed by procedure name plus serialized input. Invalidation
//! only marks an entry stale; the last value stays readable so views can keep
//! showing it while the refetch is in flight.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    procedure: String,
    input: String,
}

impl QueryKey {
    pub fn new<I: Serialize + ?Sized>(procedure: &str, input: &I) -> Self {
        Self {
            procedure: procedure.to_string(),
            input: serde_json::to_string(input).unwrap_or_default(),
        }
    }

    pub fn posts_get_all() -> Self {
        Self::new("posts.getAll", &())
    }

    pub fn procedure(&self) -> &str {
        &self.procedure
    }
}

#[derive(Debug)]
struct CacheEntry {
    value: Value,
    stale: bool,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last stored value, stale or not.
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entry = self.entries.get(key)?;
        serde_json::from_value(entry.value.clone()).ok()
    }

    /// Stored value only if it has not been invalidated since.
    pub fn get_fresh<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        match self.entries.get(key) {
            Some(entry) if !entry.stale => self.get(key),
            _ => None,
        }
    }

    pub fn set<T: Serialize>(&mut self, key: QueryKey, value: &T) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(value)?;
        self.entries.insert(key, CacheEntry { value, stale: false });
        Ok(())
    }

    /// Marks `key` stale. Returns false if nothing was cached under it.
    pub fn invalidate(&mut self, key: &QueryKey) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.stale = true;
                true
            }
            None => false,
        }
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.get(key).map(|e| e.stale).unwrap_or(true)
    }
}
