//! Expiry bookkeeping for published artifacts.
//!
//! The conversion core never tracks output files; retention belongs to the
//! glue layer. This module keeps it explicit: a store mapping artifact key
//! to expiry time, and a pure predicate deciding staleness against a clock
//! the caller supplies.

use std::collections::HashMap;
use std::time::SystemTime;

/// True once `expiry` has been reached.
pub fn is_expired(now: SystemTime, expiry: SystemTime) -> bool {
    expiry <= now
}

/// Maps artifact keys to their expiry timestamps.
#[derive(Debug, Default)]
pub struct RetentionStore {
    entries: HashMap<String, SystemTime>,
}

impl RetentionStore {
    pub fn new() -> Self {
        RetentionStore::default()
    }

    /// Register an artifact, replacing any previous expiry for the key.
    pub fn insert(&mut self, key: impl Into<String>, expires_at: SystemTime) {
        self.entries.insert(key.into(), expires_at);
    }

    pub fn remove(&mut self, key: &str) -> Option<SystemTime> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys whose expiry has passed as of `now`.
    pub fn expired(&self, now: SystemTime) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, expiry)| is_expired(now, **expiry))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Drop every expired entry, returning the removed keys.
    pub fn purge_expired(&mut self, now: SystemTime) -> Vec<String> {
        let stale = self.expired(now);
        for key in &stale {
            self.entries.remove(key);
        }
        stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_is_expired_boundaries() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);

        assert!(is_expired(now, now - Duration::from_secs(1)));
        assert!(is_expired(now, now));
        assert!(!is_expired(now, now + Duration::from_secs(1)));
    }

    #[test]
    fn test_purge_removes_only_stale_entries() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);

        let mut store = RetentionStore::new();
        store.insert("old.xlsx", now - Duration::from_secs(10));
        store.insert("fresh.xlsx", now + Duration::from_secs(3_600));

        let removed = store.purge_expired(now);
        assert_eq!(removed, vec!["old.xlsx".to_string()]);
        assert_eq!(store.len(), 1);
        assert!(store.remove("fresh.xlsx").is_some());
    }

    #[test]
    fn test_insert_replaces_expiry() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);

        let mut store = RetentionStore::new();
        store.insert("a.xlsx", now - Duration::from_secs(1));
        store.insert("a.xlsx", now + Duration::from_secs(60));

        assert!(store.expired(now).is_empty());
    }
}
