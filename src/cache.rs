// Caching backend reads to speed up page loads and reduce remote queries.
// Entries live for the process lifetime only; mutations drop the key they
// touched and the next read re-fetches.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Logical resource names the read cache is keyed by. Guidance-by-category
/// is deliberately absent: those lookups are one-shot and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    DisputeCategories,
    RecentDevelopments,
    CallerRole,
    CallerProfile,
    CallerIsAdmin,
}

impl CacheKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKey::DisputeCategories => "dispute-categories",
            CacheKey::RecentDevelopments => "recent-developments",
            CacheKey::CallerRole => "caller-role",
            CacheKey::CallerProfile => "caller-profile",
            CacheKey::CallerIsAdmin => "caller-is-admin",
        }
    }

    /// Keys scoped to the current caller; dropped on every identity change.
    pub const CALLER_SCOPED: [CacheKey; 3] = [
        CacheKey::CallerRole,
        CacheKey::CallerProfile,
        CacheKey::CallerIsAdmin,
    ];
}

/// Process-wide read cache, created at application start and dropped at
/// shutdown. Passed explicitly to the query/mutation layers; there is no
/// ambient singleton. Values are stored as JSON documents so one map serves
/// every resource type.
#[derive(Default)]
pub struct CacheStore {
    entries: Mutex<HashMap<CacheKey, Value>>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, Value>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            // Cached values are plain data; a poisoned lock still holds them.
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: CacheKey) -> Option<T> {
        let entries = self.lock();
        let value = entries.get(&key)?;
        match serde_json::from_value(value.clone()) {
            Ok(decoded) => {
                log::debug!("cache hit: {}", key.as_str());
                Some(decoded)
            }
            Err(e) => {
                log::warn!("cache entry {} failed to decode: {}", key.as_str(), e);
                None
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: CacheKey, value: &T) {
        match serde_json::to_value(value) {
            Ok(encoded) => {
                self.lock().insert(key, encoded);
                log::debug!("cache set: {}", key.as_str());
            }
            Err(e) => log::warn!("cache entry {} failed to encode: {}", key.as_str(), e),
        }
    }

    pub fn contains(&self, key: CacheKey) -> bool {
        self.lock().contains_key(&key)
    }

    pub fn invalidate(&self, key: CacheKey) {
        if self.lock().remove(&key).is_some() {
            log::debug!("cache invalidated: {}", key.as_str());
        }
    }

    pub fn clear(&self) {
        self.lock().clear();
        log::debug!("cache cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_invalidate_roundtrip() {
        let cache = CacheStore::new();
        assert_eq!(cache.get::<Vec<String>>(CacheKey::DisputeCategories), None);

        let list = vec!["family".to_string(), "money".to_string()];
        cache.set(CacheKey::DisputeCategories, &list);
        assert_eq!(
            cache.get::<Vec<String>>(CacheKey::DisputeCategories),
            Some(list)
        );

        cache.invalidate(CacheKey::DisputeCategories);
        assert_eq!(cache.get::<Vec<String>>(CacheKey::DisputeCategories), None);
    }

    #[test]
    fn keys_are_independent() {
        let cache = CacheStore::new();
        cache.set(CacheKey::CallerRole, &"admin");
        cache.set(CacheKey::CallerIsAdmin, &true);

        cache.invalidate(CacheKey::CallerRole);
        assert!(!cache.contains(CacheKey::CallerRole));
        assert_eq!(cache.get::<bool>(CacheKey::CallerIsAdmin), Some(true));
    }
}
