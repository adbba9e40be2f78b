use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::cache::{CacheKey, CacheStore};

/// Identity issued by the external provider: an opaque principal plus an
/// optional bearer token for the transport. The provider itself (key
/// ceremony, token renewal) lives outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub principal: String,
    pub token: Option<String>,
}

impl Identity {
    pub fn new(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            token: None,
        }
    }

    pub fn with_token(principal: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            token: Some(token.into()),
        }
    }
}

/// Adapter over the identity provider: current identity or none, plus
/// login/logout. Every identity change drops the caller-scoped cache entries
/// so role and profile answers never leak across identities.
pub struct Session {
    current: Mutex<Option<Identity>>,
    cache: Arc<CacheStore>,
}

impl Session {
    pub fn new(cache: Arc<CacheStore>) -> Self {
        Self {
            current: Mutex::new(None),
            cache,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Identity>> {
        match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.lock().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().is_some()
    }

    pub fn login(&self, identity: Identity) {
        log::info!("identity change: login as {}", identity.principal);
        *self.lock() = Some(identity);
        self.drop_caller_state();
    }

    pub fn logout(&self) {
        let previous = self.lock().take();
        if let Some(identity) = previous {
            log::info!("identity change: logout of {}", identity.principal);
        }
        self.drop_caller_state();
    }

    fn drop_caller_state(&self) {
        for key in CacheKey::CALLER_SCOPED {
            self.cache.invalidate(key);
        }
    }
}
