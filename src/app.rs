use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::api::client::BackendHandle;
use crate::api::http::HttpBackendClient;
use crate::auth::AuthService;
use crate::cache::CacheStore;
use crate::developments::DevelopmentService;
use crate::guidance::{DEFAULT_CONFIDENCE_THRESHOLD, GuidanceService};
use crate::identity::Session;

fn default_confidence_threshold() -> f64 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

/// Portal settings, persisted as TOML in the platform config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    pub base_url: String,
    pub token: Option<String>,
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: None,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl PortalConfig {
    fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("mediation-portal.toml"))
    }

    /// Read the config file, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load() -> Self {
        if let Some(path) = Self::toml_path() {
            if let Ok(bytes) = fs::read(&path) {
                if let Ok(text) = String::from_utf8(bytes) {
                    if let Ok(config) = toml::from_str::<PortalConfig>(&text) {
                        return config;
                    }
                    log::warn!("ignoring malformed config at {}", path.display());
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::toml_path() {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let toml = toml::to_string_pretty(self)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
            fs::write(path, toml)
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config dir",
            ))
        }
    }
}

/// Application wiring: one cache, one backend handle, one session, and the
/// three data services sharing them. Built at startup, dropped at shutdown;
/// the cache lives exactly as long as this value.
pub struct Portal {
    pub backend: Arc<BackendHandle>,
    pub cache: Arc<CacheStore>,
    pub session: Session,
    pub guidance: GuidanceService,
    pub developments: DevelopmentService,
    pub auth: AuthService,
}

impl Portal {
    pub fn new() -> Self {
        Self::with_config(&PortalConfig::default())
    }

    pub fn with_config(config: &PortalConfig) -> Self {
        let backend = Arc::new(BackendHandle::new());
        let cache = Arc::new(CacheStore::new());
        Self {
            session: Session::new(cache.clone()),
            guidance: GuidanceService::with_threshold(
                backend.clone(),
                cache.clone(),
                config.confidence_threshold,
            ),
            developments: DevelopmentService::new(backend.clone(), cache.clone()),
            auth: AuthService::new(backend.clone(), cache.clone()),
            backend,
            cache,
        }
    }

    /// Install the HTTP transport described by the config. The session's
    /// token wins over the configured one. Returns whether the handle is
    /// ready; with no base URL the handle stays empty and every operation
    /// keeps failing fast.
    pub fn connect_http(&self, config: &PortalConfig) -> bool {
        if config.base_url.trim().is_empty() {
            log::warn!("no backend base URL configured; staying offline");
            return false;
        }
        let token = self
            .session
            .current()
            .and_then(|identity| identity.token)
            .or_else(|| config.token.clone());
        self.backend
            .install(Arc::new(HttpBackendClient::new(&config.base_url, token)));
        true
    }
}

impl Default for Portal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_fill_missing_threshold() {
        let config: PortalConfig =
            toml::from_str("base_url = \"https://portal.example.org\"").unwrap();
        assert_eq!(config.confidence_threshold, DEFAULT_CONFIDENCE_THRESHOLD);
        assert_eq!(config.token, None);
    }

    #[test]
    fn portal_without_base_url_stays_offline() {
        let portal = Portal::new();
        assert!(!portal.connect_http(&PortalConfig::default()));
        assert!(!portal.backend.is_ready());
    }

    #[test]
    fn portal_with_base_url_becomes_ready() {
        let portal = Portal::new();
        let config = PortalConfig {
            base_url: "https://portal.example.org".to_string(),
            ..PortalConfig::default()
        };
        assert!(portal.connect_http(&config));
        assert!(portal.backend.is_ready());
    }
}
