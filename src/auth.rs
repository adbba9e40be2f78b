use std::sync::Arc;

use crate::api::client::BackendHandle;
use crate::api::models::{UserProfile, UserRole};
use crate::cache::{CacheKey, CacheStore};
use crate::error::{PortalError, ValidationError};

/// Profile completeness for the one-time setup prompt:
/// `Unknown (not fetched) → {Absent → [setup] → Present}` or
/// `Unknown → Present`. There is no path back; profiles are not deletable
/// through this surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileState {
    Unknown,
    Absent,
    Present(UserProfile),
}

/// Caller-scoped authorization queries. Answers are cached per identity and
/// dropped by [`Session`](crate::identity::Session) on every identity
/// change. These gates show or hide UI affordances only; the backend
/// re-validates every mutation.
pub struct AuthService {
    backend: Arc<BackendHandle>,
    cache: Arc<CacheStore>,
}

impl AuthService {
    pub fn new(backend: Arc<BackendHandle>, cache: Arc<CacheStore>) -> Self {
        Self { backend, cache }
    }

    pub async fn caller_role(&self) -> Result<UserRole, PortalError> {
        if let Some(cached) = self.cache.get::<UserRole>(CacheKey::CallerRole) {
            return Ok(cached);
        }
        let client = self.backend.get()?;
        let role = client.get_caller_user_role().await?;
        self.cache.set(CacheKey::CallerRole, &role);
        Ok(role)
    }

    pub async fn caller_is_admin(&self) -> Result<bool, PortalError> {
        if let Some(cached) = self.cache.get::<bool>(CacheKey::CallerIsAdmin) {
            return Ok(cached);
        }
        let client = self.backend.get()?;
        let is_admin = client.is_caller_admin().await?;
        self.cache.set(CacheKey::CallerIsAdmin, &is_admin);
        Ok(is_admin)
    }

    /// Fetch the caller's profile; absence means setup has not happened yet.
    pub async fn caller_profile(&self) -> Result<Option<UserProfile>, PortalError> {
        if let Some(cached) = self.cache.get::<Option<UserProfile>>(CacheKey::CallerProfile) {
            return Ok(cached);
        }
        let client = self.backend.get()?;
        let profile = client.get_caller_user_profile().await?;
        self.cache.set(CacheKey::CallerProfile, &profile);
        Ok(profile)
    }

    /// Non-fetching peek at the profile state machine, for deciding whether
    /// to show the setup prompt without issuing a request.
    pub fn profile_state(&self) -> ProfileState {
        match self.cache.get::<Option<UserProfile>>(CacheKey::CallerProfile) {
            None => ProfileState::Unknown,
            Some(None) => ProfileState::Absent,
            Some(Some(profile)) => ProfileState::Present(profile),
        }
    }

    /// Save the caller's profile and record it locally (Absent → Present).
    pub async fn save_caller_profile(&self, profile: UserProfile) -> Result<(), PortalError> {
        if profile.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        let trimmed = UserProfile {
            name: profile.name.trim().to_string(),
        };
        let client = self.backend.get()?;
        client.save_caller_user_profile(&trimmed).await?;
        self.cache.set(CacheKey::CallerProfile, &Some(trimmed));
        Ok(())
    }

    /// Look up another user's profile. Admin surface; uncached.
    pub async fn user_profile(&self, principal: &str) -> Result<Option<UserProfile>, PortalError> {
        let client = self.backend.get()?;
        Ok(client.get_user_profile(principal).await?)
    }

    /// Assign a role to another user. Admin surface; the backend enforces
    /// who may call this.
    pub async fn assign_role(&self, principal: &str, role: UserRole) -> Result<(), PortalError> {
        let client = self.backend.get()?;
        client.assign_user_role(principal, role).await?;
        log::info!("role {:?} assigned to {}", role, principal);
        Ok(())
    }
}
