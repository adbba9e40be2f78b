use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::models::{
    CategoryType, DescriptionMatch, DisputeCategory, GuidanceResult, RecentDevelopment,
    RecentDevelopmentInput, UserProfile, UserRole,
};
use crate::error::{PortalError, RemoteError};

/// Remote operations exposed by the portal backend. The backend owns all
/// persistence, matching, and authorization; this side only describes the
/// request/response shapes. Every call is scoped to the caller identified by
/// the current identity, if any.
#[async_trait]
pub trait BackendClient: Send + Sync {
    async fn get_all_categories(&self) -> Result<Vec<DisputeCategory>, RemoteError>;

    async fn get_guidance_by_category(
        &self,
        category: CategoryType,
    ) -> Result<Option<GuidanceResult>, RemoteError>;

    async fn get_guidance_by_description(
        &self,
        description: &str,
    ) -> Result<DescriptionMatch, RemoteError>;

    async fn get_all_developments(&self) -> Result<Vec<RecentDevelopment>, RemoteError>;

    async fn add_development(
        &self,
        input: &RecentDevelopmentInput,
    ) -> Result<RecentDevelopment, RemoteError>;

    async fn edit_development(
        &self,
        id: u64,
        input: &RecentDevelopmentInput,
    ) -> Result<RecentDevelopment, RemoteError>;

    async fn get_caller_user_role(&self) -> Result<UserRole, RemoteError>;

    async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>, RemoteError>;

    async fn save_caller_user_profile(&self, profile: &UserProfile) -> Result<(), RemoteError>;

    async fn is_caller_admin(&self) -> Result<bool, RemoteError>;

    async fn get_user_profile(&self, principal: &str) -> Result<Option<UserProfile>, RemoteError>;

    async fn assign_user_role(&self, principal: &str, role: UserRole) -> Result<(), RemoteError>;
}

/// Shared slot for the backend client. The slot starts empty; queries and
/// mutations issued before a transport is installed fail with
/// `ClientUnavailable` instead of reaching the network.
#[derive(Default)]
pub struct BackendHandle {
    slot: Mutex<Option<Arc<dyn BackendClient>>>,
}

impl BackendHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Arc<dyn BackendClient>) -> Self {
        let handle = Self::new();
        handle.install(client);
        handle
    }

    /// Install (or replace) the connected transport.
    pub fn install(&self, client: Arc<dyn BackendClient>) {
        let mut slot = match self.slot.lock() {
            Ok(guard) => guard,
            // The slot holds a plain Arc; a poisoned lock still has valid data.
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = Some(client);
        log::info!("backend client installed");
    }

    /// Drop the transport, returning the handle to the not-ready state.
    pub fn disconnect(&self) {
        let mut slot = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = None;
        log::info!("backend client disconnected");
    }

    pub fn is_ready(&self) -> bool {
        match self.slot.lock() {
            Ok(guard) => guard.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }

    /// Current client, or `ClientUnavailable` when none is installed yet.
    pub fn get(&self) -> Result<Arc<dyn BackendClient>, PortalError> {
        let slot = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.clone().ok_or(PortalError::ClientUnavailable)
    }
}
