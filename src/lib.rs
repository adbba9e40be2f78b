//! Client data layer for a public legal-awareness portal about mediation in
//! India. Wraps the remote backend service behind a typed contract and adds
//! the thin logic the pages need: cached reads, validated admin mutations
//! with cache invalidation, role/profile queries, and the confidence-gated
//! free-text guidance lookup. Rendering and routing live in the host
//! application; matching and persistence live in the backend.

pub mod api;
pub mod app;
pub mod auth;
pub mod cache;
pub mod developments;
pub mod error;
pub mod guidance;
pub mod identity;
mod utils;

pub use api::client::{BackendClient, BackendHandle};
pub use api::http::HttpBackendClient;
pub use api::models::{
    CategoryType, DescriptionMatch, DisputeCategory, DisputeSpecificGuidance, DoAndDont,
    GuidanceResult, RecentDevelopment, RecentDevelopmentInput, UserProfile, UserRole,
};
pub use app::{Portal, PortalConfig};
pub use auth::{AuthService, ProfileState};
pub use cache::{CacheKey, CacheStore};
pub use developments::{DevelopmentDraft, DevelopmentService, sort_newest_first};
pub use error::{PortalError, RemoteError, ValidationError};
pub use guidance::{DEFAULT_CONFIDENCE_THRESHOLD, DescriptionGuidance, GuidanceService};
pub use identity::{Identity, Session};
