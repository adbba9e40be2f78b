use std::sync::Arc;

use url::Url;

use crate::api::client::BackendHandle;
use crate::api::models::{RecentDevelopment, RecentDevelopmentInput};
use crate::cache::{CacheKey, CacheStore};
use crate::error::{PortalError, ValidationError};

/// Form state for the developments editor. `date` stays optional until the
/// user picks one; [`validate`](Self::validate) turns a draft into the wire
/// payload or reports the first offending field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DevelopmentDraft {
    pub title: String,
    pub date: Option<i64>,
    pub description: String,
    pub url: String,
}

impl DevelopmentDraft {
    /// Local validation, run before any remote call: required fields must be
    /// non-empty after trimming, the date must be set, and the URL must
    /// parse as an absolute URL. Trimmed values are what gets sent.
    pub fn validate(&self) -> Result<RecentDevelopmentInput, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        let date = self.date.ok_or(ValidationError::MissingDate)?;
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingField("description"));
        }
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingField("url"));
        }
        if Url::parse(url).is_err() {
            return Err(ValidationError::InvalidUrl(url.to_string()));
        }
        Ok(RecentDevelopmentInput {
            title: title.to_string(),
            date,
            description: description.to_string(),
            url: url.to_string(),
        })
    }
}

impl From<&RecentDevelopment> for DevelopmentDraft {
    /// Pre-fill the editor from an existing record.
    fn from(dev: &RecentDevelopment) -> Self {
        Self {
            title: dev.title.clone(),
            date: Some(dev.date),
            description: dev.description.clone(),
            url: dev.url.clone(),
        }
    }
}

/// Read and write paths for the admin-curated "recent developments" list.
/// Reads are cached under a fixed key; each successful mutation invalidates
/// that key so the next read reflects the change. A failed mutation leaves
/// the last known-good list untouched.
pub struct DevelopmentService {
    backend: Arc<BackendHandle>,
    cache: Arc<CacheStore>,
}

impl DevelopmentService {
    pub fn new(backend: Arc<BackendHandle>, cache: Arc<CacheStore>) -> Self {
        Self { backend, cache }
    }

    pub async fn all(&self) -> Result<Vec<RecentDevelopment>, PortalError> {
        if let Some(cached) = self
            .cache
            .get::<Vec<RecentDevelopment>>(CacheKey::RecentDevelopments)
        {
            return Ok(cached);
        }
        let client = self.backend.get()?;
        let developments = client.get_all_developments().await?;
        self.cache.set(CacheKey::RecentDevelopments, &developments);
        Ok(developments)
    }

    pub async fn refresh(&self) -> Result<Vec<RecentDevelopment>, PortalError> {
        self.cache.invalidate(CacheKey::RecentDevelopments);
        self.all().await
    }

    /// Create a development. Requires the admin role on the backend side;
    /// the role gate in the UI is advisory only. Returns the stored record
    /// with its backend-assigned id.
    pub async fn add(&self, draft: &DevelopmentDraft) -> Result<RecentDevelopment, PortalError> {
        let input = draft.validate()?;
        let client = self.backend.get()?;
        let created = client.add_development(&input).await?;
        self.cache.invalidate(CacheKey::RecentDevelopments);
        log::info!("development {} added", created.id);
        Ok(created)
    }

    /// Replace every field of an existing development. Fails with the
    /// backend's not-found error when the id does not exist.
    pub async fn edit(
        &self,
        id: u64,
        draft: &DevelopmentDraft,
    ) -> Result<RecentDevelopment, PortalError> {
        let input = draft.validate()?;
        let client = self.backend.get()?;
        let updated = client.edit_development(id, &input).await?;
        self.cache.invalidate(CacheKey::RecentDevelopments);
        log::info!("development {} edited", id);
        Ok(updated)
    }
}

/// Display order for the developments page: newest first. Purely a
/// presentation concern; the stored order is whatever the backend returns.
pub fn sort_newest_first(developments: &mut [RecentDevelopment]) {
    developments.sort_by(|a, b| b.date.cmp(&a.date));
}
