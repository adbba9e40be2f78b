use std::sync::Arc;

use crate::api::client::BackendHandle;
use crate::api::models::{CategoryType, DescriptionMatch, DisputeCategory, GuidanceResult};
use crate::cache::{CacheKey, CacheStore};
use crate::error::{PortalError, RemoteError, ValidationError};

/// Below this confidence the free-text lookup is treated as "no confident
/// match" and only the best-match category is surfaced as a suggestion.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Client-side reading of a [`DescriptionMatch`] against the confidence
/// threshold.
#[derive(Debug, Clone, PartialEq)]
pub enum DescriptionGuidance {
    /// Confident full match; render the guidance document.
    Match(GuidanceResult),
    /// No confident match; offer the closest category as a starting point.
    Suggestion(DisputeCategory),
    /// The backend found nothing usable.
    NoMatch,
}

/// Read paths for dispute guidance. The category list is cached; per-category
/// and free-text lookups are user-initiated one-shots and hit the backend
/// every time.
pub struct GuidanceService {
    backend: Arc<BackendHandle>,
    cache: Arc<CacheStore>,
    confidence_threshold: f64,
}

impl GuidanceService {
    pub fn new(backend: Arc<BackendHandle>, cache: Arc<CacheStore>) -> Self {
        Self::with_threshold(backend, cache, DEFAULT_CONFIDENCE_THRESHOLD)
    }

    pub fn with_threshold(
        backend: Arc<BackendHandle>,
        cache: Arc<CacheStore>,
        confidence_threshold: f64,
    ) -> Self {
        Self {
            backend,
            cache,
            confidence_threshold,
        }
    }

    /// Full category list in backend order, cached under a fixed key until
    /// invalidated or explicitly refreshed.
    pub async fn all_categories(&self) -> Result<Vec<DisputeCategory>, PortalError> {
        if let Some(cached) = self.cache.get::<Vec<DisputeCategory>>(CacheKey::DisputeCategories) {
            return Ok(cached);
        }
        let client = self.backend.get()?;
        let categories = client.get_all_categories().await?;
        self.cache.set(CacheKey::DisputeCategories, &categories);
        Ok(categories)
    }

    /// Drop the cached list and fetch it again.
    pub async fn refresh_categories(&self) -> Result<Vec<DisputeCategory>, PortalError> {
        self.cache.invalidate(CacheKey::DisputeCategories);
        self.all_categories().await
    }

    /// One-shot guidance lookup for a category the user selected. Absence is
    /// a legitimate answer, not an error. A response carrying guidance for a
    /// *different* category violates the contract and is rejected.
    pub async fn guidance_by_category(
        &self,
        category: CategoryType,
    ) -> Result<Option<GuidanceResult>, PortalError> {
        let client = self.backend.get()?;
        let result = client.get_guidance_by_category(category).await?;
        if let Some(guidance) = &result {
            let got = guidance.category.category_type_enum;
            if got != category {
                return Err(RemoteError::Protocol(format!(
                    "requested guidance for {} but received {}",
                    category, got
                ))
                .into());
            }
        }
        Ok(result)
    }

    /// Free-text lookup. The text is required; classification against the
    /// confidence threshold happens here so callers only see the tri-state
    /// outcome.
    pub async fn guidance_by_description(
        &self,
        description: &str,
    ) -> Result<DescriptionGuidance, PortalError> {
        if description.trim().is_empty() {
            return Err(ValidationError::MissingField("description").into());
        }
        let client = self.backend.get()?;
        let matched = client.get_guidance_by_description(description.trim()).await?;
        Ok(self.classify(matched))
    }

    fn classify(&self, matched: DescriptionMatch) -> DescriptionGuidance {
        if matched.confidence >= self.confidence_threshold {
            if let Some(guidance) = matched.guidance {
                return DescriptionGuidance::Match(guidance);
            }
        }
        match matched.best_match {
            Some(category) => DescriptionGuidance::Suggestion(category),
            None => DescriptionGuidance::NoMatch,
        }
    }
}
