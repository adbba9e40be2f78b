//! Scripted in-memory backend double shared by the integration tests.
//! Counts every remote call so tests can assert that local failures never
//! reach the network.

// Each test binary uses a different slice of this module.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use mediation_portal::{
    BackendClient, BackendHandle, CacheStore, CategoryType, DescriptionMatch, DisputeCategory,
    DisputeSpecificGuidance, DoAndDont, GuidanceResult, RecentDevelopment, RecentDevelopmentInput,
    RemoteError, UserProfile, UserRole,
};

pub fn category(kind: CategoryType) -> DisputeCategory {
    DisputeCategory {
        category_type_enum: kind,
        title: kind.label().to_string(),
        description: format!("Disputes handled under {}", kind.label()),
        is_mediation_suitable: kind != CategoryType::Consumer,
        mediation_reason: "Preserves the relationship between the parties.".to_string(),
        legal_advice: "Consult a qualified lawyer for statutory remedies.".to_string(),
    }
}

pub fn guidance(kind: CategoryType) -> GuidanceResult {
    GuidanceResult {
        category: category(kind),
        full_dispute: DisputeSpecificGuidance {
            next_steps: vec![
                "Write down what happened and when".to_string(),
                "Contact the other party in writing".to_string(),
                "Approach a mediation centre".to_string(),
            ],
            dos_and_donts: DoAndDont {
                dos: vec!["Keep copies of all documents".to_string()],
                donts: vec!["Do not sign anything under pressure".to_string()],
            },
            legal_information: "The Mediation Act, 2023 governs institutional mediation."
                .to_string(),
            mediation_suitability_guidance: "Well suited when both parties want to stay on terms."
                .to_string(),
            context_specific_examples: vec![
                "A rent escalation disagreement".to_string(),
                "A partnership dissolution".to_string(),
            ],
        },
    }
}

pub fn development(id: u64, date: i64, title: &str) -> RecentDevelopment {
    RecentDevelopment {
        id,
        title: title.to_string(),
        date,
        description: format!("Details of {}", title),
        url: format!("https://example.com/news/{}", id),
    }
}

/// In-memory stand-in for the remote service. Reads and writes behave like
/// the real backend (assigned ids, not-found on unknown ids); knobs let a
/// test misbehave on purpose.
pub struct StubBackend {
    pub categories: Vec<DisputeCategory>,
    pub guidance: HashMap<CategoryType, GuidanceResult>,
    pub developments: Mutex<Vec<RecentDevelopment>>,
    next_id: AtomicU64,
    pub role: UserRole,
    pub profile: Mutex<Option<UserProfile>>,
    pub description_response: Mutex<DescriptionMatch>,
    calls: AtomicUsize,
    fail_writes: AtomicBool,
    misroute_guidance: AtomicBool,
}

impl StubBackend {
    pub fn new() -> Self {
        let mut guidance_map = HashMap::new();
        guidance_map.insert(CategoryType::Family, guidance(CategoryType::Family));
        guidance_map.insert(CategoryType::Money, guidance(CategoryType::Money));
        Self {
            categories: CategoryType::ALL.iter().map(|c| category(*c)).collect(),
            guidance: guidance_map,
            developments: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            role: UserRole::Admin,
            profile: Mutex::new(None),
            description_response: Mutex::new(DescriptionMatch {
                confidence: 0.0,
                guidance: None,
                best_match: None,
            }),
            calls: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
            misroute_guidance: AtomicBool::new(false),
        }
    }

    pub fn seed_development(&self, date: i64, title: &str) -> RecentDevelopment {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let dev = development(id, date, title);
        self.developments.lock().unwrap().push(dev.clone());
        dev
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    /// Make guidance lookups answer with the wrong category.
    pub fn set_misroute_guidance(&self, on: bool) {
        self.misroute_guidance.store(on, Ordering::SeqCst);
    }

    pub fn set_description_response(&self, response: DescriptionMatch) {
        *self.description_response.lock().unwrap() = response;
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn write_failure(&self) -> Option<RemoteError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Some(RemoteError::Status {
                status: 500,
                message: "injected failure".to_string(),
            })
        } else {
            None
        }
    }
}

#[async_trait]
impl BackendClient for StubBackend {
    async fn get_all_categories(&self) -> Result<Vec<DisputeCategory>, RemoteError> {
        self.record_call();
        Ok(self.categories.clone())
    }

    async fn get_guidance_by_category(
        &self,
        category: CategoryType,
    ) -> Result<Option<GuidanceResult>, RemoteError> {
        self.record_call();
        if self.misroute_guidance.load(Ordering::SeqCst) {
            let other = if category == CategoryType::Family {
                CategoryType::Money
            } else {
                CategoryType::Family
            };
            return Ok(Some(guidance(other)));
        }
        Ok(self.guidance.get(&category).cloned())
    }

    async fn get_guidance_by_description(
        &self,
        _description: &str,
    ) -> Result<DescriptionMatch, RemoteError> {
        self.record_call();
        Ok(self.description_response.lock().unwrap().clone())
    }

    async fn get_all_developments(&self) -> Result<Vec<RecentDevelopment>, RemoteError> {
        self.record_call();
        Ok(self.developments.lock().unwrap().clone())
    }

    async fn add_development(
        &self,
        input: &RecentDevelopmentInput,
    ) -> Result<RecentDevelopment, RemoteError> {
        self.record_call();
        if let Some(err) = self.write_failure() {
            return Err(err);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let dev = RecentDevelopment {
            id,
            title: input.title.clone(),
            date: input.date,
            description: input.description.clone(),
            url: input.url.clone(),
        };
        self.developments.lock().unwrap().push(dev.clone());
        Ok(dev)
    }

    async fn edit_development(
        &self,
        id: u64,
        input: &RecentDevelopmentInput,
    ) -> Result<RecentDevelopment, RemoteError> {
        self.record_call();
        if let Some(err) = self.write_failure() {
            return Err(err);
        }
        let mut developments = self.developments.lock().unwrap();
        let dev = developments
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(RemoteError::NotFound(id))?;
        dev.title = input.title.clone();
        dev.date = input.date;
        dev.description = input.description.clone();
        dev.url = input.url.clone();
        Ok(dev.clone())
    }

    async fn get_caller_user_role(&self) -> Result<UserRole, RemoteError> {
        self.record_call();
        Ok(self.role)
    }

    async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>, RemoteError> {
        self.record_call();
        Ok(self.profile.lock().unwrap().clone())
    }

    async fn save_caller_user_profile(&self, profile: &UserProfile) -> Result<(), RemoteError> {
        self.record_call();
        *self.profile.lock().unwrap() = Some(profile.clone());
        Ok(())
    }

    async fn is_caller_admin(&self) -> Result<bool, RemoteError> {
        self.record_call();
        Ok(self.role.is_admin())
    }

    async fn get_user_profile(&self, _principal: &str) -> Result<Option<UserProfile>, RemoteError> {
        self.record_call();
        Ok(self.profile.lock().unwrap().clone())
    }

    async fn assign_user_role(&self, _principal: &str, _role: UserRole) -> Result<(), RemoteError> {
        self.record_call();
        Ok(())
    }
}

/// A connected handle + cache pair, with the stub kept around for
/// assertions.
pub fn wired() -> (Arc<StubBackend>, Arc<BackendHandle>, Arc<CacheStore>) {
    let stub = Arc::new(StubBackend::new());
    let handle = Arc::new(BackendHandle::with_client(stub.clone()));
    let cache = Arc::new(CacheStore::new());
    (stub, handle, cache)
}
