use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::api::client::BackendClient;
use crate::api::models::{
    CategoryType, DescriptionMatch, DisputeCategory, GuidanceResult, RecentDevelopment,
    RecentDevelopmentInput, UserProfile, UserRole,
};
use crate::error::RemoteError;
use crate::utils::normalize_url;

/// JSON-over-HTTP implementation of the backend contract. Endpoints live
/// under `{base}/api/v1/`; an identity token, when present, is sent as a
/// bearer header. Timeout policy is left to the transport and deployment.
pub struct HttpBackendClient {
    http: HttpClient,
    base_api: String,
    token: Option<String>,
}

impl HttpBackendClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_api: Self::base_api(&normalize_url(base_url)),
            token,
        }
    }

    fn base_api(base_url: &str) -> String {
        let trimmed = base_url.trim_end_matches('/');
        if trimmed.ends_with("/api") {
            trimmed.to_string()
        } else {
            format!("{}/api", trimmed)
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base_api, path)
    }

    fn with_auth(&self, mut req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(t) = &self.token {
            req = req.header("Authorization", format!("Bearer {}", t));
        }
        req
    }

    async fn status_error(resp: reqwest::Response) -> RemoteError {
        let status = resp.status().as_u16();
        let message = resp.text().await.unwrap_or_default();
        RemoteError::Status { status, message }
    }

    /// Send a request, failing on any non-success status.
    async fn send_checked(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, RemoteError> {
        let resp = self.with_auth(req).send().await?;
        if !resp.status().is_success() {
            return Err(Self::status_error(resp).await);
        }
        Ok(resp)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, RemoteError> {
        let body = self.send_checked(req).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Like `fetch`, but a 404 or an explicit null body means a legitimate
    /// empty result rather than an error.
    async fn fetch_optional<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<Option<T>, RemoteError> {
        let resp = self.with_auth(req).send().await?;
        if resp.status().as_u16() == 404 {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(Self::status_error(resp).await);
        }
        let body = resp.text().await?;
        Ok(serde_json::from_str::<Option<T>>(&body)?)
    }
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    async fn get_all_categories(&self) -> Result<Vec<DisputeCategory>, RemoteError> {
        self.fetch(self.http.get(self.endpoint("categories"))).await
    }

    async fn get_guidance_by_category(
        &self,
        category: CategoryType,
    ) -> Result<Option<GuidanceResult>, RemoteError> {
        let endpoint = self.endpoint(&format!("guidance/{}", category.as_str()));
        self.fetch_optional(self.http.get(endpoint)).await
    }

    async fn get_guidance_by_description(
        &self,
        description: &str,
    ) -> Result<DescriptionMatch, RemoteError> {
        let body = serde_json::json!({ "description": description });
        self.fetch(self.http.post(self.endpoint("guidance/match")).json(&body))
            .await
    }

    async fn get_all_developments(&self) -> Result<Vec<RecentDevelopment>, RemoteError> {
        self.fetch(self.http.get(self.endpoint("developments"))).await
    }

    async fn add_development(
        &self,
        input: &RecentDevelopmentInput,
    ) -> Result<RecentDevelopment, RemoteError> {
        self.fetch(self.http.post(self.endpoint("developments")).json(input))
            .await
    }

    async fn edit_development(
        &self,
        id: u64,
        input: &RecentDevelopmentInput,
    ) -> Result<RecentDevelopment, RemoteError> {
        let endpoint = self.endpoint(&format!("developments/{}", id));
        match self.fetch(self.http.put(endpoint).json(input)).await {
            Err(RemoteError::Status { status: 404, .. }) => Err(RemoteError::NotFound(id)),
            other => other,
        }
    }

    async fn get_caller_user_role(&self) -> Result<UserRole, RemoteError> {
        self.fetch(self.http.get(self.endpoint("me/role"))).await
    }

    async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>, RemoteError> {
        self.fetch_optional(self.http.get(self.endpoint("me/profile")))
            .await
    }

    async fn save_caller_user_profile(&self, profile: &UserProfile) -> Result<(), RemoteError> {
        self.send_checked(self.http.put(self.endpoint("me/profile")).json(profile))
            .await?;
        Ok(())
    }

    async fn is_caller_admin(&self) -> Result<bool, RemoteError> {
        self.fetch(self.http.get(self.endpoint("me/is-admin"))).await
    }

    async fn get_user_profile(&self, principal: &str) -> Result<Option<UserProfile>, RemoteError> {
        let endpoint = self.endpoint(&format!("users/{}/profile", principal));
        self.fetch_optional(self.http.get(endpoint)).await
    }

    async fn assign_user_role(&self, principal: &str, role: UserRole) -> Result<(), RemoteError> {
        let endpoint = self.endpoint(&format!("users/{}/role", principal));
        self.send_checked(self.http.put(endpoint).json(&role))
            .await?;
        Ok(())
    }
}
