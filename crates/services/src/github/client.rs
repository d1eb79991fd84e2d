use async_trait::async_trait;
use config::GitHubConfig;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    StatusCode,
};
use serde::de::DeserializeOwned;

use super::ports::{AuthenticatedUser, GitHubClientTrait, GitHubError};

const API_VERSION: &str = "2022-11-28";
const SCOPES_HEADER: &str = "x-oauth-scopes";

/// HTTP client for the GitHub REST API
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    /// Create a new GitHub client
    ///
    /// No request timeout is set; the transport defaults apply.
    pub fn new(config: &GitHubConfig) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| GitHubError::Transport(format!("Failed to build HTTP client: {e}")))?;

        tracing::info!(
            base_url = %config.api_url,
            organization = %config.organization,
            "GitHub client initialized"
        );

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Build an authenticated GET request
    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.get(url).bearer_auth(&self.token)
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, GitHubError> {
        let response = builder
            .send()
            .await
            .map_err(|e| GitHubError::Transport(e.to_string()))?;

        Self::check_response(response).await
    }

    /// Check response status and turn failures into a classified error
    async fn check_response(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GitHubError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());
        let message = error_message(status, &body);

        tracing::debug!(status = status.as_u16(), %message, "GitHub API returned an error");
        Err(GitHubError::from_status(status.as_u16(), message))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GitHubError> {
        let response = self.send(self.get(path).query(query)).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| GitHubError::InvalidResponse(e.to_string()))
    }
}

/// Prefer the `message` field of a GitHub error body, then the reason phrase
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_string))
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Split an `x-oauth-scopes` value on `", "`.
///
/// An absent or empty header yields no scopes.
pub fn parse_scopes(header: Option<&str>) -> Vec<String> {
    match header {
        Some(value) if !value.is_empty() => value.split(", ").map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

#[async_trait]
impl GitHubClientTrait for GitHubClient {
    async fn list_org_repositories(
        &self,
        org: &str,
        sort: &str,
        per_page: u32,
    ) -> Result<Vec<serde_json::Value>, GitHubError> {
        self.get_json(
            &format!("/orgs/{org}/repos"),
            &[("sort", sort.to_string()), ("per_page", per_page.to_string())],
        )
        .await
    }

    async fn get_org_audit_log(
        &self,
        org: &str,
        per_page: u32,
    ) -> Result<serde_json::Value, GitHubError> {
        self.get_json(
            &format!("/orgs/{org}/audit-log"),
            &[("per_page", per_page.to_string())],
        )
        .await
    }

    async fn get_authenticated_user(&self) -> Result<AuthenticatedUser, GitHubError> {
        self.get_json("/user", &[]).await
    }

    async fn get_user_scopes(&self) -> Result<Vec<String>, GitHubError> {
        let response = self.send(self.get("/user")).await?;
        let header = response
            .headers()
            .get(SCOPES_HEADER)
            .and_then(|value| value.to_str().ok());

        Ok(parse_scopes(header))
    }

    async fn get_organization(&self, org: &str) -> Result<serde_json::Value, GitHubError> {
        self.get_json(&format!("/orgs/{org}"), &[]).await
    }
}
