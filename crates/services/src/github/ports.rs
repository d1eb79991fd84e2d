use async_trait::async_trait;
use serde::Deserialize;

#[cfg(any(test, feature = "test-mocks"))]
use mockall::automock;

/// Error type for upstream GitHub operations.
///
/// Built once at the client boundary from the upstream HTTP status, so callers
/// match on a closed set instead of inspecting status codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GitHubError {
    #[error("{message}")]
    NotFound { message: String },
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("GitHub request failed: {0}")]
    Transport(String),
    #[error("GitHub response could not be decoded: {0}")]
    InvalidResponse(String),
}

impl GitHubError {
    /// Classify a non-success upstream status
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            404 => GitHubError::NotFound { message },
            401 => GitHubError::Unauthorized { message },
            _ => GitHubError::Api { status, message },
        }
    }

    /// Upstream HTTP status, if the failure came from an HTTP response
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::NotFound { .. } => Some(404),
            GitHubError::Unauthorized { .. } => Some(401),
            GitHubError::Api { status, .. } => Some(*status),
            GitHubError::Transport(_) | GitHubError::InvalidResponse(_) => None,
        }
    }
}

/// The authenticated account behind the configured token
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticatedUser {
    pub login: String,
}

/// Result of probing read access to an organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgAccess {
    pub org: String,
    pub access: bool,
    pub error: Option<String>,
}

/// Outcome of a successful token check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCheck {
    pub login: String,
    pub scopes: Vec<String>,
    /// `None` when no organization is configured for probing
    pub org_access: Option<OrgAccess>,
}

/// Upstream call shapes used by the proxy.
///
/// Repository and audit-log payloads stay `serde_json::Value` so every upstream
/// field is relayed untouched.
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
#[async_trait]
pub trait GitHubClientTrait: Send + Sync {
    /// `GET /orgs/{org}/repos`
    async fn list_org_repositories(
        &self,
        org: &str,
        sort: &str,
        per_page: u32,
    ) -> Result<Vec<serde_json::Value>, GitHubError>;

    /// `GET /orgs/{org}/audit-log`
    async fn get_org_audit_log(
        &self,
        org: &str,
        per_page: u32,
    ) -> Result<serde_json::Value, GitHubError>;

    /// `GET /user`
    async fn get_authenticated_user(&self) -> Result<AuthenticatedUser, GitHubError>;

    /// `GET /user`, reading the `x-oauth-scopes` response header
    async fn get_user_scopes(&self) -> Result<Vec<String>, GitHubError>;

    /// `GET /orgs/{org}`
    async fn get_organization(&self, org: &str) -> Result<serde_json::Value, GitHubError>;
}

#[cfg_attr(any(test, feature = "test-mocks"), automock)]
#[async_trait]
pub trait GitHubServiceTrait: Send + Sync {
    /// Repositories of the configured organization, most recently updated first
    async fn list_repositories(&self) -> Result<Vec<serde_json::Value>, GitHubError>;

    /// Raw audit-log payload of the configured organization
    async fn fetch_audit_log(&self) -> Result<serde_json::Value, GitHubError>;

    /// Confirm the token authenticates and report its scopes and org access
    async fn test_token(&self) -> Result<TokenCheck, GitHubError>;
}
