use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================
// Error bodies
// ============================================

/// Error body returned by the organization endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Upstream error message, only present for unclassified failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Error body returned by the token check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenErrorResponse {
    /// Always `false`
    pub valid: bool,
    pub error: String,
    pub details: String,
}

// ============================================
// Token check
// ============================================

/// Result of validating the configured GitHub token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenStatusResponse {
    pub valid: bool,
    /// Login of the account that owns the token
    pub user: String,
    /// Scopes granted to the token, in header order
    pub scopes: Vec<String>,
    /// `null` unless `GITHUB_ORG` is configured
    pub org_access: Option<OrgAccessResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrgAccessResponse {
    pub org: String,
    pub access: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================
// Relayed upstream records
// ============================================
//
// Both endpoints relay the upstream JSON untouched. These types document the
// fields the display shell relies on and give consumers a typed view.

/// Repository record as returned by `GET /orgs/{org}/repos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Repository {
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub updated_at: Option<String>,
}

/// Audit-log event as returned by `GET /orgs/{org}/audit-log`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuditLogEntry {
    pub action: String,
    pub actor: Option<String>,
    /// Milliseconds since the Unix epoch
    pub created_at: Option<i64>,
}
