use crate::models::{
    AuditLogEntry, ErrorResponse, Repository, TokenErrorResponse, TokenStatusResponse,
};
use axum::{extract::State, http::StatusCode, response::Json as ResponseJson};
use services::github::{GitHubError, GitHubServiceTrait};
use std::sync::Arc;
use tracing::{error, info};

pub const ORG_NOT_FOUND: &str = "Organization not found";
pub const INSUFFICIENT_PERMISSIONS: &str = "Invalid GitHub token or insufficient permissions";
pub const INVALID_TOKEN: &str = "Invalid GitHub token";
pub const REPOSITORIES_FAILED: &str = "Failed to fetch repositories";
pub const AUDIT_LOGS_FAILED: &str = "Failed to fetch audit logs";

#[derive(Clone)]
pub struct GitHubAppState {
    pub github_service: Arc<dyn GitHubServiceTrait>,
    /// Organization the service is bound to
    pub organization: String,
    /// Organization checked by the token endpoint (`GITHUB_ORG`)
    pub org_override: Option<String>,
}

/// Map an upstream failure on an organization endpoint to a client response.
///
/// Only unclassified failures echo the upstream message.
pub fn classify_org_error(
    error: &GitHubError,
    operation_message: &str,
) -> (StatusCode, ResponseJson<ErrorResponse>) {
    match error {
        GitHubError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            ResponseJson(ErrorResponse::new(ORG_NOT_FOUND)),
        ),
        GitHubError::Unauthorized { .. } => (
            StatusCode::UNAUTHORIZED,
            ResponseJson(ErrorResponse::new(INSUFFICIENT_PERMISSIONS)),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ResponseJson(ErrorResponse::with_details(
                operation_message,
                error.to_string(),
            )),
        ),
    }
}

/// Any token-check failure means authentication could not be confirmed
pub fn token_error_response(
    error: &GitHubError,
) -> (StatusCode, ResponseJson<TokenErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        ResponseJson(TokenErrorResponse {
            valid: false,
            error: INVALID_TOKEN.to_string(),
            details: error.to_string(),
        }),
    )
}

/// List organization repositories
///
/// Returns up to 100 repositories of the organization, most recently updated
/// first, exactly as GitHub returned them.
#[utoipa::path(
    get,
    path = "/api/repos",
    tag = "GitHub",
    responses(
        (status = 200, description = "Repositories, most recently updated first", body = [Repository]),
        (status = 401, description = "Invalid token or insufficient permissions", body = ErrorResponse),
        (status = 404, description = "Organization not found", body = ErrorResponse),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    )
)]
pub async fn list_repositories(
    State(app_state): State<GitHubAppState>,
) -> Result<ResponseJson<Vec<serde_json::Value>>, (StatusCode, ResponseJson<ErrorResponse>)> {
    info!(organization = %app_state.organization, "Fetching repositories");

    let repos = app_state
        .github_service
        .list_repositories()
        .await
        .map_err(|e| {
            error!(error = %e, status = ?e.status(), "Error fetching repositories");
            classify_org_error(&e, REPOSITORIES_FAILED)
        })?;

    info!(
        organization = %app_state.organization,
        count = repos.len(),
        "Successfully fetched repositories"
    );
    Ok(ResponseJson(repos))
}

/// Fetch the organization audit log
///
/// Returns the first page (100 events) of the audit log as GitHub returned it.
#[utoipa::path(
    get,
    path = "/api/audit-logs",
    tag = "GitHub",
    responses(
        (status = 200, description = "Raw audit-log payload", body = [AuditLogEntry]),
        (status = 401, description = "Invalid token or insufficient permissions", body = ErrorResponse),
        (status = 404, description = "Organization not found", body = ErrorResponse),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    )
)]
pub async fn list_audit_logs(
    State(app_state): State<GitHubAppState>,
) -> Result<ResponseJson<serde_json::Value>, (StatusCode, ResponseJson<ErrorResponse>)> {
    info!(organization = %app_state.organization, "Fetching audit logs");

    let audit_log = app_state
        .github_service
        .fetch_audit_log()
        .await
        .map_err(|e| {
            error!(error = %e, status = ?e.status(), "Error fetching audit logs");
            classify_org_error(&e, AUDIT_LOGS_FAILED)
        })?;

    info!(organization = %app_state.organization, "Successfully fetched audit logs");
    Ok(ResponseJson(audit_log))
}

/// Check the configured token
///
/// Reports the authenticated user, the token scopes and, when `GITHUB_ORG` is
/// set, whether that organization is readable.
#[utoipa::path(
    get,
    path = "/api/test-token",
    tag = "GitHub",
    responses(
        (status = 200, description = "Token is valid", body = TokenStatusResponse),
        (status = 401, description = "Token could not be validated", body = TokenErrorResponse)
    )
)]
pub async fn test_token(
    State(app_state): State<GitHubAppState>,
) -> Result<ResponseJson<TokenStatusResponse>, (StatusCode, ResponseJson<TokenErrorResponse>)> {
    let check = app_state.github_service.test_token().await.map_err(|e| {
        error!(error = %e, "GitHub token check failed");
        token_error_response(&e)
    })?;

    Ok(ResponseJson(check.into()))
}
