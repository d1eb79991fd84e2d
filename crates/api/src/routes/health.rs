use axum::{extract::State, response::Json as ResponseJson};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::github::GitHubAppState;

/// Proxy status and the organizations it is bound to
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    /// Organization behind `/api/repos` and `/api/audit-logs`
    pub organization: String,
    /// Organization checked by `/api/test-token`, when `GITHUB_ORG` is set
    pub probe_organization: Option<String>,
    pub version: String,
}

/// Liveness endpoint. It never calls GitHub.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Proxy is running", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn health_check(
    State(app_state): State<GitHubAppState>,
) -> ResponseJson<HealthResponse> {
    ResponseJson(HealthResponse {
        status: "ok".to_string(),
        organization: app_state.organization,
        probe_organization: app_state.org_override,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
