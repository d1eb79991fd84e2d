pub mod conversions;
pub mod models;
pub mod openapi;
pub mod routes;

use crate::{
    openapi::ApiDoc,
    routes::{
        github::{list_audit_logs, list_repositories, test_token, GitHubAppState},
        health::health_check,
    },
};
use axum::{routing::get, Router};
use config::{GitHubConfig, LoggingConfig};
use services::github::{GitHubClient, GitHubClientTrait, GitHubError, GitHubServiceImpl};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

/// Upstream components shared by the routes and the boot-time token check
pub struct GitHubComponents {
    pub client: Arc<dyn GitHubClientTrait>,
    pub app_state: GitHubAppState,
}

/// Initialize the GitHub client and the service built on it
pub fn init_github_services(config: &GitHubConfig) -> Result<GitHubComponents, GitHubError> {
    let client = Arc::new(GitHubClient::new(config)?) as Arc<dyn GitHubClientTrait>;
    Ok(init_github_services_with_client(client, config))
}

/// Initialize the service over an existing client (used by tests with a mock client)
pub fn init_github_services_with_client(
    client: Arc<dyn GitHubClientTrait>,
    config: &GitHubConfig,
) -> GitHubComponents {
    let github_service = Arc::new(GitHubServiceImpl::new(
        client.clone(),
        config.organization.clone(),
        config.org_override.clone(),
    ));

    if let Some(org) = &config.org_override {
        tracing::info!(org = %org, "Organization access probe enabled");
    }

    GitHubComponents {
        client,
        app_state: GitHubAppState {
            github_service,
            organization: config.organization.clone(),
            org_override: config.org_override.clone(),
        },
    }
}

/// Build the complete application router
pub fn build_app(app_state: GitHubAppState) -> Router {
    Router::new()
        .merge(build_github_routes(app_state.clone()))
        .merge(build_health_routes(app_state))
        .merge(build_openapi_routes())
        // The display shell is served from another origin
        .layer(CorsLayer::permissive())
}

/// Build the proxied GitHub routes
pub fn build_github_routes(app_state: GitHubAppState) -> Router {
    Router::new()
        .route("/api/repos", get(list_repositories))
        .route("/api/audit-logs", get(list_audit_logs))
        .route("/api/test-token", get(test_token))
        .with_state(app_state)
}

pub fn build_health_routes(app_state: GitHubAppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(app_state)
}

/// Build OpenAPI documentation routes
pub fn build_openapi_routes() -> Router {
    Router::new().route(
        "/api/openapi.json",
        get(|| async { axum::Json(ApiDoc::openapi()) }),
    )
}

/// Initialize tracing from the logging configuration
pub fn init_tracing(logging_config: &LoggingConfig) {
    let filter = logging_config.filter_directive();

    // Initialize tracing based on the format specified in config
    match logging_config.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        "compact" => {
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .init();
        }
    }
}
