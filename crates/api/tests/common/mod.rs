#![allow(dead_code)]

use api::{build_app, init_github_services, init_github_services_with_client};
use config::GitHubConfig;
use services::github::{AuthenticatedUser, GitHubError, MockGitHubClientTrait};
use std::sync::Arc;

pub const TEST_TOKEN: &str = "ghp_test_token";
pub const TEST_LOGIN: &str = "octocat";
pub const TEST_ORG_OVERRIDE: &str = "octo-org";

/// Helper function to create a test GitHub configuration
pub fn test_github_config(api_url: &str, org_override: Option<&str>) -> GitHubConfig {
    GitHubConfig {
        token: TEST_TOKEN.to_string(),
        organization: config::ORGANIZATION.to_string(),
        org_override: org_override.map(str::to_string),
        api_url: api_url.to_string(),
        user_agent: "github-org-proxy-tests".to_string(),
    }
}

fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::level_filters::LevelFilter::DEBUG)
        .try_init();
}

/// Setup a test server whose upstream calls go to a mock client
pub fn setup_test_server(client: MockGitHubClientTrait) -> axum_test::TestServer {
    setup_test_server_with_org(client, None)
}

/// Same as `setup_test_server`, with `GITHUB_ORG` set to `org_override`
pub fn setup_test_server_with_org(
    client: MockGitHubClientTrait,
    org_override: Option<&str>,
) -> axum_test::TestServer {
    init_test_tracing();

    let config = test_github_config("http://unused.invalid", org_override);
    let components = init_github_services_with_client(Arc::new(client), &config);

    axum_test::TestServer::new(build_app(components.app_state))
        .expect("Failed to create test server")
}

/// Setup a test server wired to a real GitHub client pointed at `api_url`
pub fn setup_test_server_for_upstream(
    api_url: &str,
    org_override: Option<&str>,
) -> axum_test::TestServer {
    init_test_tracing();

    let config = test_github_config(api_url, org_override);
    let components = init_github_services(&config).expect("Failed to build GitHub client");

    axum_test::TestServer::new(build_app(components.app_state))
        .expect("Failed to create test server")
}

/// An upstream failure with the given HTTP status
pub fn upstream_error(status: u16, message: &str) -> GitHubError {
    GitHubError::from_status(status, message)
}

/// Expect a successful identity lookup followed by a scope lookup
pub fn expect_valid_token(client: &mut MockGitHubClientTrait, scopes: &[&str]) {
    let scopes: Vec<String> = scopes.iter().map(|s| s.to_string()).collect();

    client.expect_get_authenticated_user().times(1).returning(|| {
        Ok(AuthenticatedUser {
            login: TEST_LOGIN.to_string(),
        })
    });
    client
        .expect_get_user_scopes()
        .times(1)
        .returning(move || Ok(scopes.clone()));
}

pub fn repository(name: &str, updated_at: &str) -> serde_json::Value {
    serde_json::json!({
        "id": 1296269,
        "name": name,
        "full_name": format!("amvirdev/{name}"),
        "html_url": format!("https://github.com/amvirdev/{name}"),
        "description": format!("{name} description"),
        "private": false,
        "updated_at": updated_at
    })
}
