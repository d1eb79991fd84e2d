use std::sync::Arc;

use tokio::task::JoinHandle;

use super::ports::{GitHubClientTrait, GitHubError};

/// Scopes the proxy needs for the repository and audit-log endpoints
pub const REQUIRED_SCOPES: [&str; 2] = ["repo", "admin:org"];

/// What the boot-time token check learned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenReport {
    pub login: String,
    pub scopes: Vec<String>,
    pub missing_scopes: Vec<&'static str>,
}

pub fn missing_scopes(scopes: &[String]) -> Vec<&'static str> {
    REQUIRED_SCOPES
        .into_iter()
        .filter(|required| !scopes.iter().any(|scope| scope == *required))
        .collect()
}

/// Authenticate with the configured token and inspect its scopes.
pub async fn check_token(client: &dyn GitHubClientTrait) -> Result<TokenReport, GitHubError> {
    let user = client.get_authenticated_user().await?;
    tracing::info!("GitHub token is valid");
    tracing::info!("Authenticated as: {}", user.login);

    let scopes = client.get_user_scopes().await?;
    tracing::info!(?scopes, "Token scopes");

    let missing_scopes = missing_scopes(&scopes);
    for scope in &missing_scopes {
        tracing::warn!("Warning: Token missing '{}' scope", scope);
    }

    Ok(TokenReport {
        login: user.login,
        scopes,
        missing_scopes,
    })
}

/// Run the token check in the background.
///
/// The outcome is only logged; failures never stop the server.
pub fn spawn_token_validation(client: Arc<dyn GitHubClientTrait>) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!("Testing GitHub token...");
        if let Err(e) = check_token(client.as_ref()).await {
            tracing::error!(error = %e, "Error validating GitHub token");
        }
    })
}
