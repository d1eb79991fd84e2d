use api::{build_app, init_github_services, init_tracing};
use config::{ApiConfig, ConfigError, LoggingConfig};
use services::github::spawn_token_validation;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply
    let _ = dotenvy::dotenv();

    // Logging comes first so configuration errors are reported through it
    init_tracing(&LoggingConfig::from_env());

    let config = ApiConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        if matches!(e, ConfigError::MissingVar { name: "GITHUB_TOKEN" }) {
            tracing::error!("Application cannot start without a GitHub token. Exiting.");
        } else {
            tracing::error!("Application cannot start. Exiting.");
        }
        std::process::exit(1);
    });

    let components = init_github_services(&config.github)?;
    let app = build_app(components.app_state);

    let bind_address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    tracing::info!(
        address = %bind_address,
        "Server running at http://localhost:{}",
        config.server.port
    );
    tracing::info!("API Endpoints:");
    tracing::info!("  - GET /api/repos (Organization repositories)");
    tracing::info!("  - GET /api/audit-logs (Organization audit log)");
    tracing::info!("  - GET /api/test-token (Token check)");

    // Advisory only: the server is already accepting connections
    spawn_token_validation(components.client.clone());

    axum::serve(listener, app).await?;
    Ok(())
}
