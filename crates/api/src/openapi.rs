use crate::models::*;
use crate::routes::health::HealthResponse;
use utoipa::OpenApi;

/// OpenAPI documentation configuration
#[derive(OpenApi)]
#[openapi(
    info(
        title = "GitHub Org Proxy",
        description = "Read-only proxy in front of the GitHub REST API for a single organization.\n\nCallers are not authenticated; every upstream call uses the token configured on the server.",
        version = "1.0.0",
        license(
            name = "MIT",
        )
    ),
    paths(
        crate::routes::github::list_repositories,
        crate::routes::github::list_audit_logs,
        crate::routes::github::test_token,
        crate::routes::health::health_check,
    ),
    components(
        schemas(
            Repository, AuditLogEntry,
            TokenStatusResponse, OrgAccessResponse,
            ErrorResponse, TokenErrorResponse,
            HealthResponse,
        ),
    ),
    tags(
        (name = "GitHub", description = "Organization data relayed from GitHub"),
        (name = "Health", description = "Liveness"),
    )
)]
pub struct ApiDoc;
