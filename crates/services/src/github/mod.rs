pub mod client;
pub mod ports;
pub mod validation;

use std::sync::Arc;

use async_trait::async_trait;
pub use client::{parse_scopes, GitHubClient};
#[cfg(any(test, feature = "test-mocks"))]
pub use ports::{MockGitHubClientTrait, MockGitHubServiceTrait};
pub use ports::{
    AuthenticatedUser, GitHubClientTrait, GitHubError, GitHubServiceTrait, OrgAccess, TokenCheck,
};
pub use validation::{check_token, spawn_token_validation, TokenReport, REQUIRED_SCOPES};

/// Upstream sort order for repository listings
pub const REPOSITORY_SORT: &str = "updated";
/// Single fixed page size for every listing
pub const PAGE_SIZE: u32 = 100;

pub struct GitHubServiceImpl {
    client: Arc<dyn GitHubClientTrait>,
    organization: String,
    org_override: Option<String>,
}

impl GitHubServiceImpl {
    pub fn new(
        client: Arc<dyn GitHubClientTrait>,
        organization: String,
        org_override: Option<String>,
    ) -> Self {
        Self {
            client,
            organization,
            org_override,
        }
    }

    /// Probe an organization; a failure is recorded, never returned
    async fn probe_org_access(&self, org: &str) -> OrgAccess {
        match self.client.get_organization(org).await {
            Ok(_) => OrgAccess {
                org: org.to_string(),
                access: true,
                error: None,
            },
            Err(e) => {
                tracing::warn!(org, error = %e, "Organization access check failed");
                OrgAccess {
                    org: org.to_string(),
                    access: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[async_trait]
impl GitHubServiceTrait for GitHubServiceImpl {
    async fn list_repositories(&self) -> Result<Vec<serde_json::Value>, GitHubError> {
        self.client
            .list_org_repositories(&self.organization, REPOSITORY_SORT, PAGE_SIZE)
            .await
    }

    async fn fetch_audit_log(&self) -> Result<serde_json::Value, GitHubError> {
        self.client
            .get_org_audit_log(&self.organization, PAGE_SIZE)
            .await
    }

    async fn test_token(&self) -> Result<TokenCheck, GitHubError> {
        let user = self.client.get_authenticated_user().await?;
        let scopes = self.client.get_user_scopes().await?;

        let org_access = match &self.org_override {
            Some(org) => Some(self.probe_org_access(org).await),
            None => None,
        };

        Ok(TokenCheck {
            login: user.login,
            scopes,
            org_access,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service(client: MockGitHubClientTrait, org_override: Option<&str>) -> GitHubServiceImpl {
        GitHubServiceImpl::new(
            Arc::new(client),
            "amvirdev".to_string(),
            org_override.map(str::to_string),
        )
    }

    fn expect_valid_token(client: &mut MockGitHubClientTrait) {
        client.expect_get_authenticated_user().returning(|| {
            Ok(AuthenticatedUser {
                login: "octocat".to_string(),
            })
        });
        client
            .expect_get_user_scopes()
            .returning(|| Ok(vec!["repo".to_string(), "admin:org".to_string()]));
    }

    #[tokio::test]
    async fn test_list_repositories_uses_fixed_parameters() {
        let mut client = MockGitHubClientTrait::new();
        client
            .expect_list_org_repositories()
            .times(1)
            .withf(|org, sort, per_page| org == "amvirdev" && sort == "updated" && *per_page == 100)
            .returning(|_, _, _| Ok(vec![json!({"name": "b"}), json!({"name": "a"})]));

        let repos = service(client, None).list_repositories().await.unwrap();

        // Upstream order is preserved
        assert_eq!(repos, vec![json!({"name": "b"}), json!({"name": "a"})]);
    }

    #[tokio::test]
    async fn test_fetch_audit_log_passes_body_through() {
        let payload = json!([{"action": "repo.create", "actor": "octocat", "created_at": 1}]);
        let expected = payload.clone();

        let mut client = MockGitHubClientTrait::new();
        client
            .expect_get_org_audit_log()
            .times(1)
            .withf(|org, per_page| org == "amvirdev" && *per_page == 100)
            .returning(move |_, _| Ok(payload.clone()));

        let body = service(client, None).fetch_audit_log().await.unwrap();
        assert_eq!(body, expected);
    }

    #[tokio::test]
    async fn test_token_without_org_override_skips_probe() {
        let mut client = MockGitHubClientTrait::new();
        expect_valid_token(&mut client);
        client.expect_get_organization().never();

        let check = service(client, None).test_token().await.unwrap();

        assert_eq!(check.login, "octocat");
        assert_eq!(check.scopes, vec!["repo", "admin:org"]);
        assert_eq!(check.org_access, None);
    }

    #[tokio::test]
    async fn test_token_with_accessible_org() {
        let mut client = MockGitHubClientTrait::new();
        expect_valid_token(&mut client);
        client
            .expect_get_organization()
            .times(1)
            .withf(|org| org == "octo-org")
            .returning(|_| Ok(json!({"login": "octo-org"})));

        let check = service(client, Some("octo-org")).test_token().await.unwrap();

        assert_eq!(
            check.org_access,
            Some(OrgAccess {
                org: "octo-org".to_string(),
                access: true,
                error: None,
            })
        );
    }

    #[tokio::test]
    async fn test_token_org_probe_failure_is_captured() {
        let mut client = MockGitHubClientTrait::new();
        expect_valid_token(&mut client);
        client.expect_get_organization().returning(|_| {
            Err(GitHubError::NotFound {
                message: "Not Found".to_string(),
            })
        });

        let check = service(client, Some("octo-org")).test_token().await.unwrap();

        assert_eq!(
            check.org_access,
            Some(OrgAccess {
                org: "octo-org".to_string(),
                access: false,
                error: Some("Not Found".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn test_token_fails_when_scope_lookup_fails() {
        let mut client = MockGitHubClientTrait::new();
        client.expect_get_authenticated_user().returning(|| {
            Ok(AuthenticatedUser {
                login: "octocat".to_string(),
            })
        });
        client
            .expect_get_user_scopes()
            .returning(|| Err(GitHubError::Transport("connection reset".to_string())));
        client.expect_get_organization().never();

        let err = service(client, Some("octo-org")).test_token().await.unwrap_err();
        assert!(matches!(err, GitHubError::Transport(_)));
    }
}
