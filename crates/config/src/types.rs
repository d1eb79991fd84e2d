use std::{collections::HashMap, env};

use crate::ConfigError;

/// The organization whose repositories and audit log are proxied.
pub const ORGANIZATION: &str = "amvirdev";

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub github: GitHubConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables
    ///
    /// Logging is configured separately through [`LoggingConfig::from_env`] so
    /// that errors here can already be logged.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerConfig::from_lookup(&lookup)?,
            github: GitHubConfig::from_lookup(&lookup)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let port = match lookup("PORT").filter(|value| !value.trim().is_empty()) {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidVar {
                name: "PORT",
                value,
                reason: "must be a valid port number",
            })?,
            None => 3001,
        };

        Ok(Self {
            host: lookup("HOST")
                .filter(|host| !host.trim().is_empty())
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Upstream GitHub access
#[derive(Clone)]
pub struct GitHubConfig {
    /// Personal access token used for every upstream call
    pub token: String,
    /// Organization queried by the repository and audit-log endpoints
    pub organization: String,
    /// Organization probed by the token check (`GITHUB_ORG`)
    pub org_override: Option<String>,
    /// Base URL of the REST API, without trailing slash
    pub api_url: String,
    pub user_agent: String,
}

impl GitHubConfig {
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("GITHUB_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingVar {
                name: "GITHUB_TOKEN",
            })?;

        let org_override = lookup("GITHUB_ORG").filter(|org| !org.trim().is_empty());

        let api_url = lookup("GITHUB_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());

        Ok(Self {
            token,
            organization: ORGANIZATION.to_string(),
            org_override,
            api_url,
            user_agent: default_user_agent(),
        })
    }
}

// Keeps the token out of Debug output.
impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("token", &"<redacted>")
            .field("organization", &self.organization)
            .field("org_override", &self.org_override)
            .field("api_url", &self.api_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn default_user_agent() -> String {
    format!("github-org-proxy/{}", env!("CARGO_PKG_VERSION"))
}

/// Logging Configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub modules: HashMap<String, String>,
}

impl LoggingConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut modules = HashMap::new();

        // Load module-specific log levels
        if let Some(level) = lookup("LOG_MODULE_API") {
            modules.insert("api".to_string(), level);
        }
        if let Some(level) = lookup("LOG_MODULE_SERVICES") {
            modules.insert("services".to_string(), level);
        }

        Self {
            level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format: lookup("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string()),
            modules,
        }
    }

    /// Filter directive understood by `tracing_subscriber::EnvFilter`
    pub fn filter_directive(&self) -> String {
        let mut filter = self.level.clone();

        let mut modules: Vec<_> = self.modules.iter().collect();
        modules.sort();
        for (module, level) in modules {
            filter.push_str(&format!(",{module}={level}"));
        }

        filter
    }
}
