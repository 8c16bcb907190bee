//! Shared HTTP client for network-backed collaborators

use reqwest::Client as ReqwestClient;
use std::time::Duration;

/// Configuration for a backend service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base service URL (e.g., "https://api.skillforge.ai")
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("SkillForge/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ServiceConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Thin wrapper over a configured reqwest client
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: ReqwestClient,
    config: ServiceConfig,
}

impl ServiceClient {
    /// Build a client from configuration
    pub fn new(config: ServiceConfig) -> Result<Self, reqwest::Error> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Absolute URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// The underlying HTTP client
    pub fn http(&self) -> &ReqwestClient {
        &self.client
    }
}
