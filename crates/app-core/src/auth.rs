//! Identity service for SkillForge
//!
//! This module defines the login collaborator: a request of
//! `{identifier, secret}` answered with a [`User`] record or an [`AuthError`].
//! The mock implementation accepts any credentials and returns a fixed
//! learner profile.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::{ServiceClient, ServiceConfig};
use crate::user::{User, UserRole};

/// Authentication error types
#[derive(Debug, Error)]
pub enum AuthError {
    /// Identifier/secret pair was rejected
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The identity service could not be reached or answered unexpectedly
    #[error("Network error: {0}")]
    NetworkFailure(String),

    /// Too many attempts
    #[error("Too many login attempts, try again later")]
    RateLimited,
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::NetworkFailure(e.to_string())
    }
}

/// Result type for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Login credentials
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// User identifier (email)
    pub identifier: String,
    /// Password
    pub secret: String,
}

impl Credentials {
    /// Create credentials from an identifier and secret
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), secret: secret.into() }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Login capability
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Verify credentials and return the matching user profile
    async fn authenticate(&self, credentials: &Credentials) -> Result<User>;
}

/// Identity service that accepts any credentials
#[derive(Debug, Clone)]
pub struct MockIdentityService {
    user: User,
}

impl Default for MockIdentityService {
    fn default() -> Self {
        Self { user: Self::demo_user() }
    }
}

impl MockIdentityService {
    /// Create a mock service returning the demo learner
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock service returning a specific user
    pub fn with_user(user: User) -> Self {
        Self { user }
    }

    /// The fixed profile handed out on every login
    pub fn demo_user() -> User {
        User {
            id: "1".to_string(),
            name: "Alex Johnson".to_string(),
            email: "alex@skillforge.ai".to_string(),
            avatar: None,
            role: UserRole::Student,
            enrolled_courses: 8,
            completed_courses: 5,
            joined_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or(NaiveDate::MIN),
        }
    }
}

#[async_trait]
impl IdentityService for MockIdentityService {
    async fn authenticate(&self, credentials: &Credentials) -> Result<User> {
        tracing::debug!(identifier = %credentials.identifier, "mock login accepted");
        Ok(self.user.clone())
    }
}

/// Identity service backed by `POST /auth/login`
#[derive(Debug, Clone)]
pub struct HttpIdentityService {
    client: ServiceClient,
}

impl HttpIdentityService {
    /// Create a new HTTP identity service
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Ok(Self { client: ServiceClient::new(config)? })
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn authenticate(&self, credentials: &Credentials) -> Result<User> {
        let response = self
            .client
            .http()
            .post(self.client.url("/auth/login"))
            .json(credentials)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<User>().await?),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::InvalidCredentials),
            StatusCode::TOO_MANY_REQUESTS => Err(AuthError::RateLimited),
            status => Err(AuthError::NetworkFailure(format!(
                "unexpected status {}",
                status.as_u16()
            ))),
        }
    }
}
