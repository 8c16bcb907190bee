//! Session state management
//!
//! A single mutable slot holding the signed-in user, if any. Logging in asks
//! the configured [`IdentityService`]; logging out only clears the slot.
//! Last write wins and reads always see the latest committed value.

use app_core::auth::{AuthError, Credentials, IdentityService};
use app_core::user::User;
use parking_lot::RwLock;
use std::sync::Arc;

/// Result type for session operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Session state manager
///
/// Cloning is cheap and every clone observes the same slot.
#[derive(Clone)]
pub struct SessionState {
    identity: Arc<dyn IdentityService>,
    user: Arc<RwLock<Option<User>>>,
}

impl SessionState {
    /// Create a signed-out session backed by an identity service
    pub fn new(identity: Arc<dyn IdentityService>) -> Self {
        Self { identity, user: Arc::new(RwLock::new(None)) }
    }

    /// Sign in
    ///
    /// On success the returned user becomes the current user. On failure
    /// the slot is left untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        match self.identity.authenticate(credentials).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, role = %user.role, "signed in");
                *self.user.write() = Some(user.clone());
                Ok(user)
            }
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                Err(e)
            }
        }
    }

    /// Sign out
    pub fn logout(&self) {
        if self.user.write().take().is_some() {
            tracing::info!("signed out");
        }
    }

    /// The current user, if signed in
    pub fn current_user(&self) -> Option<User> {
        self.user.read().clone()
    }

    /// Whether a user is signed in
    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState").field("user", &*self.user.read()).finish()
    }
}
