//! Auth-related types shared between the client SDK and the app core
//!
//! Request/response DTOs for the external auth provider. The provider
//! owns credentials and sessions; these types only describe the wire
//! shapes consumed by this workspace.

use crate::models::profile::ProfileSeed;
use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Sign-in request (password grant)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Sign-up request with the profile seed stored as user metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub data: ProfileSeed,
}

/// Password update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordUpdateRequest {
    pub password: String,
}

/// Password reset request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Authenticated identity as reported by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime in seconds, when the provider reports one
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

impl Session {
    /// Identity that owns this session
    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}
