//! Payload definitions for every event kind.
//!
//! Each payload carries only the fields needed to reconstruct its effect on
//! a projection. Credential material is stored hex-encoded; events never
//! carry plaintext passwords.

use serde::{Deserialize, Serialize};
use userd_id::UserId;

/// Role a user can hold. Only [`Role::Admin`] has fold-time significance
/// beyond being recorded on the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Editor => write!(f, "EDITOR"),
            Role::Viewer => write!(f, "VIEWER"),
        }
    }
}

/// A one-time password was issued that permits creating the first admin
/// account. Replaces any previously active creation password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialAdminCreationPasswordCreated {
    /// Hex-encoded salted password digest.
    pub password_hash: String,

    /// Hex-encoded salt used for the digest.
    pub salt: String,
}

/// A user account was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreated {
    pub id: UserId,
    pub display_name: String,
    pub email: String,
}

/// Password login was configured for an existing user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordLoginConfigured {
    pub user_id: UserId,

    /// Hex-encoded salted password digest.
    pub password_hash: String,

    /// Hex-encoded salt used for the digest.
    pub salt: String,
}

/// A role was assigned to an existing user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssigned {
    pub user_id: UserId,
    pub role: Role,
}
