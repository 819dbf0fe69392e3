//! Users projection: the account record derived for every created user.

use serde::{Deserialize, Serialize};
use userd_events::{Event, Role};
use userd_id::UserId;

use super::Projection;

/// A salted password digest attached to a user or to the initial admin
/// creation password. Both fields are hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordCredential {
    pub hash: String,
    pub salt: String,
}

/// A user record as derived from the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_login: Option<PasswordCredential>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// All users, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersProjection {
    pub users: Vec<User>,
}

impl UsersProjection {
    /// Look up a user by id.
    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Whether any user holds the ADMIN role.
    pub fn has_admin(&self) -> bool {
        self.users.iter().any(|u| u.role == Some(Role::Admin))
    }

    fn get_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }
}

impl Projection for UsersProjection {
    const NAME: &'static str = "users";
    const SNAPSHOT_TABLE: &'static str = "users_snapshots";

    fn apply(&mut self, event: &Event) {
        match event {
            Event::UserCreated(e) => {
                self.users.push(User {
                    id: e.id,
                    display_name: e.display_name.clone(),
                    email: e.email.clone(),
                    password_login: None,
                    role: None,
                });
            }
            Event::PasswordLoginConfigured(e) => {
                if let Some(user) = self.get_mut(e.user_id) {
                    user.password_login = Some(PasswordCredential {
                        hash: e.password_hash.clone(),
                        salt: e.salt.clone(),
                    });
                }
            }
            Event::RoleAssigned(e) => {
                if let Some(user) = self.get_mut(e.user_id) {
                    user.role = Some(e.role);
                }
            }
            Event::InitialAdminCreationPasswordCreated(_) => {}
        }
    }
}
