//! Initial admin creation password projection.
//!
//! At most one creation password is active at a time. It is set by
//! `InitialAdminCreationPasswordCreated` and cleared once any user is
//! assigned the ADMIN role; the clearing is one-directional and only a
//! fresh creation event can activate a password again.

use serde::{Deserialize, Serialize};
use userd_events::{Event, Role};

use super::users::PasswordCredential;
use super::Projection;

/// The currently active admin creation password, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialAdminCreationPasswordProjection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<PasswordCredential>,
}

impl InitialAdminCreationPasswordProjection {
    /// Whether a creation password is currently active.
    pub fn is_active(&self) -> bool {
        self.credential.is_some()
    }
}

impl Projection for InitialAdminCreationPasswordProjection {
    const NAME: &'static str = "initial_admin_creation_password";
    const SNAPSHOT_TABLE: &'static str = "initial_admin_creation_password_snapshots";

    fn apply(&mut self, event: &Event) {
        match event {
            Event::InitialAdminCreationPasswordCreated(e) => {
                self.credential = Some(PasswordCredential {
                    hash: e.password_hash.clone(),
                    salt: e.salt.clone(),
                });
            }
            Event::RoleAssigned(e) => {
                if e.role == Role::Admin {
                    self.credential = None;
                }
            }
            Event::UserCreated(_) | Event::PasswordLoginConfigured(_) => {}
        }
    }
}
