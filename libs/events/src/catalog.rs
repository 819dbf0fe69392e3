//! The closed event catalog.
//!
//! [`Event`] is the single tagged union covering every event kind the log
//! can hold. Decoding is an exhaustive match from a stored tag to the
//! variant's schema; a tag outside the catalog is an error, never skipped,
//! because silently dropping an event would corrupt projections invisibly.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::EventError;
use crate::types::{
    InitialAdminCreationPasswordCreated, PasswordLoginConfigured, RoleAssigned, UserCreated,
};

/// All event kind tags as constants.
///
/// These are the exact strings stored in the `event_name` column.
pub mod event_kinds {
    pub const INITIAL_ADMIN_CREATION_PASSWORD_CREATED: &str =
        "InitialAdminCreationPasswordCreated";
    pub const USER_CREATED: &str = "UserCreated";
    pub const PASSWORD_LOGIN_CONFIGURED: &str = "PasswordLoginConfigured";
    pub const ROLE_ASSIGNED: &str = "RoleAssigned";

    /// Every kind in the catalog.
    pub const ALL: &[&str] = &[
        INITIAL_ADMIN_CREATION_PASSWORD_CREATED,
        USER_CREATED,
        PASSWORD_LOGIN_CONFIGURED,
        ROLE_ASSIGNED,
    ];
}

/// A domain event, one variant per kind in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    InitialAdminCreationPasswordCreated(InitialAdminCreationPasswordCreated),
    UserCreated(UserCreated),
    PasswordLoginConfigured(PasswordLoginConfigured),
    RoleAssigned(RoleAssigned),
}

impl Event {
    /// Returns the statically declared tag for this event.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Event::InitialAdminCreationPasswordCreated(_) => {
                event_kinds::INITIAL_ADMIN_CREATION_PASSWORD_CREATED
            }
            Event::UserCreated(_) => event_kinds::USER_CREATED,
            Event::PasswordLoginConfigured(_) => event_kinds::PASSWORD_LOGIN_CONFIGURED,
            Event::RoleAssigned(_) => event_kinds::ROLE_ASSIGNED,
        }
    }

    /// Encodes the payload for storage.
    pub fn encode(&self) -> Result<serde_json::Value, EventError> {
        match self {
            Event::InitialAdminCreationPasswordCreated(p) => encode_payload(p),
            Event::UserCreated(p) => encode_payload(p),
            Event::PasswordLoginConfigured(p) => encode_payload(p),
            Event::RoleAssigned(p) => encode_payload(p),
        }
    }

    /// Decodes a stored (tag, payload) pair back into a typed event.
    ///
    /// Fails with [`EventError::UnknownKind`] for a tag outside the catalog
    /// and [`EventError::Decode`] when the payload does not match the tag's
    /// schema.
    pub fn decode(kind: &str, payload: &serde_json::Value) -> Result<Self, EventError> {
        match kind {
            event_kinds::INITIAL_ADMIN_CREATION_PASSWORD_CREATED => {
                decode_payload(kind, payload).map(Event::InitialAdminCreationPasswordCreated)
            }
            event_kinds::USER_CREATED => decode_payload(kind, payload).map(Event::UserCreated),
            event_kinds::PASSWORD_LOGIN_CONFIGURED => {
                decode_payload(kind, payload).map(Event::PasswordLoginConfigured)
            }
            event_kinds::ROLE_ASSIGNED => decode_payload(kind, payload).map(Event::RoleAssigned),
            other => Err(EventError::UnknownKind(other.to_string())),
        }
    }
}

fn encode_payload<P: Serialize>(payload: &P) -> Result<serde_json::Value, EventError> {
    Ok(serde_json::to_value(payload)?)
}

fn decode_payload<P: DeserializeOwned>(
    kind: &str,
    payload: &serde_json::Value,
) -> Result<P, EventError> {
    serde_json::from_value(payload.clone()).map_err(|e| EventError::Decode {
        kind: kind.to_string(),
        message: e.to_string(),
    })
}

impl From<InitialAdminCreationPasswordCreated> for Event {
    fn from(payload: InitialAdminCreationPasswordCreated) -> Self {
        Event::InitialAdminCreationPasswordCreated(payload)
    }
}

impl From<UserCreated> for Event {
    fn from(payload: UserCreated) -> Self {
        Event::UserCreated(payload)
    }
}

impl From<PasswordLoginConfigured> for Event {
    fn from(payload: PasswordLoginConfigured) -> Self {
        Event::PasswordLoginConfigured(payload)
    }
}

impl From<RoleAssigned> for Event {
    fn from(payload: RoleAssigned) -> Self {
        Event::RoleAssigned(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use userd_id::UserId;

    fn sample_events() -> Vec<Event> {
        let id = UserId::new();
        vec![
            InitialAdminCreationPasswordCreated {
                password_hash: "ab12".to_string(),
                salt: "cd34".to_string(),
            }
            .into(),
            UserCreated {
                id,
                display_name: "Foo".to_string(),
                email: "foo@example.com".to_string(),
            }
            .into(),
            PasswordLoginConfigured {
                user_id: id,
                password_hash: "ab12".to_string(),
                salt: "cd34".to_string(),
            }
            .into(),
            RoleAssigned {
                user_id: id,
                role: Role::Admin,
            }
            .into(),
        ]
    }

    #[test]
    fn test_kinds_are_in_catalog() {
        for event in sample_events() {
            assert!(event_kinds::ALL.contains(&event.kind()));
        }
    }

    #[test]
    fn test_encode_decode_is_lossless() {
        for event in sample_events() {
            let payload = event.encode().unwrap();
            let decoded = Event::decode(event.kind(), &payload).unwrap();
            assert_eq!(event, decoded);
        }
    }

    #[test]
    fn test_decode_unknown_kind() {
        let err = Event::decode("UserRenamed", &serde_json::json!({})).unwrap_err();
        assert_eq!(err, EventError::UnknownKind("UserRenamed".to_string()));
    }

    #[test]
    fn test_decode_error_names_kind() {
        let err = Event::decode(
            event_kinds::USER_CREATED,
            &serde_json::json!({"id": "usr_01HV4Z2WQXKJNM8GPQY6VBKC3D"}),
        )
        .unwrap_err();
        match err {
            EventError::Decode { kind, .. } => assert_eq!(kind, event_kinds::USER_CREATED),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_wrong_role() {
        let user_id = UserId::new();
        let err = Event::decode(
            event_kinds::ROLE_ASSIGNED,
            &serde_json::json!({"user_id": user_id.to_string(), "role": "SUPERUSER"}),
        )
        .unwrap_err();
        assert!(matches!(err, EventError::Decode { .. }));
    }
}
