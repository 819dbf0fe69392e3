//! Typed ID definitions.
//!
//! Each ID type has a unique prefix that identifies the resource type.
//! IDs are ULID-based for sortability and uniqueness.

use crate::define_id;

define_id!(UserId, "usr");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let id = UserId::new();
        let parsed = UserId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(UserId::parse(""), Err(crate::IdError::Empty));
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert_eq!(
            UserId::parse("01HV4Z2WQXKJNM8GPQY6VBKC3D"),
            Err(crate::IdError::MissingSeparator)
        );
    }

    #[test]
    fn test_parse_rejects_wrong_prefix() {
        let err = UserId::parse("org_01HV4Z2WQXKJNM8GPQY6VBKC3D").unwrap_err();
        assert!(matches!(err, crate::IdError::InvalidPrefix { .. }));
    }

    #[test]
    fn test_parse_rejects_bad_ulid() {
        let err = UserId::parse("usr_not-a-ulid").unwrap_err();
        assert!(matches!(err, crate::IdError::InvalidUlid(_)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = UserId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
