//! Persisted session user record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::role::{normalize_roles, role_tag};

/// The user record persisted alongside the bearer token.
///
/// Mirrors the login/register response body: `{ token, username, roles|role }`.
/// Unknown fields are kept so that re-serializing the record does not lose
/// anything the backend sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// Login name of the user.
    pub username: String,
    /// Role tags, when the backend sends the array shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    /// Singular role name, when the backend sends the scalar shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Any other fields the backend included (email, id, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl SessionUser {
    /// The normalized role tag set for this user.
    #[must_use]
    pub fn role_set(&self) -> Vec<String> {
        normalize_roles(self.roles.as_deref(), self.role.as_deref())
    }

    /// Whether this user holds the given role.
    ///
    /// `required` is a bare role name (`"ADMIN"`); the check is an exact,
    /// case-sensitive match against the normalized tag set. There is no
    /// hierarchy: holding `ROLE_ADMIN` does not imply `ROLE_USER`.
    #[must_use]
    pub fn has_role(&self, required: &str) -> bool {
        let tag = role_tag(required);
        self.role_set().iter().any(|r| r == &tag)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(json: &str) -> SessionUser {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_scalar_role_normalizes() {
        let u = user(r#"{"username": "alice", "role": "ADMIN"}"#);
        assert_eq!(u.role_set(), vec!["ROLE_ADMIN"]);
        assert!(u.has_role("ADMIN"));
        assert!(!u.has_role("USER"));
    }

    #[test]
    fn test_roles_array() {
        let u = user(r#"{"username": "bob", "roles": ["ROLE_USER"]}"#);
        assert!(u.has_role("USER"));
        assert!(!u.has_role("ADMIN"));
    }

    #[test]
    fn test_role_check_is_case_sensitive() {
        let u = user(r#"{"username": "carol", "roles": ["ROLE_Admin"]}"#);
        assert!(!u.has_role("ADMIN"));
    }

    #[test]
    fn test_extra_fields_roundtrip() {
        let u = user(r#"{"username": "dora", "role": "USER", "email": "d@example.com"}"#);
        let out = serde_json::to_value(&u).unwrap();
        assert_eq!(out["email"], "d@example.com");
        assert_eq!(out["username"], "dora");
    }
}
