//! Role tag normalization.
//!
//! The backend is inconsistent about how it reports authorization: some
//! responses carry a `roles` array of tags (`["ROLE_ADMIN"]`), others a
//! singular `role` string that may or may not be prefixed (`"ADMIN"`).
//! Everything downstream works with the prefixed tag form only.

/// Prefix a role name into its `ROLE_<NAME>` tag form.
///
/// Names that already carry the prefix are returned unchanged.
#[must_use]
pub fn role_tag(name: &str) -> String {
    if name.starts_with("ROLE_") {
        name.to_string()
    } else {
        format!("ROLE_{name}")
    }
}

/// Normalize a role set from either shape the backend sends.
///
/// A `roles` array wins verbatim; otherwise a singular `role` string is
/// wrapped via [`role_tag`]; with neither present the set is empty.
#[must_use]
pub fn normalize_roles(roles: Option<&[String]>, role: Option<&str>) -> Vec<String> {
    if let Some(roles) = roles {
        return roles.to_vec();
    }
    if let Some(role) = role {
        return vec![role_tag(role)];
    }
    Vec::new()
}
