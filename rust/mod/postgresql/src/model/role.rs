use std::fmt;

use serde::{Deserialize, Serialize};

use crate::service::RoleError;

/// A validated role name: one or more ASCII word characters (`[A-Za-z0-9_]`).
///
/// The name is the storage key, so it is checked once here and trusted
/// everywhere below.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleName(String);

impl RoleName {
    pub fn parse(raw: &str) -> Result<Self, RoleError> {
        if raw.is_empty() {
            return Err(RoleError::InvalidRequest("role name cannot be empty".into()));
        }
        if let Some(bad) = raw.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(RoleError::InvalidRequest(format!(
                "role name '{}' contains invalid character {:?}",
                raw, bad
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored role definition.
///
/// `sql` is the raw template exactly as written by the caller, placeholders
/// included. Persisted as `{"sql": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub sql: String,
}

/// Request body for creating or overwriting a role.
#[derive(Debug, Clone, Deserialize)]
pub struct WriteRole {
    pub sql: String,
}

impl WriteRole {
    /// Take the template out of the request, rejecting a blank one.
    pub fn into_template(self) -> Result<String, RoleError> {
        if self.sql.trim().is_empty() {
            return Err(RoleError::InvalidRequest("sql cannot be empty".into()));
        }
        Ok(self.sql)
    }
}
