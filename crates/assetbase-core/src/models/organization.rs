//! Organization domain model.
//!
//! An organization is the unit of tenant isolation: every client
//! principal and (almost) every asset is bound to exactly one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Numeric tenant key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OrgId(pub i64);

impl std::fmt::Display for OrgId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A 5-character uppercase tenant code, e.g. `TECH1`.
///
/// The reserved code `ADMIN` marks admin-tier accounts that are not
/// bound to any organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrgCode(String);

impl OrgCode {
    pub const LEN: usize = 5;

    /// The admin-tier sentinel code.
    pub fn admin() -> Self {
        OrgCode("ADMIN".to_string())
    }

    /// Validate and construct a code. Length must be exactly 5 and all
    /// characters uppercase alphanumeric; checked before any store call.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if s.chars().count() != Self::LEN {
            return Err(CoreError::validation(
                "org_code",
                s,
                "organization code must be exactly 5 characters",
            ));
        }
        if !s.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
            return Err(CoreError::validation(
                "org_code",
                s,
                "organization code must be uppercase alphanumeric",
            ));
        }
        Ok(OrgCode(s.to_string()))
    }

    pub fn is_admin_sentinel(&self) -> bool {
        self.0 == "ADMIN"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrgCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OrgCode {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        OrgCode::parse(&s)
    }
}

impl From<OrgCode> for String {
    fn from(c: OrgCode) -> Self {
        c.0
    }
}

/// A client organization (tenant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub org_id: OrgId,
    /// Unique 5-character tenant code.
    pub org_code: OrgCode,
    pub org_name: String,
    pub description: Option<String>,
    pub sector: Option<String>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub org_code: OrgCode,
    pub org_name: String,
    pub description: Option<String>,
    pub sector: Option<String>,
    pub remarks: Option<String>,
}

/// Fields that can be updated on an existing organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrganization {
    pub org_code: Option<OrgCode>,
    pub org_name: Option<String>,
    pub description: Option<String>,
    pub sector: Option<String>,
    pub remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_five_char_codes() {
        assert_eq!(OrgCode::parse("TECH1").unwrap().as_str(), "TECH1");
        assert_eq!(OrgCode::parse("FINC2").unwrap().as_str(), "FINC2");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(OrgCode::parse("AB1").is_err());
        assert!(OrgCode::parse("ABCDEF").is_err());
        assert!(OrgCode::parse("").is_err());
    }

    #[test]
    fn rejects_lowercase() {
        assert!(OrgCode::parse("tech1").is_err());
    }

    #[test]
    fn admin_sentinel_is_five_chars() {
        let code = OrgCode::admin();
        assert!(code.is_admin_sentinel());
        assert_eq!(code.as_str().len(), OrgCode::LEN);
        assert!(!OrgCode::parse("TECH1").unwrap().is_admin_sentinel());
    }
}
