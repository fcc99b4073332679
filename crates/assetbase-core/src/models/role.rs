//! Role model.
//!
//! Roles form two disjoint capability tiers. The tier is encoded in the
//! type so exhaustiveness is checked at compile time rather than via
//! string-prefix checks on the wire form.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Client-tier sub-roles, always bound to one organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientRole {
    Manager,
    Architect,
    Cxo,
}

/// Admin-tier sub-roles, global across tenants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminRole {
    Consultant,
    Architect,
    Super,
}

/// The closed set of valid roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Client(ClientRole),
    Admin(AdminRole),
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin(_))
    }

    pub fn is_client(&self) -> bool {
        matches!(self, Role::Client(_))
    }

    /// Wire representation, e.g. `client-manager`, `admin-super`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client(ClientRole::Manager) => "client-manager",
            Role::Client(ClientRole::Architect) => "client-architect",
            Role::Client(ClientRole::Cxo) => "client-cxo",
            Role::Admin(AdminRole::Consultant) => "admin-consultant",
            Role::Admin(AdminRole::Architect) => "admin-architect",
            Role::Admin(AdminRole::Super) => "admin-super",
        }
    }

    /// Parse the wire representation. Anything outside the six known
    /// roles is a validation error.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "client-manager" => Ok(Role::Client(ClientRole::Manager)),
            "client-architect" => Ok(Role::Client(ClientRole::Architect)),
            "client-cxo" => Ok(Role::Client(ClientRole::Cxo)),
            "admin-consultant" => Ok(Role::Admin(AdminRole::Consultant)),
            "admin-architect" => Ok(Role::Admin(AdminRole::Architect)),
            "admin-super" => Ok(Role::Admin(AdminRole::Super)),
            other => Err(CoreError::validation("role", other, "unknown role")),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Role::parse(&s)
    }
}

impl From<Role> for String {
    fn from(r: Role) -> Self {
        r.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_all_six_roles() {
        for s in [
            "client-manager",
            "client-architect",
            "client-cxo",
            "admin-consultant",
            "admin-architect",
            "admin-super",
        ] {
            assert_eq!(Role::parse(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn rejects_unknown_role() {
        assert!(Role::parse("client-intern").is_err());
        assert!(Role::parse("admin").is_err());
        assert!(Role::parse("").is_err());
    }

    #[test]
    fn tier_is_derived_from_variant() {
        assert!(Role::parse("admin-super").unwrap().is_admin());
        assert!(Role::parse("client-cxo").unwrap().is_client());
    }
}
