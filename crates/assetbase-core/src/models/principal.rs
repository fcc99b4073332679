//! Principal — the authenticated identity driving all requests.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::organization::{OrgCode, OrgId};
use super::role::Role;

/// The authenticated user currently acting on the system.
///
/// A principal is replaced wholesale on login and cleared on logout;
/// it is never mutated field-by-field in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Organization display name (`"Admin"` for admin-tier accounts).
    pub organization: String,
    pub org_code: OrgCode,
    /// Numeric tenant key. Absent for admin-tier accounts, which are
    /// not bound to any single organization.
    pub org_id: Option<OrgId>,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
