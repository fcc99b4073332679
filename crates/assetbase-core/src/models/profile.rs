//! Persisted principal profiles.
//!
//! Profiles are the storage shape behind [`super::principal::Principal`].
//! Admin-tier profiles are global and live in their own collection;
//! client-tier profiles are always organization-bound and live in a
//! separate collection joined to the organization for display data.
//! The split is a modeling invariant, not an optimization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::organization::{OrgCode, OrgId};
use super::role::{AdminRole, ClientRole, Role};

/// A global admin-tier account. Carries no organization binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A client-tier account, always bound to one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: ClientRole,
    pub org_id: OrgId,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A client profile joined with its organization's display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfileWithOrg {
    pub profile: ClientProfile,
    pub org_name: String,
    pub org_code: OrgCode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdminProfile {
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    /// Raw password; hashed with Argon2id before storage.
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientProfile {
    pub name: String,
    pub email: String,
    pub role: ClientRole,
    pub org_id: OrgId,
    /// Raw password; hashed with Argon2id before storage.
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClientProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<ClientRole>,
}

impl AdminProfile {
    /// Synthesize the in-memory principal for this admin account.
    pub fn to_principal(&self) -> super::principal::Principal {
        super::principal::Principal {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: Role::Admin(self.role),
            organization: "Admin".to_string(),
            org_code: OrgCode::admin(),
            org_id: None,
        }
    }
}

impl ClientProfileWithOrg {
    /// Synthesize the in-memory principal for this client account.
    pub fn to_principal(&self) -> super::principal::Principal {
        super::principal::Principal {
            id: self.profile.id,
            name: self.profile.name.clone(),
            email: self.profile.email.clone(),
            role: Role::Client(self.profile.role),
            organization: self.org_name.clone(),
            org_code: self.org_code.clone(),
            org_id: Some(self.profile.org_id),
        }
    }
}
