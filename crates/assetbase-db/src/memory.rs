//! In-memory mock store.
//!
//! Used when no backend credentials are configured. Implements the same
//! repository traits as the SurrealDB path with plain synchronous
//! collection operations, so the two modes are observably identical for
//! success cases. All data is volatile.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use assetbase_core::error::{CoreError, CoreResult};
use assetbase_core::models::asset::{Asset, AssetKind, CreateAsset, UpdateAsset};
use assetbase_core::models::organization::{
    CreateOrganization, OrgCode, OrgId, Organization, UpdateOrganization,
};
use assetbase_core::models::profile::{
    AdminProfile, ClientProfile, ClientProfileWithOrg, CreateAdminProfile, CreateClientProfile,
    UpdateClientProfile,
};
use assetbase_core::models::session::{CreateSession, StoredSession};
use assetbase_core::repository::{
    AssetRepository, OrganizationRepository, ProfileRepository, SessionRepository,
};
use chrono::Utc;
use uuid::Uuid;

use crate::repository::hash_password;

/// The fixed password accepted for every demo roster account.
pub const DEMO_PASSWORD: &str = "demo123";

#[derive(Debug, Default)]
struct Inner {
    next_org_id: i64,
    organizations: Vec<Organization>,
    assets: Vec<Asset>,
    admin_profiles: Vec<AdminProfile>,
    client_profiles: Vec<ClientProfile>,
    sessions: Vec<StoredSession>,
}

/// Process-wide mock store. Cheap to clone; all clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with the demo roster: organizations TECH1
    /// (org 1) and FINC2 (org 2), client accounts on both, one admin
    /// account, and a handful of assets across both tenants. Every
    /// account accepts [`DEMO_PASSWORD`].
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        store.seed();
        store
    }

    fn seed(&self) {
        let now = Utc::now();
        let today = now.date_naive();
        let hash = hash_password(DEMO_PASSWORD).expect("demo password hash");

        let mut inner = self.inner.write().expect("mock store poisoned");
        inner.next_org_id = 2;
        inner.organizations = vec![
            Organization {
                org_id: OrgId(1),
                org_code: OrgCode::parse("TECH1").expect("seed code"),
                org_name: "TechCorp".into(),
                description: Some("Demo technology company".into()),
                sector: Some("Technology".into()),
                remarks: None,
                created_at: now,
                updated_at: now,
            },
            Organization {
                org_id: OrgId(2),
                org_code: OrgCode::parse("FINC2").expect("seed code"),
                org_name: "FinanceCo".into(),
                description: Some("Demo financial services company".into()),
                sector: Some("Financial Services".into()),
                remarks: None,
                created_at: now,
                updated_at: now,
            },
        ];

        use assetbase_core::models::role::{AdminRole, ClientRole};
        inner.client_profiles = vec![
            ClientProfile {
                id: Uuid::new_v4(),
                name: "John Smith".into(),
                email: "john@company.com".into(),
                role: ClientRole::Manager,
                org_id: OrgId(1),
                password_hash: hash.clone(),
                created_at: now,
                updated_at: now,
            },
            ClientProfile {
                id: Uuid::new_v4(),
                name: "Sarah Chen".into(),
                email: "sarah@company.com".into(),
                role: ClientRole::Architect,
                org_id: OrgId(1),
                password_hash: hash.clone(),
                created_at: now,
                updated_at: now,
            },
            ClientProfile {
                id: Uuid::new_v4(),
                name: "Miguel Torres".into(),
                email: "miguel@financeco.com".into(),
                role: ClientRole::Cxo,
                org_id: OrgId(2),
                password_hash: hash.clone(),
                created_at: now,
                updated_at: now,
            },
        ];
        inner.admin_profiles = vec![AdminProfile {
            id: Uuid::new_v4(),
            name: "Ada Admin".into(),
            email: "admin@consulting.com".into(),
            role: AdminRole::Super,
            password_hash: hash,
            created_at: now,
            updated_at: now,
        }];

        use assetbase_core::models::asset::{AssetStatus, Criticality};
        inner.assets = vec![
            Asset {
                id: Uuid::new_v4(),
                name: "Order Management System".into(),
                kind: AssetKind::Application,
                category: "Core Business Application".into(),
                description: "Handles the full order lifecycle".into(),
                owner: "Commerce Team".into(),
                status: AssetStatus::Active,
                criticality: Criticality::High,
                tags: vec!["prod".into(), "orders".into()],
                metadata: BTreeMap::from([("vendor".to_string(), "in-house".to_string())]),
                created_by: "seed".into(),
                last_updated: today,
                org_id: Some(OrgId(1)),
            },
            Asset {
                id: Uuid::new_v4(),
                name: "Customer Database".into(),
                kind: AssetKind::Database,
                category: "RDBMS (MySQL/PostgreSQL)".into(),
                description: "Primary customer records store".into(),
                owner: "Platform Team".into(),
                status: AssetStatus::Active,
                criticality: Criticality::High,
                tags: vec!["prod".into()],
                metadata: BTreeMap::new(),
                created_by: "seed".into(),
                last_updated: today,
                org_id: Some(OrgId(1)),
            },
            Asset {
                id: Uuid::new_v4(),
                name: "Trading Ledger".into(),
                kind: AssetKind::Database,
                category: "Data Warehouse".into(),
                description: "Regulatory trade reporting warehouse".into(),
                owner: "Risk Office".into(),
                status: AssetStatus::Active,
                criticality: Criticality::Medium,
                tags: vec!["regulated".into()],
                metadata: BTreeMap::new(),
                created_by: "seed".into(),
                last_updated: today,
                org_id: Some(OrgId(2)),
            },
        ];
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().expect("mock store poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("mock store poisoned")
    }
}

fn matches_search(asset: &Asset, needle: &str, kind: Option<AssetKind>) -> bool {
    if let Some(kind) = kind {
        if asset.kind != kind {
            return false;
        }
    }
    if needle.is_empty() {
        return true;
    }
    asset.name.to_lowercase().contains(needle)
        || asset.description.to_lowercase().contains(needle)
        || asset.owner.to_lowercase().contains(needle)
}

fn in_scope(org_id: Option<OrgId>, scope: Option<OrgId>) -> bool {
    match scope {
        // No filter means unrestricted, never "match nothing".
        None => true,
        Some(wanted) => org_id == Some(wanted),
    }
}

impl AssetRepository for MemoryStore {
    async fn create(&self, input: CreateAsset) -> CoreResult<Asset> {
        let asset = Asset {
            id: Uuid::new_v4(),
            name: input.name,
            kind: input.kind,
            category: input.category,
            description: input.description,
            owner: input.owner,
            status: input.status,
            criticality: input.criticality,
            tags: input.tags,
            metadata: input.metadata,
            created_by: input.created_by,
            last_updated: Utc::now().date_naive(),
            org_id: input.org_id,
        };
        self.write().assets.push(asset.clone());
        Ok(asset)
    }

    async fn get_by_id(&self, id: Uuid) -> CoreResult<Asset> {
        self.read()
            .assets
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                entity: "asset".into(),
                id: id.to_string(),
            })
    }

    async fn update(&self, id: Uuid, input: UpdateAsset) -> CoreResult<Asset> {
        let mut inner = self.write();
        let asset = inner
            .assets
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "asset".into(),
                id: id.to_string(),
            })?;

        if let Some(name) = input.name {
            asset.name = name;
        }
        if let Some(description) = input.description {
            asset.description = description;
        }
        if let Some(owner) = input.owner {
            asset.owner = owner;
        }
        if let Some(status) = input.status {
            asset.status = status;
        }
        if let Some(criticality) = input.criticality {
            asset.criticality = criticality;
        }
        if let Some(tags) = input.tags {
            asset.tags = tags;
        }
        if let Some(metadata) = input.metadata {
            asset.metadata = metadata;
        }
        asset.last_updated = Utc::now().date_naive();

        Ok(asset.clone())
    }

    async fn delete(&self, id: Uuid) -> CoreResult<()> {
        self.write().assets.retain(|a| a.id != id);
        Ok(())
    }

    async fn list(&self, scope: Option<OrgId>) -> CoreResult<Vec<Asset>> {
        Ok(self
            .read()
            .assets
            .iter()
            .filter(|a| in_scope(a.org_id, scope))
            .cloned()
            .collect())
    }

    async fn search(
        &self,
        query: &str,
        kind: Option<AssetKind>,
        scope: Option<OrgId>,
    ) -> CoreResult<Vec<Asset>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .read()
            .assets
            .iter()
            .filter(|a| in_scope(a.org_id, scope) && matches_search(a, &needle, kind))
            .cloned()
            .collect())
    }
}

impl OrganizationRepository for MemoryStore {
    async fn create(&self, input: CreateOrganization) -> CoreResult<Organization> {
        let mut inner = self.write();
        if inner
            .organizations
            .iter()
            .any(|o| o.org_code == input.org_code)
        {
            return Err(CoreError::AlreadyExists {
                entity: format!("organization with code {}", input.org_code),
            });
        }

        inner.next_org_id += 1;
        let now = Utc::now();
        let org = Organization {
            org_id: OrgId(inner.next_org_id),
            org_code: input.org_code,
            org_name: input.org_name,
            description: input.description,
            sector: input.sector,
            remarks: input.remarks,
            created_at: now,
            updated_at: now,
        };
        inner.organizations.push(org.clone());
        Ok(org)
    }

    async fn get_by_id(&self, id: OrgId) -> CoreResult<Organization> {
        self.read()
            .organizations
            .iter()
            .find(|o| o.org_id == id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                entity: "organization".into(),
                id: id.to_string(),
            })
    }

    async fn get_by_code(&self, code: &str) -> CoreResult<Organization> {
        self.read()
            .organizations
            .iter()
            .find(|o| o.org_code.as_str() == code)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                entity: "organization".into(),
                id: format!("org_code={code}"),
            })
    }

    async fn update(&self, id: OrgId, input: UpdateOrganization) -> CoreResult<Organization> {
        let mut inner = self.write();
        let org = inner
            .organizations
            .iter_mut()
            .find(|o| o.org_id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "organization".into(),
                id: id.to_string(),
            })?;

        if let Some(org_code) = input.org_code {
            org.org_code = org_code;
        }
        if let Some(org_name) = input.org_name {
            org.org_name = org_name;
        }
        if let Some(description) = input.description {
            org.description = Some(description);
        }
        if let Some(sector) = input.sector {
            org.sector = Some(sector);
        }
        if let Some(remarks) = input.remarks {
            org.remarks = Some(remarks);
        }
        org.updated_at = Utc::now();

        Ok(org.clone())
    }

    async fn delete(&self, id: OrgId) -> CoreResult<()> {
        self.write().organizations.retain(|o| o.org_id != id);
        Ok(())
    }

    async fn list(&self) -> CoreResult<Vec<Organization>> {
        Ok(self.read().organizations.clone())
    }
}

impl ProfileRepository for MemoryStore {
    async fn create_admin(&self, input: CreateAdminProfile) -> CoreResult<AdminProfile> {
        let mut inner = self.write();
        if inner.admin_profiles.iter().any(|p| p.email == input.email) {
            return Err(CoreError::AlreadyExists {
                entity: format!("admin profile with email {}", input.email),
            });
        }

        let now = Utc::now();
        let profile = AdminProfile {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            role: input.role,
            password_hash: hash_password(&input.password)?,
            created_at: now,
            updated_at: now,
        };
        inner.admin_profiles.push(profile.clone());
        Ok(profile)
    }

    async fn create_client(&self, input: CreateClientProfile) -> CoreResult<ClientProfile> {
        let mut inner = self.write();
        if inner.client_profiles.iter().any(|p| p.email == input.email) {
            return Err(CoreError::AlreadyExists {
                entity: format!("client profile with email {}", input.email),
            });
        }

        let now = Utc::now();
        let profile = ClientProfile {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            role: input.role,
            org_id: input.org_id,
            password_hash: hash_password(&input.password)?,
            created_at: now,
            updated_at: now,
        };
        inner.client_profiles.push(profile.clone());
        Ok(profile)
    }

    async fn get_admin(&self, id: Uuid) -> CoreResult<AdminProfile> {
        self.read()
            .admin_profiles
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                entity: "admin_profile".into(),
                id: id.to_string(),
            })
    }

    async fn get_client(&self, id: Uuid) -> CoreResult<ClientProfileWithOrg> {
        let inner = self.read();
        let profile = inner
            .client_profiles
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                entity: "client_profile".into(),
                id: id.to_string(),
            })?;
        let org = inner
            .organizations
            .iter()
            .find(|o| o.org_id == profile.org_id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "organization".into(),
                id: profile.org_id.to_string(),
            })?;
        Ok(ClientProfileWithOrg {
            org_name: org.org_name.clone(),
            org_code: org.org_code.clone(),
            profile,
        })
    }

    async fn find_admin_by_email(&self, email: &str) -> CoreResult<Option<AdminProfile>> {
        Ok(self
            .read()
            .admin_profiles
            .iter()
            .find(|p| p.email == email)
            .cloned())
    }

    async fn find_client_by_email(&self, email: &str) -> CoreResult<Option<ClientProfileWithOrg>> {
        let inner = self.read();
        let Some(profile) = inner
            .client_profiles
            .iter()
            .find(|p| p.email == email)
            .cloned()
        else {
            return Ok(None);
        };
        let org = inner
            .organizations
            .iter()
            .find(|o| o.org_id == profile.org_id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "organization".into(),
                id: profile.org_id.to_string(),
            })?;
        Ok(Some(ClientProfileWithOrg {
            org_name: org.org_name.clone(),
            org_code: org.org_code.clone(),
            profile,
        }))
    }

    async fn list_clients(&self, scope: Option<OrgId>) -> CoreResult<Vec<ClientProfileWithOrg>> {
        let inner = self.read();
        let mut out = Vec::new();
        for profile in &inner.client_profiles {
            if let Some(wanted) = scope {
                if profile.org_id != wanted {
                    continue;
                }
            }
            let org = inner
                .organizations
                .iter()
                .find(|o| o.org_id == profile.org_id)
                .ok_or_else(|| CoreError::NotFound {
                    entity: "organization".into(),
                    id: profile.org_id.to_string(),
                })?;
            out.push(ClientProfileWithOrg {
                profile: profile.clone(),
                org_name: org.org_name.clone(),
                org_code: org.org_code.clone(),
            });
        }
        Ok(out)
    }

    async fn update_client(&self, id: Uuid, input: UpdateClientProfile) -> CoreResult<ClientProfile> {
        let mut inner = self.write();
        let profile = inner
            .client_profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "client_profile".into(),
                id: id.to_string(),
            })?;

        if let Some(name) = input.name {
            profile.name = name;
        }
        if let Some(email) = input.email {
            profile.email = email;
        }
        if let Some(role) = input.role {
            profile.role = role;
        }
        profile.updated_at = Utc::now();

        Ok(profile.clone())
    }

    async fn delete_client(&self, id: Uuid) -> CoreResult<()> {
        self.write().client_profiles.retain(|p| p.id != id);
        Ok(())
    }
}

impl SessionRepository for MemoryStore {
    async fn create(&self, input: CreateSession) -> CoreResult<StoredSession> {
        let session = StoredSession {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            org_code: input.org_code,
            expires_at: input.expires_at,
            created_at: Utc::now(),
        };
        self.write().sessions.push(session.clone());
        Ok(session)
    }

    async fn current(&self) -> CoreResult<Option<StoredSession>> {
        let now = Utc::now();
        Ok(self
            .read()
            .sessions
            .iter()
            .filter(|s| s.expires_at > now)
            .max_by_key(|s| s.created_at)
            .cloned())
    }

    async fn invalidate(&self, id: Uuid) -> CoreResult<()> {
        self.write().sessions.retain(|s| s.id != id);
        Ok(())
    }
}
