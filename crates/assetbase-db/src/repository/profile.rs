//! SurrealDB implementation of [`ProfileRepository`].
//!
//! Admin and client profiles live in two separate tables: admin
//! accounts are global, client accounts always carry an `org_id`.
//! Client reads are joined with the organization row for display
//! name/code.
//!
//! Password hashing uses Argon2id with OWASP-recommended parameters
//! (memory: 19 MiB, iterations: 2, parallelism: 1). Salt is randomly
//! generated per hash.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use assetbase_core::error::CoreResult;
use assetbase_core::models::organization::OrgId;
use assetbase_core::models::profile::{
    AdminProfile, ClientProfile, ClientProfileWithOrg, CreateAdminProfile, CreateClientProfile,
    UpdateClientProfile,
};
use assetbase_core::models::role::{AdminRole, ClientRole, Role};
use assetbase_core::repository::{OrganizationRepository, ProfileRepository};
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::organization::SurrealOrganizationRepository;
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct AdminProfileRow {
    name: String,
    email: String,
    role: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct AdminProfileRowWithId {
    record_id: String,
    name: String,
    email: String,
    role: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct ClientProfileRow {
    name: String,
    email: String,
    role: String,
    org_id: i64,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct ClientProfileRowWithId {
    record_id: String,
    name: String,
    email: String,
    role: String,
    org_id: i64,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_admin_role(s: &str) -> Result<AdminRole, DbError> {
    match Role::parse(s) {
        Ok(Role::Admin(role)) => Ok(role),
        _ => Err(DbError::Decode(format!("not an admin role: {s}"))),
    }
}

fn parse_client_role(s: &str) -> Result<ClientRole, DbError> {
    match Role::parse(s) {
        Ok(Role::Client(role)) => Ok(role),
        _ => Err(DbError::Decode(format!("not a client role: {s}"))),
    }
}

impl AdminProfileRow {
    fn into_profile(self, id: Uuid) -> Result<AdminProfile, DbError> {
        Ok(AdminProfile {
            id,
            name: self.name,
            email: self.email,
            role: parse_admin_role(&self.role)?,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl AdminProfileRowWithId {
    fn try_into_profile(self) -> Result<AdminProfile, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(AdminProfile {
            id,
            name: self.name,
            email: self.email,
            role: parse_admin_role(&self.role)?,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ClientProfileRow {
    fn into_profile(self, id: Uuid) -> Result<ClientProfile, DbError> {
        Ok(ClientProfile {
            id,
            name: self.name,
            email: self.email,
            role: parse_client_role(&self.role)?,
            org_id: OrgId(self.org_id),
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ClientProfileRowWithId {
    fn try_into_profile(self) -> Result<ClientProfile, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(ClientProfile {
            id,
            name: self.name,
            email: self.email,
            role: parse_client_role(&self.role)?,
            org_id: OrgId(self.org_id),
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Hash a password with Argon2id using OWASP-recommended parameters.
pub fn hash_password(password: &str) -> Result<String, DbError> {
    // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| DbError::Decode(format!("argon2 params error: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::Decode(format!("password hash error: {e}")))?;

    Ok(hash.to_string())
}

/// SurrealDB implementation of the Profile repository.
#[derive(Clone)]
pub struct SurrealProfileRepository<C: Connection> {
    db: Surreal<C>,
    orgs: SurrealOrganizationRepository<C>,
}

impl<C: Connection> SurrealProfileRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        let orgs = SurrealOrganizationRepository::new(db.clone());
        Self { db, orgs }
    }

    /// Attach the organization display fields to a client profile.
    async fn join_org(&self, profile: ClientProfile) -> CoreResult<ClientProfileWithOrg> {
        let org = self.orgs.get_by_id(profile.org_id).await?;
        Ok(ClientProfileWithOrg {
            profile,
            org_name: org.org_name,
            org_code: org.org_code,
        })
    }
}

impl<C: Connection> ProfileRepository for SurrealProfileRepository<C> {
    async fn create_admin(&self, input: CreateAdminProfile) -> CoreResult<AdminProfile> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let password_hash = hash_password(&input.password)?;

        let result = self
            .db
            .query(
                "CREATE type::record('admin_profile', $id) SET \
                 name = $name, email = $email, role = $role, \
                 password_hash = $password_hash",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("email", input.email))
            .bind(("role", Role::Admin(input.role).as_str().to_string()))
            .bind(("password_hash", password_hash))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<AdminProfileRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "admin_profile".into(),
            id: id_str,
        })?;

        Ok(row.into_profile(id)?)
    }

    async fn create_client(&self, input: CreateClientProfile) -> CoreResult<ClientProfile> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let password_hash = hash_password(&input.password)?;

        let result = self
            .db
            .query(
                "CREATE type::record('client_profile', $id) SET \
                 name = $name, email = $email, role = $role, \
                 org_id = $org_id, password_hash = $password_hash",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("email", input.email))
            .bind(("role", Role::Client(input.role).as_str().to_string()))
            .bind(("org_id", input.org_id.0))
            .bind(("password_hash", password_hash))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<ClientProfileRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "client_profile".into(),
            id: id_str,
        })?;

        Ok(row.into_profile(id)?)
    }

    async fn get_admin(&self, id: Uuid) -> CoreResult<AdminProfile> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('admin_profile', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AdminProfileRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "admin_profile".into(),
            id: id_str,
        })?;

        Ok(row.into_profile(id)?)
    }

    async fn get_client(&self, id: Uuid) -> CoreResult<ClientProfileWithOrg> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('client_profile', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ClientProfileRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "client_profile".into(),
            id: id_str,
        })?;

        let profile = row.into_profile(id)?;
        self.join_org(profile).await
    }

    async fn find_admin_by_email(&self, email: &str) -> CoreResult<Option<AdminProfile>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM admin_profile \
                 WHERE email = $email",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AdminProfileRowWithId> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_profile()?)),
            None => Ok(None),
        }
    }

    async fn find_client_by_email(&self, email: &str) -> CoreResult<Option<ClientProfileWithOrg>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM client_profile \
                 WHERE email = $email",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ClientProfileRowWithId> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => {
                let profile = row.try_into_profile()?;
                Ok(Some(self.join_org(profile).await?))
            }
            None => Ok(None),
        }
    }

    async fn list_clients(&self, scope: Option<OrgId>) -> CoreResult<Vec<ClientProfileWithOrg>> {
        let mut query =
            "SELECT meta::id(id) AS record_id, * FROM client_profile".to_string();
        if scope.is_some() {
            query.push_str(" WHERE org_id = $org_id");
        }
        query.push_str(" ORDER BY created_at ASC");

        let mut builder = self.db.query(&query);
        if let Some(org_id) = scope {
            builder = builder.bind(("org_id", org_id.0));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<ClientProfileRowWithId> = result.take(0).map_err(DbError::from)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let profile = row.try_into_profile()?;
            out.push(self.join_org(profile).await?);
        }
        Ok(out)
    }

    async fn update_client(&self, id: Uuid, input: UpdateClientProfile) -> CoreResult<ClientProfile> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.email.is_some() {
            sets.push("email = $email");
        }
        if input.role.is_some() {
            sets.push("role = $role");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('client_profile', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(email) = input.email {
            builder = builder.bind(("email", email));
        }
        if let Some(role) = input.role {
            builder = builder.bind(("role", Role::Client(role).as_str().to_string()));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<ClientProfileRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "client_profile".into(),
            id: id_str,
        })?;

        Ok(row.into_profile(id)?)
    }

    async fn delete_client(&self, id: Uuid) -> CoreResult<()> {
        self.db
            .query("DELETE type::record('client_profile', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
