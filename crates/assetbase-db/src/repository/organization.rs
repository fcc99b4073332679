//! SurrealDB implementation of [`OrganizationRepository`].
//!
//! Organization ids are numeric (the tenant key that scopes every
//! other table); allocation goes through a counter record so ids stay
//! monotonic. The record id of an organization row is its numeric id
//! rendered as a string.

use assetbase_core::error::{CoreError, CoreResult};
use assetbase_core::models::organization::{
    CreateOrganization, OrgCode, OrgId, Organization, UpdateOrganization,
};
use assetbase_core::repository::OrganizationRepository;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct OrganizationRow {
    org_code: String,
    org_name: String,
    description: Option<String>,
    sector: Option<String>,
    remarks: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct OrganizationRowWithId {
    record_id: String,
    org_code: String,
    org_name: String,
    description: Option<String>,
    sector: Option<String>,
    remarks: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CounterRow {
    next: i64,
}

impl OrganizationRow {
    fn into_organization(self, org_id: OrgId) -> Result<Organization, DbError> {
        Ok(Organization {
            org_id,
            org_code: OrgCode::parse(&self.org_code)
                .map_err(|e| DbError::Decode(e.to_string()))?,
            org_name: self.org_name,
            description: self.description,
            sector: self.sector,
            remarks: self.remarks,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl OrganizationRowWithId {
    fn try_into_organization(self) -> Result<Organization, DbError> {
        let org_id = self
            .record_id
            .parse::<i64>()
            .map_err(|e| DbError::Decode(format!("invalid org id: {e}")))?;
        let row = OrganizationRow {
            org_code: self.org_code,
            org_name: self.org_name,
            description: self.description,
            sector: self.sector,
            remarks: self.remarks,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        row.into_organization(OrgId(org_id))
    }
}

/// SurrealDB implementation of the Organization repository.
#[derive(Clone)]
pub struct SurrealOrganizationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealOrganizationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Allocate the next numeric organization id.
    async fn next_org_id(&self) -> Result<OrgId, DbError> {
        let result = self
            .db
            .query("UPSERT counter:organization SET next += 1")
            .await?;
        let mut result = result
            .check()
            .map_err(DbError::from)?;
        let rows: Vec<CounterRow> = result.take(0)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "counter".into(),
            id: "organization".into(),
        })?;
        Ok(OrgId(row.next))
    }
}

impl<C: Connection> OrganizationRepository for SurrealOrganizationRepository<C> {
    async fn create(&self, input: CreateOrganization) -> CoreResult<Organization> {
        // The unique index is the backstop; check first for a clean error.
        if self.get_by_code(input.org_code.as_str()).await.is_ok() {
            return Err(CoreError::AlreadyExists {
                entity: format!("organization with code {}", input.org_code),
            });
        }

        let org_id = self.next_org_id().await?;
        let id_str = org_id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('organization', $id) SET \
                 org_code = $org_code, org_name = $org_name, \
                 description = $description, sector = $sector, \
                 remarks = $remarks",
            )
            .bind(("id", id_str.clone()))
            .bind(("org_code", input.org_code.as_str().to_string()))
            .bind(("org_name", input.org_name))
            .bind(("description", input.description))
            .bind(("sector", input.sector))
            .bind(("remarks", input.remarks))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "organization".into(),
            id: id_str,
        })?;

        Ok(row.into_organization(org_id)?)
    }

    async fn get_by_id(&self, id: OrgId) -> CoreResult<Organization> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('organization', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "organization".into(),
            id: id_str,
        })?;

        Ok(row.into_organization(id)?)
    }

    async fn get_by_code(&self, code: &str) -> CoreResult<Organization> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM organization \
                 WHERE org_code = $org_code",
            )
            .bind(("org_code", code.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "organization".into(),
            id: format!("org_code={code}"),
        })?;

        Ok(row.try_into_organization()?)
    }

    async fn update(&self, id: OrgId, input: UpdateOrganization) -> CoreResult<Organization> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.org_code.is_some() {
            sets.push("org_code = $org_code");
        }
        if input.org_name.is_some() {
            sets.push("org_name = $org_name");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.sector.is_some() {
            sets.push("sector = $sector");
        }
        if input.remarks.is_some() {
            sets.push("remarks = $remarks");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('organization', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(ref org_code) = input.org_code {
            builder = builder.bind(("org_code", org_code.as_str().to_string()));
        }
        if let Some(org_name) = input.org_name {
            builder = builder.bind(("org_name", org_name));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(sector) = input.sector {
            builder = builder.bind(("sector", sector));
        }
        if let Some(remarks) = input.remarks {
            builder = builder.bind(("remarks", remarks));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "organization".into(),
            id: id_str,
        })?;

        Ok(row.into_organization(id)?)
    }

    async fn delete(&self, id: OrgId) -> CoreResult<()> {
        self.db
            .query("DELETE type::record('organization', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self) -> CoreResult<Vec<Organization>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM organization \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationRowWithId> = result.take(0).map_err(DbError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| row.try_into_organization())
            .collect::<Result<Vec<_>, DbError>>()?)
    }
}
