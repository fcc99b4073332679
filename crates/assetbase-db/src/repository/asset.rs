//! SurrealDB implementation of [`AssetRepository`].

use std::collections::BTreeMap;

use assetbase_core::error::CoreResult;
use assetbase_core::models::asset::{
    Asset, AssetKind, AssetStatus, CreateAsset, Criticality, UpdateAsset,
};
use assetbase_core::models::organization::OrgId;
use assetbase_core::repository::AssetRepository;
use chrono::NaiveDate;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct AssetRow {
    name: String,
    kind: String,
    category: String,
    description: String,
    owner: String,
    status: String,
    criticality: String,
    tags: Vec<String>,
    metadata: serde_json::Value,
    created_by: String,
    last_updated: String,
    org_id: Option<i64>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct AssetRowWithId {
    record_id: String,
    name: String,
    kind: String,
    category: String,
    description: String,
    owner: String,
    status: String,
    criticality: String,
    tags: Vec<String>,
    metadata: serde_json::Value,
    created_by: String,
    last_updated: String,
    org_id: Option<i64>,
}

fn metadata_to_value(metadata: &BTreeMap<String, String>) -> serde_json::Value {
    serde_json::Value::Object(
        metadata
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect(),
    )
}

fn metadata_from_value(value: serde_json::Value) -> Result<BTreeMap<String, String>, DbError> {
    let serde_json::Value::Object(map) = value else {
        return Err(DbError::Decode("metadata is not an object".into()));
    };
    map.into_iter()
        .map(|(k, v)| match v {
            serde_json::Value::String(s) => Ok((k, s)),
            other => Err(DbError::Decode(format!(
                "metadata value for '{k}' is not a string: {other}"
            ))),
        })
        .collect()
}

fn parse_date(s: &str) -> Result<NaiveDate, DbError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| DbError::Decode(format!("invalid last_updated date '{s}': {e}")))
}

impl AssetRow {
    fn into_asset(self, id: Uuid) -> Result<Asset, DbError> {
        Ok(Asset {
            id,
            name: self.name,
            kind: AssetKind::parse(&self.kind).map_err(|e| DbError::Decode(e.to_string()))?,
            category: self.category,
            description: self.description,
            owner: self.owner,
            status: AssetStatus::parse(&self.status)
                .map_err(|e| DbError::Decode(e.to_string()))?,
            criticality: Criticality::parse(&self.criticality)
                .map_err(|e| DbError::Decode(e.to_string()))?,
            tags: self.tags,
            metadata: metadata_from_value(self.metadata)?,
            created_by: self.created_by,
            last_updated: parse_date(&self.last_updated)?,
            org_id: self.org_id.map(OrgId),
        })
    }
}

impl AssetRowWithId {
    fn try_into_asset(self) -> Result<Asset, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let row = AssetRow {
            name: self.name,
            kind: self.kind,
            category: self.category,
            description: self.description,
            owner: self.owner,
            status: self.status,
            criticality: self.criticality,
            tags: self.tags,
            metadata: self.metadata,
            created_by: self.created_by,
            last_updated: self.last_updated,
            org_id: self.org_id,
        };
        row.into_asset(id)
    }
}

/// SurrealDB implementation of the Asset repository.
#[derive(Clone)]
pub struct SurrealAssetRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAssetRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AssetRepository for SurrealAssetRepository<C> {
    async fn create(&self, input: CreateAsset) -> CoreResult<Asset> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('asset', $id) SET \
                 name = $name, kind = $kind, category = $category, \
                 description = $description, owner = $owner, \
                 status = $status, criticality = $criticality, \
                 tags = $tags, metadata = $metadata, \
                 created_by = $created_by, last_updated = $last_updated, \
                 org_id = $org_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("kind", input.kind.as_str().to_string()))
            .bind(("category", input.category))
            .bind(("description", input.description))
            .bind(("owner", input.owner))
            .bind(("status", input.status.as_str().to_string()))
            .bind(("criticality", input.criticality.as_str().to_string()))
            .bind(("tags", input.tags))
            .bind(("metadata", metadata_to_value(&input.metadata)))
            .bind(("created_by", input.created_by))
            .bind((
                "last_updated",
                chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string(),
            ))
            .bind(("org_id", input.org_id.map(|o| o.0)))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<AssetRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "asset".into(),
            id: id_str,
        })?;

        Ok(row.into_asset(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> CoreResult<Asset> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('asset', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AssetRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "asset".into(),
            id: id_str,
        })?;

        Ok(row.into_asset(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateAsset) -> CoreResult<Asset> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.owner.is_some() {
            sets.push("owner = $owner");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        if input.criticality.is_some() {
            sets.push("criticality = $criticality");
        }
        if input.tags.is_some() {
            sets.push("tags = $tags");
        }
        if input.metadata.is_some() {
            sets.push("metadata = $metadata");
        }
        sets.push("last_updated = $last_updated");

        let query = format!("UPDATE type::record('asset', $id) SET {}", sets.join(", "));

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind((
                "last_updated",
                chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string(),
            ));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(owner) = input.owner {
            builder = builder.bind(("owner", owner));
        }
        if let Some(ref status) = input.status {
            builder = builder.bind(("status", status.as_str().to_string()));
        }
        if let Some(ref criticality) = input.criticality {
            builder = builder.bind(("criticality", criticality.as_str().to_string()));
        }
        if let Some(tags) = input.tags {
            builder = builder.bind(("tags", tags));
        }
        if let Some(ref metadata) = input.metadata {
            builder = builder.bind(("metadata", metadata_to_value(metadata)));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<AssetRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "asset".into(),
            id: id_str,
        })?;

        Ok(row.into_asset(id)?)
    }

    async fn delete(&self, id: Uuid) -> CoreResult<()> {
        self.db
            .query("DELETE type::record('asset', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self, scope: Option<OrgId>) -> CoreResult<Vec<Asset>> {
        let mut query =
            "SELECT meta::id(id) AS record_id, * FROM asset".to_string();
        if scope.is_some() {
            query.push_str(" WHERE org_id = $org_id");
        }
        query.push_str(" ORDER BY created_at ASC");

        let mut builder = self.db.query(&query);
        if let Some(org_id) = scope {
            builder = builder.bind(("org_id", org_id.0));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<AssetRowWithId> = result.take(0).map_err(DbError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| row.try_into_asset())
            .collect::<Result<Vec<_>, DbError>>()?)
    }

    async fn search(
        &self,
        query: &str,
        kind: Option<AssetKind>,
        scope: Option<OrgId>,
    ) -> CoreResult<Vec<Asset>> {
        let mut clauses = Vec::new();
        let needle = query.trim().to_lowercase();
        if !needle.is_empty() {
            clauses.push(
                "(string::contains(string::lowercase(name), $q) \
                 OR string::contains(string::lowercase(description), $q) \
                 OR string::contains(string::lowercase(owner), $q))",
            );
        }
        if kind.is_some() {
            clauses.push("kind = $kind");
        }
        if scope.is_some() {
            clauses.push("org_id = $org_id");
        }

        let mut sql = "SELECT meta::id(id) AS record_id, * FROM asset".to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at ASC");

        let mut builder = self.db.query(&sql);
        if !needle.is_empty() {
            builder = builder.bind(("q", needle));
        }
        if let Some(kind) = kind {
            builder = builder.bind(("kind", kind.as_str().to_string()));
        }
        if let Some(org_id) = scope {
            builder = builder.bind(("org_id", org_id.0));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<AssetRowWithId> = result.take(0).map_err(DbError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| row.try_into_asset())
            .collect::<Result<Vec<_>, DbError>>()?)
    }
}
