//! Asset entity service.

use std::collections::BTreeMap;

use assetbase_core::catalog;
use assetbase_core::error::{CoreError, CoreResult};
use assetbase_core::import::{AssetRowInput, ImportReport, validate_import};
use assetbase_core::models::asset::{
    Asset, AssetKind, AssetStatus, CreateAsset, Criticality, UpdateAsset,
};
use assetbase_core::repository::AssetRepository;
use tracing::info;
use uuid::Uuid;

use crate::context::RequestContext;

/// Caller-supplied fields for a single guided asset creation.
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub name: String,
    pub kind: AssetKind,
    pub category: String,
    pub description: String,
    pub owner: String,
    pub status: AssetStatus,
    pub criticality: Criticality,
    pub tags: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

/// Result of a bulk import attempt.
#[derive(Debug)]
pub struct ImportOutcome {
    pub report: ImportReport,
    /// Number of assets actually created; zero unless the whole batch
    /// validated cleanly.
    pub created: usize,
}

pub struct AssetService<R: AssetRepository> {
    repo: R,
}

impl<R: AssetRepository> AssetService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn list(&self, ctx: &RequestContext) -> CoreResult<Vec<Asset>> {
        self.repo.list(ctx.read_scope()).await
    }

    pub async fn search(
        &self,
        ctx: &RequestContext,
        query: &str,
        kind: Option<AssetKind>,
    ) -> CoreResult<Vec<Asset>> {
        self.repo.search(query, kind, ctx.read_scope()).await
    }

    pub async fn get(&self, id: Uuid) -> CoreResult<Asset> {
        self.repo.get_by_id(id).await
    }

    /// Create one asset. The category must belong to the kind's closed
    /// list; the organization comes from the caller's resolved scope
    /// and the update stamp from the repository.
    pub async fn create(&self, ctx: &RequestContext, input: NewAsset) -> CoreResult<Asset> {
        if !catalog::is_valid_category(input.kind, &input.category) {
            return Err(CoreError::validation(
                "category",
                &input.category,
                format!("not a category of type '{}'", input.kind),
            ));
        }

        self.repo
            .create(CreateAsset {
                name: input.name,
                kind: input.kind,
                category: input.category,
                description: input.description,
                owner: input.owner,
                status: input.status,
                criticality: input.criticality,
                tags: input.tags,
                metadata: input.metadata,
                created_by: ctx.principal.email.clone(),
                org_id: ctx.write_scope(),
            })
            .await
    }

    pub async fn update(&self, id: Uuid, input: UpdateAsset) -> CoreResult<Asset> {
        self.repo.update(id, input).await
    }

    pub async fn delete(&self, id: Uuid) -> CoreResult<()> {
        self.repo.delete(id).await
    }

    /// Validate a whole batch and create assets only when every row is
    /// clean. A batch with any error is reported back untouched — no
    /// partial imports.
    pub async fn bulk_import(
        &self,
        ctx: &RequestContext,
        rows: &[AssetRowInput],
    ) -> CoreResult<ImportOutcome> {
        let report = validate_import(rows);
        if !report.is_valid() {
            info!(
                total = report.total_rows,
                errors = report.errors.len(),
                "bulk import rejected by validation"
            );
            return Ok(ImportOutcome { report, created: 0 });
        }

        let org_id = ctx.write_scope();
        let mut created = 0;
        for row in report.parsed.clone() {
            self.repo
                .create(row.into_create(ctx.principal.email.clone(), org_id))
                .await?;
            created += 1;
        }

        info!(created, "bulk import completed");
        Ok(ImportOutcome { report, created })
    }
}
