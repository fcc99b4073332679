//! Integration tests for the SurrealDB repository implementations
//! using the in-memory SurrealDB engine.

use std::collections::BTreeMap;

use assetbase_core::models::asset::{AssetKind, AssetStatus, CreateAsset, Criticality};
use assetbase_core::models::organization::{
    CreateOrganization, OrgCode, OrgId, UpdateOrganization,
};
use assetbase_core::models::profile::CreateClientProfile;
use assetbase_core::models::role::ClientRole;
use assetbase_core::repository::{AssetRepository, OrganizationRepository, ProfileRepository};
use assetbase_db::repository::{
    SurrealAssetRepository, SurrealOrganizationRepository, SurrealProfileRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    assetbase_db::run_migrations(&db).await.unwrap();
    db
}

fn create_org_input(code: &str, name: &str) -> CreateOrganization {
    CreateOrganization {
        org_code: OrgCode::parse(code).unwrap(),
        org_name: name.into(),
        description: None,
        sector: Some("Technology".into()),
        remarks: None,
    }
}

fn create_asset_input(name: &str, org_id: Option<OrgId>) -> CreateAsset {
    CreateAsset {
        name: name.into(),
        kind: AssetKind::Database,
        category: "RDBMS (MySQL/PostgreSQL)".into(),
        description: "orders database".into(),
        owner: "Platform Team".into(),
        status: AssetStatus::Active,
        criticality: Criticality::High,
        tags: vec!["prod".into(), "orders".into()],
        metadata: BTreeMap::from([
            ("vendor".to_string(), "postgres".to_string()),
            ("version".to_string(), "16".to_string()),
        ]),
        created_by: "tests".into(),
        org_id,
    }
}

// -----------------------------------------------------------------------
// Organization tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_and_get_organization() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);

    let org = repo.create(create_org_input("ACMEC", "ACME Corp")).await.unwrap();
    assert_eq!(org.org_name, "ACME Corp");
    assert_eq!(org.org_code.as_str(), "ACMEC");

    let fetched = repo.get_by_id(org.org_id).await.unwrap();
    assert_eq!(fetched.org_id, org.org_id);
    assert_eq!(fetched.org_name, org.org_name);
}

#[tokio::test]
async fn org_ids_are_numeric_and_monotonic() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);

    let first = repo.create(create_org_input("TECH1", "TechCorp")).await.unwrap();
    let second = repo.create(create_org_input("FINC2", "FinanceCo")).await.unwrap();
    assert!(second.org_id.0 > first.org_id.0);
}

#[tokio::test]
async fn get_organization_by_code() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);

    let org = repo.create(create_org_input("TECH1", "TechCorp")).await.unwrap();
    let fetched = repo.get_by_code("TECH1").await.unwrap();
    assert_eq!(fetched.org_id, org.org_id);

    assert!(repo.get_by_code("NOPE9").await.is_err());
}

#[tokio::test]
async fn duplicate_org_code_is_rejected() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);

    repo.create(create_org_input("TECH1", "TechCorp")).await.unwrap();
    let result = repo.create(create_org_input("TECH1", "Copycat")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn update_organization_fields() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);

    let org = repo.create(create_org_input("TECH1", "TechCorp")).await.unwrap();
    let updated = repo
        .update(
            org.org_id,
            UpdateOrganization {
                org_name: Some("TechCorp Global".into()),
                remarks: Some("renamed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.org_name, "TechCorp Global");
    assert_eq!(updated.remarks.as_deref(), Some("renamed"));
    assert_eq!(updated.org_code.as_str(), "TECH1");
}

// -----------------------------------------------------------------------
// Asset tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn asset_round_trips_tags_and_metadata() {
    let db = setup().await;
    let repo = SurrealAssetRepository::new(db);

    let input = create_asset_input("orders-db", Some(OrgId(1)));
    let created = repo.create(input.clone()).await.unwrap();

    assert_eq!(created.tags, input.tags);
    assert_eq!(created.metadata, input.metadata);

    let fetched = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_applies_scope_filter() {
    let db = setup().await;
    let repo = SurrealAssetRepository::new(db);

    repo.create(create_asset_input("a1", Some(OrgId(1)))).await.unwrap();
    repo.create(create_asset_input("a2", Some(OrgId(1)))).await.unwrap();
    repo.create(create_asset_input("b1", Some(OrgId(2)))).await.unwrap();

    let scoped = repo.list(Some(OrgId(1))).await.unwrap();
    assert_eq!(scoped.len(), 2);
    assert!(scoped.iter().all(|a| a.org_id == Some(OrgId(1))));

    // Absent scope means unrestricted.
    let all = repo.list(None).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn search_matches_name_description_owner_case_insensitively() {
    let db = setup().await;
    let repo = SurrealAssetRepository::new(db);

    let mut input = create_asset_input("Orders Database", Some(OrgId(1)));
    input.description = "primary ORDER store".into();
    repo.create(input).await.unwrap();

    let mut other = create_asset_input("Billing", Some(OrgId(1)));
    other.description = "invoices".into();
    other.owner = "Finance Office".into();
    repo.create(other).await.unwrap();

    let by_name = repo.search("orders", None, None).await.unwrap();
    assert_eq!(by_name.len(), 1);

    let by_owner = repo.search("finance", None, None).await.unwrap();
    assert_eq!(by_owner.len(), 1);
    assert_eq!(by_owner[0].name, "Billing");

    let none = repo.search("nonexistent", None, None).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn search_combines_kind_filter_with_query() {
    let db = setup().await;
    let repo = SurrealAssetRepository::new(db);

    repo.create(create_asset_input("shared-name", Some(OrgId(1)))).await.unwrap();
    let mut app = create_asset_input("shared-name-app", Some(OrgId(1)));
    app.kind = AssetKind::Application;
    app.category = "Internal Tool".into();
    repo.create(app).await.unwrap();

    let hits = repo
        .search("shared", Some(AssetKind::Application), None)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].kind, AssetKind::Application);
}

#[tokio::test]
async fn update_stamps_last_updated_and_delete_removes() {
    let db = setup().await;
    let repo = SurrealAssetRepository::new(db);

    let created = repo
        .create(create_asset_input("ephemeral", Some(OrgId(1))))
        .await
        .unwrap();
    let updated = repo
        .update(
            created.id,
            assetbase_core::models::asset::UpdateAsset {
                owner: Some("New Owner".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.owner, "New Owner");
    assert_eq!(updated.last_updated, chrono::Utc::now().date_naive());

    repo.delete(created.id).await.unwrap();
    assert!(repo.get_by_id(created.id).await.is_err());
}

// -----------------------------------------------------------------------
// Profile tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn client_profile_joins_organization() {
    let db = setup().await;
    let orgs = SurrealOrganizationRepository::new(db.clone());
    let profiles = SurrealProfileRepository::new(db);

    let org = orgs.create(create_org_input("TECH1", "TechCorp")).await.unwrap();
    let profile = profiles
        .create_client(CreateClientProfile {
            name: "John Smith".into(),
            email: "john@company.com".into(),
            role: ClientRole::Manager,
            org_id: org.org_id,
            password: "demo123".into(),
        })
        .await
        .unwrap();

    let joined = profiles.get_client(profile.id).await.unwrap();
    assert_eq!(joined.org_name, "TechCorp");
    assert_eq!(joined.org_code.as_str(), "TECH1");

    let principal = joined.to_principal();
    assert_eq!(principal.organization, "TechCorp");
    assert_eq!(principal.org_id, Some(org.org_id));
    assert!(!principal.is_admin());
}

#[tokio::test]
async fn constraint_violations_surface_as_database_errors() {
    let db = setup().await;
    let orgs = SurrealOrganizationRepository::new(db.clone());
    let profiles = SurrealProfileRepository::new(db);

    let org = orgs.create(create_org_input("TECH1", "TechCorp")).await.unwrap();
    let input = CreateClientProfile {
        name: "John Smith".into(),
        email: "john@company.com".into(),
        role: ClientRole::Manager,
        org_id: org.org_id,
        password: "demo123".into(),
    };
    profiles.create_client(input.clone()).await.unwrap();

    // The unique email index rejects the duplicate; the error reports a
    // database failure, not a migration one.
    let err = profiles.create_client(input).await.unwrap_err();
    let rendered = err.to_string();
    assert!(!rendered.contains("Migration"), "got: {rendered}");
}

#[tokio::test]
async fn find_client_by_email_scoped_listing() {
    let db = setup().await;
    let orgs = SurrealOrganizationRepository::new(db.clone());
    let profiles = SurrealProfileRepository::new(db);

    let tech = orgs.create(create_org_input("TECH1", "TechCorp")).await.unwrap();
    let finc = orgs.create(create_org_input("FINC2", "FinanceCo")).await.unwrap();

    for (email, org_id) in [
        ("john@company.com", tech.org_id),
        ("mia@financeco.com", finc.org_id),
    ] {
        profiles
            .create_client(CreateClientProfile {
                name: email.into(),
                email: email.into(),
                role: ClientRole::Manager,
                org_id,
                password: "demo123".into(),
            })
            .await
            .unwrap();
    }

    let found = profiles.find_client_by_email("john@company.com").await.unwrap();
    assert_eq!(found.unwrap().profile.org_id, tech.org_id);

    let missing = profiles.find_client_by_email("ghost@company.com").await.unwrap();
    assert!(missing.is_none());

    let tech_only = profiles.list_clients(Some(tech.org_id)).await.unwrap();
    assert_eq!(tech_only.len(), 1);
    let everyone = profiles.list_clients(None).await.unwrap();
    assert_eq!(everyone.len(), 2);
}
