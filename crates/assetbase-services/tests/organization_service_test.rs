//! Organization service tests: code validation ahead of storage, CRUD,
//! and the onboarding compound operation.

use assetbase_core::error::CoreError;
use assetbase_core::models::role::ClientRole;
use assetbase_core::repository::ProfileRepository;
use assetbase_db::MemoryStore;
use assetbase_services::{CreateOrganizationInput, OnboardingInput, OrganizationService, UpdateOrganizationInput};

fn service(store: &MemoryStore) -> OrganizationService<MemoryStore, MemoryStore> {
    OrganizationService::new(store.clone(), store.clone())
}

fn create_input(code: &str, name: &str) -> CreateOrganizationInput {
    CreateOrganizationInput {
        org_code: code.into(),
        org_name: name.into(),
        description: Some("test tenant".into()),
        sector: Some("Technology".into()),
        remarks: None,
    }
}

fn onboarding_input(code: &str, email: &str) -> OnboardingInput {
    OnboardingInput {
        org_code: code.into(),
        org_name: "Globex".into(),
        description: None,
        sector: Some("Manufacturing".into()),
        remarks: None,
        cxo_name: "Hank Scorpio".into(),
        cxo_email: email.into(),
        cxo_password: "volcano-lair".into(),
    }
}

#[tokio::test]
async fn malformed_code_fails_before_the_store_is_touched() {
    let store = MemoryStore::new();
    let svc = service(&store);

    for code in ["ABC", "toolongcode", "ABC 1", "abc12"] {
        let err = svc.create(create_input(code, "Rejected Inc")).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }), "code {code:?}");
    }

    assert!(svc.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn created_organization_appears_in_list() {
    let store = MemoryStore::new();
    let svc = service(&store);

    let org = svc.create(create_input("ABCDE", "Alphabet Ltd")).await.unwrap();

    let listed = svc.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].org_id, org.org_id);

    let by_code = svc.get_by_code("ABCDE").await.unwrap();
    assert_eq!(by_code.org_id, org.org_id);
}

#[tokio::test]
async fn update_normalizes_the_replacement_code() {
    let store = MemoryStore::new();
    let svc = service(&store);
    let org = svc.create(create_input("ABCDE", "Alphabet Ltd")).await.unwrap();

    let err = svc
        .update(
            org.org_id,
            UpdateOrganizationInput {
                org_code: Some("xx".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation { .. }));

    let updated = svc
        .update(
            org.org_id,
            UpdateOrganizationInput {
                org_name: Some("Alphabet Global".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.org_name, "Alphabet Global");
    assert_eq!(updated.org_code.as_str(), "ABCDE");
}

#[tokio::test]
async fn onboarding_creates_org_and_cxo_together() {
    let store = MemoryStore::new();
    let svc = service(&store);

    let outcome = svc
        .onboard(onboarding_input("GLOBX", "hank@globex.example"))
        .await
        .unwrap();

    assert_eq!(outcome.organization.org_code.as_str(), "GLOBX");
    assert_eq!(outcome.cxo.role, ClientRole::Cxo);
    assert_eq!(outcome.cxo.org_id, outcome.organization.org_id);

    let cxo = ProfileRepository::find_client_by_email(&store, "hank@globex.example")
        .await
        .unwrap()
        .expect("CXO account persisted");
    assert_eq!(cxo.profile.id, outcome.cxo.id);
    assert_eq!(cxo.org_code.as_str(), "GLOBX");
}

#[tokio::test]
async fn onboarding_cxo_failure_leaves_org_and_names_it() {
    let store = MemoryStore::with_demo_data();
    let svc = service(&store);

    // The demo roster already owns this address, so the CXO creation
    // fails after the organization is persisted.
    let err = svc
        .onboard(onboarding_input("GLOBX", "john@company.com"))
        .await
        .unwrap_err();

    let CoreError::Internal(message) = err else {
        panic!("expected internal error, got {err:?}");
    };
    let orphan = svc.get_by_code("GLOBX").await.unwrap();
    assert!(message.contains(&orphan.org_id.to_string()));
}

#[tokio::test]
async fn onboarding_rejects_bad_code_without_side_effects() {
    let store = MemoryStore::new();
    let svc = service(&store);

    let err = svc
        .onboard(onboarding_input("NO", "owner@nowhere.example"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation { .. }));
    assert!(svc.list().await.unwrap().is_empty());
}
