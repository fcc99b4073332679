//! User service tests: tenant-scoped listings and scope-gated account
//! creation.

use assetbase_core::error::CoreError;
use assetbase_core::models::organization::{OrgCode, OrgId, Organization};
use assetbase_core::models::principal::Principal;
use assetbase_core::models::role::{AdminRole, ClientRole, Role};
use assetbase_db::MemoryStore;
use assetbase_services::{RequestContext, UserService};
use chrono::Utc;
use uuid::Uuid;

fn client(org_id: i64, code: &str) -> Principal {
    Principal {
        id: Uuid::new_v4(),
        name: "Client User".into(),
        email: "client@tenant.example".into(),
        role: Role::Client(ClientRole::Cxo),
        organization: format!("Tenant {org_id}"),
        org_code: OrgCode::parse(code).unwrap(),
        org_id: Some(OrgId(org_id)),
    }
}

fn admin() -> Principal {
    Principal {
        id: Uuid::new_v4(),
        name: "Admin User".into(),
        email: "admin@consulting.example".into(),
        role: Role::Admin(AdminRole::Super),
        organization: "Admin".into(),
        org_code: OrgCode::admin(),
        org_id: None,
    }
}

fn org(id: i64, code: &str) -> Organization {
    Organization {
        org_id: OrgId(id),
        org_code: OrgCode::parse(code).unwrap(),
        org_name: format!("Org {id}"),
        description: None,
        sector: None,
        remarks: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn listing_is_narrowed_to_the_caller_tenant() {
    let store = MemoryStore::with_demo_data();
    let svc = UserService::new(store);

    // Demo roster: two TECH1 clients, one FINC2 client.
    let tech = svc.list(&RequestContext::new(client(1, "TECH1"))).await.unwrap();
    assert!(!tech.is_empty());
    assert!(tech.iter().all(|p| p.profile.org_id == OrgId(1)));

    let finc = svc.list(&RequestContext::new(client(2, "FINC2"))).await.unwrap();
    assert!(finc.iter().all(|p| p.profile.org_id == OrgId(2)));

    let all = svc.list(&RequestContext::new(admin())).await.unwrap();
    assert_eq!(all.len(), tech.len() + finc.len());
}

#[tokio::test]
async fn client_creates_accounts_in_own_tenant() {
    let store = MemoryStore::with_demo_data();
    let svc = UserService::new(store);
    let ctx = RequestContext::new(client(1, "TECH1"));

    let created = svc
        .create(
            &ctx,
            "New Hire".into(),
            "hire@company.com".into(),
            ClientRole::Manager,
            "first-day-pw".into(),
        )
        .await
        .unwrap();
    assert_eq!(created.org_id, OrgId(1));

    let listed = svc.list(&ctx).await.unwrap();
    assert!(listed.iter().any(|p| p.profile.id == created.id));
}

#[tokio::test]
async fn admin_needs_a_selected_org_to_create() {
    let store = MemoryStore::with_demo_data();
    let svc = UserService::new(store);

    let err = svc
        .create(
            &RequestContext::new(admin()),
            "Nobody".into(),
            "nobody@nowhere.example".into(),
            ClientRole::Manager,
            "pw".into(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation { .. }));

    let selected = RequestContext::with_selected_org(admin(), org(2, "FINC2"));
    let created = svc
        .create(
            &selected,
            "Finance Hire".into(),
            "hire@financeco.com".into(),
            ClientRole::Architect,
            "pw-strong-enough".into(),
        )
        .await
        .unwrap();
    assert_eq!(created.org_id, OrgId(2));
}
