//! Session manager lifecycle tests against the in-memory store and its
//! demo roster.

use std::time::Duration;

use assetbase_auth::{AuthError, SessionManager, SessionState, SignupInput};
use assetbase_core::error::CoreResult;
use assetbase_core::models::organization::OrgCode;
use assetbase_core::models::role::{ClientRole, Role};
use assetbase_core::models::session::{CreateSession, StoredSession};
use assetbase_core::repository::{ProfileRepository, SessionRepository};
use assetbase_db::MemoryStore;
use chrono::Utc;
use uuid::Uuid;

const DEMO_PASSWORD: &str = assetbase_db::memory::DEMO_PASSWORD;

fn manager(store: &MemoryStore) -> SessionManager<MemoryStore, MemoryStore, MemoryStore> {
    SessionManager::new(store.clone(), store.clone(), store.clone())
}

#[tokio::test]
async fn login_as_client_yields_tenant_principal() {
    let store = MemoryStore::with_demo_data();
    let mgr = manager(&store);

    let principal = mgr
        .login("TECH1", "john@company.com", DEMO_PASSWORD)
        .await
        .unwrap();

    assert_eq!(principal.email, "john@company.com");
    assert_eq!(principal.role, Role::Client(ClientRole::Manager));
    assert_eq!(principal.org_code.as_str(), "TECH1");
    assert!(!principal.is_admin());

    assert!(mgr.is_initialized());
    assert_eq!(mgr.current(), SessionState::Authenticated(principal));
}

#[tokio::test]
async fn login_as_admin_uses_sentinel_code() {
    let store = MemoryStore::with_demo_data();
    let mgr = manager(&store);

    let principal = mgr
        .login("ADMIN", "admin@consulting.com", DEMO_PASSWORD)
        .await
        .unwrap();

    assert!(principal.is_admin());
    assert!(principal.org_code.is_admin_sentinel());
    assert_eq!(principal.org_id, None);
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
    let store = MemoryStore::with_demo_data();
    let mgr = manager(&store);

    let err = mgr
        .login("TECH1", "john@company.com", "not-the-password")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(mgr.principal(), None);
}

#[tokio::test]
async fn malformed_and_unknown_org_codes_are_rejected() {
    let store = MemoryStore::with_demo_data();
    let mgr = manager(&store);

    // Too short, so rejected before any lookup.
    let err = mgr.login("ABC", "john@company.com", DEMO_PASSWORD).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidOrgCode));

    // Well-formed but not a registered tenant.
    let err = mgr.login("ZZZZZ", "john@company.com", DEMO_PASSWORD).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidOrgCode));
}

#[tokio::test]
async fn tier_and_tenant_mismatches_are_distinguished() {
    let store = MemoryStore::with_demo_data();
    let mgr = manager(&store);

    // Admin account presented against a client tenant code.
    let err = mgr
        .login("TECH1", "admin@consulting.com", DEMO_PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::TierMismatch));

    // Client account presented against the admin sentinel.
    let err = mgr
        .login("ADMIN", "john@company.com", DEMO_PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::TierMismatch));

    // Client account presented against somebody else's tenant.
    let err = mgr
        .login("FINC2", "john@company.com", DEMO_PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::TierMismatch));

    // A bad password is reported as such even when the tenant is also
    // wrong; credentials are checked first.
    let err = mgr
        .login("FINC2", "john@company.com", "not-the-password")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    // Unknown email is a plain credential failure, not a mismatch.
    let err = mgr
        .login("TECH1", "ghost@company.com", DEMO_PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn restore_with_no_stored_session_lands_anonymous() {
    let store = MemoryStore::with_demo_data();
    let mgr = manager(&store);

    assert_eq!(mgr.current(), SessionState::Uninitialized);
    assert!(!mgr.is_initialized());

    mgr.restore_session(Duration::from_secs(5)).await;

    assert_eq!(mgr.current(), SessionState::Anonymous);
    assert!(mgr.is_initialized());
}

#[tokio::test]
async fn restore_loads_principal_from_stored_session() {
    let store = MemoryStore::with_demo_data();
    let john = ProfileRepository::find_client_by_email(&store, "john@company.com")
        .await
        .unwrap()
        .unwrap();
    SessionRepository::create(
        &store,
        CreateSession {
            user_id: john.profile.id,
            org_code: OrgCode::parse("TECH1").unwrap(),
            expires_at: Utc::now() + chrono::Duration::days(30),
        },
    )
    .await
    .unwrap();

    let mgr = manager(&store);
    mgr.restore_session(Duration::from_secs(5)).await;

    let principal = mgr.principal().expect("restored principal");
    assert_eq!(principal.id, john.profile.id);
    assert_eq!(principal.email, "john@company.com");
}

/// Session source that never answers, for exercising the restore bound.
#[derive(Clone)]
struct StalledSessions;

impl SessionRepository for StalledSessions {
    async fn create(&self, _input: CreateSession) -> CoreResult<StoredSession> {
        unreachable!("restore never creates sessions")
    }

    async fn current(&self) -> CoreResult<Option<StoredSession>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(None)
    }

    async fn invalidate(&self, _id: Uuid) -> CoreResult<()> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn restore_times_out_to_anonymous() {
    let store = MemoryStore::with_demo_data();
    let mgr = SessionManager::new(store.clone(), store, StalledSessions);

    mgr.restore_session(Duration::from_millis(100)).await;

    assert_eq!(mgr.current(), SessionState::Anonymous);
    assert!(mgr.is_initialized());
}

#[tokio::test]
async fn logout_clears_principal_and_stored_session() {
    let store = MemoryStore::with_demo_data();
    let mgr = manager(&store);

    mgr.login("TECH1", "john@company.com", DEMO_PASSWORD).await.unwrap();
    assert!(SessionRepository::current(&store).await.unwrap().is_some());

    mgr.logout().await;

    assert_eq!(mgr.current(), SessionState::Anonymous);
    assert_eq!(mgr.principal(), None);
    assert!(SessionRepository::current(&store).await.unwrap().is_none());
    // Initialization is latched; logout does not revert it.
    assert!(mgr.is_initialized());
}

#[tokio::test]
async fn load_profile_is_idempotent_for_current_principal() {
    let store = MemoryStore::with_demo_data();
    let mgr = manager(&store);

    let principal = mgr
        .login("TECH1", "john@company.com", DEMO_PASSWORD)
        .await
        .unwrap();

    let mut rx = mgr.subscribe();
    rx.mark_unchanged();

    let again = mgr
        .load_profile(principal.id, &principal.org_code)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(again, principal);
    // No state transition was published for the redundant load.
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn load_profile_for_unknown_user_degrades_to_none() {
    let store = MemoryStore::with_demo_data();
    let mgr = manager(&store);

    let loaded = mgr
        .load_profile(Uuid::new_v4(), &OrgCode::parse("TECH1").unwrap())
        .await
        .unwrap();
    assert!(loaded.is_none());
}

#[tokio::test]
async fn subscribers_observe_state_transitions() {
    let store = MemoryStore::with_demo_data();
    let mgr = manager(&store);
    let mut rx = mgr.subscribe();

    mgr.login("FINC2", "miguel@financeco.com", DEMO_PASSWORD)
        .await
        .unwrap();

    rx.changed().await.unwrap();
    match &*rx.borrow_and_update() {
        SessionState::Authenticated(p) => assert_eq!(p.email, "miguel@financeco.com"),
        other => panic!("expected authenticated state, got {other:?}"),
    }

    mgr.logout().await;
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), SessionState::Anonymous);
}

#[tokio::test]
async fn signup_then_login_round_trip() {
    let store = MemoryStore::with_demo_data();
    let mgr = manager(&store);

    let id = mgr
        .signup(SignupInput {
            name: "Nina Patel".into(),
            email: "nina@company.com".into(),
            password: "s3cret-enough".into(),
            role: Role::Client(ClientRole::Architect),
            org_code: OrgCode::parse("TECH1").unwrap(),
        })
        .await
        .unwrap();

    let principal = mgr
        .login("TECH1", "nina@company.com", "s3cret-enough")
        .await
        .unwrap();
    assert_eq!(principal.id, id);
    assert_eq!(principal.role, Role::Client(ClientRole::Architect));
}
