//! Assetbase Server — application entry point.
//!
//! Detects the backend from the environment: with credentials present
//! it connects and migrates the SurrealDB schema; without them every
//! service runs against the seeded in-memory mock store.

use std::time::Duration;

use assetbase_auth::{SessionManager, SessionState};
use assetbase_core::error::CoreResult;
use assetbase_core::repository::{
    AssetRepository, OrganizationRepository, ProfileRepository, SessionRepository,
};
use assetbase_db::repository::{
    SurrealAssetRepository, SurrealOrganizationRepository, SurrealProfileRepository,
    SurrealSessionRepository,
};
use assetbase_db::{DbConfig, DbManager, MemoryStore};
use assetbase_services::{AssessmentService, AssetService, OrganizationService, UserService};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Upper bound on waiting for a persisted session at startup; past
/// this the app proceeds as anonymous.
const SESSION_RESTORE_BOUND: Duration = Duration::from_secs(5);

async fn bootstrap<A, O, P, S>(assets: A, orgs: O, profiles: P, sessions: S) -> CoreResult<()>
where
    A: AssetRepository,
    O: OrganizationRepository + Clone,
    P: ProfileRepository + Clone,
    S: SessionRepository,
{
    let manager = SessionManager::new(orgs.clone(), profiles.clone(), sessions);
    manager.restore_session(SESSION_RESTORE_BOUND).await;
    match manager.current() {
        SessionState::Authenticated(principal) => {
            info!(user = %principal.email, role = %principal.role, "session restored");
        }
        _ => info!("no restorable session; awaiting login"),
    }

    let organizations = OrganizationService::new(orgs, profiles.clone());
    let _assets = AssetService::new(assets);
    let _users = UserService::new(profiles);
    let _assessments = AssessmentService::new();

    let tenant_count = organizations.list().await?.len();
    info!(tenants = tenant_count, "service layer ready");

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("assetbase=info".parse().unwrap()),
        )
        .json()
        .init();

    info!("Starting Assetbase server...");

    let result = match DbConfig::from_env() {
        Some(config) => match DbManager::connect(&config).await {
            Ok(manager) => {
                let db = manager.client().clone();
                match assetbase_db::run_migrations(&db).await {
                    Ok(()) => {
                        bootstrap(
                            SurrealAssetRepository::new(db.clone()),
                            SurrealOrganizationRepository::new(db.clone()),
                            SurrealProfileRepository::new(db.clone()),
                            SurrealSessionRepository::new(db),
                        )
                        .await
                    }
                    Err(e) => {
                        error!(error = %e, "schema migration failed");
                        std::process::exit(1);
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "backend connection failed");
                std::process::exit(1);
            }
        },
        None => {
            info!("no backend credentials configured; running in mock mode");
            let store = MemoryStore::with_demo_data();
            bootstrap(store.clone(), store.clone(), store.clone(), store).await
        }
    };

    if let Err(e) = result {
        error!(error = %e, "startup failed");
        std::process::exit(1);
    }

    info!("Assetbase server stopped.");
}
