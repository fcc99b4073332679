//! Schema definitions and migration runner.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings; enums are stored as their wire strings
//! with ASSERT constraints. Organization ids come from a counter
//! record so they stay numeric and monotonic.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Counters (numeric id allocation)
-- =======================================================================
DEFINE TABLE counter SCHEMAFULL;
DEFINE FIELD next ON TABLE counter TYPE int DEFAULT 0;

-- =======================================================================
-- Organizations (tenants)
-- =======================================================================
DEFINE TABLE organization SCHEMAFULL;
DEFINE FIELD org_code ON TABLE organization TYPE string \
    ASSERT string::len($value) == 5;
DEFINE FIELD org_name ON TABLE organization TYPE string;
DEFINE FIELD description ON TABLE organization TYPE option<string>;
DEFINE FIELD sector ON TABLE organization TYPE option<string>;
DEFINE FIELD remarks ON TABLE organization TYPE option<string>;
DEFINE FIELD created_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_organization_code ON TABLE organization \
    COLUMNS org_code UNIQUE;

-- =======================================================================
-- Assets (tenant-scoped inventory)
-- =======================================================================
DEFINE TABLE asset SCHEMAFULL;
DEFINE FIELD name ON TABLE asset TYPE string;
DEFINE FIELD kind ON TABLE asset TYPE string ASSERT $value IN \
    ['application', 'database', 'infrastructure', 'middleware', \
     'cloud-service', 'third-party-service'];
DEFINE FIELD category ON TABLE asset TYPE string;
DEFINE FIELD description ON TABLE asset TYPE string;
DEFINE FIELD owner ON TABLE asset TYPE string;
DEFINE FIELD status ON TABLE asset TYPE string ASSERT $value IN \
    ['active', 'inactive', 'deprecated', 'planned'];
DEFINE FIELD criticality ON TABLE asset TYPE string ASSERT $value IN \
    ['high', 'medium', 'low'];
DEFINE FIELD tags ON TABLE asset TYPE array<string> DEFAULT [];
DEFINE FIELD metadata ON TABLE asset TYPE object FLEXIBLE DEFAULT {};
DEFINE FIELD created_by ON TABLE asset TYPE string;
DEFINE FIELD last_updated ON TABLE asset TYPE string;
DEFINE FIELD org_id ON TABLE asset TYPE option<int>;
DEFINE FIELD created_at ON TABLE asset TYPE datetime DEFAULT time::now();
DEFINE INDEX idx_asset_org ON TABLE asset COLUMNS org_id;

-- =======================================================================
-- Admin profiles (global, no organization binding)
-- =======================================================================
DEFINE TABLE admin_profile SCHEMAFULL;
DEFINE FIELD name ON TABLE admin_profile TYPE string;
DEFINE FIELD email ON TABLE admin_profile TYPE string;
DEFINE FIELD role ON TABLE admin_profile TYPE string ASSERT $value IN \
    ['admin-consultant', 'admin-architect', 'admin-super'];
DEFINE FIELD password_hash ON TABLE admin_profile TYPE string;
DEFINE FIELD created_at ON TABLE admin_profile TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE admin_profile TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_admin_profile_email ON TABLE admin_profile \
    COLUMNS email UNIQUE;

-- =======================================================================
-- Client profiles (always organization-bound)
-- =======================================================================
DEFINE TABLE client_profile SCHEMAFULL;
DEFINE FIELD name ON TABLE client_profile TYPE string;
DEFINE FIELD email ON TABLE client_profile TYPE string;
DEFINE FIELD role ON TABLE client_profile TYPE string ASSERT $value IN \
    ['client-manager', 'client-architect', 'client-cxo'];
DEFINE FIELD org_id ON TABLE client_profile TYPE int;
DEFINE FIELD password_hash ON TABLE client_profile TYPE string;
DEFINE FIELD created_at ON TABLE client_profile TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE client_profile TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_client_profile_email ON TABLE client_profile \
    COLUMNS email UNIQUE;
DEFINE INDEX idx_client_profile_org ON TABLE client_profile \
    COLUMNS org_id;

-- =======================================================================
-- Sessions
-- =======================================================================
DEFINE TABLE session SCHEMAFULL;
DEFINE FIELD user_id ON TABLE session TYPE string;
DEFINE FIELD org_code ON TABLE session TYPE string;
DEFINE FIELD expires_at ON TABLE session TYPE datetime;
DEFINE FIELD created_at ON TABLE session TYPE datetime \
    DEFAULT time::now();
";

/// Apply any unapplied migrations, in version order.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut applied = db
        .query("SELECT version, name FROM _migration ORDER BY version ASC")
        .await?;
    let applied: Vec<MigrationRecord> = applied.take(0)?;
    let latest = applied.iter().map(|m| m.version).max().unwrap_or(0);

    for migration in MIGRATIONS.iter().filter(|m| m.version > latest) {
        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        db.query(migration.sql)
            .await?
            .check()
            .map_err(|e| DbError::Migration(format!("{}: {e}", migration.name)))?;
        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name.to_string()))
            .await?
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;
    }

    Ok(())
}
