//! SurrealDB connection management and backend detection.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

/// Environment variable holding the backend base URL.
pub const ENV_BACKEND_URL: &str = "ASSETBASE_BACKEND_URL";
/// Environment variable holding the backend API key.
pub const ENV_BACKEND_KEY: &str = "ASSETBASE_BACKEND_KEY";

/// Configuration for connecting to the backend database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket URL (e.g., `127.0.0.1:8000`).
    pub url: String,
    /// API key used to authenticate the connection.
    pub api_key: String,
    /// SurrealDB namespace.
    pub namespace: String,
    /// SurrealDB database name.
    pub database: String,
}

impl DbConfig {
    /// Read configuration from the environment.
    ///
    /// Returns `None` when either value is absent — the sole trigger
    /// for mock mode.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var(ENV_BACKEND_URL).ok()?;
        let api_key = std::env::var(ENV_BACKEND_KEY).ok()?;
        Some(Self {
            url,
            api_key,
            namespace: "assetbase".into(),
            database: "main".into(),
        })
    }
}

/// Manages a connection to the backend database.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    /// Connect using the provided configuration, select the configured
    /// namespace and database, and return a ready-to-use manager.
    pub async fn connect(config: &DbConfig) -> Result<Self, surrealdb::Error> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Connecting to backend database"
        );

        let db = Surreal::new::<Ws>(&config.url).await?;

        db.signin(Root {
            username: "root".to_string(),
            password: config.api_key.clone(),
        })
        .await?;

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        info!("Successfully connected to backend database");

        Ok(Self { db })
    }

    /// Returns a reference to the underlying client.
    pub fn client(&self) -> &Surreal<Client> {
        &self.db
    }
}
