//! Assetbase DB — storage strategies behind the core repository traits.
//!
//! Two implementations of every trait:
//! - SurrealDB-backed repositories (the configured-backend path), plus
//!   connection management and schema migrations;
//! - the in-memory [`MemoryStore`] (mock mode), volatile and seeded
//!   with demo data.
//!
//! Mock mode is selected solely by the absence of backend credentials
//! in the environment (see [`DbConfig::from_env`]); there is no
//! explicit mode flag.

mod connection;
mod error;
pub mod memory;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use memory::MemoryStore;
pub use schema::run_migrations;
