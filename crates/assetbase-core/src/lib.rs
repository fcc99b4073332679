//! Assetbase Core — domain models, repository traits, and the
//! tenant-scoping policy shared across all crates.

pub mod assessment;
pub mod catalog;
pub mod error;
pub mod gate;
pub mod import;
pub mod models;
pub mod repository;
pub mod scope;

pub use error::{CoreError, CoreResult};
