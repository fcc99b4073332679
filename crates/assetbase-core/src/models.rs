//! Domain models for Assetbase.
//!
//! These are the core types shared across all crates.

pub mod asset;
pub mod organization;
pub mod principal;
pub mod profile;
pub mod role;
pub mod session;
pub mod upload;
