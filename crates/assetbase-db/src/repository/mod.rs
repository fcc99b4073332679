//! SurrealDB repository implementations.

mod asset;
mod organization;
mod profile;
mod session;

pub use asset::SurrealAssetRepository;
pub use organization::SurrealOrganizationRepository;
pub use profile::{SurrealProfileRepository, hash_password};
pub use session::SurrealSessionRepository;
