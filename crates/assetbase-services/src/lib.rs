//! Assetbase Services — entity services over the repository traits.
//!
//! Each service takes an explicit [`RequestContext`] (principal plus
//! selected organization) instead of reading ambient session state, so
//! tests can construct isolated instances. The scoping policy is
//! applied uniformly here: admin-tier principals read cross-tenant,
//! client-tier principals are always narrowed to their own tenant.

pub mod asset;
pub mod assessment;
pub mod context;
pub mod organization;
pub mod user;

pub use asset::{AssetService, ImportOutcome, NewAsset};
pub use assessment::AssessmentService;
pub use context::RequestContext;
pub use organization::{
    CreateOrganizationInput, OnboardingInput, OnboardingOutcome, OrganizationService,
    UpdateOrganizationInput,
};
pub use user::UserService;
