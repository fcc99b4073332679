//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Tenant-scoped queries take an
//! optional `OrgId` filter; `None` means "unrestricted", never "match
//! nothing". The SurrealDB-backed and in-memory implementations must be
//! observably identical for success cases — services are generic over
//! these traits so mock-mode parity holds by construction.

use uuid::Uuid;

use crate::error::CoreResult;
use crate::models::{
    asset::{Asset, AssetKind, CreateAsset, UpdateAsset},
    organization::{CreateOrganization, OrgId, Organization, UpdateOrganization},
    profile::{
        AdminProfile, ClientProfile, ClientProfileWithOrg, CreateAdminProfile,
        CreateClientProfile, UpdateClientProfile,
    },
    session::{CreateSession, StoredSession},
};

pub trait AssetRepository: Send + Sync {
    fn create(&self, input: CreateAsset) -> impl Future<Output = CoreResult<Asset>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = CoreResult<Asset>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateAsset,
    ) -> impl Future<Output = CoreResult<Asset>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = CoreResult<()>> + Send;
    fn list(&self, scope: Option<OrgId>) -> impl Future<Output = CoreResult<Vec<Asset>>> + Send;
    /// Case-insensitive substring match over name, description, and
    /// owner; kind filter exact when present; predicates AND.
    fn search(
        &self,
        query: &str,
        kind: Option<AssetKind>,
        scope: Option<OrgId>,
    ) -> impl Future<Output = CoreResult<Vec<Asset>>> + Send;
}

pub trait OrganizationRepository: Send + Sync {
    fn create(
        &self,
        input: CreateOrganization,
    ) -> impl Future<Output = CoreResult<Organization>> + Send;
    fn get_by_id(&self, id: OrgId) -> impl Future<Output = CoreResult<Organization>> + Send;
    fn get_by_code(&self, code: &str) -> impl Future<Output = CoreResult<Organization>> + Send;
    fn update(
        &self,
        id: OrgId,
        input: UpdateOrganization,
    ) -> impl Future<Output = CoreResult<Organization>> + Send;
    fn delete(&self, id: OrgId) -> impl Future<Output = CoreResult<()>> + Send;
    fn list(&self) -> impl Future<Output = CoreResult<Vec<Organization>>> + Send;
}

/// Access to the two disjoint profile collections. Admin profiles are
/// global; client profiles are organization-bound and read back joined
/// with their organization's display fields.
pub trait ProfileRepository: Send + Sync {
    fn create_admin(
        &self,
        input: CreateAdminProfile,
    ) -> impl Future<Output = CoreResult<AdminProfile>> + Send;
    fn create_client(
        &self,
        input: CreateClientProfile,
    ) -> impl Future<Output = CoreResult<ClientProfile>> + Send;
    fn get_admin(&self, id: Uuid) -> impl Future<Output = CoreResult<AdminProfile>> + Send;
    fn get_client(&self, id: Uuid)
    -> impl Future<Output = CoreResult<ClientProfileWithOrg>> + Send;
    fn find_admin_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = CoreResult<Option<AdminProfile>>> + Send;
    fn find_client_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = CoreResult<Option<ClientProfileWithOrg>>> + Send;
    fn list_clients(
        &self,
        scope: Option<OrgId>,
    ) -> impl Future<Output = CoreResult<Vec<ClientProfileWithOrg>>> + Send;
    fn update_client(
        &self,
        id: Uuid,
        input: UpdateClientProfile,
    ) -> impl Future<Output = CoreResult<ClientProfile>> + Send;
    fn delete_client(&self, id: Uuid) -> impl Future<Output = CoreResult<()>> + Send;
}

pub trait SessionRepository: Send + Sync {
    fn create(
        &self,
        input: CreateSession,
    ) -> impl Future<Output = CoreResult<StoredSession>> + Send;
    /// The newest unexpired session, if any (consulted on startup).
    fn current(&self) -> impl Future<Output = CoreResult<Option<StoredSession>>> + Send;
    fn invalidate(&self, id: Uuid) -> impl Future<Output = CoreResult<()>> + Send;
}
