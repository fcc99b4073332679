//! User-management entity service (client-tier accounts).

use assetbase_core::error::{CoreError, CoreResult};
use assetbase_core::models::profile::{
    ClientProfile, ClientProfileWithOrg, CreateClientProfile, UpdateClientProfile,
};
use assetbase_core::models::role::ClientRole;
use assetbase_core::repository::ProfileRepository;
use uuid::Uuid;

use crate::context::RequestContext;

pub struct UserService<P: ProfileRepository> {
    profiles: P,
}

impl<P: ProfileRepository> UserService<P> {
    pub fn new(profiles: P) -> Self {
        Self { profiles }
    }

    /// List client accounts visible to the caller: cross-tenant for
    /// admins, own-tenant for clients.
    pub async fn list(&self, ctx: &RequestContext) -> CoreResult<Vec<ClientProfileWithOrg>> {
        self.profiles.list_clients(ctx.read_scope()).await
    }

    pub async fn get(&self, id: Uuid) -> CoreResult<ClientProfileWithOrg> {
        self.profiles.get_client(id).await
    }

    /// Create a client account in the caller's resolved organization.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: String,
        email: String,
        role: ClientRole,
        password: String,
    ) -> CoreResult<ClientProfile> {
        let Some(org_id) = ctx.write_scope() else {
            return Err(CoreError::validation(
                "org_id",
                "",
                "no organization scope resolved for user creation",
            ));
        };

        self.profiles
            .create_client(CreateClientProfile {
                name,
                email,
                role,
                org_id,
                password,
            })
            .await
    }

    pub async fn update(&self, id: Uuid, input: UpdateClientProfile) -> CoreResult<ClientProfile> {
        self.profiles.update_client(id, input).await
    }

    pub async fn delete(&self, id: Uuid) -> CoreResult<()> {
        self.profiles.delete_client(id).await
    }
}
