//! Organization entity service and onboarding.

use assetbase_core::error::{CoreError, CoreResult};
use assetbase_core::models::organization::{
    CreateOrganization, OrgCode, OrgId, Organization, UpdateOrganization,
};
use assetbase_core::models::profile::{ClientProfile, CreateClientProfile};
use assetbase_core::models::role::ClientRole;
use assetbase_core::repository::{OrganizationRepository, ProfileRepository};
use tracing::{error, info};

/// Raw organization fields as entered in a form; the code is validated
/// here, before any repository call.
#[derive(Debug, Clone)]
pub struct CreateOrganizationInput {
    pub org_code: String,
    pub org_name: String,
    pub description: Option<String>,
    pub sector: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateOrganizationInput {
    pub org_code: Option<String>,
    pub org_name: Option<String>,
    pub description: Option<String>,
    pub sector: Option<String>,
    pub remarks: Option<String>,
}

/// Everything needed to onboard a new tenant in one action.
#[derive(Debug, Clone)]
pub struct OnboardingInput {
    pub org_code: String,
    pub org_name: String,
    pub description: Option<String>,
    pub sector: Option<String>,
    pub remarks: Option<String>,
    pub cxo_name: String,
    pub cxo_email: String,
    pub cxo_password: String,
}

/// Both objects created by onboarding; callers reload the organization
/// list afterwards.
#[derive(Debug, Clone)]
pub struct OnboardingOutcome {
    pub organization: Organization,
    pub cxo: ClientProfile,
}

pub struct OrganizationService<O, P>
where
    O: OrganizationRepository,
    P: ProfileRepository,
{
    orgs: O,
    profiles: P,
}

impl<O, P> OrganizationService<O, P>
where
    O: OrganizationRepository,
    P: ProfileRepository,
{
    pub fn new(orgs: O, profiles: P) -> Self {
        Self { orgs, profiles }
    }

    pub async fn list(&self) -> CoreResult<Vec<Organization>> {
        self.orgs.list().await
    }

    pub async fn get(&self, id: OrgId) -> CoreResult<Organization> {
        self.orgs.get_by_id(id).await
    }

    pub async fn get_by_code(&self, code: &str) -> CoreResult<Organization> {
        self.orgs.get_by_code(code).await
    }

    /// Create an organization. An invalid code fails here, before the
    /// store is touched.
    pub async fn create(&self, input: CreateOrganizationInput) -> CoreResult<Organization> {
        let org_code = OrgCode::parse(&input.org_code)?;
        self.orgs
            .create(CreateOrganization {
                org_code,
                org_name: input.org_name,
                description: input.description,
                sector: input.sector,
                remarks: input.remarks,
            })
            .await
    }

    pub async fn update(
        &self,
        id: OrgId,
        input: UpdateOrganizationInput,
    ) -> CoreResult<Organization> {
        let org_code = input.org_code.as_deref().map(OrgCode::parse).transpose()?;
        self.orgs
            .update(
                id,
                UpdateOrganization {
                    org_code,
                    org_name: input.org_name,
                    description: input.description,
                    sector: input.sector,
                    remarks: input.remarks,
                },
            )
            .await
    }

    pub async fn delete(&self, id: OrgId) -> CoreResult<()> {
        self.orgs.delete(id).await
    }

    /// Onboard a new tenant: create the organization, then its initial
    /// CXO account bound to the new `org_id`.
    ///
    /// There is no compensating rollback: if the CXO creation fails the
    /// organization is left without an owner and the error names it so
    /// an operator can clean up or retry the account creation.
    pub async fn onboard(&self, input: OnboardingInput) -> CoreResult<OnboardingOutcome> {
        let org_code = OrgCode::parse(&input.org_code)?;

        let organization = self
            .orgs
            .create(CreateOrganization {
                org_code,
                org_name: input.org_name,
                description: input.description,
                sector: input.sector,
                remarks: input.remarks,
            })
            .await?;

        let cxo = match self
            .profiles
            .create_client(CreateClientProfile {
                name: input.cxo_name,
                email: input.cxo_email,
                role: ClientRole::Cxo,
                org_id: organization.org_id,
                password: input.cxo_password,
            })
            .await
        {
            Ok(profile) => profile,
            Err(e) => {
                error!(
                    org_id = %organization.org_id,
                    error = %e,
                    "CXO account creation failed after organization creation"
                );
                return Err(CoreError::Internal(format!(
                    "organization {} was created but its CXO account failed: {e}",
                    organization.org_id
                )));
            }
        };

        info!(
            org_id = %organization.org_id,
            org_code = %organization.org_code,
            "organization onboarded"
        );

        Ok(OnboardingOutcome { organization, cxo })
    }
}
