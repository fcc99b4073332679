//! Per-request context.

use assetbase_core::models::organization::{OrgId, Organization};
use assetbase_core::models::principal::Principal;
use assetbase_core::scope::{resolve_scope, visibility};

/// The acting principal and, for admins, the organization currently
/// selected for impersonation.
///
/// Scopes are resolved from this context on every call, never cached:
/// the selection can change between calls within one session.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub principal: Principal,
    pub selected_org: Option<Organization>,
}

impl RequestContext {
    pub fn new(principal: Principal) -> Self {
        Self {
            principal,
            selected_org: None,
        }
    }

    pub fn with_selected_org(principal: Principal, selected_org: Organization) -> Self {
        Self {
            principal,
            selected_org: Some(selected_org),
        }
    }

    /// Filter applied to list/search calls. Admins read cross-tenant
    /// (no filter); clients are narrowed to their own organization.
    pub fn read_scope(&self) -> Option<OrgId> {
        visibility(&self.principal).filter()
    }

    /// Organization stamped onto created/updated rows. An admin with a
    /// selected organization writes into that tenant.
    pub fn write_scope(&self) -> Option<OrgId> {
        resolve_scope(&self.principal, self.selected_org.as_ref())
    }
}
