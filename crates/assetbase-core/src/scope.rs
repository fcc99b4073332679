//! Tenant scoping policy.
//!
//! Both functions are pure and must be recomputed on every dependent
//! call: the selected organization can change between calls within the
//! same session, so caching a resolved scope would leak one tenant's
//! data into another's view.

use crate::models::organization::{OrgId, Organization};
use crate::models::principal::Principal;

/// What an acting principal is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Admin tier: unfiltered, cross-tenant.
    AllTenants,
    /// Client tier bound to one organization.
    Tenant(OrgId),
    /// Client tier with no organization binding; callers treat this as
    /// "no filter", never "match nothing".
    Unscoped,
}

impl Visibility {
    /// The scope filter to pass to a repository, if any.
    pub fn filter(&self) -> Option<OrgId> {
        match self {
            Visibility::Tenant(id) => Some(*id),
            Visibility::AllTenants | Visibility::Unscoped => None,
        }
    }
}

/// The cross-tenant visibility policy: admin accounts see everything,
/// client accounts are always narrowed to their own tenant.
pub fn visibility(principal: &Principal) -> Visibility {
    use crate::models::role::Role;
    match principal.role {
        Role::Admin(_) => Visibility::AllTenants,
        Role::Client(_) => match principal.org_id {
            Some(id) => Visibility::Tenant(id),
            None => Visibility::Unscoped,
        },
    }
}

/// Resolve the single `org_id` to apply as a write/display scope.
///
/// An admin operating with a selected organization impersonates that
/// tenant's view; everyone else is confined to their own `org_id`
/// (`None` for an unscoped admin, meaning "do not filter").
pub fn resolve_scope(principal: &Principal, selected: Option<&Organization>) -> Option<OrgId> {
    if principal.is_admin() && principal.org_code.is_admin_sentinel() {
        if let Some(org) = selected {
            return Some(org.org_id);
        }
    }
    principal.org_id
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::organization::OrgCode;
    use crate::models::role::{AdminRole, ClientRole, Role};

    fn client(org_id: Option<OrgId>) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            name: "John Smith".into(),
            email: "john@company.com".into(),
            role: Role::Client(ClientRole::Manager),
            organization: "TechCorp".into(),
            org_code: OrgCode::parse("TECH1").unwrap(),
            org_id,
        }
    }

    fn admin() -> Principal {
        Principal {
            id: Uuid::new_v4(),
            name: "Ada Admin".into(),
            email: "ada@consulting.example".into(),
            role: Role::Admin(AdminRole::Super),
            organization: "Admin".into(),
            org_code: OrgCode::admin(),
            org_id: None,
        }
    }

    fn org(id: i64) -> Organization {
        Organization {
            org_id: OrgId(id),
            org_code: OrgCode::parse("FINC2").unwrap(),
            org_name: "FinanceCo".into(),
            description: None,
            sector: None,
            remarks: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn admin_with_selection_impersonates_it() {
        let selected = org(2);
        assert_eq!(resolve_scope(&admin(), Some(&selected)), Some(OrgId(2)));
    }

    #[test]
    fn admin_without_selection_falls_back_to_own_org() {
        assert_eq!(resolve_scope(&admin(), None), None);
    }

    #[test]
    fn client_ignores_selection() {
        let selected = org(2);
        let p = client(Some(OrgId(7)));
        assert_eq!(resolve_scope(&p, Some(&selected)), Some(OrgId(7)));
    }

    #[test]
    fn visibility_policy_by_tier() {
        assert_eq!(visibility(&admin()), Visibility::AllTenants);
        assert_eq!(
            visibility(&client(Some(OrgId(7)))),
            Visibility::Tenant(OrgId(7))
        );
        assert_eq!(visibility(&client(None)), Visibility::Unscoped);
        assert_eq!(visibility(&client(None)).filter(), None);
        assert_eq!(visibility(&admin()).filter(), None);
    }
}
