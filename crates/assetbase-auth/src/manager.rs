//! Session / identity manager.
//!
//! Owns the current principal's lifecycle: restore on startup, login,
//! logout, signup, and profile loading. State changes are published
//! through a `tokio::sync::watch` channel; dropping the receiver
//! releases the subscription.
//!
//! Generic over the repository traits so the same manager runs
//! unchanged against the backend or the in-memory mock store.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use assetbase_core::error::{CoreError, CoreResult};
use assetbase_core::gate::RequestGate;
use assetbase_core::models::organization::OrgCode;
use assetbase_core::models::principal::Principal;
use assetbase_core::models::profile::{CreateAdminProfile, CreateClientProfile};
use assetbase_core::models::role::Role;
use assetbase_core::models::session::CreateSession;
use assetbase_core::repository::{OrganizationRepository, ProfileRepository, SessionRepository};
use chrono::Utc;
use tokio::sync::watch;
use tracing::warn;
use uuid::Uuid;

use crate::error::AuthError;
use crate::password;

/// Session lifetime for newly created sessions: 30 days.
const SESSION_LIFETIME_SECS: i64 = 30 * 24 * 60 * 60;

/// The principal lifecycle state machine.
///
/// `Uninitialized → Loading → {Authenticated, Anonymous}`; after the
/// first transition out of `Loading` the manager reports itself
/// initialized and never reverts that flag.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Uninitialized,
    Loading,
    Anonymous,
    Authenticated(Principal),
}

/// Input for account creation.
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Tenant code for client-tier accounts; the admin sentinel for
    /// admin-tier accounts.
    pub org_code: OrgCode,
}

pub struct SessionManager<O, P, S>
where
    O: OrganizationRepository,
    P: ProfileRepository,
    S: SessionRepository,
{
    orgs: O,
    profiles: P,
    sessions: S,
    state: watch::Sender<SessionState>,
    initialized: AtomicBool,
    /// Supersedes in-flight profile loads on login/logout so a stale
    /// load can never resurrect a principal after teardown.
    gate: RequestGate,
    active_session: Mutex<Option<Uuid>>,
}

impl<O, P, S> SessionManager<O, P, S>
where
    O: OrganizationRepository,
    P: ProfileRepository,
    S: SessionRepository,
{
    pub fn new(orgs: O, profiles: P, sessions: S) -> Self {
        let (state, _) = watch::channel(SessionState::Uninitialized);
        Self {
            orgs,
            profiles,
            sessions,
            state,
            initialized: AtomicBool::new(false),
            gate: RequestGate::new(),
            active_session: Mutex::new(None),
        }
    }

    /// The current state, cloned out of the channel.
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// The authenticated principal, if any.
    pub fn principal(&self) -> Option<Principal> {
        match &*self.state.borrow() {
            SessionState::Authenticated(p) => Some(p.clone()),
            _ => None,
        }
    }

    /// Latched after the first restore/login completes.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Register for state-change notifications. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Restore any persisted session on startup, bounded by `bound`.
    ///
    /// Never propagates an error: a slow or failing backend degrades to
    /// `Anonymous` so startup can proceed to the login screen instead
    /// of hanging.
    pub async fn restore_session(&self, bound: Duration) {
        self.state.send_replace(SessionState::Loading);

        match tokio::time::timeout(bound, self.sessions.current()).await {
            Ok(Ok(Some(session))) => {
                *self.active_session.lock().expect("session slot poisoned") = Some(session.id);
                let loaded = self
                    .load_profile(session.user_id, &session.org_code)
                    .await
                    .unwrap_or(None);
                if loaded.is_none() {
                    self.state.send_replace(SessionState::Anonymous);
                }
            }
            Ok(Ok(None)) => {
                self.state.send_replace(SessionState::Anonymous);
            }
            Ok(Err(e)) => {
                warn!(error = %e, "session restore failed; proceeding as anonymous");
                self.state.send_replace(SessionState::Anonymous);
            }
            Err(_) => {
                warn!(bound_ms = bound.as_millis() as u64, "session restore timed out");
                self.state.send_replace(SessionState::Anonymous);
            }
        }

        self.initialized.store(true, Ordering::Release);
    }

    /// Load the full profile for `user_id` and publish it as the
    /// authenticated principal.
    ///
    /// The hint decides which profile collection to consult: the admin
    /// sentinel selects the global admin collection, anything else the
    /// organization-joined client collection. Idempotent when that
    /// principal is already loaded, so overlapping change notifications
    /// do not trigger redundant fetches. Fetch errors degrade to
    /// `Ok(None)` and are only logged.
    pub async fn load_profile(
        &self,
        user_id: Uuid,
        org_code_hint: &OrgCode,
    ) -> CoreResult<Option<Principal>> {
        {
            let state = self.state.borrow();
            if let SessionState::Authenticated(p) = &*state {
                if p.id == user_id {
                    return Ok(Some(p.clone()));
                }
            }
        }

        let ticket = self.gate.issue();

        let principal = if org_code_hint.is_admin_sentinel() {
            match self.profiles.get_admin(user_id).await {
                Ok(profile) => Some(profile.to_principal()),
                Err(e) => {
                    warn!(%user_id, error = %e, "admin profile load failed");
                    None
                }
            }
        } else {
            match self.profiles.get_client(user_id).await {
                Ok(profile) => Some(profile.to_principal()),
                Err(e) => {
                    warn!(%user_id, error = %e, "client profile load failed");
                    None
                }
            }
        };

        let Some(principal) = principal else {
            return Ok(None);
        };

        if !self.gate.is_current(ticket) {
            // A login or logout superseded this load; drop the result.
            return Ok(None);
        }

        self.state
            .send_replace(SessionState::Authenticated(principal.clone()));
        Ok(Some(principal))
    }

    /// Authenticate and load the full principal.
    ///
    /// Failure reasons are typed: a bad organization code, bad
    /// credentials, and a tier/organization mismatch surface as
    /// distinct errors for display.
    pub async fn login(
        &self,
        org_code: &str,
        email: &str,
        password: &str,
    ) -> Result<Principal, AuthError> {
        let code = OrgCode::parse(org_code).map_err(|_| AuthError::InvalidOrgCode)?;

        let principal = if code.is_admin_sentinel() {
            let Some(profile) = self.profiles.find_admin_by_email(email).await? else {
                // Distinguish "right person, wrong tier" from a bad login.
                if self.profiles.find_client_by_email(email).await?.is_some() {
                    return Err(AuthError::TierMismatch);
                }
                return Err(AuthError::InvalidCredentials);
            };
            if !password::verify_password(password, &profile.password_hash)? {
                return Err(AuthError::InvalidCredentials);
            }
            profile.to_principal()
        } else {
            let org = match self.orgs.get_by_code(code.as_str()).await {
                Ok(org) => org,
                Err(CoreError::NotFound { .. }) => return Err(AuthError::InvalidOrgCode),
                Err(e) => return Err(e.into()),
            };
            let Some(found) = self.profiles.find_client_by_email(email).await? else {
                if self.profiles.find_admin_by_email(email).await?.is_some() {
                    return Err(AuthError::TierMismatch);
                }
                return Err(AuthError::InvalidCredentials);
            };
            // Credentials are checked before tenant membership so a bad
            // password never reports the more specific mismatch error.
            if !password::verify_password(password, &found.profile.password_hash)? {
                return Err(AuthError::InvalidCredentials);
            }
            if found.profile.org_id != org.org_id {
                return Err(AuthError::TierMismatch);
            }
            found.to_principal()
        };

        let session = self
            .sessions
            .create(CreateSession {
                user_id: principal.id,
                org_code: principal.org_code.clone(),
                expires_at: Utc::now() + chrono::Duration::seconds(SESSION_LIFETIME_SECS),
            })
            .await?;
        *self.active_session.lock().expect("session slot poisoned") = Some(session.id);

        self.gate.invalidate_all();
        self.initialized.store(true, Ordering::Release);
        self.state
            .send_replace(SessionState::Authenticated(principal.clone()));

        Ok(principal)
    }

    /// Invalidate any stored session and clear the principal.
    ///
    /// The remote invalidation may fail; the in-memory principal is
    /// cleared unconditionally either way.
    pub async fn logout(&self) {
        self.gate.invalidate_all();

        let active = self
            .active_session
            .lock()
            .expect("session slot poisoned")
            .take();
        if let Some(id) = active {
            if let Err(e) = self.sessions.invalidate(id).await {
                warn!(session_id = %id, error = %e, "remote session invalidation failed");
            }
        }

        self.state.send_replace(SessionState::Anonymous);
    }

    /// Create a new account in the collection matching the role's tier.
    pub async fn signup(&self, input: SignupInput) -> CoreResult<Uuid> {
        match input.role {
            Role::Admin(role) => {
                let profile = self
                    .profiles
                    .create_admin(CreateAdminProfile {
                        name: input.name,
                        email: input.email,
                        role,
                        password: input.password,
                    })
                    .await?;
                Ok(profile.id)
            }
            Role::Client(role) => {
                let org = self.orgs.get_by_code(input.org_code.as_str()).await?;
                let profile = self
                    .profiles
                    .create_client(CreateClientProfile {
                        name: input.name,
                        email: input.email,
                        role,
                        org_id: org.org_id,
                        password: input.password,
                    })
                    .await?;
                Ok(profile.id)
            }
        }
    }
}
