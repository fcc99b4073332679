//! Authentication error types.
//!
//! Login failures are typed so callers can show the actual reason: a
//! bad organization code, a bad password, and a tier/organization
//! mismatch are three different messages, never conflated.

use assetbase_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid organization code")]
    InvalidOrgCode,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account does not belong to this organization or tier")]
    TierMismatch,

    #[error("session has expired")]
    SessionExpired,

    #[error("cryptography error: {0}")]
    Crypto(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<AuthError> for CoreError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Core(inner) => inner,
            other => CoreError::AuthenticationFailed {
                reason: other.to_string(),
            },
        }
    }
}
