//! Assetbase Auth — session lifecycle and credential verification.

pub mod error;
pub mod manager;
pub mod password;

pub use error::AuthError;
pub use manager::{SessionManager, SessionState, SignupInput};
