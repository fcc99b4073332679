//! Stored session model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::organization::OrgCode;

/// A persisted session record, restorable across restarts when a
/// backend is configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Which profile collection to consult when reloading the
    /// principal: the admin sentinel selects the admin collection.
    pub org_code: OrgCode,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    pub user_id: Uuid,
    pub org_code: OrgCode,
    pub expires_at: DateTime<Utc>,
}
