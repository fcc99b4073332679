//! Asset domain model.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::organization::OrgId;
use crate::error::CoreError;

/// The closed set of asset kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AssetKind {
    Application,
    Database,
    Infrastructure,
    Middleware,
    CloudService,
    ThirdPartyService,
}

impl AssetKind {
    pub const ALL: [AssetKind; 6] = [
        AssetKind::Application,
        AssetKind::Database,
        AssetKind::Infrastructure,
        AssetKind::Middleware,
        AssetKind::CloudService,
        AssetKind::ThirdPartyService,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Application => "application",
            AssetKind::Database => "database",
            AssetKind::Infrastructure => "infrastructure",
            AssetKind::Middleware => "middleware",
            AssetKind::CloudService => "cloud-service",
            AssetKind::ThirdPartyService => "third-party-service",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "application" => Ok(AssetKind::Application),
            "database" => Ok(AssetKind::Database),
            "infrastructure" => Ok(AssetKind::Infrastructure),
            "middleware" => Ok(AssetKind::Middleware),
            "cloud-service" => Ok(AssetKind::CloudService),
            "third-party-service" => Ok(AssetKind::ThirdPartyService),
            other => Err(CoreError::validation("type", other, "unknown asset type")),
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for AssetKind {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        AssetKind::parse(&s)
    }
}

impl From<AssetKind> for String {
    fn from(k: AssetKind) -> Self {
        k.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AssetStatus {
    Active,
    Inactive,
    Deprecated,
    Planned,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Active => "active",
            AssetStatus::Inactive => "inactive",
            AssetStatus::Deprecated => "deprecated",
            AssetStatus::Planned => "planned",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "active" => Ok(AssetStatus::Active),
            "inactive" => Ok(AssetStatus::Inactive),
            "deprecated" => Ok(AssetStatus::Deprecated),
            "planned" => Ok(AssetStatus::Planned),
            other => Err(CoreError::validation("status", other, "unknown status")),
        }
    }
}

impl TryFrom<String> for AssetStatus {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        AssetStatus::parse(&s)
    }
}

impl From<AssetStatus> for String {
    fn from(s: AssetStatus) -> Self {
        s.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Criticality {
    High,
    Medium,
    Low,
}

impl Criticality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Criticality::High => "high",
            Criticality::Medium => "medium",
            Criticality::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "high" => Ok(Criticality::High),
            "medium" => Ok(Criticality::Medium),
            "low" => Ok(Criticality::Low),
            other => Err(CoreError::validation(
                "criticality",
                other,
                "unknown criticality",
            )),
        }
    }
}

impl TryFrom<String> for Criticality {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Criticality::parse(&s)
    }
}

impl From<Criticality> for String {
    fn from(c: Criticality) -> Self {
        c.as_str().to_string()
    }
}

/// An inventoried IT asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    pub kind: AssetKind,
    /// Must belong to the closed category list for `kind`
    /// (see [`crate::catalog`]).
    pub category: String,
    pub description: String,
    pub owner: String,
    pub status: AssetStatus,
    pub criticality: Criticality,
    /// Ordered free-form labels.
    pub tags: Vec<String>,
    /// Unique string keys; insertion order is irrelevant.
    pub metadata: BTreeMap<String, String>,
    pub created_by: String,
    /// Service-stamped on every create/update.
    pub last_updated: NaiveDate,
    pub org_id: Option<OrgId>,
}

/// Fields required to create a new asset. `last_updated` is stamped by
/// the service, never supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAsset {
    pub name: String,
    pub kind: AssetKind,
    pub category: String,
    pub description: String,
    pub owner: String,
    pub status: AssetStatus,
    pub criticality: Criticality,
    pub tags: Vec<String>,
    pub metadata: BTreeMap<String, String>,
    pub created_by: String,
    pub org_id: Option<OrgId>,
}

/// Fields that can be updated on an existing asset. Kind and category
/// are immutable after creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAsset {
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub status: Option<AssetStatus>,
    pub criticality: Option<Criticality>,
    pub tags: Option<Vec<String>>,
    pub metadata: Option<BTreeMap<String, String>>,
}
