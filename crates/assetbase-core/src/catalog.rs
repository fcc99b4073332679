//! Closed asset-category catalog.
//!
//! Each asset kind owns a fixed category list; `category` is never free
//! text. The guided creation flow selects from these lists by
//! construction, and the bulk-import validator enforces membership per
//! row.

use crate::models::asset::AssetKind;

const APPLICATION: &[&str] = &[
    "Core Business Application",
    "Customer-Facing Web Application",
    "Mobile Application",
    "Internal Tool",
    "Legacy Application",
    "ERP/CRM Suite",
];

const DATABASE: &[&str] = &[
    "RDBMS (MySQL/PostgreSQL)",
    "RDBMS (Oracle/SQL Server)",
    "NoSQL Document Store",
    "Key-Value / Cache Store",
    "Data Warehouse",
    "Time-Series Database",
];

const INFRASTRUCTURE: &[&str] = &[
    "Physical Server",
    "Virtual Machine",
    "Container Platform",
    "Network Equipment",
    "Storage System",
    "End-User Device Fleet",
];

const MIDDLEWARE: &[&str] = &[
    "Application Server",
    "Message Broker",
    "API Gateway",
    "Integration/ESB Platform",
    "Identity Provider",
];

const CLOUD_SERVICE: &[&str] = &[
    "IaaS Compute",
    "PaaS Runtime",
    "SaaS Subscription",
    "Cloud Storage",
    "Serverless Function",
];

const THIRD_PARTY_SERVICE: &[&str] = &[
    "Payment Provider",
    "Analytics Service",
    "Communication/Email Service",
    "Monitoring Service",
    "Outsourced Managed Service",
];

/// The fixed category list for a kind.
pub fn categories_for(kind: AssetKind) -> &'static [&'static str] {
    match kind {
        AssetKind::Application => APPLICATION,
        AssetKind::Database => DATABASE,
        AssetKind::Infrastructure => INFRASTRUCTURE,
        AssetKind::Middleware => MIDDLEWARE,
        AssetKind::CloudService => CLOUD_SERVICE,
        AssetKind::ThirdPartyService => THIRD_PARTY_SERVICE,
    }
}

/// Membership check against the closed per-kind list.
pub fn is_valid_category(kind: AssetKind, category: &str) -> bool {
    categories_for(kind).contains(&category)
}
