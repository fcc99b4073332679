//! Bulk-import row validation.
//!
//! Spreadsheet parsing happens upstream; this module validates the
//! already-split rows. Every row is checked independently so a report
//! lists all problems in one pass. Data rows are numbered from 2 (row 1
//! is the header).

use std::collections::BTreeMap;

use crate::catalog;
use crate::models::asset::{AssetKind, AssetStatus, CreateAsset, Criticality};
use crate::models::organization::OrgId;

/// One raw data row as read from a spreadsheet, fields still unparsed.
#[derive(Debug, Clone, Default)]
pub struct AssetRowInput {
    pub name: String,
    pub kind: String,
    pub category: String,
    pub description: String,
    pub owner: String,
    pub status: String,
    pub criticality: String,
    /// Already split on the upstream delimiter; empty means absent.
    pub tags: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

/// A single validation failure, tagged with its 1-based sheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub row: usize,
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

/// A non-blocking finding.
#[derive(Debug, Clone, PartialEq)]
pub struct RowWarning {
    pub row: usize,
    pub field: &'static str,
    pub message: String,
}

/// Outcome of validating a whole batch.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub errors: Vec<RowError>,
    pub warnings: Vec<RowWarning>,
    /// Parsed rows that passed every check, in input order. Only
    /// forwarded to the create path when `is_valid()`.
    pub parsed: Vec<ParsedRow>,
}

/// A fully parsed row paired with its sheet position.
#[derive(Debug, Clone)]
pub struct ParsedRow {
    pub row: usize,
    pub name: String,
    pub kind: AssetKind,
    pub category: String,
    pub description: String,
    pub owner: String,
    pub status: AssetStatus,
    pub criticality: Criticality,
    pub tags: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

impl ImportReport {
    /// Warnings never block acceptance; any error does.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl ParsedRow {
    /// Build the create payload for this row.
    pub fn into_create(self, created_by: String, org_id: Option<OrgId>) -> CreateAsset {
        CreateAsset {
            name: self.name,
            kind: self.kind,
            category: self.category,
            description: self.description,
            owner: self.owner,
            status: self.status,
            criticality: self.criticality,
            tags: self.tags,
            metadata: self.metadata,
            created_by,
            org_id,
        }
    }
}

/// First sheet row holding data (row 1 is the header).
const FIRST_DATA_ROW: usize = 2;

/// Validate a batch of rows. Each row is checked independently; one row
/// can contribute several errors.
pub fn validate_import(rows: &[AssetRowInput]) -> ImportReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut parsed = Vec::new();

    for (i, input) in rows.iter().enumerate() {
        let row = FIRST_DATA_ROW + i;
        let before = errors.len();

        for (field, value) in [("name", &input.name), ("owner", &input.owner)] {
            if value.trim().is_empty() {
                errors.push(RowError {
                    row,
                    field,
                    value: value.clone(),
                    message: format!("required field '{field}' is missing"),
                });
            }
        }

        let kind = match AssetKind::parse(input.kind.trim()) {
            Ok(kind) => {
                if !catalog::is_valid_category(kind, input.category.trim()) {
                    errors.push(RowError {
                        row,
                        field: "category",
                        value: input.category.clone(),
                        message: format!("'{}' is not a category of type '{kind}'", input.category),
                    });
                }
                Some(kind)
            }
            Err(_) => {
                errors.push(RowError {
                    row,
                    field: "type",
                    value: input.kind.clone(),
                    message: format!("'{}' is not a valid asset type", input.kind),
                });
                None
            }
        };

        let status = AssetStatus::parse(input.status.trim())
            .map_err(|_| {
                errors.push(RowError {
                    row,
                    field: "status",
                    value: input.status.clone(),
                    message: format!("'{}' is not a valid status", input.status),
                });
            })
            .ok();

        let criticality = Criticality::parse(input.criticality.trim())
            .map_err(|_| {
                errors.push(RowError {
                    row,
                    field: "criticality",
                    value: input.criticality.clone(),
                    message: format!("'{}' is not a valid criticality", input.criticality),
                });
            })
            .ok();

        if input.tags.is_empty() {
            warnings.push(RowWarning {
                row,
                field: "tags",
                message: "no tags supplied".to_string(),
            });
        }

        if errors.len() == before {
            // All three parses succeeded if no error was recorded.
            let (Some(kind), Some(status), Some(criticality)) = (kind, status, criticality) else {
                continue;
            };
            parsed.push(ParsedRow {
                row,
                name: input.name.trim().to_string(),
                kind,
                category: input.category.trim().to_string(),
                description: input.description.clone(),
                owner: input.owner.trim().to_string(),
                status,
                criticality,
                tags: input.tags.clone(),
                metadata: input.metadata.clone(),
            });
        }
    }

    ImportReport {
        total_rows: rows.len(),
        valid_rows: parsed.len(),
        errors,
        warnings,
        parsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good_row(name: &str) -> AssetRowInput {
        AssetRowInput {
            name: name.into(),
            kind: "database".into(),
            category: "RDBMS (MySQL/PostgreSQL)".into(),
            description: "primary orders db".into(),
            owner: "Platform Team".into(),
            status: "active".into(),
            criticality: "high".into(),
            tags: vec!["prod".into()],
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn accepts_clean_batch() {
        let rows = vec![good_row("orders-db"), good_row("billing-db")];
        let report = validate_import(&rows);
        assert!(report.is_valid());
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.valid_rows, 2);
        // Rows keep their original sheet positions.
        assert_eq!(report.parsed[0].row, 2);
        assert_eq!(report.parsed[1].row, 3);
    }

    #[test]
    fn invalid_kind_errors_independently_of_other_fields() {
        let mut rows = vec![
            good_row("a"),
            good_row("b"),
            good_row("c"),
            good_row("d"),
            good_row("e"),
        ];
        rows[2].kind = "invalid-type".into();
        let report = validate_import(&rows);
        assert!(!report.is_valid());
        assert_eq!(report.total_rows, 5);
        assert_eq!(report.valid_rows, 4);
        let err = &report.errors[0];
        assert_eq!(err.row, 4);
        assert_eq!(err.field, "type");
        assert_eq!(err.value, "invalid-type");
    }

    #[test]
    fn category_must_match_row_kind() {
        let mut rows = vec![good_row("app")];
        rows[0].kind = "application".into();
        // Category stays a database category.
        let report = validate_import(&rows);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].field, "category");
        assert_eq!(report.valid_rows, 0);
    }

    #[test]
    fn missing_tags_warn_but_do_not_block() {
        let mut rows = vec![good_row("untagged")];
        rows[0].tags.clear();
        let report = validate_import(&rows);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].field, "tags");
    }

    #[test]
    fn missing_required_fields_error_per_field() {
        let mut rows = vec![good_row("")];
        rows[0].owner = "  ".into();
        let report = validate_import(&rows);
        let fields: Vec<_> = report.errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"owner"));
        assert_eq!(report.valid_rows, 0);
    }

    #[test]
    fn bad_status_and_criticality_each_error() {
        let mut rows = vec![good_row("x")];
        rows[0].status = "retired".into();
        rows[0].criticality = "catastrophic".into();
        let report = validate_import(&rows);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].row, 2);
    }
}
