//! Assessment-catalog service.
//!
//! Read-only surface over the static portfolio-analysis reference
//! data; it exists so callers consume the catalog through the same
//! service layer as every other entity.

use assetbase_core::assessment::{self, AssessmentCategory, Question};
use assetbase_core::error::{CoreError, CoreResult};

#[derive(Debug, Default)]
pub struct AssessmentService;

impl AssessmentService {
    pub fn new() -> Self {
        Self
    }

    pub fn categories(&self) -> &'static [AssessmentCategory] {
        assessment::categories()
    }

    pub fn category(&self, id: &str) -> CoreResult<&'static AssessmentCategory> {
        assessment::category(id).ok_or_else(|| CoreError::NotFound {
            entity: "assessment_category".into(),
            id: id.to_string(),
        })
    }

    pub fn questions(&self, category_id: &str) -> CoreResult<&'static [Question]> {
        self.category(category_id).map(|c| c.questions)
    }
}
