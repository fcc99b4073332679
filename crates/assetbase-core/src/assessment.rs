//! Portfolio-analysis assessment catalog.
//!
//! Static reference data: assessment categories and their weighted
//! questions. Read-only; authoring the content is out of scope.

/// One question inside an assessment category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    /// Relative weight within the category; weights in a category sum to 100.
    pub weight: u8,
}

/// One portfolio-analysis dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssessmentCategory {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub questions: &'static [Question],
}

static CATEGORIES: &[AssessmentCategory] = &[
    AssessmentCategory {
        id: "business-value",
        title: "Business Value",
        description: "How much the asset contributes to current business outcomes.",
        questions: &[
            Question {
                id: "bv-revenue",
                prompt: "Does the asset directly support a revenue-generating process?",
                weight: 40,
            },
            Question {
                id: "bv-users",
                prompt: "What share of the workforce or customer base depends on it?",
                weight: 30,
            },
            Question {
                id: "bv-differentiation",
                prompt: "Does it provide capabilities competitors lack?",
                weight: 30,
            },
        ],
    },
    AssessmentCategory {
        id: "technical-health",
        title: "Technical Health",
        description: "Maintainability and currency of the asset's technology stack.",
        questions: &[
            Question {
                id: "th-support",
                prompt: "Is the underlying platform still vendor-supported?",
                weight: 35,
            },
            Question {
                id: "th-changes",
                prompt: "Can changes be delivered without unusual effort or risk?",
                weight: 35,
            },
            Question {
                id: "th-skills",
                prompt: "Are the required skills available in the market?",
                weight: 30,
            },
        ],
    },
    AssessmentCategory {
        id: "operational-risk",
        title: "Operational Risk",
        description: "Exposure from running the asset in its current state.",
        questions: &[
            Question {
                id: "or-incidents",
                prompt: "How often does the asset cause production incidents?",
                weight: 40,
            },
            Question {
                id: "or-recovery",
                prompt: "Can the asset be restored within its recovery objective?",
                weight: 30,
            },
            Question {
                id: "or-compliance",
                prompt: "Are there open compliance or security findings against it?",
                weight: 30,
            },
        ],
    },
    AssessmentCategory {
        id: "cost-efficiency",
        title: "Cost Efficiency",
        description: "Run cost relative to the value delivered.",
        questions: &[
            Question {
                id: "ce-run-cost",
                prompt: "Is the annual run cost proportionate to usage?",
                weight: 50,
            },
            Question {
                id: "ce-licensing",
                prompt: "Are licensing terms competitive with alternatives?",
                weight: 50,
            },
        ],
    },
];

/// All assessment categories, in presentation order.
pub fn categories() -> &'static [AssessmentCategory] {
    CATEGORIES
}

/// Look up a category by id.
pub fn category(id: &str) -> Option<&'static AssessmentCategory> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// The question list for a category, if it exists.
pub fn questions(category_id: &str) -> Option<&'static [Question]> {
    category(category_id).map(|c| c.questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one_hundred_per_category() {
        for cat in categories() {
            let sum: u32 = cat.questions.iter().map(|q| q.weight as u32).sum();
            assert_eq!(sum, 100, "category {}", cat.id);
        }
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(category("technical-health").unwrap().title, "Technical Health");
        assert!(category("nonexistent").is_none());
        assert_eq!(questions("cost-efficiency").unwrap().len(), 2);
    }
}
