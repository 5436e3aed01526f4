// refmart-core/src/domain/quality/issue.rs

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Completeness,
    Uniqueness,
    Logic,
    Outlier,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Completeness => "Completeness",
            Category::Uniqueness => "Uniqueness",
            Category::Logic => "Logic",
            Category::Outlier => "Outlier",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// One triggered rule, aggregating every row it matched. Report size is
/// bounded by the rule count, not the data volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityIssue {
    pub category: Category,
    pub rule: &'static str,
    pub failed_rows: u64,
    pub severity: Severity,
    pub details: String,
}
