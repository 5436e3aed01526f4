// refmart-core/src/domain/quality/mod.rs

pub mod issue;
pub mod rules;
pub mod volatility;

pub use issue::{Category, QualityIssue, Severity};
pub use rules::{RULE_ORDER, RuleError, RuleKind};

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Tunables for the outlier rule. The defaults (50% swing, floor of 10
/// referrals) come straight from the source audit and carry no deeper
/// documented justification; they are kept configurable rather than
/// reinterpreted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
pub struct QualityThresholds {
    /// Absolute YoY ratio change above which a county-year is flagged.
    #[serde(default = "default_volatility_threshold")]
    #[validate(range(min = 0.0))]
    pub volatility_threshold: f64,

    /// Prior-year referral count at or below which a swing is ignored.
    #[serde(default = "default_volatility_floor")]
    #[validate(range(min = 0))]
    pub volatility_floor: i64,
}

fn default_volatility_threshold() -> f64 {
    0.5
}

fn default_volatility_floor() -> i64 {
    10
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            volatility_threshold: default_volatility_threshold(),
            volatility_floor: default_volatility_floor(),
        }
    }
}
