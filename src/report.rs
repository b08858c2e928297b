//! Savings reports and cost estimation

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default USD cost per 1000 tokens
pub const DEFAULT_COST_PER_1K_TOKENS: f64 = 0.002;

/// Qualitative bucket for a token reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationLevel {
    /// More than 60% of tokens removed
    Aggressive,
    /// More than 40%
    High,
    /// More than 20%
    Moderate,
    /// 20% or less
    Light,
}

impl OptimizationLevel {
    /// Bucket a saved percentage
    #[must_use]
    pub const fn from_percentage(percentage: u32) -> Self {
        if percentage > 60 {
            Self::Aggressive
        } else if percentage > 40 {
            Self::High
        } else if percentage > 20 {
            Self::Moderate
        } else {
            Self::Light
        }
    }
}

impl fmt::Display for OptimizationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Aggressive => "aggressive",
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Light => "light",
        };
        f.write_str(label)
    }
}

/// Token accounting attached to every optimized prompt
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationReport {
    /// Estimated tokens of the raw, unoptimized inputs
    pub original_estimate: usize,
    /// Estimated tokens of the assembled payload
    pub final_tokens: usize,
    /// Tokens saved, saturating at zero
    pub token_savings: usize,
    /// Savings as a rounded percentage of the baseline, 0 for an empty baseline
    pub savings_percentage: u32,
    /// Techniques applied, in application order
    pub strategies: Vec<String>,
}

/// Before/after comparison produced by `generate_optimization_report`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReductionReport {
    /// Tokens removed, saturating at zero
    pub token_reduction: usize,
    /// Reduction as a rounded percentage of the before count
    pub percentage_saved: u32,
    /// Approximate USD saved at the configured per-1k-token rate
    pub cost_savings: f64,
    /// Qualitative bucket of the reduction
    pub optimization_level: OptimizationLevel,
}

/// Percentage of `part` over `whole`, rounded to the nearest integer.
///
/// A zero `whole` yields 0 rather than a division error.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Compare token counts before and after an optimization.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn generate_optimization_report(
    before: usize,
    after: usize,
    cost_per_1k_tokens: f64,
) -> ReductionReport {
    let token_reduction = before.saturating_sub(after);
    let percentage_saved = percentage(token_reduction, before);
    ReductionReport {
        token_reduction,
        percentage_saved,
        cost_savings: token_reduction as f64 / 1000.0 * cost_per_1k_tokens,
        optimization_level: OptimizationLevel::from_percentage(percentage_saved),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(50, 100), 50);
        assert_eq!(percentage(0, 100), 0);
    }

    #[test]
    fn test_percentage_of_zero_whole_is_zero() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(42, 0), 0);
    }

    #[test]
    fn test_level_buckets() {
        assert_eq!(
            OptimizationLevel::from_percentage(61),
            OptimizationLevel::Aggressive
        );
        assert_eq!(
            OptimizationLevel::from_percentage(60),
            OptimizationLevel::High
        );
        assert_eq!(
            OptimizationLevel::from_percentage(41),
            OptimizationLevel::High
        );
        assert_eq!(
            OptimizationLevel::from_percentage(40),
            OptimizationLevel::Moderate
        );
        assert_eq!(
            OptimizationLevel::from_percentage(21),
            OptimizationLevel::Moderate
        );
        assert_eq!(
            OptimizationLevel::from_percentage(20),
            OptimizationLevel::Light
        );
        assert_eq!(
            OptimizationLevel::from_percentage(0),
            OptimizationLevel::Light
        );
    }

    #[test]
    fn test_report_math() {
        let report = generate_optimization_report(1000, 400, 0.002);
        assert_eq!(report.token_reduction, 600);
        assert_eq!(report.percentage_saved, 60);
        assert_eq!(report.optimization_level, OptimizationLevel::High);
        assert!((report.cost_savings - 0.0012).abs() < 1e-12);
    }

    #[test]
    fn test_report_saturates_on_growth() {
        let report = generate_optimization_report(100, 150, 0.002);
        assert_eq!(report.token_reduction, 0);
        assert_eq!(report.percentage_saved, 0);
        assert_eq!(report.optimization_level, OptimizationLevel::Light);
        assert!(report.cost_savings.abs() < f64::EPSILON);
    }

    #[test]
    fn test_report_with_zero_before() {
        let report = generate_optimization_report(0, 0, 0.002);
        assert_eq!(report.percentage_saved, 0);
        assert_eq!(report.token_reduction, 0);
    }

    #[test]
    fn test_level_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&OptimizationLevel::Aggressive).unwrap(),
            "\"aggressive\""
        );
    }
}
