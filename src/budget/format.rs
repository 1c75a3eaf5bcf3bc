//! Display formatting for estimates.
//!
//! Amounts are shown in rupees with Indian digit grouping: the last three
//! digits form one group and every group above it has two digits.

use super::estimator::EstimationResult;

/// Shown in place of a value that could not be computed.
pub const PLACEHOLDER: &str = "...";

const RUPEE: char = '₹';

/// Group digits the en-IN way, e.g. `4250000` -> `42,50,000`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Whole-rupee amount, e.g. `₹25,000`.
pub fn format_inr(amount: u64) -> String {
    format!("{}{}", RUPEE, format_count(amount))
}

/// Cost-per-result with two decimals, e.g. `₹42.50`.
pub fn format_cpr(cost_per_result: f64) -> String {
    format!("{}{:.2}", RUPEE, cost_per_result)
}

/// Compact audience size: `N/A`, `999`, `1.5K`, `2.0M`, `1.2B`.
pub fn format_audience_size(size: Option<u64>) -> String {
    let Some(size) = size else {
        return "N/A".to_string();
    };

    let value = size as f64;
    if size >= 1_000_000_000 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if size >= 1_000_000 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if size >= 1_000 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        size.to_string()
    }
}

/// Field-by-field display strings for an estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedEstimate {
    pub total_budget: String,
    pub daily_budget: String,
    pub expected_actions: String,
    pub cost_per_result: String,
}

impl FormattedEstimate {
    pub fn placeholder() -> Self {
        Self {
            total_budget: PLACEHOLDER.to_string(),
            daily_budget: PLACEHOLDER.to_string(),
            expected_actions: PLACEHOLDER.to_string(),
            cost_per_result: PLACEHOLDER.to_string(),
        }
    }
}

impl From<&EstimationResult> for FormattedEstimate {
    fn from(result: &EstimationResult) -> Self {
        Self {
            total_budget: format_inr(result.total_budget),
            daily_budget: format_inr(result.daily_budget),
            expected_actions: format_count(result.expected_actions),
            cost_per_result: format_cpr(result.cost_per_result),
        }
    }
}

/// Format an estimate, falling back to placeholders when there is none.
pub fn format_result_or_placeholder(result: Option<&EstimationResult>) -> FormattedEstimate {
    result
        .map(FormattedEstimate::from)
        .unwrap_or_else(FormattedEstimate::placeholder)
}
