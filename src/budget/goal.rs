//! Campaign goals, outcome categories and quality tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::estimator::EstimateError;

/// User-facing campaign goal as selected in the campaign brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimationGoal {
    Traffic,
    Leads,
    Sales,
    Other,
}

impl EstimationGoal {
    /// All goals in display order.
    pub const ALL: [EstimationGoal; 4] = [
        EstimationGoal::Traffic,
        EstimationGoal::Leads,
        EstimationGoal::Sales,
        EstimationGoal::Other,
    ];

    /// Cost-model bucket this goal is priced under.
    pub fn outcome_category(&self) -> OutcomeCategory {
        match self {
            EstimationGoal::Traffic => OutcomeCategory::Traffic,
            EstimationGoal::Leads => OutcomeCategory::Leads,
            EstimationGoal::Sales => OutcomeCategory::Conversions,
            EstimationGoal::Other => OutcomeCategory::Engagement,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EstimationGoal::Traffic => "traffic",
            EstimationGoal::Leads => "leads",
            EstimationGoal::Sales => "sales",
            EstimationGoal::Other => "other",
        }
    }
}

impl fmt::Display for EstimationGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstimationGoal {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "traffic" => Ok(EstimationGoal::Traffic),
            "leads" => Ok(EstimationGoal::Leads),
            "sales" => Ok(EstimationGoal::Sales),
            "other" => Ok(EstimationGoal::Other),
            _ => Err(EstimateError::InvalidGoal {
                goal: s.to_string(),
            }),
        }
    }
}

/// Cost-model bucket that determines the base cost-per-result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeCategory {
    Engagement,
    Traffic,
    Leads,
    Conversions,
}

impl OutcomeCategory {
    pub const ALL: [OutcomeCategory; 4] = [
        OutcomeCategory::Engagement,
        OutcomeCategory::Traffic,
        OutcomeCategory::Leads,
        OutcomeCategory::Conversions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeCategory::Engagement => "engagement",
            OutcomeCategory::Traffic => "traffic",
            OutcomeCategory::Leads => "leads",
            OutcomeCategory::Conversions => "conversions",
        }
    }
}

impl fmt::Display for OutcomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assumed creative/targeting efficiency of a campaign.
///
/// Ordered so that `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    /// Testing spend, less efficient creative
    Low,
    /// Balanced baseline
    Medium,
    /// Maximum reach, most efficient creative
    High,
}

impl Default for QualityTier {
    fn default() -> Self {
        Self::Medium
    }
}

impl QualityTier {
    pub const ALL: [QualityTier; 3] = [QualityTier::Low, QualityTier::Medium, QualityTier::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quality tier label that is not `low`, `medium` or `high`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown quality tier '{0}'")]
pub struct ParseTierError(pub String);

impl FromStr for QualityTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(QualityTier::Low),
            "medium" => Ok(QualityTier::Medium),
            "high" => Ok(QualityTier::High),
            other => Err(ParseTierError(other.to_string())),
        }
    }
}

/// What to do with a goal label that maps to no known goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownGoalPolicy {
    /// Fail with [`EstimateError::InvalidGoal`]
    Reject,
    /// Price the campaign as engagement
    FallbackToEngagement,
}

impl Default for UnknownGoalPolicy {
    fn default() -> Self {
        Self::Reject
    }
}

/// Resolve a goal label to its outcome category under the given policy.
pub fn resolve_goal(
    label: &str,
    policy: UnknownGoalPolicy,
) -> Result<OutcomeCategory, EstimateError> {
    match label.parse::<EstimationGoal>() {
        Ok(goal) => Ok(goal.outcome_category()),
        Err(err) => match policy {
            UnknownGoalPolicy::Reject => Err(err),
            UnknownGoalPolicy::FallbackToEngagement => {
                tracing::warn!(goal = label, "unknown goal, pricing as engagement");
                Ok(OutcomeCategory::Engagement)
            }
        },
    }
}
