//! Ad budget estimation.
//!
//! Forward estimation suggests a budget from goal, audience, duration and
//! quality tier. Reverse estimation derives the implied results from a budget
//! the user has fixed. Both directions share the same cost-per-result, so for
//! any cost model that passes [`CostModel::validate`] a forward estimate fed
//! straight into reverse estimation reproduces itself to within one action.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::CostModel;
use super::goal::{resolve_goal, OutcomeCategory, QualityTier, UnknownGoalPolicy};

/// Errors returned by budget estimation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimateError {
    /// The goal label maps to no known outcome category.
    #[error("invalid goal '{goal}'")]
    InvalidGoal { goal: String },
}

/// Inputs for a forward estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationInput {
    pub outcome: OutcomeCategory,
    pub audience_size: u64,
    /// Campaign length; values below 1 are treated as 1
    pub duration_days: i64,
    pub quality_tier: QualityTier,
}

impl EstimationInput {
    pub fn new(
        outcome: OutcomeCategory,
        audience_size: u64,
        duration_days: i64,
        quality_tier: QualityTier,
    ) -> Self {
        Self {
            outcome,
            audience_size,
            duration_days,
            quality_tier,
        }
    }

    /// Duration clamped to at least one day.
    pub fn safe_duration(&self) -> u64 {
        self.duration_days.max(1) as u64
    }

    /// Fix the spend for a reverse estimate.
    pub fn with_budget(self, total_budget: u64) -> ReverseEstimationInput {
        ReverseEstimationInput {
            input: self,
            total_budget,
        }
    }
}

/// Inputs for a reverse estimate: the forward inputs plus a fixed budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReverseEstimationInput {
    #[serde(flatten)]
    pub input: EstimationInput,
    pub total_budget: u64,
}

/// Estimated spend and outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub total_budget: u64,
    pub daily_budget: u64,
    pub expected_actions: u64,
    pub cost_per_result: f64,
}

/// Budget estimator over a cost model.
#[derive(Debug, Clone, Default)]
pub struct BudgetEstimator {
    model: CostModel,
    unknown_goal: UnknownGoalPolicy,
}

impl BudgetEstimator {
    /// Create an estimator with the given cost model.
    pub fn new(model: CostModel) -> Self {
        Self {
            model,
            unknown_goal: UnknownGoalPolicy::default(),
        }
    }

    /// Set how unknown goal labels are handled.
    pub fn with_unknown_goal_policy(mut self, policy: UnknownGoalPolicy) -> Self {
        self.unknown_goal = policy;
        self
    }

    pub fn model(&self) -> &CostModel {
        &self.model
    }

    pub fn unknown_goal_policy(&self) -> UnknownGoalPolicy {
        self.unknown_goal
    }

    /// Forward estimate from typed inputs.
    pub fn estimate(&self, input: &EstimationInput) -> EstimationResult {
        let cost_per_result = self
            .model
            .cost_per_result(input.outcome, input.quality_tier);

        let baseline = self.model.baseline_actions(input.audience_size);
        let scaled = baseline as f64 * self.model.action_multiplier.get(input.quality_tier);
        let expected_actions = scaled.ceil() as u64;

        let total_budget = (cost_per_result * expected_actions as f64).ceil() as u64;
        let daily_budget = total_budget.div_ceil(input.safe_duration());

        tracing::debug!(
            outcome = %input.outcome,
            tier = %input.quality_tier,
            audience = input.audience_size,
            baseline,
            expected_actions,
            total_budget,
            "forward estimate"
        );

        EstimationResult {
            total_budget,
            daily_budget,
            expected_actions,
            cost_per_result,
        }
    }

    /// Reverse estimate from typed inputs. Audience size plays no part.
    pub fn reverse(&self, input: &ReverseEstimationInput) -> EstimationResult {
        let base = &input.input;
        let cost_per_result = self.model.cost_per_result(base.outcome, base.quality_tier);

        let expected_actions = if cost_per_result > 0.0 {
            (input.total_budget as f64 / cost_per_result).floor() as u64
        } else {
            0
        };
        let daily_budget = input.total_budget.div_ceil(base.safe_duration());

        tracing::debug!(
            outcome = %base.outcome,
            tier = %base.quality_tier,
            total_budget = input.total_budget,
            expected_actions,
            "reverse estimate"
        );

        EstimationResult {
            total_budget: input.total_budget,
            daily_budget,
            expected_actions,
            cost_per_result,
        }
    }

    /// Suggest a budget for a goal label.
    pub fn estimate_budget(
        &self,
        goal: &str,
        audience_size: u64,
        duration_days: i64,
        quality_tier: QualityTier,
    ) -> Result<EstimationResult, EstimateError> {
        let outcome = resolve_goal(goal, self.unknown_goal)?;
        Ok(self.estimate(&EstimationInput::new(
            outcome,
            audience_size,
            duration_days,
            quality_tier,
        )))
    }

    /// Derive results for a goal label from a fixed budget.
    pub fn reverse_estimate_from_budget(
        &self,
        goal: &str,
        audience_size: u64,
        duration_days: i64,
        total_budget: u64,
        quality_tier: QualityTier,
    ) -> Result<EstimationResult, EstimateError> {
        let outcome = resolve_goal(goal, self.unknown_goal)?;
        let input = EstimationInput::new(outcome, audience_size, duration_days, quality_tier);
        Ok(self.reverse(&input.with_budget(total_budget)))
    }
}

/// Forward estimate with the default cost model.
pub fn estimate_budget(
    goal: &str,
    audience_size: u64,
    duration_days: i64,
    quality_tier: QualityTier,
) -> Result<EstimationResult, EstimateError> {
    BudgetEstimator::default().estimate_budget(goal, audience_size, duration_days, quality_tier)
}

/// Reverse estimate with the default cost model.
pub fn reverse_estimate_from_budget(
    goal: &str,
    audience_size: u64,
    duration_days: i64,
    total_budget: u64,
    quality_tier: QualityTier,
) -> Result<EstimationResult, EstimateError> {
    BudgetEstimator::default().reverse_estimate_from_budget(
        goal,
        audience_size,
        duration_days,
        total_budget,
        quality_tier,
    )
}
