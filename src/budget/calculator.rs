//! Interactive budget calculator.
//!
//! Tracks whether the budget on screen is the estimator's suggestion or a
//! figure the user typed in, and picks forward or reverse estimation to match.
//! A reverse result is never fed back into forward estimation, so a manual
//! budget survives unrelated input changes.

use serde::{Deserialize, Serialize};

use super::estimator::{BudgetEstimator, EstimateError, EstimationResult};
use super::goal::QualityTier;

/// Lower bound for the budget slider's range.
pub const MIN_SLIDER_MAX: u64 = 50_000;

/// Which side of the estimate the user is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetMode {
    /// Budget comes from forward estimation
    Suggested,
    /// Budget was set by the user; results come from reverse estimation
    ManualOverride,
}

impl Default for BudgetMode {
    fn default() -> Self {
        Self::Suggested
    }
}

/// Calculator state for one campaign variation.
#[derive(Debug, Clone)]
pub struct BudgetCalculator {
    estimator: BudgetEstimator,
    goal: String,
    audience_size: u64,
    duration_days: i64,
    quality_tier: QualityTier,
    mode: BudgetMode,
    total_budget: u64,
    result: Option<EstimationResult>,
    last_error: Option<EstimateError>,
}

impl BudgetCalculator {
    /// Create a calculator showing the suggested budget.
    pub fn new(
        estimator: BudgetEstimator,
        goal: impl Into<String>,
        audience_size: u64,
        duration_days: i64,
        quality_tier: QualityTier,
    ) -> Self {
        let mut calculator = Self {
            estimator,
            goal: goal.into(),
            audience_size,
            duration_days,
            quality_tier,
            mode: BudgetMode::Suggested,
            total_budget: 0,
            result: None,
            last_error: None,
        };
        calculator.recompute();
        calculator
    }

    /// Change the quality tier. Always returns to the suggested budget.
    pub fn set_quality_tier(&mut self, tier: QualityTier) {
        self.quality_tier = tier;
        self.enter(BudgetMode::Suggested);
        self.recompute();
    }

    /// Discard a manual budget and show the suggestion again.
    pub fn reset_to_suggestion(&mut self) {
        self.enter(BudgetMode::Suggested);
        self.recompute();
    }

    pub fn set_goal(&mut self, goal: impl Into<String>) {
        self.goal = goal.into();
        self.recompute();
    }

    pub fn set_audience_size(&mut self, audience_size: u64) {
        self.audience_size = audience_size;
        self.recompute();
    }

    pub fn set_duration_days(&mut self, duration_days: i64) {
        self.duration_days = duration_days;
        self.recompute();
    }

    /// The user set the budget directly. Negative amounts clamp to zero.
    pub fn edit_budget(&mut self, amount: i64) {
        self.enter(BudgetMode::ManualOverride);
        self.total_budget = amount.max(0) as u64;
        self.recompute();
    }

    /// The user typed into the budget field. Non-numeric text counts as zero.
    pub fn edit_budget_text(&mut self, text: &str) {
        let amount = text.trim().parse::<i64>().unwrap_or(0);
        self.edit_budget(amount);
    }

    pub fn mode(&self) -> BudgetMode {
        self.mode
    }

    pub fn quality_tier(&self) -> QualityTier {
        self.quality_tier
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn audience_size(&self) -> u64 {
        self.audience_size
    }

    pub fn duration_days(&self) -> i64 {
        self.duration_days
    }

    /// Budget currently shown, suggested or manual.
    pub fn total_budget(&self) -> u64 {
        self.total_budget
    }

    /// Latest estimate, or `None` when the inputs could not be estimated.
    pub fn result(&self) -> Option<&EstimationResult> {
        self.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&EstimateError> {
        self.last_error.as_ref()
    }

    /// Upper end of the budget slider.
    pub fn slider_max(&self) -> u64 {
        MIN_SLIDER_MAX
            .max(self.total_budget.saturating_mul(2))
            .max(1_000)
    }

    fn enter(&mut self, mode: BudgetMode) {
        if self.mode != mode {
            tracing::debug!(from = ?self.mode, to = ?mode, "budget mode change");
            self.mode = mode;
        }
    }

    fn recompute(&mut self) {
        let outcome = match self.mode {
            BudgetMode::Suggested => self.estimator.estimate_budget(
                &self.goal,
                self.audience_size,
                self.duration_days,
                self.quality_tier,
            ),
            BudgetMode::ManualOverride => self.estimator.reverse_estimate_from_budget(
                &self.goal,
                self.audience_size,
                self.duration_days,
                self.total_budget,
                self.quality_tier,
            ),
        };

        match outcome {
            Ok(result) => {
                if self.mode == BudgetMode::Suggested {
                    self.total_budget = result.total_budget;
                }
                self.result = Some(result);
                self.last_error = None;
            }
            Err(err) => {
                tracing::warn!(goal = %self.goal, error = %err, "budget estimate unavailable");
                self.result = None;
                self.last_error = Some(err);
            }
        }
    }
}
