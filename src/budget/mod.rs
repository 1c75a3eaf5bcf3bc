//! Ad budget estimation for Spotlight.
//!
//! This module maps a campaign goal, audience size, duration and quality tier
//! to an estimated spend and outcome, in either direction.
//!
//! # Overview
//!
//! The budget system consists of:
//! - **CostModel**: Base cost-per-result and tier multipliers
//! - **BudgetEstimator**: Forward (inputs → budget) and reverse (budget → results) estimation
//! - **BudgetCalculator**: Tracks suggested vs. user-entered budgets for interactive callers
//! - **format**: Rupee and audience-size display helpers
//!
//! # Example
//!
//! ```
//! use spotlight::budget::{BudgetEstimator, QualityTier};
//!
//! let estimator = BudgetEstimator::default();
//!
//! let suggested = estimator
//!     .estimate_budget("sales", 50_000, 10, QualityTier::Medium)
//!     .unwrap();
//! assert_eq!(suggested.total_budget, 25_000);
//!
//! // Feeding the suggestion back reproduces the same results
//! let implied = estimator
//!     .reverse_estimate_from_budget("sales", 50_000, 10, suggested.total_budget, QualityTier::Medium)
//!     .unwrap();
//! assert_eq!(implied.expected_actions, suggested.expected_actions);
//! ```

mod calculator;
mod config;
mod estimator;
pub mod format;
mod goal;

pub use calculator::{BudgetCalculator, BudgetMode, MIN_SLIDER_MAX};
pub use config::{BaseCostTable, CostModel, CostModelError, TierTable};
pub use estimator::{
    estimate_budget, reverse_estimate_from_budget, BudgetEstimator, EstimateError,
    EstimationInput, EstimationResult, ReverseEstimationInput,
};
pub use format::{format_cpr, format_inr};
pub use goal::{
    resolve_goal, EstimationGoal, OutcomeCategory, ParseTierError, QualityTier, UnknownGoalPolicy,
};
