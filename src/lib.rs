//! Spotlight: Meta ad campaign planning from an Instagram profile.
//!
//! The core of the crate is [`budget`], a bidirectional ad budget estimator.
//! The remaining modules describe the collaborators around it: the campaign
//! brief, profile fetching, structured LLM answers and Meta ad-interest
//! lookup.

pub mod budget;
pub mod campaign;
pub mod completion;
pub mod interests;
pub mod logging;
pub mod profile;
pub mod settings;

pub use budget::{
    estimate_budget, reverse_estimate_from_budget, BudgetCalculator, BudgetEstimator, BudgetMode,
    CostModel, EstimateError, EstimationGoal, EstimationResult, OutcomeCategory, QualityTier,
    UnknownGoalPolicy,
};
pub use campaign::{CampaignBrief, CampaignError};
pub use settings::{Settings, SettingsError};
