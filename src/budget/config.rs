//! Cost model configuration.
//!
//! The knobs here are policy, not derived values. Defaults reflect typical
//! Meta ad pricing in INR.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::goal::{OutcomeCategory, QualityTier};

/// A cost model that cannot be used for estimation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CostModelError {
    #[error("{name} must be a non-negative number, got {value}")]
    InvalidKnob { name: String, value: f64 },

    #[error("audience_share must be at most 1.0, got {0}")]
    AudienceShareTooLarge(f64),

    /// Reverse estimation can no longer reproduce forward estimates when a
    /// non-zero cost-per-result drops below one rupee.
    #[error("cost per result for {category} at {tier} tier is {cost}, must be 0 or at least 1")]
    CostPerResultBelowOne {
        category: OutcomeCategory,
        tier: QualityTier,
        cost: f64,
    },
}

/// Base cost-per-result for each outcome category (INR).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseCostTable {
    pub engagement: f64,
    pub traffic: f64,
    pub leads: f64,
    pub conversions: f64,
}

impl Default for BaseCostTable {
    fn default() -> Self {
        Self {
            engagement: 3.0,
            traffic: 7.0,
            leads: 20.0,
            conversions: 50.0,
        }
    }
}

impl BaseCostTable {
    pub fn get(&self, category: OutcomeCategory) -> f64 {
        match category {
            OutcomeCategory::Engagement => self.engagement,
            OutcomeCategory::Traffic => self.traffic,
            OutcomeCategory::Leads => self.leads,
            OutcomeCategory::Conversions => self.conversions,
        }
    }

    fn set(&mut self, category: OutcomeCategory, value: f64) {
        match category {
            OutcomeCategory::Engagement => self.engagement = value,
            OutcomeCategory::Traffic => self.traffic = value,
            OutcomeCategory::Leads => self.leads = value,
            OutcomeCategory::Conversions => self.conversions = value,
        }
    }

    fn values(&self) -> [(&'static str, f64); 4] {
        [
            ("engagement", self.engagement),
            ("traffic", self.traffic),
            ("leads", self.leads),
            ("conversions", self.conversions),
        ]
    }
}

/// A multiplier per quality tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierTable {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl TierTable {
    pub fn new(low: f64, medium: f64, high: f64) -> Self {
        Self { low, medium, high }
    }

    /// Cost multipliers: lower quality costs more per result.
    pub fn cost_defaults() -> Self {
        Self::new(1.2, 1.0, 0.85)
    }

    /// Action-volume multipliers used only by forward estimation.
    pub fn action_defaults() -> Self {
        Self::new(0.5, 1.0, 2.0)
    }

    pub fn get(&self, tier: QualityTier) -> f64 {
        match tier {
            QualityTier::Low => self.low,
            QualityTier::Medium => self.medium,
            QualityTier::High => self.high,
        }
    }

    fn set(&mut self, tier: QualityTier, value: f64) {
        match tier {
            QualityTier::Low => self.low = value,
            QualityTier::Medium => self.medium = value,
            QualityTier::High => self.high = value,
        }
    }

    fn values(&self) -> [(&'static str, f64); 3] {
        [("low", self.low), ("medium", self.medium), ("high", self.high)]
    }

    fn overlay(mut self, overrides: TierOverrides) -> Self {
        self.low = overrides.low.unwrap_or(self.low);
        self.medium = overrides.medium.unwrap_or(self.medium);
        self.high = overrides.high.unwrap_or(self.high);
        self
    }
}

/// Tier keys present in a settings layer; missing keys keep the table default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TierOverrides {
    low: Option<f64>,
    medium: Option<f64>,
    high: Option<f64>,
}

fn cost_multiplier_overrides<'de, D>(deserializer: D) -> Result<TierTable, D::Error>
where
    D: Deserializer<'de>,
{
    TierOverrides::deserialize(deserializer).map(|o| TierTable::cost_defaults().overlay(o))
}

fn action_multiplier_overrides<'de, D>(deserializer: D) -> Result<TierTable, D::Error>
where
    D: Deserializer<'de>,
{
    TierOverrides::deserialize(deserializer).map(|o| TierTable::action_defaults().overlay(o))
}

/// Pricing and volume assumptions behind every estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Share of the audience assumed to act at the medium tier
    pub audience_share: f64,

    /// Upper bound on baseline actions before tier scaling
    pub action_cap: u64,

    /// Base cost-per-result by outcome category
    pub base_cost: BaseCostTable,

    /// Quality-tier cost multiplier, applied identically in both directions
    #[serde(
        default = "TierTable::cost_defaults",
        deserialize_with = "cost_multiplier_overrides"
    )]
    pub cost_multiplier: TierTable,

    /// Quality-tier action-volume multiplier (forward only)
    #[serde(
        default = "TierTable::action_defaults",
        deserialize_with = "action_multiplier_overrides"
    )]
    pub action_multiplier: TierTable,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            audience_share: 0.01, // 1% of the audience
            action_cap: 1_000,
            base_cost: BaseCostTable::default(),
            cost_multiplier: TierTable::cost_defaults(),
            action_multiplier: TierTable::action_defaults(),
        }
    }
}

impl CostModel {
    /// Create a cost model with default pricing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base cost-per-result for one category.
    pub fn with_base_cost(mut self, category: OutcomeCategory, cost: f64) -> Self {
        self.base_cost.set(category, cost);
        self
    }

    /// Set the cost multiplier for one tier.
    pub fn with_cost_multiplier(mut self, tier: QualityTier, multiplier: f64) -> Self {
        self.cost_multiplier.set(tier, multiplier);
        self
    }

    /// Set the action-volume multiplier for one tier.
    pub fn with_action_multiplier(mut self, tier: QualityTier, multiplier: f64) -> Self {
        self.action_multiplier.set(tier, multiplier);
        self
    }

    /// Set the converting share of the audience.
    pub fn with_audience_share(mut self, share: f64) -> Self {
        self.audience_share = share.clamp(0.0, 1.0);
        self
    }

    /// Set the baseline action cap.
    pub fn with_action_cap(mut self, cap: u64) -> Self {
        self.action_cap = cap;
        self
    }

    /// Cost-per-result for a category at a quality tier.
    ///
    /// This is the only place the tier cost multiplier is applied, so forward
    /// and reverse estimation always agree on it.
    pub fn cost_per_result(&self, category: OutcomeCategory, tier: QualityTier) -> f64 {
        self.base_cost.get(category) * self.cost_multiplier.get(tier)
    }

    /// Baseline action count for an audience, before tier scaling.
    pub fn baseline_actions(&self, audience_size: u64) -> u64 {
        let share = (audience_size as f64 * self.audience_share).floor() as u64;
        share.min(self.action_cap)
    }

    /// Check that every knob is finite and non-negative, and that every
    /// non-zero cost-per-result is at least one rupee.
    pub fn validate(&self) -> Result<(), CostModelError> {
        let knobs = self
            .base_cost
            .values()
            .into_iter()
            .map(|(name, v)| (format!("base_cost.{}", name), v))
            .chain(
                self.cost_multiplier
                    .values()
                    .into_iter()
                    .map(|(name, v)| (format!("cost_multiplier.{}", name), v)),
            )
            .chain(
                self.action_multiplier
                    .values()
                    .into_iter()
                    .map(|(name, v)| (format!("action_multiplier.{}", name), v)),
            )
            .chain(std::iter::once((
                "audience_share".to_string(),
                self.audience_share,
            )));

        for (name, value) in knobs {
            if !value.is_finite() || value < 0.0 {
                return Err(CostModelError::InvalidKnob { name, value });
            }
        }

        if self.audience_share > 1.0 {
            return Err(CostModelError::AudienceShareTooLarge(self.audience_share));
        }

        for category in OutcomeCategory::ALL {
            for tier in QualityTier::ALL {
                let cost = self.cost_per_result(category, tier);
                if cost > 0.0 && cost < 1.0 {
                    return Err(CostModelError::CostPerResultBelowOne {
                        category,
                        tier,
                        cost,
                    });
                }
            }
        }

        Ok(())
    }
}
