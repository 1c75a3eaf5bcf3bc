//! Properties that must hold for every valid estimator input.

use spotlight::budget::{
    BudgetEstimator, CostModel, CostModelError, EstimationGoal, OutcomeCategory, QualityTier,
};

const AUDIENCES: [u64; 9] = [0, 1, 99, 100, 150, 4_321, 50_000, 99_999, 25_000_000];
const DURATIONS: [i64; 5] = [-3, 0, 1, 7, 31];

fn goals() -> impl Iterator<Item = &'static str> {
    EstimationGoal::ALL.iter().map(|g| g.as_str())
}

/// Default pricing plus custom models that pass validation.
fn valid_estimators() -> Vec<BudgetEstimator> {
    let cheap = CostModel::new()
        .with_base_cost(OutcomeCategory::Engagement, 1.2)
        .with_base_cost(OutcomeCategory::Traffic, 1.0)
        .with_cost_multiplier(QualityTier::Low, 1.0)
        .with_cost_multiplier(QualityTier::High, 1.0);
    let skewed = CostModel::new()
        .with_base_cost(OutcomeCategory::Leads, 13.37)
        .with_cost_multiplier(QualityTier::High, 0.9)
        .with_action_multiplier(QualityTier::Low, 0.3)
        .with_action_multiplier(QualityTier::High, 3.5)
        .with_audience_share(0.02)
        .with_action_cap(2_500);

    [CostModel::default(), cheap, skewed]
        .into_iter()
        .map(|model| {
            model.validate().expect("model should validate");
            BudgetEstimator::new(model)
        })
        .collect()
}

#[test]
fn test_forward_then_reverse_round_trips() {
    for estimator in valid_estimators() {
        assert_round_trips(&estimator);
    }
}

#[test]
fn test_sub_rupee_model_is_rejected_before_it_can_drift() {
    let model = CostModel::new().with_base_cost(OutcomeCategory::Engagement, 0.1);
    assert!(matches!(
        model.validate(),
        Err(CostModelError::CostPerResultBelowOne { .. })
    ));

    // the drift validation guards against: 3 actions cost 1 rupee, which buys 10
    let estimator = BudgetEstimator::new(model);
    let forward = estimator
        .estimate_budget("other", 300, 1, QualityTier::Medium)
        .expect("forward");
    let reverse = estimator
        .reverse_estimate_from_budget("other", 300, 1, forward.total_budget, QualityTier::Medium)
        .expect("reverse");
    assert_eq!((forward.expected_actions, forward.total_budget), (3, 1));
    assert_eq!(reverse.expected_actions, 10);
}

fn assert_round_trips(estimator: &BudgetEstimator) {
    for goal in goals() {
        for tier in QualityTier::ALL {
            for audience in AUDIENCES {
                for days in DURATIONS {
                    let forward = estimator
                        .estimate_budget(goal, audience, days, tier)
                        .expect("forward");
                    let reverse = estimator
                        .reverse_estimate_from_budget(
                            goal,
                            audience,
                            days,
                            forward.total_budget,
                            tier,
                        )
                        .expect("reverse");

                    assert_eq!(
                        reverse.cost_per_result, forward.cost_per_result,
                        "cpr drifted for {goal}/{tier}/{audience}/{days}"
                    );
                    assert!(
                        reverse.expected_actions.abs_diff(forward.expected_actions) <= 1,
                        "actions {} vs {} for {goal}/{tier}/{audience}/{days}",
                        reverse.expected_actions,
                        forward.expected_actions
                    );
                    assert_eq!(reverse.total_budget, forward.total_budget);
                    assert_eq!(reverse.daily_budget, forward.daily_budget);
                }
            }
        }
    }
}

#[test]
fn test_cost_per_result_strictly_decreases_with_tier() {
    let estimator = BudgetEstimator::default();

    for goal in goals() {
        let cprs: Vec<f64> = QualityTier::ALL
            .iter()
            .map(|&tier| {
                estimator
                    .estimate_budget(goal, 10_000, 7, tier)
                    .expect("estimate")
                    .cost_per_result
            })
            .collect();
        assert!(cprs[0] > cprs[1], "{goal}: low {} <= medium {}", cprs[0], cprs[1]);
        assert!(cprs[1] > cprs[2], "{goal}: medium {} <= high {}", cprs[1], cprs[2]);
    }
}

#[test]
fn test_baseline_never_exceeds_cap() {
    let estimator = BudgetEstimator::default();
    let model = estimator.model();

    for audience in AUDIENCES.iter().copied().chain([u64::MAX / 2, 100_001, 1_000_000]) {
        assert!(model.baseline_actions(audience) <= 1_000);
    }

    // medium tier scales by 1.0, so suggested actions equal the capped baseline
    let huge = estimator
        .estimate_budget("traffic", 1_000_000_000, 10, QualityTier::Medium)
        .expect("estimate");
    assert_eq!(huge.expected_actions, 1_000);
}

#[test]
fn test_non_positive_duration_matches_one_day() {
    let estimator = BudgetEstimator::default();

    for goal in goals() {
        for tier in QualityTier::ALL {
            let one = estimator
                .estimate_budget(goal, 70_000, 1, tier)
                .expect("estimate");
            for days in [0, -1, i64::MIN] {
                let clamped = estimator
                    .estimate_budget(goal, 70_000, days, tier)
                    .expect("estimate");
                assert_eq!(clamped, one);
            }
        }
    }
}

#[test]
fn test_reverse_ignores_audience() {
    let estimator = BudgetEstimator::default();

    for goal in goals() {
        for tier in QualityTier::ALL {
            let baseline = estimator
                .reverse_estimate_from_budget(goal, 0, 14, 12_345, tier)
                .expect("reverse");
            for audience in AUDIENCES {
                let other = estimator
                    .reverse_estimate_from_budget(goal, audience, 14, 12_345, tier)
                    .expect("reverse");
                assert_eq!(other.expected_actions, baseline.expected_actions);
                assert_eq!(other.cost_per_result, baseline.cost_per_result);
            }
        }
    }
}

#[test]
fn test_estimator_is_shareable_across_threads() {
    let estimator = std::sync::Arc::new(BudgetEstimator::default());

    let handles: Vec<_> = QualityTier::ALL
        .into_iter()
        .map(|tier| {
            let estimator = std::sync::Arc::clone(&estimator);
            std::thread::spawn(move || {
                estimator
                    .estimate_budget("sales", 50_000, 10, tier)
                    .expect("estimate")
                    .total_budget
            })
        })
        .collect();

    let totals: Vec<u64> = handles
        .into_iter()
        .map(|h| h.join().expect("thread"))
        .collect();
    assert_eq!(totals, vec![15_000, 25_000, 42_500]);
}
