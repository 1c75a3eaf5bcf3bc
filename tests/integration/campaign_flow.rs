//! Brief to budget: the whole planning flow with in-memory collaborators.

use async_trait::async_trait;
use chrono::NaiveDate;
use spotlight::budget::format::{format_inr, FormattedEstimate};
use spotlight::budget::{BudgetCalculator, BudgetMode, EstimationGoal, QualityTier};
use spotlight::completion::{request_structured, CompletionClient, CompletionError, ProfileAnalysis};
use spotlight::interests::{
    audience_for_estimate, dedup_by_id, find_interests, InterestCandidate, InterestError,
    InterestSearch,
};
use spotlight::profile::{ProfileData, ProfileError, ProfileInfo, ProfileSource, RecentPost};
use spotlight::{CampaignBrief, Settings};

struct FixtureProfiles;

#[async_trait]
impl ProfileSource for FixtureProfiles {
    async fn fetch_profile(&self, username: &str) -> Result<ProfileData, ProfileError> {
        if username != "seaside_stays" {
            return Err(ProfileError::NotFound {
                username: username.to_string(),
            });
        }
        Ok(ProfileData {
            profile_info: ProfileInfo {
                username: username.to_string(),
                biography: "Boutique beach hotel in Goa".to_string(),
                followers: 12_400,
                ..Default::default()
            },
            recent_posts: vec![RecentPost {
                display_url: "https://cdn.example/1.jpg".to_string(),
                caption: "Sunset from the deck".to_string(),
                num_likes: 300,
                num_comments: 20,
                ..Default::default()
            }],
        })
    }
}

struct FixtureCompletion;

#[async_trait]
impl CompletionClient for FixtureCompletion {
    async fn complete_json(&self, system_prompt: &str) -> Result<String, CompletionError> {
        assert!(system_prompt.contains("target_audience_keywords"));
        Ok(r#"```json
{
  "summary": "A boutique beach hotel",
  "niche": "Boutique Hospitality",
  "target_audience_keywords": ["hotels", "resorts"],
  "potential_targets": ["Travellers", "Couples"]
}
```"#
            .to_string())
    }
}

struct FixtureInterests;

#[async_trait]
impl InterestSearch for FixtureInterests {
    async fn search(&self, keyword: &str) -> Result<Vec<InterestCandidate>, InterestError> {
        let candidate = |id: &str, size: u64| InterestCandidate {
            id: id.to_string(),
            name: format!("Interest {id}"),
            audience_size: Some(size),
            audience_size_lower_bound: None,
            topic: None,
        };
        Ok(match keyword {
            "hotels" => vec![candidate("1", 20_000)],
            "resorts" => vec![candidate("2", 30_000), candidate("1", 25_000)],
            _ => Vec::new(),
        })
    }
}

#[tokio::test]
async fn test_brief_to_budget() {
    let brief = CampaignBrief::new("https://www.instagram.com/seaside_stays/", EstimationGoal::Sales)
        .with_dates(
            NaiveDate::from_ymd_opt(2026, 11, 1).expect("date"),
            NaiveDate::from_ymd_opt(2026, 11, 10).expect("date"),
        );
    let username = brief.validate().expect("valid brief");
    assert_eq!(username, "seaside_stays");
    assert_eq!(brief.duration_days(), 10);

    let profile = FixtureProfiles
        .fetch_profile(&username)
        .await
        .expect("profile");
    assert_eq!(profile.recent_captions(5), vec!["Sunset from the deck"]);

    let prompt = format!(
        "Analyse @{} ({}) for a {} campaign.",
        profile.profile_info.username,
        profile.profile_info.biography,
        brief.effective_goal_label()
    );
    let analysis: ProfileAnalysis = request_structured(&FixtureCompletion, &prompt)
        .await
        .expect("analysis");

    let interests = dedup_by_id(
        find_interests(&FixtureInterests, &analysis.target_audience_keywords).await,
    );
    assert_eq!(interests.len(), 2);
    let audience = audience_for_estimate(&interests);
    assert_eq!(audience, 55_000);

    let settings = Settings::default();
    let mut calculator = BudgetCalculator::new(
        settings.estimator(),
        brief.ad_goal.as_str(),
        audience,
        brief.duration_days(),
        QualityTier::Medium,
    );

    assert_eq!(calculator.mode(), BudgetMode::Suggested);
    let suggested = *calculator.result().expect("suggested estimate");
    assert_eq!(suggested.expected_actions, 550);
    assert_eq!(suggested.total_budget, 27_500);
    assert_eq!(suggested.daily_budget, 2_750);
    assert_eq!(format_inr(suggested.total_budget), "₹27,500");

    calculator.edit_budget(10_000);
    assert_eq!(calculator.mode(), BudgetMode::ManualOverride);
    let manual = calculator.result().expect("manual estimate");
    assert_eq!(manual.expected_actions, 200);
    assert_eq!(manual.daily_budget, 1_000);

    // a new audience keeps the typed budget
    calculator.set_audience_size(1_000_000);
    assert_eq!(calculator.total_budget(), 10_000);
    assert_eq!(calculator.result().expect("manual").expected_actions, 200);

    calculator.set_quality_tier(QualityTier::High);
    assert_eq!(calculator.mode(), BudgetMode::Suggested);
    let view = FormattedEstimate::from(calculator.result().expect("suggested"));
    assert_eq!(view.total_budget, "₹85,000");
    assert_eq!(view.expected_actions, "2,000");
}

#[tokio::test]
async fn test_unknown_profile_reports_friendly_message() {
    let err = FixtureProfiles
        .fetch_profile("nobody_here")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.user_message().contains("nobody_here"));
}
