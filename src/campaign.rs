//! Campaign brief submitted alongside an Instagram handle.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::budget::EstimationGoal;

/// Validation failures for a campaign brief.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CampaignError {
    #[error("Instagram username or URL is required")]
    MissingUsername,

    #[error("'{0}' is not a valid Instagram username")]
    InvalidUsername(String),

    #[error("please specify your custom goal")]
    MissingCustomGoal,

    #[error("end date {end} cannot be before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// Campaign brief as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignBrief {
    /// Handle, `@handle` or profile URL
    pub username: String,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub business_snapshot: Option<String>,
    pub ad_goal: EstimationGoal,
    #[serde(default)]
    pub custom_ad_goal: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub locations: Vec<String>,
}

impl CampaignBrief {
    pub fn new(username: impl Into<String>, ad_goal: EstimationGoal) -> Self {
        Self {
            username: username.into(),
            project_name: None,
            business_snapshot: None,
            ad_goal,
            custom_ad_goal: String::new(),
            start_date: None,
            end_date: None,
            locations: Vec::new(),
        }
    }

    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_custom_goal(mut self, goal: impl Into<String>) -> Self {
        self.custom_ad_goal = goal.into();
        self
    }

    pub fn with_business_snapshot(mut self, snapshot: impl Into<String>) -> Self {
        self.business_snapshot = Some(snapshot.into());
        self
    }

    /// Check the brief and return the normalized username.
    pub fn validate(&self) -> Result<String, CampaignError> {
        let username = extract_username(&self.username).ok_or(CampaignError::MissingUsername)?;
        if !is_valid_username(&username) {
            return Err(CampaignError::InvalidUsername(username));
        }

        if self.ad_goal == EstimationGoal::Other && self.custom_ad_goal.trim().is_empty() {
            return Err(CampaignError::MissingCustomGoal);
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(CampaignError::EndBeforeStart { start, end });
            }
        }

        Ok(username)
    }

    /// Campaign length in days, counting both ends. `1` without usable dates.
    pub fn duration_days(&self) -> i64 {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => {
                let diff = (end - start).num_days();
                if diff >= 0 {
                    diff + 1
                } else {
                    1
                }
            }
            _ => 1,
        }
    }

    /// Goal text for prompts: the custom goal when the goal is `other`.
    pub fn effective_goal_label(&self) -> &str {
        match self.ad_goal {
            EstimationGoal::Other if !self.custom_ad_goal.trim().is_empty() => {
                self.custom_ad_goal.trim()
            }
            goal => goal.as_str(),
        }
    }

    pub fn has_business_snapshot(&self) -> bool {
        self.business_snapshot
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }
}

/// Pull the handle out of `@handle`, `handle` or an instagram.com profile URL.
pub fn extract_username(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(input) {
        if url
            .host_str()
            .is_some_and(|host| host.contains("instagram.com"))
        {
            if let Some(first) = url
                .path_segments()
                .and_then(|mut segments| segments.find(|s| !s.is_empty()))
            {
                return Some(first.to_string());
            }
        }
    }

    let handle = input.strip_prefix('@').unwrap_or(input);
    if handle.is_empty() {
        None
    } else {
        Some(handle.to_string())
    }
}

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._]{1,30}$").expect("valid username regex"));

/// Instagram handles are 1-30 letters, digits, periods or underscores.
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}
