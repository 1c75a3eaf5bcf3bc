//! Instagram profile data and the fetch contract.
//!
//! Profile scraping happens in an external service; this module fixes the
//! shape of what comes back and how failures are told apart.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from a profile source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// The account does not exist or is private.
    #[error("profile '{username}' not found")]
    NotFound { username: String },

    /// The service could not be reached or failed.
    #[error("profile service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with data of the wrong shape.
    #[error("malformed profile data: {0}")]
    Malformed(String),
}

impl ProfileError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProfileError::NotFound { .. })
    }

    /// Message suitable for showing to the person who submitted the handle.
    pub fn user_message(&self) -> String {
        match self {
            ProfileError::NotFound { username } => format!(
                "The Instagram profile for \"{}\" was not found. Please check the username and ensure the profile is public.",
                username
            ),
            ProfileError::Unavailable(_) => {
                "The profile service returned an error. It may be down; please try again later."
                    .to_string()
            }
            ProfileError::Malformed(detail) => format!("Data format error: {}", detail),
        }
    }
}

/// Account-level profile fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub username: String,
    #[serde(default)]
    pub biography: String,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub num_posts: u64,
    #[serde(default)]
    pub profile_pic_url: String,
    #[serde(default)]
    pub is_verified: bool,
    /// First external link in the bio, if any
    #[serde(default)]
    pub link_in_bio: String,
}

/// One recent post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentPost {
    pub display_url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub num_likes: u64,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub is_video: bool,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub video_view_count: Option<u64>,
    /// Permalink to the post
    #[serde(default)]
    pub url: String,
}

/// Profile plus a bounded list of recent posts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
    pub profile_info: ProfileInfo,
    #[serde(default)]
    pub recent_posts: Vec<RecentPost>,
}

impl ProfileData {
    /// Captions of the most recent posts, skipping empty ones.
    pub fn recent_captions(&self, limit: usize) -> Vec<&str> {
        self.recent_posts
            .iter()
            .map(|p| p.caption.trim())
            .filter(|c| !c.is_empty())
            .take(limit)
            .collect()
    }

    /// Mean likes plus comments per recent post.
    pub fn average_engagement(&self) -> f64 {
        if self.recent_posts.is_empty() {
            return 0.0;
        }
        let total: u64 = self
            .recent_posts
            .iter()
            .map(|p| p.num_likes + p.num_comments)
            .sum();
        total as f64 / self.recent_posts.len() as f64
    }
}

/// Profile payload as returned by the scraping service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiProfileResponse {
    #[serde(default)]
    pub profile_data: Option<ApiProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiProfile {
    pub username: String,
    pub full_name: Option<String>,
    pub biography: Option<String>,
    pub followers_count: Option<u64>,
    pub follows_count: Option<u64>,
    pub posts_count: Option<u64>,
    pub profile_pic_url: Option<String>,
    pub is_verified: Option<bool>,
    pub external_url: Option<String>,
    pub business_category_name: Option<String>,
    pub latest_posts: Option<Vec<ApiPost>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiPost {
    pub id: Option<String>,
    pub short_code: Option<String>,
    pub url: Option<String>,
    pub display_url: Option<String>,
    pub caption: Option<String>,
    /// Negative when the owner hides like counts
    pub likes_count: Option<i64>,
    pub comments_count: Option<i64>,
    pub is_video: Option<bool>,
    pub video_url: Option<String>,
    pub video_view_count: Option<u64>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn count(value: Option<i64>) -> u64 {
    value.unwrap_or(0).max(0) as u64
}

impl ApiPost {
    /// Posts without an image or permalink cannot be previewed and are dropped.
    fn into_recent_post(self) -> Option<RecentPost> {
        let display_url = non_empty(self.display_url)?;
        let url = non_empty(self.url)?;
        let video_url = non_empty(self.video_url);

        Some(RecentPost {
            display_url,
            caption: self.caption.unwrap_or_default(),
            num_likes: count(self.likes_count),
            num_comments: count(self.comments_count),
            is_video: self.is_video.unwrap_or(false) || video_url.is_some(),
            video_url,
            video_view_count: self.video_view_count.filter(|&views| views > 0),
            url,
        })
    }
}

impl From<ApiProfile> for ProfileData {
    fn from(profile: ApiProfile) -> Self {
        let recent_posts = profile
            .latest_posts
            .unwrap_or_default()
            .into_iter()
            .filter_map(ApiPost::into_recent_post)
            .collect();

        ProfileData {
            profile_info: ProfileInfo {
                username: profile.username,
                biography: profile.biography.unwrap_or_default(),
                followers: profile.followers_count.unwrap_or(0),
                following: profile.follows_count.unwrap_or(0),
                num_posts: profile.posts_count.unwrap_or(0),
                profile_pic_url: profile.profile_pic_url.unwrap_or_default(),
                is_verified: profile.is_verified.unwrap_or(false),
                link_in_bio: profile.external_url.unwrap_or_default(),
            },
            recent_posts,
        }
    }
}

impl TryFrom<ApiProfileResponse> for ProfileData {
    type Error = ProfileError;

    fn try_from(response: ApiProfileResponse) -> Result<Self, Self::Error> {
        response.profile_data.map(ProfileData::from).ok_or_else(|| {
            ProfileError::Malformed("response is missing required 'profile_data'".to_string())
        })
    }
}

impl ProfileData {
    /// Parse a raw scraping-service body.
    pub fn from_api_json(body: &str) -> Result<Self, ProfileError> {
        let response: ApiProfileResponse =
            serde_json::from_str(body).map_err(|e| ProfileError::Malformed(e.to_string()))?;
        ProfileData::try_from(response)
    }
}

/// Source of profile data for a username.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self, username: &str) -> Result<ProfileData, ProfileError>;
}
