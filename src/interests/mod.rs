//! Meta ad-interest lookup.
//!
//! Target-audience keywords produced by profile analysis are cross-referenced
//! against Meta's ad-interest search. Each keyword is queried once, results are
//! tagged with the keyword that found them, and the combined list is
//! deduplicated by interest id.

mod graph;

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use graph::{GraphInterestClient, DEFAULT_GRAPH_BASE_URL, DEFAULT_SEARCH_LIMIT};

/// Audience assumed for budgeting when no selected interest reports a size.
pub const DEFAULT_AUDIENCE_SIZE: u64 = 50_000;

const AUDIENCE_INSIGHTS_URL: &str = "https://www.facebook.com/ads/audience-insights/people";

/// Errors from an ad-interest search backend.
#[derive(thiserror::Error, Debug)]
pub enum InterestError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Graph API answered with an error object.
    #[error("Graph API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

pub type Result<T, E = InterestError> = std::result::Result<T, E>;

/// One interest as returned by the search backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestCandidate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub audience_size: Option<u64>,
    #[serde(default)]
    pub audience_size_lower_bound: Option<u64>,
    #[serde(default)]
    pub topic: Option<String>,
}

impl InterestCandidate {
    /// Reported audience size, falling back to the lower bound.
    pub fn size(&self) -> Option<u64> {
        self.audience_size.or(self.audience_size_lower_bound)
    }
}

/// A targetable interest tagged with the keyword that found it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaInterest {
    pub id: String,
    pub name: String,
    pub audience_size: Option<u64>,
    pub topic: Option<String>,
    pub search_term: String,
    pub link: String,
}

impl MetaInterest {
    pub fn from_candidate(candidate: InterestCandidate, keyword: &str) -> Self {
        let audience_size = candidate.size();
        let link = audience_insights_link(&candidate.id);
        Self {
            id: candidate.id,
            name: candidate.name,
            audience_size,
            topic: candidate.topic,
            search_term: keyword.to_string(),
            link,
        }
    }
}

/// Deep link into Audience Insights for an interest id.
pub fn audience_insights_link(interest_id: &str) -> String {
    format!("{}?interest_ids={}", AUDIENCE_INSIGHTS_URL, interest_id)
}

/// Free-text ad-interest search.
#[async_trait]
pub trait InterestSearch: Send + Sync {
    /// Candidate interests for one keyword.
    async fn search(&self, keyword: &str) -> Result<Vec<InterestCandidate>>;
}

/// Look up every distinct keyword and collect the tagged results.
///
/// A failing keyword is logged and skipped so one bad lookup does not lose
/// the rest.
pub async fn find_interests<S>(search: &S, keywords: &[String]) -> Vec<MetaInterest>
where
    S: InterestSearch + ?Sized,
{
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for keyword in keywords {
        let keyword = keyword.trim();
        if keyword.is_empty() || !seen.insert(keyword.to_string()) {
            continue;
        }

        tracing::info!(keyword, "fetching interests");
        match search.search(keyword).await {
            Ok(candidates) => {
                tracing::debug!(keyword, count = candidates.len(), "interests found");
                results.extend(
                    candidates
                        .into_iter()
                        .map(|c| MetaInterest::from_candidate(c, keyword)),
                );
            }
            Err(err) => {
                tracing::error!(keyword, error = %err, "interest lookup failed");
            }
        }
    }

    results
}

/// One entry per interest id.
///
/// Entries keep the position of the first occurrence and take the value of
/// the last one.
pub fn dedup_by_id(interests: Vec<MetaInterest>) -> Vec<MetaInterest> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<MetaInterest> = Vec::new();

    for interest in interests {
        match index.get(&interest.id) {
            Some(&pos) => unique[pos] = interest,
            None => {
                index.insert(interest.id.clone(), unique.len());
                unique.push(interest);
            }
        }
    }

    unique
}

/// Combined reach of the selected interests, used as the estimator's
/// audience size. Falls back to [`DEFAULT_AUDIENCE_SIZE`] when nothing is
/// known.
pub fn audience_for_estimate(selected: &[MetaInterest]) -> u64 {
    let total = selected
        .iter()
        .filter_map(|i| i.audience_size)
        .fold(0u64, u64::saturating_add);
    if total > 0 {
        total
    } else {
        DEFAULT_AUDIENCE_SIZE
    }
}
