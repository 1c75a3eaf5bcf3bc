//! HTTP client for the Graph API ad-interest search.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::{InterestCandidate, InterestError, InterestSearch, Result};

pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com/v20.0/";

/// Results requested per keyword.
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    data: Vec<InterestCandidate>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    message: String,
}

/// Client for `GET /search?type=adinterest`.
///
/// Use [`GraphInterestClient::new`] for production or
/// [`GraphInterestClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct GraphInterestClient {
    client: Client,
    access_token: String,
    base_url: Url,
    limit: u32,
}

impl GraphInterestClient {
    /// Create a client against the production Graph API.
    pub fn new(access_token: &str, timeout_secs: u64) -> Result<Self> {
        Self::with_base_url(access_token, timeout_secs, DEFAULT_GRAPH_BASE_URL)
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("spotlight/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Trailing slash so joining "search" appends instead of replacing the version segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| InterestError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url,
            limit: DEFAULT_SEARCH_LIMIT,
        })
    }

    /// Set the number of results requested per keyword.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    fn search_url(&self, keyword: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join("search")
            .map_err(|e| InterestError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("type", "adinterest")
            .append_pair("q", keyword)
            .append_pair("limit", &self.limit.to_string())
            .append_pair("access_token", &self.access_token);
        Ok(url)
    }
}

#[async_trait]
impl InterestSearch for GraphInterestClient {
    async fn search(&self, keyword: &str) -> Result<Vec<InterestCandidate>> {
        let url = self.search_url(keyword)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => InterestError::Api {
                    status: status.as_u16(),
                    message: envelope.error.message,
                },
                Err(_) => InterestError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: format!("{}search", self.base_url),
                },
            });
        }

        let envelope: SearchEnvelope =
            serde_json::from_str(&body).map_err(|e| InterestError::Deserialize {
                context: format!("adinterest search(q={keyword})"),
                source: e,
            })?;

        Ok(envelope.data)
    }
}
