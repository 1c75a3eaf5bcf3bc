//! Chat-completion contract for structured JSON answers.
//!
//! The model is asked for a single JSON object matching a declared schema.
//! Answers are parsed and schema-checked before use, and each stage fails with
//! its own error so callers can tell a bad answer from an unreachable service.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of audience keywords a profile analysis may carry.
pub const MAX_AUDIENCE_KEYWORDS: usize = 5;

/// Ad copy variations generated per request.
pub const AD_VARIATION_COUNT: usize = 5;

/// Audience keywords carried by each ad variation.
pub const VARIATION_KEYWORD_COUNT: usize = 5;

/// Longest headline Meta shows without truncation, in characters.
pub const MAX_HEADLINE_CHARS: usize = 40;

/// Errors from requesting structured output.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// The completion service could not be reached or refused the request.
    #[error("completion service error: {0}")]
    Transport(String),

    /// The answer was not JSON.
    #[error("answer is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The answer was JSON but did not match the schema.
    #[error("answer does not match schema: {0}")]
    Schema(String),
}

impl CompletionError {
    pub fn is_schema_error(&self) -> bool {
        matches!(self, CompletionError::InvalidJson(_) | CompletionError::Schema(_))
    }
}

/// A type the model can be asked to produce.
pub trait StructuredOutput: DeserializeOwned + JsonSchema {
    /// Checks the schema language cannot express.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Chat-completion backend returning the raw answer text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete_json(&self, system_prompt: &str) -> Result<String, CompletionError>;
}

/// Instruction appended to a prompt so the answer follows `T`'s schema.
pub fn schema_instruction<T: JsonSchema>() -> String {
    let schema = schemars::schema_for!(T);
    let rendered = serde_json::to_string(&schema).unwrap_or_else(|_| "{}".to_string());
    format!(
        "You MUST output ONLY a valid JSON object that satisfies the following JSON schema:\n{}",
        rendered
    )
}

/// Parse and validate a raw answer.
pub fn parse_structured<T: StructuredOutput>(raw: &str) -> Result<T, CompletionError> {
    let body = strip_code_fence(raw);
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(CompletionError::InvalidJson)?;
    if !value.is_object() {
        return Err(CompletionError::Schema(
            "expected a single JSON object".to_string(),
        ));
    }

    let parsed: T =
        serde_json::from_value(value).map_err(|e| CompletionError::Schema(e.to_string()))?;
    parsed.validate().map_err(CompletionError::Schema)?;
    Ok(parsed)
}

/// Ask the client for a `T` and validate the answer.
pub async fn request_structured<T, C>(client: &C, system_prompt: &str) -> Result<T, CompletionError>
where
    T: StructuredOutput,
    C: CompletionClient + ?Sized,
{
    let prompt = format!("{}\n\n{}", system_prompt.trim_end(), schema_instruction::<T>());
    let raw = client.complete_json(&prompt).await?;
    parse_structured(&raw).inspect_err(|err| {
        tracing::warn!(error = %err, "structured answer rejected");
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Brand analysis of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProfileAnalysis {
    /// Brief summary of the profile and its business
    pub summary: String,
    /// Specific niche, e.g. "Fitness Coach"
    pub niche: String,
    /// Up to five keywords describing potential customers
    pub target_audience_keywords: Vec<String>,
    /// Three to five business categories or audience types to target
    #[serde(default)]
    pub potential_targets: Vec<String>,
}

impl StructuredOutput for ProfileAnalysis {
    fn validate(&self) -> Result<(), String> {
        if self.target_audience_keywords.len() > MAX_AUDIENCE_KEYWORDS {
            return Err(format!(
                "target_audience_keywords has {} entries, at most {} allowed",
                self.target_audience_keywords.len(),
                MAX_AUDIENCE_KEYWORDS
            ));
        }
        Ok(())
    }
}

/// One ad copy variation with its own audience keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AdVariation {
    /// A compelling headline of at most 40 characters
    pub headline: String,
    /// Engaging primary text for the ad, one to three sentences
    #[serde(rename = "primaryText")]
    pub primary_text: String,
    /// A brief sentence adding context or a call to action
    pub description: String,
    /// Exactly five keywords for this variation's target audience
    pub target_audience_keywords: Vec<String>,
    /// Three to five real-world business categories or audience types
    pub potential_targets: Vec<String>,
}

impl StructuredOutput for AdVariation {
    fn validate(&self) -> Result<(), String> {
        let headline_chars = self.headline.chars().count();
        if headline_chars > MAX_HEADLINE_CHARS {
            return Err(format!(
                "headline has {} characters, at most {} allowed",
                headline_chars, MAX_HEADLINE_CHARS
            ));
        }
        if self.target_audience_keywords.len() != VARIATION_KEYWORD_COUNT {
            return Err(format!(
                "target_audience_keywords has {} entries, exactly {} required",
                self.target_audience_keywords.len(),
                VARIATION_KEYWORD_COUNT
            ));
        }
        Ok(())
    }
}

/// A full set of generated ad copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AdGenerationOutput {
    /// Exactly five distinct ad copy variations
    #[serde(rename = "adVariations")]
    pub ad_variations: Vec<AdVariation>,
}

impl StructuredOutput for AdGenerationOutput {
    fn validate(&self) -> Result<(), String> {
        if self.ad_variations.len() != AD_VARIATION_COUNT {
            return Err(format!(
                "adVariations has {} entries, exactly {} required",
                self.ad_variations.len(),
                AD_VARIATION_COUNT
            ));
        }
        self.ad_variations
            .iter()
            .enumerate()
            .try_for_each(|(i, variation)| {
                variation
                    .validate()
                    .map_err(|e| format!("adVariations[{}]: {}", i, e))
            })
    }
}
