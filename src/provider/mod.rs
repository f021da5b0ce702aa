//! Question answering over the ingested samples.
//!
//! Two tiers, matching how the `/api/ask` endpoint behaves:
//!
//! 1. [`insights`]: keyword-matched aggregate answers (average age, regions,
//!    record counts) computed locally from the store.
//! 2. [`GeminiClient`]: everything else is forwarded to Google's Gemini API
//!    with a context prefix built from at most [`MAX_CONTEXT_RECORDS`]
//!    records. Upstream failures surface as [`ProviderError`]; there are no
//!    retries.

pub mod insights;

use thiserror::Error;

use crate::core::sample::SampleRecord;

/// Records included in the context prefix sent upstream, to bound tokens
pub const MAX_CONTEXT_RECORDS: usize = 10;

const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1/models/gemini-1.5-pro:generateContent";

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    #[error("Request to provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned status {0}")]
    Api(reqwest::StatusCode),

    #[error("Could not extract an answer from the provider response")]
    MalformedResponse,
}

/// Client for the Gemini `generateContent` API
pub struct GeminiClient {
    api_key: String,
    http: reqwest::Client,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http: reqwest::Client::new(),
            endpoint: GEMINI_ENDPOINT.to_string(),
        }
    }

    /// Build a client from the `GEMINI_API_KEY` environment variable.
    /// Returns None when the key is absent; the ask endpoint then falls
    /// back to local answers only.
    pub fn from_env() -> Option<Self> {
        std::env::var("GEMINI_API_KEY").ok().map(Self::new)
    }

    /// Forward a question, augmented with sample context, to the provider.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Http` on transport failure,
    /// `ProviderError::Api` on a non-success status, or
    /// `ProviderError::MalformedResponse` if the expected answer field is
    /// missing from the response body.
    pub async fn ask(
        &self,
        question: &str,
        context_records: &[SampleRecord],
    ) -> Result<String, ProviderError> {
        let augmented = format!("{}\n\nQuestion: {question}", context_prefix(context_records));

        let payload = serde_json::json!({
            "contents": [
                { "parts": [ { "text": augmented } ] }
            ],
            "generationConfig": {
                "temperature": 0.7,
                "maxOutputTokens": 200,
                "topP": 0.95,
                "topK": 40
            }
        });

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Provider request failed with status {status}");
            return Err(ProviderError::Api(status));
        }

        let body: serde_json::Value = response.json().await?;
        extract_answer(&body).ok_or(ProviderError::MalformedResponse)
    }
}

/// Render the context block prepended to forwarded questions
fn context_prefix(records: &[SampleRecord]) -> String {
    let mut context = String::from("Based on the following data:\n");
    for record in records.iter().take(MAX_CONTEXT_RECORDS) {
        context.push_str(&format!(
            "ID: {}, Region: {}, Age: {}, Seed: {}\n",
            record.id, record.region, record.age, record.seed_tag
        ));
    }
    context
}

/// Pull the answer text out of a `generateContent` response body
fn extract_answer(body: &serde_json::Value) -> Option<String> {
    body.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(std::string::ToString::to_string)
}
