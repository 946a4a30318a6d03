//! HTTP client for the remote review service.
//!
//! One configured connection, one call per review, no retries. The request
//! body comes from [`crate::prompt`]; this module owns the transport, the
//! response envelope, and the parse of the model's text into a
//! [`ReviewResult`].

use serde::Deserialize;

use crate::error::ReviewError;
use crate::prompt;
use crate::types::ReviewResult;

/// Public endpoint of the Gemini REST API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when the configuration names none.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Client for `models/{model}:generateContent`.
///
/// Stateless between calls: `review` has no side effects beyond the network
/// round trip, so callers own all sequencing (the core does not guard
/// against concurrent submissions).
pub struct ReviewClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f64,
}

/// Response envelope for `generateContent`. Every level is optional on the
/// wire; absence anywhere collapses to "no text" rather than a parse error.
#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl ReviewClient {
    /// Creates a client with the default endpoint, model, and temperature.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            temperature: prompt::TEMPERATURE,
        }
    }

    /// Overrides the service endpoint (tests point this at a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sends `code` and its declared `language` for review and parses the
    /// verdict.
    ///
    /// Callers should guard against blank `code` before invoking — the
    /// client does not reject it, it is just a wasted round trip.
    ///
    /// # Errors
    ///
    /// - [`ReviewError::Transport`] — the request never produced a response.
    /// - [`ReviewError::Api`] — non-success HTTP status (auth, rate limit,
    ///   server error); the response body is carried as the message.
    /// - [`ReviewError::EmptyResponse`] — the envelope held no text.
    /// - [`ReviewError::MalformedResponse`] — the envelope or the review
    ///   payload does not parse into the expected structure.
    pub async fn review(&self, code: &str, language: &str) -> Result<ReviewResult, ReviewError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        );
        let body = prompt::request_body(code, language, self.temperature);

        tracing::debug!(model = %self.model, language, "sending review request");
        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ReviewError::Api { status, message });
        }

        let raw = response.text().await?;
        let envelope: GenerateContentResponse =
            serde_json::from_str(&raw).map_err(ReviewError::MalformedResponse)?;

        let text = envelope
            .candidates
            .unwrap_or_default()
            .into_iter()
            .flat_map(|candidate| {
                candidate
                    .content
                    .and_then(|content| content.parts)
                    .unwrap_or_default()
            })
            .filter_map(|part| part.text)
            .collect::<Vec<_>>()
            .join("\n");

        if text.trim().is_empty() {
            return Err(ReviewError::EmptyResponse);
        }

        serde_json::from_str(&text).map_err(|error| {
            tracing::debug!(raw = %text, "review payload failed to parse");
            ReviewError::MalformedResponse(error)
        })
    }
}
