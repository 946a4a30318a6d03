//! Error taxonomy for the review flow and the history storage.

use thiserror::Error;

/// Failures of the remote review call.
///
/// Every variant propagates unchanged to the top-level caller, which owns
/// display and in-progress state. Nothing is retried anywhere in the core.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Network-level failure: DNS, connect, TLS, or reading the body.
    #[error("review request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status
    /// (auth, rate limit, server error).
    #[error("review service responded with {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    /// Transport succeeded but the response carried no usable text.
    #[error("the model returned no content")]
    EmptyResponse,

    /// Text came back but does not parse into the expected structure.
    /// The offending text is logged at debug level, never shown.
    #[error("the model response is not a valid review: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

/// Failures of the durable history storage.
///
/// Fully absorbed at the [`crate::history::HistoryStore`] boundary: logged,
/// never surfaced to the user, never allowed to block the review flow.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("history database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("history record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
