//! coderev-core — the review engine behind the `coderev` front end.
//!
//! Three collaborating pieces:
//!
//! - [`client::ReviewClient`] + [`prompt`] — build one deterministic,
//!   schema-constrained request per `(code, language)` pair and validate
//!   the model's text payload into a typed [`types::ReviewResult`].
//! - [`history::HistoryStore`] — the ten most recent reviews,
//!   most-recent-first, persisted through an injected [`storage::Storage`].
//! - [`app::ReviewApp`] — the narrow facade a front end consumes:
//!   submit, list history, recall an entry.
//!
//! Review errors ([`error::ReviewError`]) propagate to the caller;
//! storage errors ([`error::StorageError`]) never leave the history layer.

pub mod app;
pub mod client;
pub mod error;
pub mod history;
pub mod prompt;
pub mod schema;
pub mod storage;
pub mod types;
