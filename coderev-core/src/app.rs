//! The narrow interface the UI layer drives.
//!
//! `ReviewApp` ties the client and the history store together: one
//! submission either yields a validated [`ReviewResult`] and a new history
//! entry, or an error and an untouched history — never a partial result.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::client::ReviewClient;
use crate::error::ReviewError;
use crate::history::HistoryStore;
use crate::types::{ReviewHistoryItem, ReviewResult};

/// Review pipeline plus its history, as one unit of state.
pub struct ReviewApp {
    client: ReviewClient,
    history: HistoryStore,
}

impl ReviewApp {
    pub fn new(client: ReviewClient, history: HistoryStore) -> Self {
        Self { client, history }
    }

    /// Runs one review and, on success, records it in the history.
    ///
    /// The history item is created exactly once here: fresh UUID v4 id,
    /// current epoch-millis timestamp, the inputs verbatim, the verdict.
    ///
    /// # Errors
    ///
    /// Propagates [`ReviewError`] unchanged; the history is not modified on
    /// any error path.
    pub async fn submit(
        &mut self,
        code: &str,
        language: &str,
    ) -> Result<ReviewResult, ReviewError> {
        let result = self.client.review(code, language).await?;

        self.history.record(ReviewHistoryItem {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: now_millis(),
            code: code.to_owned(),
            language: language.to_owned(),
            result: result.clone(),
        });

        Ok(result)
    }

    /// Cached reviews, most recent first. Pure read.
    pub fn history(&self) -> &[ReviewHistoryItem] {
        self.history.items()
    }

    /// Recalls a past review by id, for re-loading its code, language, and
    /// result into the working view. Pure read.
    pub fn select(&self, id: &str) -> Option<&ReviewHistoryItem> {
        self.history.get(id)
    }

    /// Drops the whole history.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

/// Current Unix timestamp in milliseconds.
fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
