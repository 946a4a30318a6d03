//! Shared value types for the review contract.
//!
//! `ReviewResult` and its children deserialize directly from the JSON text
//! the model is schema-constrained to produce (see [`crate::prompt`]);
//! `ReviewHistoryItem` additionally round-trips through the durable history
//! record. Wire field names are part of the service contract and must not
//! change: `fixedCode` stays camelCase, enum values stay lowercase.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// How serious a single finding is. Ordering is for display only
/// (low < medium < high); nothing in the core sorts by it.
///
/// The response schema constrains the model to the three lowercase names,
/// but schema adherence is the service's promise, not a guarantee. An
/// unknown string degrades to `Medium` at the parse boundary instead of
/// failing the whole review; see [`crate::client`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// The lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "low" => Severity::Low,
            "medium" => Severity::Medium,
            "high" => Severity::High,
            other => {
                tracing::debug!(severity = other, "unknown severity, using fallback");
                Severity::Medium
            }
        })
    }
}

/// Which evaluation axis a finding belongs to.
///
/// Same closed-enum posture as [`Severity`]: unknown strings from the model
/// degrade to `BestPractice` rather than dropping the finding or failing
/// the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Bug,
    Security,
    Performance,
    Readability,
    BestPractice,
}

impl Category {
    /// The lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Bug => "bug",
            Category::Security => "security",
            Category::Performance => "performance",
            Category::Readability => "readability",
            Category::BestPractice => "best_practice",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "bug" => Category::Bug,
            "security" => Category::Security,
            "performance" => Category::Performance,
            "readability" => Category::Readability,
            "best_practice" => Category::BestPractice,
            other => {
                tracing::debug!(category = other, "unknown category, using fallback");
                Category::BestPractice
            }
        })
    }
}

/// One detected issue. Immutable once parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisFinding {
    /// Evaluation axis the issue falls under.
    pub category: Category,
    /// The problem itself, as the model states it.
    pub finding: String,
    /// Step-by-step explanation of why this is a problem.
    pub reasoning: String,
    /// How serious the issue is.
    pub severity: Severity,
}

/// One suggested fix. `fixed_code` absent means no code change is proposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    /// Corrected code excerpt, when the fix is expressible as code.
    /// `fixedCode` on the wire.
    #[serde(rename = "fixedCode", default, skip_serializing_if = "Option::is_none")]
    pub fixed_code: Option<String>,
}

/// The full verdict for one review.
///
/// All four fields are required on the wire — a payload missing any of them
/// is malformed, not defaultable. The sequences may be empty; their element
/// order is the model's and is preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResult {
    /// Overall summary of the review.
    pub summary: String,
    /// Quality score, clamped into 0..=100 at the parse boundary.
    #[serde(deserialize_with = "clamp_score")]
    pub score: u8,
    /// Detected issues, in the order the model reported them.
    pub analysis: Vec<AnalysisFinding>,
    /// Suggested fixes, in the order the model reported them.
    pub recommendations: Vec<Recommendation>,
}

/// A cached past review: the input snapshot plus its verdict.
///
/// Created exactly once per successful review, never mutated afterwards,
/// destroyed only by eviction or an explicit history clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewHistoryItem {
    /// UUID v4 text. Uniqueness within the store rests on random
    /// generation; collisions are not actively checked.
    pub id: String,
    /// Creation time in Unix epoch milliseconds.
    pub timestamp: i64,
    /// The reviewed code, verbatim.
    pub code: String,
    /// The declared language of the snippet.
    pub language: String,
    /// The verdict the service returned.
    pub result: ReviewResult,
}

/// The schema declares `score` as a JSON number, so the model may emit a
/// fraction or stray out of range. Round, then clamp into 0..=100.
fn clamp_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}
