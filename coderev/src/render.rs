//! Plain-text rendering of review results and the history listing.

use chrono::{DateTime, Local};
use coderev_core::types::{ReviewHistoryItem, ReviewResult};

/// Prints a full review verdict.
pub fn result(result: &ReviewResult) {
    println!("Score: {}/100", result.score);
    println!("\n{}", result.summary);

    if !result.analysis.is_empty() {
        println!("\nFindings:");
        for (n, finding) in result.analysis.iter().enumerate() {
            println!(
                "  {}. [{}/{}] {}",
                n + 1,
                finding.category,
                finding.severity,
                finding.finding
            );
            println!("     {}", finding.reasoning);
        }
    }

    if !result.recommendations.is_empty() {
        println!("\nRecommendations:");
        for (n, rec) in result.recommendations.iter().enumerate() {
            println!("  {}. {}", n + 1, rec.title);
            println!("     {}", rec.description);
            if let Some(fixed) = &rec.fixed_code {
                println!("     suggested fix:");
                for line in fixed.lines() {
                    println!("       {line}");
                }
            }
        }
    }
}

/// Prints one line per cached review, most recent first.
pub fn history(items: &[ReviewHistoryItem]) {
    if items.is_empty() {
        println!("no cached reviews");
        return;
    }
    for (n, item) in items.iter().enumerate() {
        println!(
            "{:>2}. {}  {:<10} {:>3}/100  {}  {}",
            n + 1,
            timestamp(item.timestamp),
            item.language,
            item.result.score,
            preview(&item.code),
            item.id
        );
    }
}

/// Prints a past review in full: the input snapshot plus its verdict.
pub fn history_item(item: &ReviewHistoryItem) {
    println!("id:       {}", item.id);
    println!("reviewed: {}", timestamp(item.timestamp));
    println!("language: {}", item.language);
    println!("\n```{}\n{}\n```\n", item.language, item.code);
    result(&item.result);
}

fn timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

/// First line of the code, truncated, for the history listing.
fn preview(code: &str) -> String {
    let line = code.lines().next().unwrap_or_default();
    let mut preview: String = line.chars().take(40).collect();
    if preview.len() < line.len() || code.lines().count() > 1 {
        preview.push('…');
    }
    preview
}
