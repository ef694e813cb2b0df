//! Utility functions for date labels and string truncation.
//!
//! - Display dates in the digest's fixed timezone (UTC+9)
//! - Character-safe truncation for log previews and prompt budgets

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};

/// Offset of the digest's display timezone (KST) from UTC, in seconds.
const DISPLAY_OFFSET_SECS: i32 = 9 * 3600;

/// Today's date in the display timezone for the given instant.
///
/// Only used to label output. Nothing in the pipeline branches on it.
pub fn display_date(now: DateTime<Utc>) -> NaiveDate {
    let offset = FixedOffset::east_opt(DISPLAY_OFFSET_SECS).expect("UTC+9 is a valid offset");
    now.with_timezone(&offset).date_naive()
}

/// Short date label used inside the prompt, e.g. `2026. 10. 17.`.
pub fn short_date_label(date: NaiveDate) -> String {
    format!("{}. {}. {}.", date.year(), date.month(), date.day())
}

/// Long date label used as the title of a dated sub-page, e.g. `2026년 10월 17일`.
pub fn page_title_label(date: NaiveDate) -> String {
    format!("{}년 {}월 {}일", date.year(), date.month(), date.day())
}

/// Keep at most `max` characters of `s`, appending `...` when anything was cut.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and the number
/// of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((byte_idx, _)) => format!("{}…(+{} bytes)", &s[..byte_idx], s.len() - byte_idx),
    }
}
