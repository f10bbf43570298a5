// SPDX-License-Identifier: Apache-2.0

//! Text utility functions for Issuelens.
//!
//! All lengths are measured in characters, not bytes, so multi-byte UTF-8
//! is never split.

/// Truncates text to a maximum length with a custom suffix.
///
/// The suffix is included in the max length calculation.
///
/// # Examples
///
/// ```
/// use issuelens_core::utils::truncate_with_suffix;
///
/// let text = "This is a very long string that needs truncation";
/// let result = truncate_with_suffix(text, 20, "... [more]");
/// assert!(result.ends_with("... [more]"));
/// assert!(result.chars().count() <= 20);
/// ```
#[must_use]
pub fn truncate_with_suffix(text: &str, max_len: usize, suffix: &str) -> String {
    let char_count = text.chars().count();
    if char_count <= max_len {
        text.to_string()
    } else {
        let suffix_len = suffix.chars().count();
        let truncate_at = max_len.saturating_sub(suffix_len);
        let truncated: String = text.chars().take(truncate_at).collect();
        format!("{truncated}{suffix}")
    }
}

/// Truncates text to a maximum length with default ellipsis suffix "...".
///
/// # Examples
///
/// ```
/// use issuelens_core::utils::truncate;
///
/// assert_eq!(truncate("Hello", 10), "Hello");
///
/// let long = "This is a very long title that exceeds the limit";
/// let result = truncate(long, 20);
/// assert!(result.ends_with("..."));
/// assert!(result.chars().count() <= 20);
/// ```
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    truncate_with_suffix(text, max_len, "...")
}
