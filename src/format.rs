//! Source-level cleanup applied before parsing.

use regex::Regex;
use std::sync::LazyLock;

static INTER_TAG_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s+<").expect("inter-tag whitespace pattern is valid"));

/// Remove whitespace between a `>` and the following `<`, then trim the
/// whole string.
///
/// This keeps indentation and trailing newlines in hand-written fixtures from
/// turning into whitespace-only text nodes.
pub fn format_html(html: &str) -> String {
    INTER_TAG_WHITESPACE
        .replace_all(html, "><")
        .trim()
        .to_string()
}
