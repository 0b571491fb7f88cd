use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]+>").ok());
static BLANK_LINES: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)^(\s*[\r\n])+").ok());

/// Convert an HTML documentation comment to plain markdown.
///
/// Tags are stripped, runs of blank lines collapse to one line break, and the
/// result is trimmed.
pub fn to_markdown(text: &str) -> String {
    let mut text = text.to_string();
    if let Some(tag) = TAG.as_ref() {
        text = tag.replace_all(&text, "").into_owned();
    }
    if let Some(blank) = BLANK_LINES.as_ref() {
        text = blank.replace_all(&text, "\n").into_owned();
    }
    text.trim().to_string()
}
