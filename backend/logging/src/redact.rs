//! Log Redaction
//!
//! Scrubs provider API keys and bearer tokens from strings before they are
//! logged or shown to the browser.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sk-(?:ant-)?[a-zA-Z0-9_\-]{16,}").unwrap());
static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = API_KEY_RE.replace_all(input, "[REDACTED_KEY]");
    BEARER_RE.replace_all(&redacted, "[REDACTED_TOKEN]").into_owned()
}
