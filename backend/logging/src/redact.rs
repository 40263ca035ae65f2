//! Log Redaction Layer
//!
//! Scrubs Discord bot tokens, bearer tokens, and API keys from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static DISCORD_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[MNO][A-Za-z\d_-]{23,27}\.[A-Za-z\d_-]{6}\.[A-Za-z\d_-]{27,40}").unwrap()
});
static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(Bearer|Bot)\s+[a-zA-Z0-9\-\._~+/]{16,}=*").unwrap());
static API_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)(apikey|api_key)(["']?\s*[:=]\s*["']?)[A-Za-z0-9]{6,}"#).unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = DISCORD_TOKEN_RE.replace_all(input, "[REDACTED_TOKEN]");
    let redacted = BEARER_RE.replace_all(&redacted, "$1 [REDACTED_TOKEN]");
    let redacted = API_KEY_RE.replace_all(&redacted, "$1$2[REDACTED_KEY]");
    redacted.into_owned()
}
