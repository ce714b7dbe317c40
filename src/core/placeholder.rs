//! Placeholder protection for machine translation.
//!
//! Source strings can embed interpolation tokens (`{name}`) and message
//! references (`@:common.link`). Remote translators tend to translate, respace
//! or otherwise mangle them, so after translation every token found in the
//! output is replaced, by position, with the token found at the same position
//! in the source text.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*\}|@:\S+").expect("valid placeholder regex"));

/// Outcome of reconciling a raw translation against its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    /// Neither side had tokens, or only one side did. Text is the raw translation.
    Untouched(String),
    /// Tokens were paired by position and restored.
    Restored(String),
    /// Token counts differ. Text is the raw translation, left as is.
    CountMismatch {
        text: String,
        expected: usize,
        found: usize,
    },
}

impl Reconciled {
    pub fn into_text(self) -> String {
        match self {
            Reconciled::Untouched(text) | Reconciled::Restored(text) => text,
            Reconciled::CountMismatch { text, .. } => text,
        }
    }
}

/// Tokens in `text`, in order of appearance.
pub fn extract_tokens(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

fn token_spans(text: &str) -> Vec<Range<usize>> {
    TOKEN_RE.find_iter(text).map(|m| m.range()).collect()
}

/// Restore the source tokens of `original` inside `translated`.
pub fn reconcile(original: &str, translated: String) -> Reconciled {
    let expected = extract_tokens(original);
    let spans = token_spans(&translated);

    if expected.is_empty() || spans.is_empty() {
        return Reconciled::Untouched(translated);
    }
    if expected.len() != spans.len() {
        return Reconciled::CountMismatch {
            expected: expected.len(),
            found: spans.len(),
            text: translated,
        };
    }

    let mut resolved = String::with_capacity(translated.len());
    let mut cursor = 0;
    for (span, token) in spans.iter().zip(&expected) {
        resolved.push_str(&translated[cursor..span.start]);
        resolved.push_str(token);
        cursor = span.end;
    }
    resolved.push_str(&translated[cursor..]);

    Reconciled::Restored(resolved)
}
