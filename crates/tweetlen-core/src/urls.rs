//! URL span detection.
//!
//! Finds the parts of a message that are charged the flat URL weight:
//! scheme URLs, `www.` hosts, e-mail addresses and bare domains with a
//! well-known top-level domain. Spans are byte ranges over the text the
//! detector was given, which callers are expected to have NFC-normalized.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Half-open byte range of a detected URL.
pub type Span = Range<usize>;

/// Top-level domains accepted for bare (scheme-less) domains.
const BARE_TLDS: &[&str] = &[
    "ai", "app", "au", "be", "biz", "blog", "br", "ca", "ch", "cn", "co", "com", "de", "dev",
    "edu", "es", "eu", "fr", "gg", "gov", "in", "info", "io", "it", "jp", "kr", "ly", "me", "mx",
    "net", "news", "nl", "org", "ru", "se", "shop", "site", "tech", "tv", "uk", "us", "xyz",
];

/// Combined link pattern. Alternatives are tried in order at each position,
/// so scheme URLs win over e-mail and e-mail wins over bare domains.
///
/// Word boundaries are ASCII-only so a link written straight after CJK or
/// Arabic text still starts a match. Bare-domain TLDs must be all lowercase
/// or all uppercase, which keeps `me.It` from reading as a domain.
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let path = r#"[!-~&&[^<>"]]"#;
    let label = r"[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?";
    let tail = format!(r"(?::[0-9]{{1,5}})?(?:[/?#]{path}*)?");
    let lower = BARE_TLDS.join("|");
    let upper = lower.to_ascii_uppercase();
    let pattern = format!(
        r"(?i)(?P<scheme>(?-u:\b)https?://{path}+)|(?P<www>(?-u:\b)www\.(?:{label}\.)+[a-z]{{2,63}}(?-u:\b){tail})|(?P<email>[a-z0-9._%+-]+@(?:{label}\.)+[a-z]{{2,63}}(?-u:\b))|(?P<bare>(?:{label}\.)+(?-i:{lower}|{upper})(?-u:\b){tail})"
    );
    Regex::new(&pattern).expect("valid regex")
});

/// Finds URL spans in a message.
pub trait UrlDetecting: Send + Sync {
    /// Returns every URL span in `text`, sorted and non-overlapping.
    fn detect(&self, text: &str) -> Vec<Span>;
}

/// Regex-backed link detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlDetector;

impl UrlDetecting for UrlDetector {
    #[tracing::instrument(level = "trace", skip_all, fields(text_len = text.len()))]
    fn detect(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut pos = 0;

        while let Some(caps) = LINK_PATTERN.captures_at(text, pos) {
            let Some(whole) = caps.get(0) else { break };
            let glued = caps.name("email").or_else(|| caps.name("bare")).is_some()
                && is_glued(text, whole.start());

            if glued {
                pos = next_char_boundary(text, whole.start());
                continue;
            }

            let end = whole.start() + trimmed_len(whole.as_str());
            if end > whole.start() && has_host(&text[whole.start()..end]) {
                spans.push(whole.start()..end);
            }
            pos = whole.end();
        }

        tracing::trace!(count = spans.len(), "detected url spans");
        merge_spans(spans)
    }
}

/// Sort spans and coalesce any that overlap.
pub fn merge_spans(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_by_key(|span| span.start);
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start < last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

/// A scheme-less match must not continue a word, path or address.
fn is_glued(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '-' | '/' | '_'))
}

fn next_char_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .chars()
        .next()
        .map_or(text.len(), |c| from + c.len_utf8())
}

/// Length of `candidate` once trailing sentence punctuation and unbalanced
/// closing brackets are dropped.
fn trimmed_len(candidate: &str) -> usize {
    let mut end = candidate.len();
    loop {
        let Some(last) = candidate[..end].chars().next_back() else {
            return end;
        };
        let drop = match last {
            '.' | ',' | ':' | ';' | '!' | '?' | '\'' => true,
            ')' => unbalanced(&candidate[..end], '(', ')'),
            ']' => unbalanced(&candidate[..end], '[', ']'),
            _ => false,
        };
        if !drop {
            return end;
        }
        end -= last.len_utf8();
    }
}

fn unbalanced(s: &str, open: char, close: char) -> bool {
    s.matches(close).count() > s.matches(open).count()
}

/// Rejects matches that are nothing but a scheme, e.g. `https://.`.
fn has_host(span: &str) -> bool {
    let rest = span.split_once("://").map_or(span, |(_, rest)| rest);
    rest.chars().any(|c| c.is_ascii_alphanumeric())
}
