/// Sentinel system for protecting links and references during machine translation
///
/// Dictionary text embeds `{...}` cross-links (Klingon words, entry references)
/// and `[...]` source citations. Both must reach the output byte-for-byte, so each
/// span is swapped for a numbered sentinel before the text goes to the provider
/// and swapped back afterwards.
///
/// Format: DONOTTRANSLATE{index}X where index is the 1-based span number
/// Examples: DONOTTRANSLATE1X, DONOTTRANSLATE2X, etc.
///
/// The closing `X` bounds the number, so a sentinel never runs into digits
/// that followed the span (`{a}5` becomes `DONOTTRANSLATE1X5`) and
/// `DONOTTRANSLATE1X` never occurs inside `DONOTTRANSLATE10X`.
use regex::Regex;
use std::sync::LazyLock;

/// Reserved prefix of every sentinel; not a word in any target language
pub const SENTINEL_PREFIX: &str = "DONOTTRANSLATE";

/// Closes the index of every sentinel
pub const SENTINEL_SUFFIX: &str = "X";

/// `{...}` without nested braces, or `[...]` without nested square brackets
static PROTECTED_SPAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*\}|\[[^\[\]]*\]").unwrap());

/// A protected substring and the sentinel standing in for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedSpan {
    /// 1-based occurrence number within the shielded text
    pub index: usize,
    /// The sentinel string sent to the provider
    pub token: String,
    /// The original substring, brackets included
    pub original: String,
}

impl ProtectedSpan {
    pub fn new(index: usize, original: &str) -> Self {
        ProtectedSpan {
            index,
            token: format!("{}{}{}", SENTINEL_PREFIX, index, SENTINEL_SUFFIX),
            original: original.to_string(),
        }
    }
}

/// Text ready for the provider plus the placeholder map needed to restore it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShieldedText {
    pub text: String,
    pub spans: Vec<ProtectedSpan>,
}

impl ShieldedText {
    pub fn unshield(&self, translated: &str) -> Unshielded {
        unshield(translated, &self.spans)
    }
}

/// Result of restoring protected spans into a translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unshielded {
    /// Final text; spans whose sentinel was lost are appended at the end
    pub text: String,
    /// Indices of the spans whose sentinel was missing from the translation
    pub missing: Vec<usize>,
}

/// Replace every protected span with its sentinel, left to right
///
/// # Example
/// ```ignore
/// let shielded = shield("See {Qapla':n} [1].");
/// assert_eq!(shielded.text, "See DONOTTRANSLATE1X DONOTTRANSLATE2X.");
/// ```
pub fn shield(text: &str) -> ShieldedText {
    let mut spans = Vec::new();
    let shielded = PROTECTED_SPAN_REGEX
        .replace_all(text, |caps: &regex::Captures| {
            let span = ProtectedSpan::new(spans.len() + 1, &caps[0]);
            let token = span.token.clone();
            spans.push(span);
            token
        })
        .into_owned();

    ShieldedText {
        text: shielded,
        spans,
    }
}

/// Put the original spans back into translated text
///
/// Spans are restored in index order, each into the first remaining occurrence of
/// its sentinel only, so a sentinel the provider duplicated is restored once. A
/// span whose sentinel is gone is appended to the end rather than lost.
pub fn unshield(translated: &str, spans: &[ProtectedSpan]) -> Unshielded {
    let mut text = translated.to_string();
    let mut missing = Vec::new();
    let mut appended = String::new();

    for span in spans {
        match text.find(&span.token) {
            Some(pos) => text.replace_range(pos..pos + span.token.len(), &span.original),
            None => {
                missing.push(span.index);
                appended.push_str(&span.original);
            }
        }
    }

    text.push_str(&appended);
    Unshielded { text, missing }
}

/// Whether a value is a single `{...}` span and nothing else
///
/// Such values are already in transcription form and are copied verbatim.
pub fn is_verbatim(value: &str) -> bool {
    value.starts_with('{')
        && PROTECTED_SPAN_REGEX
            .find(value)
            .is_some_and(|m| m.start() == 0 && m.end() == value.len())
}
