//! Line classification for dictionary entry files
//!
//! Every line of a `mem-*.xml` file is classified exactly once into a
//! [`LineKind`]. The rewriter dispatches on the kind; nothing downstream looks
//! at the raw markup again except to splice new content into the line.

use regex::Regex;
use std::sync::LazyLock;

/// Closing tag that terminates a (possibly multiline) column value
pub const FIELD_TERMINATOR: &str = "</column>";

const COMMENT_OPEN: &str = "<!-- ";
const COMMENT_CLOSE: &str = " -->";

static DEFINITION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""definition">(.*)<"#).unwrap());
static DEFINITION_DIRECTIVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"definition_(.+)">TRANSLATE(?:: (.*))?<"#).unwrap());
static PART_OF_SPEECH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"part_of_speech">(.*):(.*)<"#).unwrap());
static NOTES_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""notes">(.*)"#).unwrap());
static NOTES_DIRECTIVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"notes_(.+)">TRANSLATE<"#).unwrap());

/// What a single line of an entry file carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Inside a `<!-- ... -->` block; passed through untouched
    Comment,
    /// English definition of the current entry (may be empty)
    DefinitionSource(&'a str),
    /// `definition_xx` field asking for a translation, with an optional
    /// `TRANSLATE: better source text` override
    DefinitionDirective {
        language: &'a str,
        override_text: Option<&'a str>,
    },
    /// `part_of_speech` value of the form `category:attr,attr,...`
    PartOfSpeech { category: &'a str, attrs: &'a str },
    /// First line of a notes value that continues on the next line
    NotesStart(&'a str),
    /// Untagged middle line of a multiline notes value
    NotesContinue(&'a str),
    /// Last (or only) line of a notes value, terminator stripped
    NotesEnd(&'a str),
    /// `notes_xx` field asking for a translation
    NotesDirective { language: &'a str },
    /// Anything else
    Plain,
}

/// Classifies lines while tracking whether we are inside a comment block
#[derive(Debug, Default)]
pub struct FieldRecognizer {
    in_comment: bool,
}

impl FieldRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_comment(&self) -> bool {
        self.in_comment
    }

    /// Classify one line (without its line ending)
    ///
    /// `accumulating` is true while a multiline notes value is open; every
    /// non-comment line is then part of that value.
    pub fn classify<'a>(&mut self, line: &'a str, accumulating: bool) -> LineKind<'a> {
        if line.contains(COMMENT_OPEN) {
            self.in_comment = true;
        }

        let kind = if self.in_comment {
            LineKind::Comment
        } else if accumulating {
            match line.strip_suffix(FIELD_TERMINATOR) {
                Some(content) => LineKind::NotesEnd(content),
                None => LineKind::NotesContinue(line),
            }
        } else {
            classify_field(line)
        };

        if line.contains(COMMENT_CLOSE) {
            self.in_comment = false;
        }

        kind
    }
}

fn classify_field(line: &str) -> LineKind<'_> {
    if let Some(caps) = DEFINITION_REGEX.captures(line) {
        let value = caps.get(1).map_or("", |m| m.as_str());
        return LineKind::DefinitionSource(value);
    }

    if let Some(caps) = DEFINITION_DIRECTIVE_REGEX.captures(line) {
        let language = caps.get(1).map_or("", |m| m.as_str());
        let override_text = caps
            .get(2)
            .map(|m| m.as_str())
            .filter(|text| !text.is_empty());
        return LineKind::DefinitionDirective {
            language,
            override_text,
        };
    }

    if let Some(caps) = PART_OF_SPEECH_REGEX.captures(line) {
        return LineKind::PartOfSpeech {
            category: caps.get(1).map_or("", |m| m.as_str()),
            attrs: caps.get(2).map_or("", |m| m.as_str()),
        };
    }

    if let Some(caps) = NOTES_REGEX.captures(line) {
        let content = caps.get(1).map_or("", |m| m.as_str());
        return match content.strip_suffix(FIELD_TERMINATOR) {
            Some(value) => LineKind::NotesEnd(value),
            None => LineKind::NotesStart(content),
        };
    }

    if let Some(caps) = NOTES_DIRECTIVE_REGEX.captures(line) {
        return LineKind::NotesDirective {
            language: caps.get(1).map_or("", |m| m.as_str()),
        };
    }

    LineKind::Plain
}

/// Replace everything between the opening tag's `>` and the closing tag's `<`
///
/// Lines without both delimiters are returned unchanged.
pub fn replace_content(line: &str, content: &str) -> String {
    match (line.find('>'), line.rfind('<')) {
        (Some(open), Some(close)) if open < close => {
            format!("{}{}{}", &line[..=open], content, &line[close..])
        }
        _ => line.to_string(),
    }
}

/// Split a line into its body and its line ending (`"\n"`, `"\r\n"` or `""`)
pub fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(line: &str) -> LineKind<'_> {
        FieldRecognizer::new().classify(line, false)
    }

    #[test]
    fn test_definition_source() {
        assert_eq!(
            classify(r#"      <column name="definition">launcher</column>"#),
            LineKind::DefinitionSource("launcher")
        );
    }

    #[test]
    fn test_empty_definition_source() {
        assert_eq!(
            classify(r#"<column name="definition"></column>"#),
            LineKind::DefinitionSource("")
        );
    }

    #[test]
    fn test_definition_directive() {
        assert_eq!(
            classify(r#"<column name="definition_de">TRANSLATE</column>"#),
            LineKind::DefinitionDirective {
                language: "de",
                override_text: None
            }
        );
    }

    #[test]
    fn test_definition_directive_with_override() {
        assert_eq!(
            classify(r#"<column name="definition_zh_HK">TRANSLATE: rocket launcher</column>"#),
            LineKind::DefinitionDirective {
                language: "zh_HK",
                override_text: Some("rocket launcher")
            }
        );
    }

    #[test]
    fn test_definition_directive_with_blank_override() {
        assert_eq!(
            classify(r#"<column name="definition_fr">TRANSLATE: </column>"#),
            LineKind::DefinitionDirective {
                language: "fr",
                override_text: None
            }
        );
    }

    #[test]
    fn test_translated_definition_is_plain() {
        assert_eq!(
            classify(r#"<column name="definition_de">Werfer [AUTOTRANSLATED]</column>"#),
            LineKind::Plain
        );
    }

    #[test]
    fn test_part_of_speech_splits_on_last_colon() {
        assert_eq!(
            classify(r#"<column name="part_of_speech">v:t_c,klcp1</column>"#),
            LineKind::PartOfSpeech {
                category: "v",
                attrs: "t_c,klcp1"
            }
        );
    }

    #[test]
    fn test_part_of_speech_without_attrs_is_plain() {
        assert_eq!(
            classify(r#"<column name="part_of_speech">n</column>"#),
            LineKind::Plain
        );
    }

    #[test]
    fn test_single_line_notes() {
        assert_eq!(
            classify(r#"<column name="notes">See {Qapla':n}.</column>"#),
            LineKind::NotesEnd("See {Qapla':n}.")
        );
    }

    #[test]
    fn test_empty_notes() {
        assert_eq!(
            classify(r#"<column name="notes"></column>"#),
            LineKind::NotesEnd("")
        );
    }

    #[test]
    fn test_hidden_notes_are_not_notes() {
        assert_eq!(
            classify(r#"<column name="hidden_notes">internal</column>"#),
            LineKind::Plain
        );
    }

    #[test]
    fn test_multiline_notes_start() {
        assert_eq!(
            classify(r#"<column name="notes">part one"#),
            LineKind::NotesStart("part one")
        );
    }

    #[test]
    fn test_continuation_while_accumulating() {
        let mut recognizer = FieldRecognizer::new();
        assert_eq!(
            recognizer.classify("part two", true),
            LineKind::NotesContinue("part two")
        );
        assert_eq!(
            recognizer.classify("part three</column>", true),
            LineKind::NotesEnd("part three")
        );
    }

    #[test]
    fn test_continuation_is_never_reclassified() {
        let mut recognizer = FieldRecognizer::new();
        assert_eq!(
            recognizer.classify(r#"<column name="definition">x</column>"#, true),
            LineKind::NotesEnd(r#"<column name="definition">x"#)
        );
    }

    #[test]
    fn test_notes_directive() {
        assert_eq!(
            classify(r#"<column name="notes_sv">TRANSLATE</column>"#),
            LineKind::NotesDirective { language: "sv" }
        );
    }

    #[test]
    fn test_notes_directive_ignores_override() {
        assert_eq!(
            classify(r#"<column name="notes_sv">TRANSLATE: text</column>"#),
            LineKind::Plain
        );
    }

    #[test]
    fn test_comment_block_suppresses_fields() {
        let mut recognizer = FieldRecognizer::new();
        assert_eq!(recognizer.classify("<!-- Start of comment", false), LineKind::Comment);
        assert!(recognizer.in_comment());
        assert_eq!(
            recognizer.classify(r#"<column name="definition_de">TRANSLATE</column>"#, false),
            LineKind::Comment
        );
        assert_eq!(recognizer.classify("end of comment -->", false), LineKind::Comment);
        assert!(!recognizer.in_comment());
        assert_eq!(
            recognizer.classify(r#"<column name="definition">x</column>"#, false),
            LineKind::DefinitionSource("x")
        );
    }

    #[test]
    fn test_single_line_comment() {
        let mut recognizer = FieldRecognizer::new();
        assert_eq!(
            recognizer.classify("<!-- ERROR: Missing definition. -->", false),
            LineKind::Comment
        );
        assert!(!recognizer.in_comment());
    }

    #[test]
    fn test_replace_content() {
        assert_eq!(
            replace_content(r#"  <column name="definition_de">TRANSLATE</column>"#, "Werfer"),
            r#"  <column name="definition_de">Werfer</column>"#
        );
    }

    #[test]
    fn test_replace_content_keeps_inner_markup_span() {
        assert_eq!(
            replace_content("<a>x<b>y</b></a>", "z"),
            "<a>z</a>"
        );
    }

    #[test]
    fn test_replace_content_without_tags() {
        assert_eq!(replace_content("no tags here", "z"), "no tags here");
    }

    #[test]
    fn test_split_line_ending() {
        assert_eq!(split_line_ending("a\n"), ("a", "\n"));
        assert_eq!(split_line_ending("a\r\n"), ("a", "\r\n"));
        assert_eq!(split_line_ending("a"), ("a", ""));
    }
}
