//! Per-file state of a rewrite pass

use crate::dictionary::diagnostic::Diagnostic;
use crate::dictionary::line::{FieldRecognizer, LineKind};
use crate::dictionary::notes::NotesAccumulator;

/// Counters for one rewritten file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    /// Diagnostics written into the file
    pub errors: usize,
    /// Directives replaced by a machine translation
    pub translated: usize,
    /// Directives copied through verbatim without calling the provider
    pub verbatim: usize,
    /// Directives left in place after a provider failure
    pub retried: usize,
    /// The file ended inside a multiline notes value
    pub unterminated_notes: bool,
}

/// Everything that lives for exactly one pass over one file
///
/// The English definition and notes of the entry being read stay here until
/// the next `definition` or `notes` line replaces them, so that the
/// `definition_xx`/`notes_xx` directives further down the entry can use them.
#[derive(Debug, Default)]
pub struct ProcessingContext {
    recognizer: FieldRecognizer,
    notes: NotesAccumulator,
    definition: String,
    notes_value: String,
    output: String,
    report: FileReport,
}

impl ProcessingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify<'a>(&mut self, line: &'a str) -> LineKind<'a> {
        let accumulating = self.notes.is_accumulating();
        self.recognizer.classify(line, accumulating)
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn set_definition(&mut self, definition: &str) {
        self.definition = definition.to_string();
    }

    /// The last completed notes value; empty while a multiline value is open
    pub fn notes(&self) -> &str {
        &self.notes_value
    }

    pub fn append_notes(&mut self, content: &str) {
        self.notes_value.clear();
        self.notes.append(content);
    }

    pub fn complete_notes(&mut self, content: &str) {
        self.notes_value = self.notes.complete(content);
    }

    /// Count a diagnostic and write its comment
    ///
    /// A comment an earlier run already left directly above the line is not
    /// written a second time.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        let comment = diagnostic.to_comment();
        if !self.already_reported(&comment) {
            self.output.push_str(&comment);
            self.output.push('\n');
        }
        self.report.errors += 1;
    }

    /// Whether `comment` is among the diagnostic comments that end the output
    fn already_reported(&self, comment: &str) -> bool {
        self.output
            .lines()
            .rev()
            .map(str::trim)
            .take_while(|line| line.starts_with(Diagnostic::COMMENT_PREFIX))
            .any(|line| line == comment)
    }

    pub fn record_translated(&mut self) {
        self.report.translated += 1;
    }

    pub fn record_verbatim(&mut self) {
        self.report.verbatim += 1;
    }

    pub fn record_retry(&mut self) {
        self.report.retried += 1;
    }

    pub fn emit(&mut self, body: &str, line_ending: &str) {
        self.output.push_str(body);
        self.output.push_str(line_ending);
    }

    pub fn errors(&self) -> usize {
        self.report.errors
    }

    /// Close the pass and hand back the rewritten text
    pub fn finish(mut self) -> (String, FileReport) {
        self.report.unterminated_notes = self.notes.abandon().is_some();
        (self.output, self.report)
    }
}
