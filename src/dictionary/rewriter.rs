//! Translation orchestration over whole entry files
//!
//! # Example
//!
//! ```ignore
//! use mem_translate::dictionary::{LanguageMap, Rewriter};
//! use mem_translate::mt::GoogleTranslateProvider;
//!
//! let provider = GoogleTranslateProvider::from_env()?;
//! let mut rewriter = Rewriter::new(Box::new(provider), LanguageMap::default());
//! let report = rewriter.rewrite_file(Path::new("mem-01-b.xml")).await?;
//! ```

use crate::dictionary::attrs::order_part_of_speech;
use crate::dictionary::brackets::is_balanced;
use crate::dictionary::context::{FileReport, ProcessingContext};
use crate::dictionary::diagnostic::Diagnostic;
use crate::dictionary::languages::LanguageMap;
use crate::dictionary::line::{LineKind, replace_content, split_line_ending};
use crate::error::{Error, Result};
use crate::mt::shield::{is_verbatim, shield};
use crate::mt::{MachineTranslator, MtError, ProviderOutcome, Throttle};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

/// Suffix marking a translation as machine-made and not yet reviewed
pub const AUTOTRANSLATED: &str = "[AUTOTRANSLATED]";

/// Totals over every file of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub files: usize,
    pub failed_files: Vec<PathBuf>,
    pub errors: usize,
    pub translated: usize,
    pub verbatim: usize,
    pub retried: usize,
    /// Set when the provider failed in a way no retry can fix
    pub provider_failure: Option<MtError>,
}

impl RunSummary {
    pub fn add(&mut self, report: &FileReport) {
        self.files += 1;
        self.errors += report.errors;
        self.translated += report.translated;
        self.verbatim += report.verbatim;
        self.retried += report.retried;
    }

    pub fn is_success(&self) -> bool {
        self.failed_files.is_empty() && self.provider_failure.is_none()
    }
}

/// Rewrites entry files, translating every directive it finds
pub struct Rewriter {
    translator: Box<dyn MachineTranslator>,
    languages: LanguageMap,
    throttle: Throttle,
    source_language: String,
    dry_run: bool,
    provider_failure: Option<MtError>,
}

impl Rewriter {
    pub fn new(translator: Box<dyn MachineTranslator>, languages: LanguageMap) -> Self {
        Rewriter {
            translator,
            languages,
            throttle: Throttle::default(),
            source_language: "en".to_string(),
            dry_run: false,
            provider_failure: None,
        }
    }

    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn with_source_language(mut self, source_language: &str) -> Self {
        self.source_language = source_language.to_string();
        self
    }

    /// Rewrite in memory only; files on disk are left untouched
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn provider_failure(&self) -> Option<&MtError> {
        self.provider_failure.as_ref()
    }

    /// Rewrite every file in order; a file that cannot be read or replaced is
    /// logged and skipped
    pub async fn rewrite_files(&mut self, files: &[PathBuf]) -> RunSummary {
        let mut summary = RunSummary::default();

        for path in files {
            info!("Translating file: {}", path.display());
            match self.rewrite_file(path).await {
                Ok(report) => {
                    debug!(
                        "{}: {} translated, {} verbatim, {} left for a later run, {} errors",
                        path.display(),
                        report.translated,
                        report.verbatim,
                        report.retried,
                        report.errors
                    );
                    summary.add(&report);
                }
                Err(e) => {
                    error!("Skipping file: {}", e);
                    summary.failed_files.push(path.clone());
                }
            }
        }

        summary.provider_failure = self.provider_failure.clone();
        summary
    }

    /// Rewrite one file through a temporary file in the same directory
    pub async fn rewrite_file(&mut self, path: &Path) -> Result<FileReport> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (output, report) = self.rewrite_text(&content).await;

        if report.unterminated_notes {
            warn!(
                "{}: file ends inside a multiline notes value",
                path.display()
            );
        }

        if self.dry_run {
            debug!("{}: dry run, not written", path.display());
        } else if output != content {
            write_atomically(path, &output)?;
        }

        Ok(report)
    }

    /// Rewrite the full text of one file
    pub async fn rewrite_text(&mut self, content: &str) -> (String, FileReport) {
        let mut ctx = ProcessingContext::new();
        for line in content.split_inclusive('\n') {
            self.rewrite_line(&mut ctx, line).await;
        }
        ctx.finish()
    }

    async fn rewrite_line(&mut self, ctx: &mut ProcessingContext, line: &str) {
        let (body, line_ending) = split_line_ending(line);

        let rewritten = match ctx.classify(body) {
            LineKind::Comment => {
                ctx.emit(body, line_ending);
                return;
            }
            LineKind::DefinitionSource(definition) => {
                if definition.is_empty() {
                    ctx.report(Diagnostic::MissingSourceValue);
                }
                ctx.set_definition(definition);
                None
            }
            LineKind::DefinitionDirective {
                language,
                override_text,
            } => {
                if ctx.definition().is_empty() {
                    None
                } else {
                    let source = override_text.unwrap_or(ctx.definition()).to_string();
                    self.resolve_directive(ctx, body, language, &source).await
                }
            }
            LineKind::PartOfSpeech { category, attrs } => {
                Some(replace_content(body, &order_part_of_speech(category, attrs)))
            }
            LineKind::NotesStart(content) | LineKind::NotesContinue(content) => {
                ctx.append_notes(content);
                None
            }
            LineKind::NotesEnd(content) => {
                ctx.complete_notes(content);
                None
            }
            LineKind::NotesDirective { language } => {
                if ctx.notes().is_empty() {
                    None
                } else {
                    let source = ctx.notes().to_string();
                    self.resolve_directive(ctx, body, language, &source).await
                }
            }
            LineKind::Plain => None,
        };

        let rewritten = rewritten.unwrap_or_else(|| body.to_string());
        if !is_balanced(&rewritten) {
            ctx.report(Diagnostic::UnbalancedBrackets);
        }
        ctx.emit(&rewritten, line_ending);
    }

    /// Translate `source` for the directive on `line`
    ///
    /// Returns the rewritten line, or `None` to leave the line (and with it the
    /// directive) as it is.
    async fn resolve_directive(
        &mut self,
        ctx: &mut ProcessingContext,
        line: &str,
        requested: &str,
        source: &str,
    ) -> Option<String> {
        let Some(language) = self.languages.resolve(requested).cloned() else {
            debug!("Skipping unsupported language '{}'", requested);
            return None;
        };

        if is_verbatim(source) {
            ctx.record_verbatim();
            return Some(replace_content(line, source));
        }

        if self.provider_failure.is_some() {
            ctx.record_retry();
            return None;
        }

        let shielded = shield(source);
        let result = self
            .translator
            .translate(
                &shielded.text,
                &self.source_language,
                &language.provider_code,
            )
            .await;
        self.throttle.pause().await;

        match ProviderOutcome::from(result) {
            ProviderOutcome::Translated(text) => {
                let restored = shielded.unshield(&language.post_process(&text));
                for index in &restored.missing {
                    ctx.report(Diagnostic::MissingProtectedToken(*index));
                }
                ctx.record_translated();
                debug!("[{}] {} → {}", language.code, source, restored.text);
                Some(replace_content(
                    line,
                    &format!("{} {}", restored.text, AUTOTRANSLATED),
                ))
            }
            ProviderOutcome::Retry(reason) => {
                warn!(
                    "[{}] translation of '{}' failed, leaving it for a later run: {}",
                    language.code, source, reason
                );
                ctx.record_retry();
                None
            }
            ProviderOutcome::Fatal(e) => {
                error!(
                    "{} is unusable, no further translations will be requested: {}",
                    self.translator.provider_name(),
                    e
                );
                ctx.record_retry();
                self.provider_failure = Some(e);
                None
            }
        }
    }
}

/// Replace `path` with `content` via a rename, so a crash never leaves a truncated file
fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let io_error = |source: std::io::Error| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
    file.write_all(content.as_bytes()).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;
    if let Ok(metadata) = fs::metadata(path) {
        file.as_file()
            .set_permissions(metadata.permissions())
            .map_err(io_error)?;
    }
    file.persist(path).map_err(|e| io_error(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::{MockMode, MockTranslator};

    fn rewriter(mock: &MockTranslator) -> Rewriter {
        Rewriter::new(Box::new(mock.clone()), LanguageMap::default())
            .with_throttle(Throttle::from_millis(0))
    }

    #[tokio::test]
    async fn test_definition_directive_translated() {
        let mock = MockTranslator::with_mappings([("launcher", "de", "Werfer")]);
        let input = "<column name=\"definition\">launcher</column>\n\
                     <column name=\"definition_de\">TRANSLATE</column>\n";
        let (output, report) = rewriter(&mock).rewrite_text(input).await;
        assert_eq!(
            output,
            "<column name=\"definition\">launcher</column>\n\
             <column name=\"definition_de\">Werfer [AUTOTRANSLATED]</column>\n"
        );
        assert_eq!(report.translated, 1);
        assert_eq!(report.errors, 0);
    }

    #[tokio::test]
    async fn test_failed_translation_keeps_directive() {
        let mock = MockTranslator::new(MockMode::Error("timeout".to_string()));
        let input = "<column name=\"definition\">launcher</column>\n\
                     <column name=\"definition_de\">TRANSLATE</column>\n";
        let (output, report) = rewriter(&mock).rewrite_text(input).await;
        assert_eq!(output, input);
        assert_eq!(report.retried, 1);
        assert_eq!(report.errors, 0);
    }

    #[tokio::test]
    async fn test_empty_translation_keeps_directive() {
        let mock = MockTranslator::new(MockMode::Empty);
        let input = "<column name=\"definition\">launcher</column>\n\
                     <column name=\"definition_fr\">TRANSLATE</column>\n";
        let (output, report) = rewriter(&mock).rewrite_text(input).await;
        assert_eq!(output, input);
        assert_eq!(report.retried, 1);
    }

    #[tokio::test]
    async fn test_override_used_for_one_directive_only() {
        let mock = MockTranslator::with_mappings([
            ("rocket launcher", "de", "Raketenwerfer"),
            ("launcher", "fr", "lanceur"),
        ]);
        let input = "<column name=\"definition\">launcher</column>\n\
                     <column name=\"definition_de\">TRANSLATE: rocket launcher</column>\n\
                     <column name=\"definition_fr\">TRANSLATE</column>\n";
        let (output, _) = rewriter(&mock).rewrite_text(input).await;
        assert_eq!(
            output,
            "<column name=\"definition\">launcher</column>\n\
             <column name=\"definition_de\">Raketenwerfer [AUTOTRANSLATED]</column>\n\
             <column name=\"definition_fr\">lanceur [AUTOTRANSLATED]</column>\n"
        );
    }

    #[tokio::test]
    async fn test_verbatim_definition_skips_provider() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let input = "<column name=\"definition\">{Qapla':n}</column>\n\
                     <column name=\"definition_de\">TRANSLATE</column>\n";
        let mut rewriter = rewriter(&mock);
        let (output, report) = rewriter.rewrite_text(input).await;
        assert_eq!(
            output,
            "<column name=\"definition\">{Qapla':n}</column>\n\
             <column name=\"definition_de\">{Qapla':n}</column>\n"
        );
        assert_eq!(mock.call_count(), 0);
        assert_eq!(report.verbatim, 1);
    }

    #[tokio::test]
    async fn test_missing_definition_reported() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let input = "<column name=\"definition\"></column>\n\
                     <column name=\"definition_de\">TRANSLATE</column>\n";
        let (output, report) = rewriter(&mock).rewrite_text(input).await;
        assert_eq!(
            output,
            "<!-- ERROR: Missing definition. -->\n\
             <column name=\"definition\"></column>\n\
             <column name=\"definition_de\">TRANSLATE</column>\n"
        );
        assert_eq!(report.errors, 1);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_language_skipped_silently() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let input = "<column name=\"definition\">launcher</column>\n\
                     <column name=\"definition_ja\">TRANSLATE</column>\n";
        let (output, report) = rewriter(&mock).rewrite_text(input).await;
        assert_eq!(output, input);
        assert_eq!(report, FileReport::default());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_part_of_speech_sorted() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let input = "    <column name=\"part_of_speech\">v:klcp1,t_c,2</column>\n";
        let (output, _) = rewriter(&mock).rewrite_text(input).await;
        assert_eq!(
            output,
            "    <column name=\"part_of_speech\">v:2,t_c,klcp1</column>\n"
        );
    }

    #[tokio::test]
    async fn test_unbalanced_line_reported() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let input = "<column name=\"notes\">See {Qapla':n.</column>\n";
        let (output, report) = rewriter(&mock).rewrite_text(input).await;
        assert_eq!(
            output,
            format!("<!-- ERROR: Mismatched brackets. -->\n{}", input)
        );
        assert_eq!(report.errors, 1);
    }

    #[tokio::test]
    async fn test_fatal_error_stops_provider_calls() {
        let mock = MockTranslator::new(MockMode::Fatal("key rejected".to_string()));
        let input = "<column name=\"definition\">launcher</column>\n\
                     <column name=\"definition_de\">TRANSLATE</column>\n\
                     <column name=\"definition_fr\">TRANSLATE</column>\n";
        let mut rewriter = rewriter(&mock);
        let (output, report) = rewriter.rewrite_text(input).await;
        assert_eq!(output, input);
        assert_eq!(mock.call_count(), 1);
        assert_eq!(report.retried, 2);
        assert!(matches!(
            rewriter.provider_failure(),
            Some(MtError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_throttle_applies_after_each_call() {
        let mock = MockTranslator::new(MockMode::Error("busy".to_string()));
        let input = "<column name=\"definition\">launcher</column>\n\
                     <column name=\"definition_de\">TRANSLATE</column>\n\
                     <column name=\"definition_fr\">TRANSLATE</column>\n";
        let mut rewriter = Rewriter::new(Box::new(mock.clone()), LanguageMap::default())
            .with_throttle(Throttle::from_millis(20));
        let start = std::time::Instant::now();
        rewriter.rewrite_text(input).await;
        assert_eq!(mock.call_count(), 2);
        assert!(start.elapsed() >= std::time::Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_crlf_line_endings_preserved() {
        let mock = MockTranslator::with_mappings([("launcher", "de", "Werfer")]);
        let input = "<column name=\"definition\">launcher</column>\r\n\
                     <column name=\"definition_de\">TRANSLATE</column>\r\n";
        let (output, _) = rewriter(&mock).rewrite_text(input).await;
        assert!(output.ends_with("Werfer [AUTOTRANSLATED]</column>\r\n"));
    }

    #[test]
    fn test_summary_accumulates() {
        let mut summary = RunSummary::default();
        summary.add(&FileReport {
            errors: 2,
            translated: 3,
            verbatim: 1,
            retried: 0,
            unterminated_notes: false,
        });
        summary.add(&FileReport {
            errors: 1,
            translated: 0,
            verbatim: 0,
            retried: 4,
            unterminated_notes: true,
        });
        assert_eq!(summary.files, 2);
        assert_eq!(summary.errors, 3);
        assert_eq!(summary.translated, 3);
        assert_eq!(summary.retried, 4);
        assert!(summary.is_success());

        summary.failed_files.push(PathBuf::from("mem-99.xml"));
        assert!(!summary.is_success());
    }
}
