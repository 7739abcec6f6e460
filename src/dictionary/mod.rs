//! Dictionary entry files
//!
//! A single pass over each `mem-*.xml` file, one line at a time:
//!
//! 1. **Line classification** - each line becomes a [`LineKind`]
//! 2. **Notes reassembly** - multiline `notes` values are buffered until `</column>`
//! 3. **Attribute ordering** - `part_of_speech` attributes are put in canonical order
//! 4. **Rewriter** - `definition_xx`/`notes_xx` directives are translated through the shield
//! 5. **Bracket validation** - every emitted data line is checked for balanced brackets
//!
//! Problems are written into the file itself as `<!-- ERROR: ... -->` comments.

pub mod attrs;
pub mod brackets;
pub mod context;
pub mod diagnostic;
pub mod languages;
pub mod line;
pub mod notes;
pub mod rewriter;


pub use attrs::{compare_attributes, order_part_of_speech, sort_attributes};
pub use brackets::is_balanced;
pub use context::{FileReport, ProcessingContext};
pub use diagnostic::Diagnostic;
pub use languages::{Language, LanguageMap};
pub use line::{FieldRecognizer, LineKind};
pub use notes::{NotesAccumulator, NotesState};
pub use rewriter::{AUTOTRANSLATED, Rewriter, RunSummary};
