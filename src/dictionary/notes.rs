//! Reassembly of notes values that span several physical lines
//!
//! ```text
//! <column name="notes">part one        Idle -> Accumulating
//! part two                             Accumulating -> Accumulating
//! part three</column>                  Accumulating -> Idle, yields the value
//! ```

/// State of the notes accumulator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NotesState {
    #[default]
    Idle,
    /// Text seen so far, each line followed by `\n`
    Accumulating(String),
}

/// Buffers one notes value at a time until its terminator is seen
#[derive(Debug, Default)]
pub struct NotesAccumulator {
    state: NotesState,
}

impl NotesAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NotesState {
        &self.state
    }

    pub fn is_accumulating(&self) -> bool {
        matches!(self.state, NotesState::Accumulating(_))
    }

    /// Add an unterminated line (the opening line or a continuation)
    pub fn append(&mut self, content: &str) {
        match &mut self.state {
            NotesState::Idle => self.state = NotesState::Accumulating(format!("{}\n", content)),
            NotesState::Accumulating(buffer) => {
                buffer.push_str(content);
                buffer.push('\n');
            }
        }
    }

    /// Add the terminating line and return the complete value
    ///
    /// From `Idle` this is a single-line value and `content` is returned as is.
    pub fn complete(&mut self, content: &str) -> String {
        match std::mem::take(&mut self.state) {
            NotesState::Idle => content.to_string(),
            NotesState::Accumulating(mut buffer) => {
                buffer.push_str(content);
                buffer
            }
        }
    }

    /// Drop an unterminated value, returning what had been buffered
    pub fn abandon(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            NotesState::Idle => None,
            NotesState::Accumulating(buffer) => Some(buffer),
        }
    }
}
