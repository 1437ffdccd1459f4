//! Parser snapshots for backtracking.
//!
//! A rule that fails with [`NoMatch`](crate::ParseOutcome::NoMatch) must
//! leave the cursor where it found it. Rules with several tokens of
//! lookahead take a snapshot first and restore it on failure; `one_of!`
//! does the same between alternatives.

/// A snapshot of parser state.
///
/// The parser builds nodes only after a rule succeeds, so the cursor
/// position is the only state to capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserSnapshot {
    /// Position in the token stream.
    pub(crate) cursor_pos: usize,
}

impl ParserSnapshot {
    #[inline]
    pub(crate) fn new(cursor_pos: usize) -> Self {
        Self { cursor_pos }
    }

    /// Position the snapshot was taken at.
    pub fn position(self) -> usize {
        self.cursor_pos
    }
}
