//! Token cursor for navigating a command.
//!
//! Provides token access, lookahead and consumption over a slice of
//! whitespace-separated tokens.

/// Cursor over the tokens of one command.
///
/// Unlike a source-file token stream there is no trailing EOF token;
/// [`Cursor::current`] returns `None` once every token is consumed.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    tokens: &'a [String],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the first token.
    pub fn new(tokens: &'a [String]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// Get the total number of tokens in the command.
    #[inline]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Get the current position in the token stream.
    ///
    /// Used for progress tracking and for the consumed-token count reported
    /// by the entry points.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the cursor position directly.
    ///
    /// Used by `Parser::restore()` to roll back after a failed alternative.
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(
            pos <= self.tokens.len(),
            "cursor position {} out of bounds (max {})",
            pos,
            self.tokens.len()
        );
        self.pos = pos;
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// The current token, if any.
    #[inline]
    pub fn current(&self) -> Option<&'a str> {
        self.token_at(self.pos)
    }

    /// The token at `pos`, if any.
    #[inline]
    pub fn token_at(&self, pos: usize) -> Option<&'a str> {
        self.tokens.get(pos).map(String::as_str)
    }

    /// Check whether the current token is exactly `keyword`.
    #[inline]
    pub fn check(&self, keyword: &str) -> bool {
        self.current() == Some(keyword)
    }

    /// Consume and return the current token.
    pub fn advance(&mut self) -> Option<&'a str> {
        let token = self.current()?;
        self.pos += 1;
        Some(token)
    }

    /// Consume the current token if it is exactly `keyword`.
    pub fn eat(&mut self, keyword: &str) -> bool {
        let matched = self.check(keyword);
        if matched {
            self.pos += 1;
        }
        matched
    }

    /// Tokens consumed since `start`.
    pub fn consumed_since(&self, start: usize) -> &'a [String] {
        &self.tokens[start.min(self.pos)..self.pos]
    }
}
