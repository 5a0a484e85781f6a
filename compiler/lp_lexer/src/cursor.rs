//! Next-value extraction over a token window.
//!
//! [`TokenCursor`] is the only way the evaluator reads tokens. "Consuming"
//! a value advances an index; the underlying tokens are never touched, and
//! a cursor can be cloned for lookahead and simply dropped if the
//! lookahead doesn't pan out.

use crate::block::{match_block, BlockError};
use crate::token::TokenSlice;

/// Returns `true` for layout tokens skipped before every value.
#[inline]
pub fn is_trivia(text: &str) -> bool {
    matches!(text, " " | "\t" | "\r" | "\n")
}

/// A read position within a [`TokenSlice`].
#[derive(Clone, Debug)]
pub struct TokenCursor {
    slice: TokenSlice,
    pos: usize,
}

impl TokenCursor {
    /// Create a cursor at the start of `slice`.
    pub fn new(slice: TokenSlice) -> Self {
        TokenCursor { slice, pos: 0 }
    }

    /// Current position, relative to the start of the window.
    #[cfg(test)]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns `true` when no tokens remain (layout included).
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.slice.len()
    }

    /// The unread remainder of the window.
    #[cfg(test)]
    pub fn remaining(&self) -> TokenSlice {
        self.slice.slice(self.pos, self.slice.len())
    }

    /// Advance past any layout tokens.
    pub fn skip_trivia(&mut self) {
        while self.slice.token_text(self.pos).is_some_and(is_trivia) {
            self.pos += 1;
        }
    }

    /// Text of the next non-layout token, without consuming anything.
    pub fn peek(&self) -> Option<&str> {
        let mut index = self.pos;
        while let Some(text) = self.slice.token_text(index) {
            if !is_trivia(text) {
                return Some(text);
            }
            index += 1;
        }
        None
    }

    /// Consume the next non-layout token as a one-token span, ignoring
    /// any block it might open.
    pub fn next_token(&mut self) -> Option<TokenSlice> {
        self.skip_trivia();
        if self.is_exhausted() {
            return None;
        }
        let span = self.slice.slice(self.pos, self.pos + 1);
        self.pos += 1;
        Some(span)
    }

    /// Consume the next logical value.
    ///
    /// Skips layout, then returns either the single next token or, if that
    /// token opens a block, the whole block span including its delimiters
    /// (a quoted string is one opaque unit; callers peel bracket delimiters
    /// themselves when they want the contents). Returns `Ok(None)` only
    /// when the window is exhausted.
    pub fn next_value(&mut self) -> Result<Option<TokenSlice>, BlockError> {
        self.skip_trivia();
        if self.is_exhausted() {
            return Ok(None);
        }
        let end = match_block(&self.slice, self.pos)?.unwrap_or(self.pos + 1);
        let span = self.slice.slice(self.pos, end);
        self.pos = end;
        Ok(Some(span))
    }
}
