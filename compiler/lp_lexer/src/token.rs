//! Token, token buffer, and narrowing token views.
//!
//! A [`TokenBuffer`] owns the source text and the tokens produced from it.
//! It is created once and shared behind an `Rc`; everything downstream
//! works with [`TokenSlice`] views that only narrow a `start..end` window,
//! so reading "from the front" never mutates shared token content.

use std::fmt;
use std::ops::Range;
use std::rc::Rc;

use crate::cursor::TokenCursor;
use crate::tokenizer::tokenize;

/// Lexical class of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A maximal run of `[A-Za-z0-9_]`, length >= 1.
    Word,
    /// Exactly one non-word character (punctuation, whitespace, newline).
    Symbol,
}

/// A token: a kind and a byte range into its buffer's source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    start: usize,
    end: usize,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        debug_assert!(start < end, "tokens are never empty");
        Token { kind, start, end }
    }

    /// Byte range of this token in the source it was produced from.
    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Slice this token's text out of `source`.
    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end]
    }
}

/// Source text together with its tokens.
#[derive(Debug)]
pub struct TokenBuffer {
    source: Box<str>,
    tokens: Vec<Token>,
}

impl TokenBuffer {
    /// Tokenize `source` into a new buffer.
    pub fn new(source: &str) -> Self {
        TokenBuffer {
            tokens: tokenize(source),
            source: source.into(),
        }
    }

    /// The full source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All tokens, in source order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// A contiguous window `start..end` of tokens in a shared [`TokenBuffer`].
///
/// Cloning is cheap (one `Rc` bump). Indices taken and returned by slice
/// methods are relative to the window start.
#[derive(Clone)]
pub struct TokenSlice {
    buffer: Rc<TokenBuffer>,
    start: usize,
    end: usize,
}

impl TokenSlice {
    /// Tokenize `source` and return a view over all of it.
    pub fn from_source(source: &str) -> Self {
        let buffer = Rc::new(TokenBuffer::new(source));
        let end = buffer.tokens.len();
        TokenSlice {
            buffer,
            start: 0,
            end,
        }
    }

    /// Number of tokens in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The token at relative index `index`.
    #[inline]
    pub fn token(&self, index: usize) -> Option<Token> {
        if index < self.len() {
            Some(self.buffer.tokens[self.start + index])
        } else {
            None
        }
    }

    /// Text of the token at relative index `index`.
    #[inline]
    pub fn token_text(&self, index: usize) -> Option<&str> {
        self.token(index).map(|t| t.text(&self.buffer.source))
    }

    /// Text of the whole window (empty string for an empty window).
    ///
    /// Tokens are lossless and contiguous, so this is a single substring
    /// of the source.
    pub fn text(&self) -> &str {
        match (self.token(0), self.len().checked_sub(1).and_then(|i| self.token(i))) {
            (Some(first), Some(last)) => &self.buffer.source[first.start..last.end],
            _ => "",
        }
    }

    /// Narrow to the relative token range `start..end` (clamped).
    pub fn slice(&self, start: usize, end: usize) -> TokenSlice {
        let end = end.min(self.len());
        let start = start.min(end);
        TokenSlice {
            buffer: Rc::clone(&self.buffer),
            start: self.start + start,
            end: self.start + end,
        }
    }

    /// Drop `open` tokens from the front and `close` tokens from the back.
    ///
    /// Used to peel the delimiters off a block span.
    pub fn shrink(&self, open: usize, close: usize) -> TokenSlice {
        self.slice(open, self.len().saturating_sub(close))
    }

    /// Returns `true` if the window is exactly one word token.
    pub fn is_single_word(&self) -> bool {
        self.len() == 1 && self.token(0).is_some_and(|t| t.kind == TokenKind::Word)
    }

    /// Iterate over the text of each token in the window.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.buffer.tokens[self.start..self.end]
            .iter()
            .map(|t| t.text(&self.buffer.source))
    }

    /// A cursor positioned at the start of this window.
    pub fn cursor(&self) -> TokenCursor {
        TokenCursor::new(self.clone())
    }
}

impl fmt::Debug for TokenSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSlice")
            .field("range", &(self.start..self.end))
            .field("text", &self.text())
            .finish()
    }
}

impl fmt::Display for TokenSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
