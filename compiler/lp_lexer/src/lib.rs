//! Low-level lexing for languageplay.
//!
//! The language has no formal grammar. Source text is split by character
//! class alone, and structure is recovered later by matching delimiters:
//!
//! - [`tokenize`]: maximal `[A-Za-z0-9_]` runs become one word token; every
//!   other character becomes its own one-character symbol token.
//! - [`match_block`]: given a position at an opener (`{`, `[`, `(`, quotes,
//!   triple quotes), finds the index one past its matching closer.
//! - [`TokenCursor::next_value`]: skips layout tokens and returns the next
//!   logical unit, either one token or one whole delimited block.
//!
//! Tokens are never mutated after tokenizing. Consumers read the stream
//! through a [`TokenCursor`] over a [`TokenSlice`], a cheap narrowing view
//! onto a shared [`TokenBuffer`].
//!
//! # Standalone
//!
//! This crate has no `lp_*` dependencies so that tools (highlighters,
//! formatters) can depend on it without pulling in the evaluator.

mod block;
mod cursor;
mod token;
mod tokenizer;

pub use block::{match_block, BlockError, Delimiter};
pub use cursor::{is_trivia, TokenCursor};
pub use token::{Token, TokenBuffer, TokenKind, TokenSlice};
pub use tokenizer::{is_word_char, tokenize};
