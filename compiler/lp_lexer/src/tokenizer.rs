//! Character-class tokenizer.
//!
//! Single left-to-right pass, no backtracking, never fails. There is no
//! escape processing and no comment syntax: quoting is recognized later by
//! the delimiter matcher, not here.

use crate::token::{Token, TokenKind};

/// Returns `true` if `c` extends a word token (`[A-Za-z0-9_]`).
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split `text` into tokens.
///
/// Concatenating the text of every returned token reproduces `text`
/// exactly. Non-ASCII characters are symbols, one token per `char`.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (offset, c) in text.char_indices() {
        if is_word_char(c) {
            if word_start.is_none() {
                word_start = Some(offset);
            }
            continue;
        }
        if let Some(start) = word_start.take() {
            tokens.push(Token::new(TokenKind::Word, start, offset));
        }
        tokens.push(Token::new(TokenKind::Symbol, offset, offset + c.len_utf8()));
    }

    if let Some(start) = word_start {
        tokens.push(Token::new(TokenKind::Word, start, text.len()));
    }

    tokens
}

#[cfg(test)]
mod tests;
