//! `lp lex`: dump the token stream.

use std::fmt::Write;

use lp_lexer::{TokenBuffer, TokenKind};

use super::{read_file, CliError};

/// Token listing for the file at `path`.
pub fn lex_file(path: &str) -> Result<String, CliError> {
    Ok(format_tokens(&read_file(path)?))
}

/// One line per token: kind, byte range, and escaped text.
pub fn format_tokens(source: &str) -> String {
    let buffer = TokenBuffer::new(source);
    let mut out = String::new();
    for token in buffer.tokens() {
        let kind = match token.kind {
            TokenKind::Word => "Word",
            TokenKind::Symbol => "Symbol",
        };
        let span = token.span();
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{kind:<6} {}..{} {:?}",
            span.start,
            span.end,
            token.text(buffer.source())
        );
    }
    out
}
