//! Delimiter matcher.
//!
//! Recognizes "blocks": bracket pairs and quoted strings, found by a
//! generic scan with an explicit stack of expected closers. Nesting is
//! LIFO across heterogeneous delimiters, so `{ ( ) }` and `'{"x"}'` both
//! resolve to their outermost pair.
//!
//! Quote tokens close themselves. Triple quotes (`'''`, `"""`) are three
//! consecutive quote tokens; their contents are opaque, so a triple-quoted
//! block ends at the first matching triple regardless of what it contains.

use std::fmt;

use smallvec::SmallVec;

use crate::token::TokenSlice;

/// Maximum characters of source shown in an unterminated-block snippet.
const SNIPPET_LEN: usize = 24;

/// A recognized opening/closing delimiter pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `{ }`
    Brace,
    /// `[ ]`
    Bracket,
    /// `( )`
    Paren,
    /// `' '`
    Single,
    /// `" "`
    Double,
    /// `''' '''`
    TripleSingle,
    /// `""" """`
    TripleDouble,
}

impl Delimiter {
    /// Opening text.
    pub fn open(self) -> &'static str {
        match self {
            Delimiter::Brace => "{",
            Delimiter::Bracket => "[",
            Delimiter::Paren => "(",
            Delimiter::Single => "'",
            Delimiter::Double => "\"",
            Delimiter::TripleSingle => "'''",
            Delimiter::TripleDouble => "\"\"\"",
        }
    }

    /// Closing text.
    pub fn close(self) -> &'static str {
        match self {
            Delimiter::Brace => "}",
            Delimiter::Bracket => "]",
            Delimiter::Paren => ")",
            quote => quote.open(),
        }
    }

    /// Number of tokens the opener (and the closer) occupies.
    pub fn width(self) -> usize {
        match self {
            Delimiter::TripleSingle | Delimiter::TripleDouble => 3,
            _ => 1,
        }
    }

    /// Returns `true` for the quote forms.
    pub fn is_quote(self) -> bool {
        matches!(
            self,
            Delimiter::Single | Delimiter::Double | Delimiter::TripleSingle | Delimiter::TripleDouble
        )
    }

    fn is_triple(self) -> bool {
        self.width() == 3
    }

    /// Detect an opener at relative token index `index` of `slice`.
    ///
    /// Triple quotes win over single quotes.
    pub fn opening_at(slice: &TokenSlice, index: usize) -> Option<Delimiter> {
        let single = match slice.token_text(index)? {
            "{" => return Some(Delimiter::Brace),
            "[" => return Some(Delimiter::Bracket),
            "(" => return Some(Delimiter::Paren),
            "'" => Delimiter::Single,
            "\"" => Delimiter::Double,
            _ => return None,
        };
        let triple = match single {
            Delimiter::Single => Delimiter::TripleSingle,
            _ => Delimiter::TripleDouble,
        };
        if Self::repeats(slice, index, single.open(), 3) {
            Some(triple)
        } else {
            Some(single)
        }
    }

    /// Detect the quote delimiter wrapping `text`, if `text` is a complete
    /// quoted string. Returns the delimiter and the contents between.
    pub fn split_quoted(text: &str) -> Option<(Delimiter, &str)> {
        let delimiter = [
            Delimiter::TripleSingle,
            Delimiter::TripleDouble,
            Delimiter::Single,
            Delimiter::Double,
        ]
        .into_iter()
        .find(|d| {
            let marker = d.open();
            text.len() >= 2 * marker.len() && text.starts_with(marker) && text.ends_with(marker)
        })?;
        let width = delimiter.open().len();
        Some((delimiter, &text[width..text.len() - width]))
    }

    fn closes_at(self, slice: &TokenSlice, index: usize) -> bool {
        Self::repeats(slice, index, self.close(), self.width())
    }

    /// `count` consecutive tokens starting at `index` all have text `text`
    /// (for triple forms `text` is the full triple, so compare per char).
    fn repeats(slice: &TokenSlice, index: usize, text: &str, count: usize) -> bool {
        let unit = if count == 1 { text } else { &text[..1] };
        (0..count).all(|offset| slice.token_text(index + offset) == Some(unit))
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.open())
    }
}

/// Failure to match a block.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BlockError {
    /// End of input reached with a delimiter still open.
    #[error("unterminated block: `{delimiter}` opened at byte {offset} is never closed (near `{snippet}`)")]
    Unterminated {
        /// The innermost delimiter still open at end of input.
        delimiter: Delimiter,
        /// Byte offset of that delimiter in the source.
        offset: usize,
        /// Source text starting at the opener, truncated.
        snippet: String,
    },
}

/// Find the end of the block opened at relative index `start`.
///
/// Returns `Ok(None)` if the token at `start` is not an opener (the caller
/// treats it as a single unit), or `Ok(Some(end))` where `end` is one past
/// the matching closer.
pub fn match_block(slice: &TokenSlice, start: usize) -> Result<Option<usize>, BlockError> {
    let Some(open) = Delimiter::opening_at(slice, start) else {
        return Ok(None);
    };

    // (expected delimiter, index of its opener)
    let mut expected: SmallVec<[(Delimiter, usize); 8]> = SmallVec::new();
    expected.push((open, start));
    let mut index = start + open.width();

    while index < slice.len() {
        let Some(&(top, _)) = expected.last() else {
            break;
        };
        if top.closes_at(slice, index) {
            index += top.width();
            expected.pop();
            if expected.is_empty() {
                return Ok(Some(index));
            }
            continue;
        }
        if !top.is_triple() {
            if let Some(nested) = Delimiter::opening_at(slice, index) {
                expected.push((nested, index));
                index += nested.width();
                continue;
            }
        }
        index += 1;
    }

    let (delimiter, opened_at) = expected.last().copied().unwrap_or((open, start));
    let rest = slice.slice(opened_at, slice.len());
    Err(BlockError::Unterminated {
        delimiter,
        offset: slice.token(opened_at).map_or(0, |t| t.span().start),
        snippet: rest.text().chars().take(SNIPPET_LEN).collect(),
    })
}
