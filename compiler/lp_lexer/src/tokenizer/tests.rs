use super::*;
use pretty_assertions::assert_eq;

fn texts(source: &str) -> Vec<&str> {
    tokenize(source).iter().map(|t| t.text(source)).collect()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).iter().map(|t| t.kind).collect()
}

// === Classification ===

#[test]
fn word_chars_are_ascii_alnum_and_underscore() {
    for c in ['a', 'Z', '0', '9', '_'] {
        assert!(is_word_char(c), "{c:?} should be a word char");
    }
    for c in [' ', '\n', '{', '\'', '-', '[', '^', '`', 'é'] {
        assert!(!is_word_char(c), "{c:?} should not be a word char");
    }
}

// === Splitting ===

#[test]
fn empty_source_has_no_tokens() {
    assert!(tokenize("").is_empty());
}

#[test]
fn words_are_maximal_runs() {
    assert_eq!(texts("test_value1"), vec!["test_value1"]);
    assert_eq!(kinds("test_value1"), vec![TokenKind::Word]);
}

#[test]
fn every_symbol_is_its_own_token() {
    assert_eq!(texts("x = 1"), vec!["x", " ", "=", " ", "1"]);
    assert_eq!(
        kinds("x = 1"),
        vec![
            TokenKind::Word,
            TokenKind::Symbol,
            TokenKind::Symbol,
            TokenKind::Symbol,
            TokenKind::Word,
        ]
    );
}

#[test]
fn repeated_symbols_are_not_merged() {
    assert_eq!(texts("'''"), vec!["'", "'", "'"]);
    assert_eq!(texts("\n\n"), vec!["\n", "\n"]);
}

#[test]
fn function_header_tokens() {
    assert_eq!(
        texts("def add(x y){print x}"),
        vec!["def", " ", "add", "(", "x", " ", "y", ")", "{", "print", " ", "x", "}"]
    );
}

#[test]
fn multibyte_chars_are_single_symbols() {
    assert_eq!(texts("aé→b"), vec!["a", "é", "→", "b"]);
    assert_eq!(
        kinds("aé→b"),
        vec![TokenKind::Word, TokenKind::Symbol, TokenKind::Symbol, TokenKind::Word]
    );
}

#[test]
fn trailing_word_is_emitted() {
    assert_eq!(texts("print greeting"), vec!["print", " ", "greeting"]);
}

// === Property tests ===

mod proptest_tokenize {
    use super::super::{is_word_char, tokenize};
    use crate::TokenKind;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn concatenation_reproduces_input(source in any::<String>()) {
            let joined: String = tokenize(&source).iter().map(|t| t.text(&source)).collect();
            prop_assert_eq!(joined, source);
        }

        #[test]
        fn concatenation_reproduces_program_like_input(
            source in "[a-z0-9_ {}()\\[\\]'\"+=\n]{0,64}"
        ) {
            let joined: String = tokenize(&source).iter().map(|t| t.text(&source)).collect();
            prop_assert_eq!(joined, source);
        }

        #[test]
        fn words_never_touch(source in "[a-z0-9_ ;+]{0,64}") {
            let tokens = tokenize(&source);
            for pair in tokens.windows(2) {
                prop_assert!(
                    !(pair[0].kind == TokenKind::Word && pair[1].kind == TokenKind::Word),
                    "adjacent word tokens in {:?}",
                    source
                );
            }
            for token in &tokens {
                let text = token.text(&source);
                match token.kind {
                    TokenKind::Word => prop_assert!(text.chars().all(is_word_char)),
                    TokenKind::Symbol => prop_assert_eq!(text.chars().count(), 1),
                }
            }
        }
    }
}
