//! Header field lexer.
//!
//! Splits one unfolded field body, such as the value of a `Content-Type`
//! field, into quoted strings, atoms and special characters. Lexing never
//! fails: it stops at the first character that starts none of the three
//! token kinds, and grammar errors are left to the
//! [`TokenProcessor`](crate::processor::TokenProcessor).

mod token;

pub use token::{Special, Token};

use crate::scanner::Scanner;

/// Characters that may not appear inside a quoted string.
const fn is_invalid_qtext(c: char) -> bool {
    c == '"' || c == '\\'
}

/// Header field lexer state.
#[derive(Debug)]
pub struct Lexer<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given field body.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            scanner: Scanner::new(input, Special::CHARS),
        }
    }

    /// Reads the next token, or `None` once nothing more can be lexed.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        self.scanner.trim_whitespace();

        if let Some(text) = self.scanner.scan_text_enclosed('"', '"', is_invalid_qtext) {
            return Some(Token::QuotedString(text));
        }
        if let Some(atom) = self.scanner.scan_atom() {
            return Some(Token::Atom(atom));
        }
        self.scanner
            .scan_special()
            .and_then(Special::from_char)
            .map(Token::Special)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Lexes a whole field body.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_tokens() {
        let tokens = tokenize("text/plain; charset=\"us-ascii\"");
        assert_eq!(
            tokens,
            vec![
                Token::Atom("text"),
                Token::Special(Special::Slash),
                Token::Atom("plain"),
                Token::Special(Special::Semicolon),
                Token::Atom("charset"),
                Token::Special(Special::Equals),
                Token::QuotedString("us-ascii"),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_quoted_string_keeps_specials() {
        let tokens = tokenize("boundary=\"----=_Part_1?x\"");
        assert_eq!(tokens[2], Token::QuotedString("----=_Part_1?x"));
    }

    #[test]
    fn test_unterminated_quote_lexes_as_special() {
        let tokens = tokenize("\"abc");
        assert_eq!(
            tokens,
            vec![Token::Special(Special::Quote), Token::Atom("abc")]
        );
    }

    #[test]
    fn test_stops_at_control_character() {
        let tokens = tokenize("a\u{1}b");
        assert_eq!(tokens, vec![Token::Atom("a")]);
    }

    #[test]
    fn test_special_round_trip() {
        for &c in Special::CHARS {
            assert_eq!(Special::from_char(c).unwrap().as_char(), c);
        }
        assert_eq!(Special::from_char('a'), None);
    }
}
