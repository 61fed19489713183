//! Recursive-descent helper over a header field token stream.

use crate::error::{Error, Result};
use crate::lexer::{Special, Token};

/// Cursor over a fixed token list.
///
/// Each `expect_*` call either consumes one token or fails and leaves the
/// cursor untouched.
#[derive(Debug)]
pub struct TokenProcessor<'a> {
    tokens: Vec<Token<'a>>,
    cursor: usize,
}

impl<'a> TokenProcessor<'a> {
    /// Creates a processor positioned at the first token.
    #[must_use]
    pub const fn new(tokens: Vec<Token<'a>>) -> Self {
        Self { tokens, cursor: 0 }
    }

    /// Returns true if all tokens have been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn with_next<T>(&mut self, probe: impl FnOnce(&Token<'a>) -> Result<T>) -> Result<T> {
        let token = self.tokens.get(self.cursor).ok_or(Error::NoMoreTokens)?;
        let value = probe(token)?;
        self.cursor += 1;
        Ok(value)
    }

    /// Consumes an atom.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToken`] if the next token is not an atom.
    pub fn expect_token(&mut self) -> Result<&'a str> {
        self.with_next(|token| match *token {
            Token::Atom(value) => Ok(value),
            _ => Err(Error::InvalidToken),
        })
    }

    /// Consumes a quoted string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQuotedString`] if the next token is not a
    /// quoted string.
    pub fn expect_quoted_string(&mut self) -> Result<&'a str> {
        self.with_next(|token| match *token {
            Token::QuotedString(value) => Ok(value),
            _ => Err(Error::InvalidQuotedString),
        })
    }

    /// Consumes the given special character.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpecial`] if the next token is anything else.
    pub fn expect_special(&mut self, special: Special) -> Result<()> {
        self.with_next(|token| match *token {
            Token::Special(value) if value == special => Ok(()),
            _ => Err(Error::InvalidSpecial(special.as_char())),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn test_expect_sequence() {
        let mut processor = TokenProcessor::new(tokenize("text/plain"));
        assert_eq!(processor.expect_token().unwrap(), "text");
        processor.expect_special(Special::Slash).unwrap();
        assert_eq!(processor.expect_token().unwrap(), "plain");
        assert!(processor.is_at_end());
    }

    #[test]
    fn test_failed_expect_does_not_advance() {
        let mut processor = TokenProcessor::new(tokenize("\"quoted\""));
        assert!(matches!(processor.expect_token(), Err(Error::InvalidToken)));
        assert_eq!(processor.expect_quoted_string().unwrap(), "quoted");
    }

    #[test]
    fn test_wrong_special() {
        let mut processor = TokenProcessor::new(tokenize(";"));
        assert!(matches!(
            processor.expect_special(Special::Slash),
            Err(Error::InvalidSpecial('/'))
        ));
        processor.expect_special(Special::Semicolon).unwrap();
    }

    #[test]
    fn test_no_more_tokens() {
        let mut processor = TokenProcessor::new(Vec::new());
        assert!(processor.is_at_end());
        assert!(matches!(processor.expect_token(), Err(Error::NoMoreTokens)));
    }
}
