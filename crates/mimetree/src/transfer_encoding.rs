//! `Content-Transfer-Encoding` field (RFC 2045 §6).

use crate::error::Result;
use crate::lexer::tokenize;
use crate::processor::TokenProcessor;
use std::fmt;

/// Transfer encoding types.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentTransferEncoding {
    /// 7-bit ASCII.
    #[default]
    SevenBit,
    /// 8-bit text.
    EightBit,
    /// Binary (no encoding).
    Binary,
    /// Quoted-Printable encoding.
    QuotedPrintable,
    /// Base64 encoding.
    Base64,
    /// Unrecognized mechanism, as written. Cannot be decoded.
    Other(String),
}

impl ContentTransferEncoding {
    /// Classifies a mechanism name, ignoring case.
    #[must_use]
    pub fn from_mechanism(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "7bit" => Self::SevenBit,
            "8bit" => Self::EightBit,
            "binary" => Self::Binary,
            "quoted-printable" => Self::QuotedPrintable,
            "base64" => Self::Base64,
            _ => Self::Other(s.to_string()),
        }
    }

    /// Parses a `Content-Transfer-Encoding` field body.
    ///
    /// Unknown mechanisms are not an error; they map to [`Self::Other`].
    ///
    /// # Errors
    ///
    /// Returns a grammar error if the body does not start with a token.
    pub fn parse(s: &str) -> Result<Self> {
        let mut processor = TokenProcessor::new(tokenize(s));
        let mechanism = processor.expect_token()?;
        Ok(Self::from_mechanism(mechanism))
    }
}

impl fmt::Display for ContentTransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SevenBit => write!(f, "7bit"),
            Self::EightBit => write!(f, "8bit"),
            Self::Binary => write!(f, "binary"),
            Self::QuotedPrintable => write!(f, "quoted-printable"),
            Self::Base64 => write!(f, "base64"),
            Self::Other(name) => f.write_str(name),
        }
    }
}
