//! `Content-Disposition` field (RFC 2183).

use crate::error::Result;
use crate::lexer::tokenize;
use crate::params::{Parameters, parse_parameters};
use crate::processor::TokenProcessor;
use std::fmt;

/// Content disposition with parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentDisposition {
    /// Disposition type (e.g., "inline", "attachment").
    pub disposition_type: String,
    /// Parameters (e.g., filename=report.pdf).
    pub parameters: Parameters,
}

impl ContentDisposition {
    /// Creates a disposition without parameters.
    #[must_use]
    pub fn new(disposition_type: impl Into<String>) -> Self {
        Self {
            disposition_type: disposition_type.into(),
            parameters: Parameters::new(),
        }
    }

    /// Creates an `attachment` disposition carrying a filename.
    #[must_use]
    pub fn attachment(filename: impl Into<String>) -> Self {
        Self::new("attachment").with_parameter("filename", filename)
    }

    /// Creates an `inline` disposition.
    #[must_use]
    pub fn inline() -> Self {
        Self::new("inline")
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key, value);
        self
    }

    /// Returns the filename parameter if present.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.parameters.get("filename")
    }

    /// Checks for the `attachment` disposition type.
    #[must_use]
    pub fn is_attachment(&self) -> bool {
        self.disposition_type.eq_ignore_ascii_case("attachment")
    }

    /// Checks for the `inline` disposition type.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.disposition_type.eq_ignore_ascii_case("inline")
    }

    /// Parses a `Content-Disposition` field body.
    ///
    /// # Errors
    ///
    /// Returns a grammar error if the type or a parameter is malformed.
    pub fn parse(s: &str) -> Result<Self> {
        let mut processor = TokenProcessor::new(tokenize(s));
        let disposition_type = processor.expect_token()?;
        let parameters = parse_parameters(&mut processor)?;

        Ok(Self {
            disposition_type: disposition_type.to_string(),
            parameters,
        })
    }
}

impl fmt::Display for ContentDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.disposition_type)?;
        for (key, value) in self.parameters.iter() {
            write!(f, "; {key}=\"{value}\"")?;
        }
        Ok(())
    }
}
