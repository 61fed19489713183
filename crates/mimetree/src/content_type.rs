//! MIME content type handling.

use crate::error::Result;
use crate::lexer::{Special, tokenize};
use crate::params::{Parameters, parse_parameters};
use crate::processor::TokenProcessor;
use std::fmt;

/// Multipart subtype, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MultipartSubtype {
    /// `multipart/mixed`.
    Mixed,
    /// `multipart/alternative`.
    Alternative,
    /// Any other subtype, as written.
    Other(String),
}

impl MultipartSubtype {
    /// Classifies a subtype string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("mixed") {
            Self::Mixed
        } else if s.eq_ignore_ascii_case("alternative") {
            Self::Alternative
        } else {
            Self::Other(s.to_string())
        }
    }
}

/// Top-level media type derived from a [`ContentType`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MimeType {
    /// `text/*`.
    Text,
    /// `image/*`.
    Image,
    /// `audio/*`.
    Audio,
    /// `video/*`.
    Video,
    /// `application/*`.
    Application,
    /// `message/*`.
    Message,
    /// `multipart/*` with a boundary parameter.
    Multipart {
        /// Multipart subtype.
        subtype: MultipartSubtype,
        /// Boundary delimiter text.
        boundary: String,
    },
    /// Anything else, including `multipart/*` without a boundary.
    Other(String),
}

/// MIME content type with parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentType {
    /// Main type (e.g., "text", "image", "multipart").
    pub main_type: String,
    /// Subtype (e.g., "plain", "html", "jpeg").
    pub sub_type: String,
    /// Parameters (e.g., charset=utf-8, boundary=xxx).
    pub parameters: Parameters,
}

impl ContentType {
    /// Creates a new content type.
    #[must_use]
    pub fn new(main_type: impl Into<String>, sub_type: impl Into<String>) -> Self {
        Self {
            main_type: main_type.into(),
            sub_type: sub_type.into(),
            parameters: Parameters::new(),
        }
    }

    /// Creates a text/plain content type.
    #[must_use]
    pub fn text_plain() -> Self {
        Self::new("text", "plain").with_parameter("charset", "utf-8")
    }

    /// Creates a text/html content type.
    #[must_use]
    pub fn text_html() -> Self {
        Self::new("text", "html").with_parameter("charset", "utf-8")
    }

    /// Creates a multipart/mixed content type with boundary.
    #[must_use]
    pub fn multipart_mixed(boundary: impl Into<String>) -> Self {
        Self::new("multipart", "mixed").with_parameter("boundary", boundary)
    }

    /// Creates a multipart/alternative content type with boundary.
    #[must_use]
    pub fn multipart_alternative(boundary: impl Into<String>) -> Self {
        Self::new("multipart", "alternative").with_parameter("boundary", boundary)
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key, value);
        self
    }

    /// Returns `type/subtype` without parameters.
    #[must_use]
    pub fn raw(&self) -> String {
        format!("{}/{}", self.main_type, self.sub_type)
    }

    /// Returns the charset parameter if present.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.parameters.get("charset")
    }

    /// Returns the name parameter if present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.parameters.get("name")
    }

    /// Returns the boundary parameter if present.
    #[must_use]
    pub fn boundary(&self) -> Option<&str> {
        self.parameters.get("boundary")
    }

    /// Checks if this is a multipart content type.
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        self.main_type.eq_ignore_ascii_case("multipart")
    }

    /// Checks if this is a text content type.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.main_type.eq_ignore_ascii_case("text")
    }

    /// Classifies the main type.
    ///
    /// A multipart type without a boundary parameter cannot be split and
    /// comes back as [`MimeType::Other`].
    #[must_use]
    pub fn mime_type(&self) -> MimeType {
        match self.main_type.to_ascii_lowercase().as_str() {
            "text" => MimeType::Text,
            "image" => MimeType::Image,
            "audio" => MimeType::Audio,
            "video" => MimeType::Video,
            "application" => MimeType::Application,
            "message" => MimeType::Message,
            "multipart" => match self.boundary() {
                Some(boundary) => MimeType::Multipart {
                    subtype: MultipartSubtype::parse(&self.sub_type),
                    boundary: boundary.to_string(),
                },
                None => MimeType::Other(self.main_type.clone()),
            },
            _ => MimeType::Other(self.main_type.clone()),
        }
    }

    /// Parses a `Content-Type` field body.
    ///
    /// Format: `type/subtype; param1=value1; param2="value 2"`
    ///
    /// # Errors
    ///
    /// Returns a grammar error if `type/subtype` or a parameter is malformed.
    pub fn parse(s: &str) -> Result<Self> {
        let mut processor = TokenProcessor::new(tokenize(s));

        let main_type = processor.expect_token()?;
        processor.expect_special(Special::Slash)?;
        let sub_type = processor.expect_token()?;
        let parameters = parse_parameters(&mut processor)?;

        Ok(Self {
            main_type: main_type.to_string(),
            sub_type: sub_type.to_string(),
            parameters,
        })
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let main = &self.main_type;
        let sub = &self.sub_type;
        write!(f, "{main}/{sub}")?;

        for (key, value) in self.parameters.iter() {
            write!(f, "; {key}=\"{value}\"")?;
        }

        Ok(())
    }
}
