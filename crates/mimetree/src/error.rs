//! Error types for MIME parsing and decoding.

use std::string::FromUtf8Error;

/// Result type alias for MIME operations.
pub type Result<T> = std::result::Result<T, Error>;

/// MIME error types.
///
/// Structural and grammar errors abort a parse. Decoding errors only surface
/// from the explicit decode calls on an already parsed tree.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No blank line separates the header block from the body.
    #[error("Invalid message structure: no header/body separator")]
    InvalidMessageStructure,

    /// A header line does not have the shape `name: body`.
    #[error("Invalid header field structure: {0:?}")]
    InvalidFieldStructure(String),

    /// The token stream ended in the middle of a rule.
    #[error("Unexpected end of header field tokens")]
    NoMoreTokens,

    /// Expected a token, found something else.
    #[error("Expected a token")]
    InvalidToken,

    /// Expected a quoted string, found something else.
    #[error("Expected a quoted string")]
    InvalidQuotedString,

    /// Expected a specific special character.
    #[error("Expected special character {0:?}")]
    InvalidSpecial(char),

    /// A parameter name is not followed by a token or quoted string.
    #[error("Invalid value for parameter {0:?}")]
    InvalidParameterValue(String),

    /// Boundary parameter cannot be turned into a delimiter pattern.
    #[error("Invalid multipart boundary {0:?}")]
    InvalidBoundary(String),

    /// Body bytes do not fit the declared transfer encoding.
    #[error("Decoding failed: {0}")]
    DecodingFailed(String),

    /// Base64 decode error.
    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// UTF-8 decode error.
    #[error("UTF-8 decode error: {0}")]
    Utf8Decode(#[from] FromUtf8Error),

    /// Bad hex digits after `=` in a quoted-printable body.
    #[error("Invalid quoted-printable escape at byte {position}")]
    InvalidQuotedPrintable {
        /// Byte offset of the second hex digit.
        position: usize,
    },

    /// Transfer encoding mechanism this crate cannot handle.
    #[error("Unsupported transfer encoding: {0}")]
    UnsupportedEncoding(String),

    /// Well-formed encoded-word with undecodable content.
    #[error("Invalid encoded-word: {0}")]
    InvalidWord(String),

    /// Bytes are not valid in the named charset.
    #[error("Content is not valid {0}")]
    InvalidCharset(String),

    /// Multipart nesting exceeds the configured limit.
    #[error("Multipart nesting deeper than {limit} levels")]
    NestingTooDeep {
        /// Configured maximum depth.
        limit: usize,
    },

    /// Message exceeds the configured size limit.
    #[error("Message of {size} bytes exceeds limit of {limit} bytes")]
    MessageTooLarge {
        /// Size of the rejected message.
        size: usize,
        /// Configured maximum size.
        limit: usize,
    },
}
