//! # mimetree
//!
//! RFC 822/MIME message parsing into a typed tree of parts.
//!
//! ## Features
//!
//! - **Message parsing**: Split header and body, recurse into multipart bodies
//! - **Typed headers**: `Content-Type`, `Content-Disposition` and
//!   `Content-Transfer-Encoding` with parameters, everything else kept in order
//! - **Encoding/Decoding**: Base64, Quoted-Printable, RFC 2047 header encoding
//! - **Charsets**: Declared charsets decoded through a pluggable [`CharsetCodec`]
//! - **Serialization**: Write a tree back to message text
//!
//! ## Quick Start
//!
//! ### Parsing MIME Messages
//!
//! ```
//! use mimetree::MimeContent;
//!
//! let raw_message = "Subject: Test\r\n\
//!                    Content-Type: text/plain; charset=utf-8\r\n\
//!                    \r\n\
//!                    Hello, World!";
//!
//! let mime = mimetree::parse(raw_message)?;
//! assert_eq!(mime.header.subject(), Some("Test"));
//! assert!(matches!(mime.content, MimeContent::Body(_)));
//! assert_eq!(mime.decoded_content_string()?.as_deref(), Some("Hello, World!"));
//! # Ok::<(), mimetree::Error>(())
//! ```
//!
//! ### Multipart Messages
//!
//! ```
//! let raw_message = "Content-Type: multipart/mixed; boundary=\"sep\"\n\
//!                    \n\
//!                    --sep\n\
//!                    Content-Type: text/plain\n\
//!                    \n\
//!                    Body\n\
//!                    --sep\n\
//!                    Content-Type: application/octet-stream\n\
//!                    Content-Disposition: attachment; filename=\"data.bin\"\n\
//!                    Content-Transfer-Encoding: base64\n\
//!                    \n\
//!                    //////////8=\n\
//!                    --sep--\n";
//!
//! let mime = mimetree::parse(raw_message)?;
//! assert_eq!(mime.encapsulated_mimes().len(), 2);
//!
//! let file = mime.attachment("data.bin").expect("attachment");
//! assert_eq!(file.decoded_content_data()?, Some(vec![255; 8]));
//! # Ok::<(), mimetree::Error>(())
//! ```
//!
//! ### Limits and Serialization
//!
//! ```
//! use mimetree::{LineEnding, MimeParser, ParserConfig};
//!
//! let parser = MimeParser::with_config(
//!     ParserConfig::builder()
//!         .max_depth(8)
//!         .max_message_size(10 * 1024 * 1024)
//!         .build(),
//! );
//!
//! let mime = parser.parse("Content-Type: text/plain\n\nTest")?;
//! assert_eq!(
//!     mime.to_rfc822_string(LineEnding::Crlf),
//!     "Content-Type: text/plain\r\n\r\nTest"
//! );
//! # Ok::<(), mimetree::Error>(())
//! ```
//!
//! ### Encoding/Decoding
//!
//! ```
//! use mimetree::encoding::{decode_quoted_printable, decode_rfc2047, encode_rfc2047};
//!
//! assert_eq!(decode_quoted_printable("Test=3D")?, b"Test=");
//! assert_eq!(decode_rfc2047("=?UTF-8?Q?a_b?=")?, "a b");
//! assert_eq!(encode_rfc2047("Grüße"), "=?utf-8?Q?Gr=C3=BC=C3=9Fe?=");
//! # Ok::<(), mimetree::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod charset;
mod config;
mod content_type;
mod disposition;
mod error;
mod header;
mod message;
mod parser;
mod transfer_encoding;

pub mod encoding;
pub mod lexer;
pub mod params;
pub mod processor;
pub mod rfc822;
pub mod scanner;

pub use charset::{CharsetCodec, StandardCharsets};
pub use config::{DEFAULT_MAX_DEPTH, LineEnding, ParserConfig, ParserConfigBuilder};
pub use content_type::{ContentType, MimeType, MultipartSubtype};
pub use disposition::ContentDisposition;
pub use error::{Error, Result};
pub use header::{HeaderField, MimeHeader};
pub use message::{Mime, MimeBody, MimeContent};
pub use params::Parameters;
pub use parser::MimeParser;
pub use rfc822::Rfc822Field;
pub use transfer_encoding::ContentTransferEncoding;

/// Parses a message with default limits.
///
/// # Errors
///
/// See [`MimeParser::parse`].
pub fn parse(message: &str) -> Result<Mime> {
    MimeParser::new().parse(message)
}
