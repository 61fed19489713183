//! Content transfer encodings and header encoded-words.
//!
//! Supports Base64, Quoted-Printable, the identity encodings (7bit, 8bit,
//! binary), and RFC 2047 header encoding.

mod quoted_printable;
mod rfc2047;

pub use quoted_printable::{decode_quoted_printable, encode_quoted_printable};
pub use rfc2047::{decode_rfc2047, decode_rfc2047_with, encode_rfc2047};

use crate::error::{Error, Result};
use crate::transfer_encoding::ContentTransferEncoding;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Line length for Base64 bodies.
const BASE64_LINE_LENGTH: usize = 76;

/// Encodes data as Base64 on a single line.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes Base64 data, ignoring line breaks and other whitespace.
///
/// # Errors
///
/// Returns an error if the input is not valid Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    let compact: Vec<u8> = data
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    STANDARD.decode(compact).map_err(Into::into)
}

/// Decodes a raw body according to its transfer encoding.
///
/// # Errors
///
/// Returns [`Error::DecodingFailed`] if a 7bit body is not ASCII,
/// [`Error::UnsupportedEncoding`] for unknown mechanisms, or the codec error
/// for malformed Base64 and Quoted-Printable input.
pub fn decode(raw: &str, encoding: &ContentTransferEncoding) -> Result<Vec<u8>> {
    match encoding {
        ContentTransferEncoding::SevenBit => {
            if raw.is_ascii() {
                Ok(raw.as_bytes().to_vec())
            } else {
                Err(Error::DecodingFailed("7bit body contains non-ASCII characters".to_string()))
            }
        }
        ContentTransferEncoding::EightBit | ContentTransferEncoding::Binary => {
            Ok(raw.as_bytes().to_vec())
        }
        ContentTransferEncoding::QuotedPrintable => decode_quoted_printable(raw),
        ContentTransferEncoding::Base64 => decode_base64(raw),
        ContentTransferEncoding::Other(name) => Err(Error::UnsupportedEncoding(name.clone())),
    }
}

/// Encodes data into the body text for a transfer encoding.
///
/// Base64 output is wrapped at 76 columns with CRLF.
///
/// # Errors
///
/// Returns [`Error::InvalidCharset`] if 7bit data is not ASCII,
/// [`Error::Utf8Decode`] if 7bit, 8bit or binary data is not UTF-8, and
/// [`Error::UnsupportedEncoding`] for unknown mechanisms.
pub fn encode(data: &[u8], encoding: &ContentTransferEncoding) -> Result<String> {
    match encoding {
        ContentTransferEncoding::SevenBit => {
            let text = String::from_utf8(data.to_vec())?;
            if text.is_ascii() {
                Ok(text)
            } else {
                Err(Error::InvalidCharset("us-ascii".to_string()))
            }
        }
        ContentTransferEncoding::EightBit | ContentTransferEncoding::Binary => {
            Ok(String::from_utf8(data.to_vec())?)
        }
        ContentTransferEncoding::QuotedPrintable => Ok(encode_quoted_printable(data)),
        ContentTransferEncoding::Base64 => Ok(wrap_lines(&encode_base64(data), BASE64_LINE_LENGTH)),
        ContentTransferEncoding::Other(name) => Err(Error::UnsupportedEncoding(name.clone())),
    }
}

fn wrap_lines(text: &str, width: usize) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / width * 2);
    for (i, c) in text.chars().enumerate() {
        if i > 0 && i % width == 0 {
            result.push_str("\r\n");
        }
        result.push(c);
    }
    result
}
