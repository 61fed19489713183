//! Charset conversion between declared MIME charsets and Rust strings.

use crate::error::{Error, Result};
use encoding_rs::{Encoding, UTF_8};

/// Converts between bytes in a named charset and Unicode text.
///
/// Implementations are supplied by the surrounding application when the
/// built-in [`StandardCharsets`] table is not enough.
pub trait CharsetCodec {
    /// Decodes `bytes` written in `charset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not valid in the charset.
    fn decode(&self, charset: &str, bytes: &[u8]) -> Result<String>;

    /// Encodes `text` into `charset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be represented in the charset.
    fn encode(&self, charset: &str, text: &str) -> Result<Vec<u8>>;
}

/// Charset table backed by the WHATWG Encoding Standard labels.
///
/// Unknown labels are treated as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCharsets;

impl StandardCharsets {
    fn lookup(charset: &str) -> Option<&'static Encoding> {
        let label = normalize_label(charset);
        let encoding = Encoding::for_label(label.as_bytes());
        if encoding.is_none() {
            tracing::debug!(charset = label, "Unknown charset, falling back to UTF-8");
        }
        encoding
    }
}

/// Strips whitespace and an RFC 2231 `*language` suffix.
fn normalize_label(charset: &str) -> &str {
    let charset = charset.trim();
    charset.split_once('*').map_or(charset, |(name, _)| name)
}

fn is_ascii_label(label: &str) -> bool {
    ["us-ascii", "ascii"]
        .iter()
        .any(|name| label.eq_ignore_ascii_case(name))
}

impl CharsetCodec for StandardCharsets {
    fn decode(&self, charset: &str, bytes: &[u8]) -> Result<String> {
        // encoding_rs maps the ASCII labels to windows-1252.
        if is_ascii_label(normalize_label(charset)) {
            return Ok(bytes
                .iter()
                .map(|&b| if b.is_ascii() { char::from(b) } else { char::REPLACEMENT_CHARACTER })
                .collect());
        }

        let Some(encoding) = Self::lookup(charset) else {
            return Ok(String::from_utf8(bytes.to_vec())?);
        };

        encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(std::borrow::Cow::into_owned)
            .ok_or_else(|| Error::InvalidCharset(encoding.name().to_string()))
    }

    fn encode(&self, charset: &str, text: &str) -> Result<Vec<u8>> {
        let label = normalize_label(charset);
        if is_ascii_label(label) {
            return if text.is_ascii() {
                Ok(text.as_bytes().to_vec())
            } else {
                Err(Error::InvalidCharset(label.to_string()))
            };
        }

        let encoding = Self::lookup(charset).unwrap_or(UTF_8);
        let (bytes, used, had_errors) = encoding.encode(text);
        // UTF-16 has no encoder and silently switches to UTF-8.
        if had_errors || used != encoding {
            return Err(Error::InvalidCharset(encoding.name().to_string()));
        }
        Ok(bytes.into_owned())
    }
}
