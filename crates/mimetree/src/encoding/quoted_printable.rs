//! Quoted-Printable transfer encoding (RFC 2045 §6.7).

use crate::error::{Error, Result};
use std::fmt::Write as _;

/// Maximum line length for Quoted-Printable encoding, soft break included.
const MAX_LINE_LENGTH: usize = 76;

#[derive(Debug, Clone, Copy)]
enum State {
    Start,
    ConsumedEquals,
    FirstHex(u8),
}

/// Decodes Quoted-Printable text to bytes.
///
/// Soft line breaks (`=` before LF or CRLF) are removed. An escape cut off by
/// the end of input is dropped rather than reported.
///
/// # Errors
///
/// Returns [`Error::InvalidQuotedPrintable`] if `=` is followed by two
/// characters that are not hex digits.
pub fn decode_quoted_printable(text: &str) -> Result<Vec<u8>> {
    let mut result = Vec::with_capacity(text.len());
    let mut state = State::Start;

    for (position, &byte) in text.as_bytes().iter().enumerate() {
        state = match (state, byte) {
            (State::Start, b'=') => State::ConsumedEquals,
            (State::Start, _) => {
                result.push(byte);
                State::Start
            }
            (State::ConsumedEquals, b'\r') => State::ConsumedEquals,
            (State::ConsumedEquals, b'\n') => State::Start,
            (State::ConsumedEquals, _) => State::FirstHex(byte),
            (State::FirstHex(first), _) => {
                let value = hex_pair(first, byte).ok_or(Error::InvalidQuotedPrintable { position })?;
                result.push(value);
                State::Start
            }
        };
    }

    if !matches!(state, State::Start) {
        tracing::debug!("Dropping incomplete quoted-printable escape at end of input");
    }

    Ok(result)
}

pub(crate) fn hex_pair(high: u8, low: u8) -> Option<u8> {
    let high = char::from(high).to_digit(16)?;
    let low = char::from(low).to_digit(16)?;
    u8::try_from((high << 4) | low).ok()
}

/// Encodes bytes using Quoted-Printable encoding.
///
/// Line feeds are kept as hard line breaks. A space right before a line
/// break or at the end of input is escaped so transports cannot strip it.
/// Lines are soft-wrapped with `=\r\n` to stay within 76 columns.
#[must_use]
pub fn encode_quoted_printable(data: &[u8]) -> String {
    let mut result = String::with_capacity(data.len() * 3 / 2);
    let mut line_length = 0;

    for (i, &byte) in data.iter().enumerate() {
        if byte == b'\n' {
            result.push('\n');
            line_length = 0;
            continue;
        }

        let literal = match byte {
            b'!'..=b'<' | b'>'..=b'~' => true,
            b' ' => !matches!(data.get(i + 1), None | Some(b'\n')),
            _ => false,
        };
        let width = if literal { 1 } else { 3 };

        if line_length + width > MAX_LINE_LENGTH - 1 {
            result.push_str("=\r\n");
            line_length = 0;
        }

        if literal {
            result.push(char::from(byte));
        } else {
            let _ = write!(result, "={byte:02X}");
        }
        line_length += width;
    }

    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_escape() {
        assert_eq!(decode_quoted_printable("Test=3D").unwrap(), b"Test=");
        assert_eq!(decode_quoted_printable("caf=c3=a9").unwrap(), "café".as_bytes());
    }

    #[test]
    fn test_decode_soft_breaks() {
        assert_eq!(decode_quoted_printable("Hel=\r\nlo").unwrap(), b"Hello");
        assert_eq!(decode_quoted_printable("Hel=\nlo").unwrap(), b"Hello");
    }

    #[test]
    fn test_decode_keeps_hard_breaks() {
        assert_eq!(decode_quoted_printable("a\r\nb").unwrap(), b"a\r\nb");
    }

    #[test]
    fn test_decode_invalid_hex() {
        assert!(matches!(
            decode_quoted_printable("ab=ZZ"),
            Err(Error::InvalidQuotedPrintable { position: 4 })
        ));
    }

    #[test]
    fn test_decode_trailing_escape_is_dropped() {
        assert_eq!(decode_quoted_printable("abc=").unwrap(), b"abc");
        assert_eq!(decode_quoted_printable("abc=4").unwrap(), b"abc");
    }

    #[test]
    fn test_encode_plain() {
        assert_eq!(encode_quoted_printable(b"Hello World"), "Hello World");
    }

    #[test]
    fn test_encode_special_bytes() {
        assert_eq!(encode_quoted_printable(b"a=b\tc"), "a=3Db=09c");
        assert_eq!(encode_quoted_printable("é".as_bytes()), "=C3=A9");
        assert_eq!(encode_quoted_printable(b"a\r\nb"), "a=0D\nb");
    }

    #[test]
    fn test_encode_trailing_space() {
        assert_eq!(encode_quoted_printable(b"end "), "end=20");
        assert_eq!(encode_quoted_printable(b"a \nb"), "a=20\nb");
        assert_eq!(encode_quoted_printable(b"a b"), "a b");
    }

    #[test]
    fn test_encode_soft_wrap() {
        let input = "x".repeat(200);
        let encoded = encode_quoted_printable(input.as_bytes());
        assert!(encoded.contains("=\r\n"));
        for line in encoded.split("\r\n") {
            assert!(line.len() <= MAX_LINE_LENGTH);
        }
        assert_eq!(decode_quoted_printable(&encoded).unwrap(), input.as_bytes());
    }

    #[test]
    fn test_encode_does_not_split_escape() {
        let input = format!("{}é", "x".repeat(74));
        let encoded = encode_quoted_printable(input.as_bytes());
        assert!(encoded.starts_with(&format!("{}=\r\n=C3", "x".repeat(74))));
    }
}
