//! RFC 2047 encoded-words in header text.

use crate::charset::{CharsetCodec, StandardCharsets};
use crate::error::{Error, Result};
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use std::fmt::Write as _;

/// Encoded-word payloads are often sent with missing or extra padding.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Characters that force a word to be encoded, and that are escaped inside
/// an encoded word.
const SPECIALS: &[char] = &['[', ']', '/', ';', ':', ',', '=', '?', '"'];

/// Shortest possible encoded word: `=?c?Q??=`.
const MIN_WORD_LENGTH: usize = 8;

#[derive(Debug)]
struct EncodedWord<'a> {
    charset: &'a str,
    encoding: char,
    text: &'a str,
    len: usize,
}

impl<'a> EncodedWord<'a> {
    /// Recognizes an encoded word at the start of `input`.
    fn scan(input: &'a str) -> Option<Self> {
        let inner = input.strip_prefix("=?")?;
        let (charset, rest) = inner.split_once('?')?;
        if charset.is_empty() || charset.contains(char::is_whitespace) {
            return None;
        }

        let mut chars = rest.chars();
        let encoding = chars.next()?;
        if !matches!(encoding, 'Q' | 'q' | 'B' | 'b') || chars.next()? != '?' {
            return None;
        }

        // "=?" charset "?" encoding "?"
        let text_start = 2 + charset.len() + 3;
        let text_len = input[text_start..].find("?=")?;
        let len = text_start + text_len + 2;
        let word = &input[..len];
        if len < MIN_WORD_LENGTH || word.matches('?').count() != 4 {
            return None;
        }

        Some(Self {
            charset,
            encoding,
            text: &input[text_start..text_start + text_len],
            len,
        })
    }

    fn decode(&self, codec: &dyn CharsetCodec) -> Result<String> {
        let bytes = match self.encoding {
            'B' | 'b' => LENIENT_BASE64
                .decode(self.text)
                .map_err(|e| Error::InvalidWord(format!("bad base64 payload: {e}")))?,
            _ => decode_q(self.text)?,
        };
        codec.decode(self.charset, &bytes)
    }
}

fn decode_q(text: &str) -> Result<Vec<u8>> {
    let bytes = text.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'_' => result.push(b' '),
            b'=' => {
                let value = bytes
                    .get(i + 1..i + 3)
                    .and_then(|pair| super::quoted_printable::hex_pair(pair[0], pair[1]))
                    .ok_or_else(|| Error::InvalidWord(format!("bad escape in {text:?}")))?;
                result.push(value);
                i += 2;
            }
            b @ (b' '..=b'~' | b'\r' | b'\n' | b'\t') => result.push(b),
            b => return Err(Error::InvalidWord(format!("unexpected byte 0x{b:02X}"))),
        }
        i += 1;
    }

    Ok(result)
}

fn is_folding_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Decodes all encoded words in `text` with the built-in charset table.
///
/// # Errors
///
/// See [`decode_rfc2047_with`].
pub fn decode_rfc2047(text: &str) -> Result<String> {
    decode_rfc2047_with(text, &StandardCharsets)
}

/// Decodes all encoded words in `text`, converting charsets with `codec`.
///
/// Text that merely looks like an encoded word is passed through unchanged.
/// Whitespace between two adjacent encoded words is dropped.
///
/// # Errors
///
/// Returns [`Error::InvalidWord`] if a well-formed word has a bad payload,
/// or the codec's error if the decoded bytes do not fit the charset.
pub fn decode_rfc2047_with(text: &str, codec: &dyn CharsetCodec) -> Result<String> {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    let mut after_word = false;

    while let Some(start) = rest.find("=?") {
        let (literal, candidate) = rest.split_at(start);

        if let Some(word) = EncodedWord::scan(candidate) {
            if !(after_word && literal.chars().all(is_folding_whitespace)) {
                result.push_str(literal);
            }
            result.push_str(&word.decode(codec)?);
            rest = &candidate[word.len..];
            after_word = true;
        } else {
            tracing::debug!(text = candidate, "Skipping malformed encoded-word");
            let skip = candidate[2..].find("=?").map_or(candidate.len(), |i| i + 2);
            result.push_str(literal);
            result.push_str(&candidate[..skip]);
            rest = &candidate[skip..];
            after_word = false;
        }
    }

    result.push_str(rest);
    Ok(result)
}

fn needs_encoding(word: &str) -> bool {
    word.chars()
        .any(|c| !c.is_ascii() || c.is_ascii_control() || SPECIALS.contains(&c))
}

fn push_q_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            ' ' => out.push('_'),
            c if c.is_ascii_graphic() && c != '_' && !SPECIALS.contains(&c) => out.push(c),
            c => {
                let mut buf = [0; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    let _ = write!(out, "={byte:02X}");
                }
            }
        }
    }
}

/// Encodes header text, wrapping words that need it as
/// `=?utf-8?Q?...?=` encoded words.
///
/// Words made of plain ASCII are left alone. When two encoded words follow
/// each other, the whitespace between them is carried inside the second one,
/// so [`decode_rfc2047`] restores the input exactly.
#[must_use]
pub fn encode_rfc2047(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut after_word = false;
    let mut whitespace = "";
    let mut rest = text;

    while !rest.is_empty() {
        let in_whitespace = rest.starts_with(is_folding_whitespace);
        let split = rest
            .find(|c: char| is_folding_whitespace(c) != in_whitespace)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(split);
        rest = tail;

        if in_whitespace {
            whitespace = run;
            continue;
        }

        if needs_encoding(run) {
            let mut payload = String::new();
            if after_word && !whitespace.is_empty() {
                result.push(' ');
                push_q_escaped(&mut payload, whitespace);
            } else {
                result.push_str(whitespace);
            }
            push_q_escaped(&mut payload, run);
            let _ = write!(result, "=?utf-8?Q?{payload}?=");
            after_word = true;
        } else {
            result.push_str(whitespace);
            result.push_str(run);
            after_word = false;
        }
        whitespace = "";
    }

    result.push_str(whitespace);
    result
}
