//! Message splitting: header/body separation and multipart bodies.

use crate::config::ParserConfig;
use crate::content_type::{MimeType, MultipartSubtype};
use crate::error::{Error, Result};
use crate::header::MimeHeader;
use crate::message::{Mime, MimeBody, MimeContent};
use regex::Regex;

/// Parses messages into [`Mime`] trees.
///
/// The parser holds no state between calls and can be shared across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct MimeParser {
    config: ParserConfig,
}

/// Header block and body of one part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Split<'a> {
    header: &'a str,
    body: &'a str,
    /// Offset of the blank line, where multipart delimiter search starts.
    separator: usize,
}

impl MimeParser {
    /// Creates a parser with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with the given limits.
    #[must_use]
    pub const fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the parser configuration.
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a complete message.
    ///
    /// Bodies are kept undecoded; see [`Mime::decoded_content_data`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMessageStructure`] if a part has no blank line
    /// after its header, a header grammar error, or a limit error.
    pub fn parse(&self, message: &str) -> Result<Mime> {
        if let Some(limit) = self.config.max_message_size
            && message.len() > limit
        {
            return Err(Error::MessageTooLarge {
                size: message.len(),
                limit,
            });
        }
        self.parse_part(message, 0)
    }

    fn parse_part(&self, text: &str, depth: usize) -> Result<Mime> {
        let split = split_header_body(text).ok_or(Error::InvalidMessageStructure)?;
        let header = MimeHeader::parse(split.header)?;

        let mime_type = header.content_type().map(|ct| (ct.mime_type(), ct.is_multipart()));
        let content = match mime_type {
            Some((MimeType::Multipart { subtype, boundary }, _)) => {
                if depth >= self.config.max_depth {
                    return Err(Error::NestingTooDeep {
                        limit: self.config.max_depth,
                    });
                }

                let parts = split_multipart(&text[split.separator..], &boundary)?
                    .into_iter()
                    .map(|part| self.parse_part(part, depth + 1))
                    .collect::<Result<Vec<_>>>()?;
                tracing::debug!(boundary = boundary.as_str(), depth, parts = parts.len(), "Split multipart body");

                match subtype {
                    MultipartSubtype::Alternative => MimeContent::Alternative(parts),
                    MultipartSubtype::Mixed | MultipartSubtype::Other(_) => MimeContent::Mixed(parts),
                }
            }
            other => {
                if matches!(other, Some((_, true))) {
                    tracing::warn!("Multipart content type without boundary, keeping body as is");
                }
                let encoding = header.content_transfer_encoding().cloned().unwrap_or_default();
                MimeContent::Body(MimeBody::new(split.body, encoding))
            }
        };

        tracing::trace!(depth, parts = content.parts().len(), "Parsed part");
        Ok(Mime::new(header, content))
    }
}

/// Finds the first empty line.
///
/// A line break right at the end of the text also ends the header, leaving
/// an empty body. Empty text, as left by two adjacent delimiter lines, is an
/// empty header with an empty body.
fn split_header_body(text: &str) -> Option<Split<'_>> {
    if text.is_empty() {
        return Some(Split {
            header: "",
            body: "",
            separator: 0,
        });
    }

    let mut line_start = 0;

    loop {
        let rest = &text[line_start..];
        let terminator = if rest.starts_with("\r\n") {
            2
        } else if rest.starts_with('\n') {
            1
        } else {
            0
        };

        if terminator > 0 {
            return Some(Split {
                header: &text[..line_start],
                body: &text[line_start + terminator..],
                separator: line_start,
            });
        }

        line_start += rest.find('\n')? + 1;
        if line_start == text.len() {
            return Some(Split {
                header: text,
                body: "",
                separator: line_start,
            });
        }
    }
}

/// Returns the text between consecutive delimiter lines.
///
/// The preamble before the first delimiter and the epilogue after the last
/// are dropped. `text` must start at the line break before the body so a
/// delimiter on the first body line is found.
fn split_multipart<'a>(text: &'a str, boundary: &str) -> Result<Vec<&'a str>> {
    let pattern = format!(r"\r?\n--{}-?-?[ \t]*(?:\r?\n|\z)", regex::escape(boundary));
    let delimiter = Regex::new(&pattern).map_err(|_| Error::InvalidBoundary(boundary.to_string()))?;

    let matches: Vec<_> = delimiter.find_iter(text).collect();
    Ok(matches
        .windows(2)
        .map(|pair| &text[pair[0].end()..pair[1].start()])
        .collect())
}
