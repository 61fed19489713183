//! MIME part tree.

use crate::charset::{CharsetCodec, StandardCharsets};
use crate::config::LineEnding;
use crate::encoding;
use crate::error::Result;
use crate::header::MimeHeader;
use crate::transfer_encoding::ContentTransferEncoding;

/// Undecoded body of a discrete part.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MimeBody {
    /// Body text exactly as it appeared in the message.
    pub raw: String,
    /// Declared transfer encoding, 7bit when absent.
    pub encoding: ContentTransferEncoding,
}

impl MimeBody {
    /// Creates a body from already encoded text.
    #[must_use]
    pub fn new(raw: impl Into<String>, encoding: ContentTransferEncoding) -> Self {
        Self {
            raw: raw.into(),
            encoding,
        }
    }

    /// Encodes `data` for transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be represented in `encoding`.
    pub fn encode(data: &[u8], encoding: ContentTransferEncoding) -> Result<Self> {
        let raw = encoding::encode(data, &encoding)?;
        Ok(Self { raw, encoding })
    }

    /// Removes the transfer encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the raw text is malformed for its encoding.
    pub fn decoded_content_data(&self) -> Result<Vec<u8>> {
        encoding::decode(&self.raw, &self.encoding)
    }

    /// Removes the transfer encoding and converts from `charset`,
    /// UTF-8 when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be decoded or the bytes are not
    /// valid in the charset.
    pub fn decoded_content_string(
        &self,
        charset: Option<&str>,
        codec: &dyn CharsetCodec,
    ) -> Result<String> {
        let data = self.decoded_content_data()?;
        codec.decode(charset.unwrap_or("utf-8"), &data)
    }
}

/// Content of a part: a leaf body or child parts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MimeContent {
    /// Discrete body.
    Body(MimeBody),
    /// `multipart/mixed` and any unrecognized multipart subtype.
    Mixed(Vec<Mime>),
    /// `multipart/alternative`.
    Alternative(Vec<Mime>),
}

impl MimeContent {
    /// Child parts, empty for a body.
    #[must_use]
    pub fn parts(&self) -> &[Mime] {
        match self {
            Self::Body(_) => &[],
            Self::Mixed(parts) | Self::Alternative(parts) => parts,
        }
    }
}

/// A parsed MIME part and its children.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mime {
    /// Header fields.
    pub header: MimeHeader,
    /// Body or child parts.
    pub content: MimeContent,
}

impl Mime {
    /// Creates a part.
    #[must_use]
    pub const fn new(header: MimeHeader, content: MimeContent) -> Self {
        Self { header, content }
    }

    /// Returns the transfer-decoded body, or `None` for a multipart.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is malformed for its encoding.
    pub fn decoded_content_data(&self) -> Result<Option<Vec<u8>>> {
        match &self.content {
            MimeContent::Body(body) => body.decoded_content_data().map(Some),
            MimeContent::Mixed(_) | MimeContent::Alternative(_) => Ok(None),
        }
    }

    /// Returns the body as text using the declared charset, or `None` for a
    /// multipart.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be decoded.
    pub fn decoded_content_string(&self) -> Result<Option<String>> {
        self.decoded_content_string_with(&StandardCharsets)
    }

    /// Like [`Self::decoded_content_string`] with a caller-supplied charset
    /// codec.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be decoded.
    pub fn decoded_content_string_with(&self, codec: &dyn CharsetCodec) -> Result<Option<String>> {
        match &self.content {
            MimeContent::Body(body) => {
                let charset = self.header.content_type().and_then(|ct| ct.charset());
                body.decoded_content_string(charset, codec).map(Some)
            }
            MimeContent::Mixed(_) | MimeContent::Alternative(_) => Ok(None),
        }
    }

    /// Direct child parts.
    #[must_use]
    pub fn encapsulated_mimes(&self) -> &[Mime] {
        self.content.parts()
    }

    /// First direct child whose content type `name` parameter matches.
    #[must_use]
    pub fn encapsulated_mime(&self, name: &str) -> Option<&Self> {
        self.encapsulated_mimes()
            .iter()
            .find(|m| m.header.content_type().and_then(|ct| ct.name()) == Some(name))
    }

    /// First direct child whose disposition `filename` matches.
    #[must_use]
    pub fn attachment(&self, filename: &str) -> Option<&Self> {
        self.encapsulated_mimes().iter().find(|m| {
            m.header.content_disposition().and_then(|cd| cd.filename()) == Some(filename)
        })
    }

    /// All parts in the tree with an `attachment` disposition, depth first.
    #[must_use]
    pub fn attachments(&self) -> Vec<&Self> {
        let mut found = Vec::new();
        self.collect_attachments(&mut found);
        found
    }

    fn collect_attachments<'a>(&'a self, found: &mut Vec<&'a Self>) {
        if self.is_attachment() {
            found.push(self);
        }
        for part in self.encapsulated_mimes() {
            part.collect_attachments(found);
        }
    }

    fn is_attachment(&self) -> bool {
        self.header
            .content_disposition()
            .is_some_and(|cd| cd.is_attachment())
    }

    /// Decoded text of the first non-attachment `text/plain` leaf.
    ///
    /// # Errors
    ///
    /// Returns an error if that part cannot be decoded.
    pub fn text_part(&self) -> Result<Option<String>> {
        self.find_text("plain")
            .map_or(Ok(None), Self::decoded_content_string)
    }

    /// Decoded text of the first non-attachment `text/html` leaf.
    ///
    /// # Errors
    ///
    /// Returns an error if that part cannot be decoded.
    pub fn html_part(&self) -> Result<Option<String>> {
        self.find_text("html")
            .map_or(Ok(None), Self::decoded_content_string)
    }

    fn find_text(&self, sub_type: &str) -> Option<&Self> {
        if let MimeContent::Body(_) = self.content {
            let matches = self.header.content_type().is_some_and(|ct| {
                ct.is_text() && ct.sub_type.eq_ignore_ascii_case(sub_type)
            });
            return (matches && !self.is_attachment()).then_some(self);
        }
        self.encapsulated_mimes()
            .iter()
            .find_map(|part| part.find_text(sub_type))
    }

    /// Boundary of a multipart part.
    #[must_use]
    pub fn boundary(&self) -> Option<&str> {
        self.header.content_type().and_then(|ct| ct.boundary())
    }

    /// Returns true if this part holds child parts.
    #[must_use]
    pub const fn is_multipart(&self) -> bool {
        !matches!(self.content, MimeContent::Body(_))
    }

    /// Serializes the tree back to message text.
    ///
    /// Parameters are written one per folded line. A multipart without a
    /// boundary parameter is written with an empty boundary.
    #[must_use]
    pub fn to_rfc822_string(&self, line_ending: LineEnding) -> String {
        let mut out = String::new();
        self.write_to(&mut out, line_ending);
        out
    }

    fn write_to(&self, out: &mut String, line_ending: LineEnding) {
        self.header.write_to(out, line_ending);
        out.push_str(line_ending.header_break());

        match &self.content {
            MimeContent::Body(body) => out.push_str(&body.raw),
            MimeContent::Mixed(parts) | MimeContent::Alternative(parts) => {
                let boundary = self.boundary().unwrap_or_default();
                let line_break = line_ending.boundary_break();
                for part in parts {
                    out.push_str(line_break);
                    out.push_str("--");
                    out.push_str(boundary);
                    out.push_str(line_break);
                    part.write_to(out, line_ending);
                }
                out.push_str(line_break);
                out.push_str("--");
                out.push_str(boundary);
                out.push_str("--");
                out.push_str(line_break);
            }
        }
    }
}
