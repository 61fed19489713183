//! MIME header handling.

use crate::config::LineEnding;
use crate::content_type::ContentType;
use crate::disposition::ContentDisposition;
use crate::encoding::decode_rfc2047;
use crate::error::Result;
use crate::params::Parameters;
use crate::rfc822::{self, Rfc822Field};
use crate::transfer_encoding::ContentTransferEncoding;
use std::fmt::Write as _;

const CONTENT_TRANSFER_ENCODING: &str = "Content-Transfer-Encoding";
const CONTENT_TYPE: &str = "Content-Type";
const CONTENT_DISPOSITION: &str = "Content-Disposition";

/// One header field, typed if it is one of the MIME fields this crate
/// understands.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeaderField {
    /// `Content-Transfer-Encoding`.
    ContentTransferEncoding(ContentTransferEncoding),
    /// `Content-Type`.
    ContentType(ContentType),
    /// `Content-Disposition`.
    ContentDisposition(ContentDisposition),
    /// Any other field, unparsed.
    Other(Rfc822Field),
}

impl HeaderField {
    /// Returns the field name, canonical for recognized fields.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::ContentTransferEncoding(_) => CONTENT_TRANSFER_ENCODING,
            Self::ContentType(_) => CONTENT_TYPE,
            Self::ContentDisposition(_) => CONTENT_DISPOSITION,
            Self::Other(field) => &field.name,
        }
    }

    /// Interprets a raw field, parsing its body if the name is recognized.
    ///
    /// # Errors
    ///
    /// Returns a grammar error if a recognized field has a malformed body.
    pub fn parse(field: Rfc822Field) -> Result<Self> {
        let parsed = if field.is_named(CONTENT_TRANSFER_ENCODING) {
            Self::ContentTransferEncoding(ContentTransferEncoding::parse(&field.body)?)
        } else if field.is_named(CONTENT_TYPE) {
            Self::ContentType(ContentType::parse(&field.body)?)
        } else if field.is_named(CONTENT_DISPOSITION) {
            Self::ContentDisposition(ContentDisposition::parse(&field.body)?)
        } else {
            Self::Other(field)
        };
        tracing::trace!(name = parsed.name(), "Parsed header field");
        Ok(parsed)
    }

    fn write_to(&self, out: &mut String, line_break: &str) {
        match self {
            Self::ContentTransferEncoding(encoding) => {
                let _ = write!(out, "{CONTENT_TRANSFER_ENCODING}: {encoding}");
            }
            Self::ContentType(ct) => {
                let _ = write!(out, "{CONTENT_TYPE}: {}", ct.raw());
                write_parameters(out, &ct.parameters, line_break);
            }
            Self::ContentDisposition(cd) => {
                let _ = write!(out, "{CONTENT_DISPOSITION}: {}", cd.disposition_type);
                write_parameters(out, &cd.parameters, line_break);
            }
            Self::Other(field) => {
                let _ = write!(out, "{}: {}", field.name, field.body);
            }
        }
        out.push_str(line_break);
    }
}

fn write_parameters(out: &mut String, parameters: &Parameters, line_break: &str) {
    for (name, value) in parameters.iter() {
        let _ = write!(out, ";{line_break}    {name}=\"{value}\"");
    }
}

/// Ordered header fields of one MIME part.
///
/// Duplicates are kept in order. Accessors for recognized fields return the
/// first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MimeHeader {
    /// Fields in message order.
    pub fields: Vec<HeaderField>,
}

impl MimeHeader {
    /// Creates an empty header.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: HeaderField) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends an unrecognized `name: body` field.
    #[must_use]
    pub fn with_other(self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_field(HeaderField::Other(Rfc822Field::new(name, body)))
    }

    /// Parses a raw header block.
    ///
    /// Folded lines are joined, then every `name: body` line becomes a
    /// field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFieldStructure`](crate::Error::InvalidFieldStructure)
    /// for a line that is not a field, or a grammar error from a recognized
    /// field.
    pub fn parse(text: &str) -> Result<Self> {
        let unfolded = rfc822::unfold(text);
        let fields = rfc822::partition(&unfolded)?
            .into_iter()
            .map(HeaderField::parse)
            .collect::<Result<Vec<_>>>()?;

        let header = Self { fields };
        for name in header.duplicate_fields() {
            tracing::warn!(field = name, "Duplicate header field, using the first");
        }
        Ok(header)
    }

    /// Returns the first `Content-Transfer-Encoding` field.
    #[must_use]
    pub fn content_transfer_encoding(&self) -> Option<&ContentTransferEncoding> {
        self.fields.iter().find_map(|f| match f {
            HeaderField::ContentTransferEncoding(e) => Some(e),
            _ => None,
        })
    }

    /// Returns the first `Content-Type` field.
    #[must_use]
    pub fn content_type(&self) -> Option<&ContentType> {
        self.fields.iter().find_map(|f| match f {
            HeaderField::ContentType(ct) => Some(ct),
            _ => None,
        })
    }

    /// Returns the first `Content-Disposition` field.
    #[must_use]
    pub fn content_disposition(&self) -> Option<&ContentDisposition> {
        self.fields.iter().find_map(|f| match f {
            HeaderField::ContentDisposition(cd) => Some(cd),
            _ => None,
        })
    }

    /// Gets the first value of an unrecognized field, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.others(name).next()
    }

    /// Gets all values of an unrecognized field, ignoring case.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.others(name).collect()
    }

    fn others<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> {
        self.fields.iter().filter_map(move |f| match f {
            HeaderField::Other(field) if field.is_named(name) => Some(field.body.as_str()),
            _ => None,
        })
    }

    /// Gets a field value with RFC 2047 encoded-words decoded.
    ///
    /// # Errors
    ///
    /// Returns an error if an encoded word cannot be decoded.
    pub fn decoded(&self, name: &str) -> Result<Option<String>> {
        self.get(name).map(decode_rfc2047).transpose()
    }

    /// Gets the Subject header.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.get("Subject")
    }

    /// Gets the From header.
    #[must_use]
    pub fn from(&self) -> Option<&str> {
        self.get("From")
    }

    /// Gets the To header.
    #[must_use]
    pub fn to(&self) -> Option<&str> {
        self.get("To")
    }

    /// Gets the Cc header.
    #[must_use]
    pub fn cc(&self) -> Option<&str> {
        self.get("Cc")
    }

    /// Gets the Date header.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.get("Date")
    }

    /// Gets the Message-ID header.
    #[must_use]
    pub fn message_id(&self) -> Option<&str> {
        self.get("Message-ID")
    }

    /// Gets the Content-Description header.
    #[must_use]
    pub fn content_description(&self) -> Option<&str> {
        self.get("Content-Description")
    }

    /// Names of recognized fields that occur more than once.
    #[must_use]
    pub fn duplicate_fields(&self) -> Vec<&'static str> {
        let count = |wanted: fn(&HeaderField) -> bool| self.fields.iter().filter(|&f| wanted(f)).count();
        let mut duplicates = Vec::new();
        if count(|f| matches!(f, HeaderField::ContentTransferEncoding(_))) > 1 {
            duplicates.push(CONTENT_TRANSFER_ENCODING);
        }
        if count(|f| matches!(f, HeaderField::ContentType(_))) > 1 {
            duplicates.push(CONTENT_TYPE);
        }
        if count(|f| matches!(f, HeaderField::ContentDisposition(_))) > 1 {
            duplicates.push(CONTENT_DISPOSITION);
        }
        duplicates
    }

    /// Appends every field as a header line, in order.
    pub(crate) fn write_to(&self, out: &mut String, line_ending: LineEnding) {
        let line_break = line_ending.header_break();
        for field in &self.fields {
            field.write_to(out, line_break);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_recognized_fields() {
        let header = MimeHeader::parse(
            "Content-Type: text/plain; charset=utf-8\r\n\
             Content-Transfer-Encoding: Base64\r\n\
             Content-Disposition: attachment; filename=a.txt\r\n\
             X-Mailer: test\r\n",
        )
        .unwrap();

        assert_eq!(header.fields.len(), 4);
        assert_eq!(header.content_type().unwrap().charset(), Some("utf-8"));
        assert_eq!(
            header.content_transfer_encoding(),
            Some(&ContentTransferEncoding::Base64)
        );
        assert_eq!(
            header.content_disposition().unwrap().filename(),
            Some("a.txt")
        );
        assert_eq!(header.get("x-mailer"), Some("test"));
    }

    #[test]
    fn test_field_names_case_insensitive() {
        for name in ["CONTENT-TYPE", "content-type", "Content-Type"] {
            let header = MimeHeader::parse(&format!("{name}: text/html")).unwrap();
            assert_eq!(header.content_type().unwrap().raw(), "text/html");
        }
    }

    #[test]
    fn test_folded_field() {
        let header = MimeHeader::parse(
            "Content-Type: multipart/mixed;\r\n\tboundary=\"abc\"\r\nSubject: one\r\n two\r\n",
        )
        .unwrap();
        assert_eq!(header.content_type().unwrap().boundary(), Some("abc"));
        assert_eq!(header.subject(), Some("one two"));
    }

    #[test]
    fn test_duplicates_preserved_first_wins() {
        let header = MimeHeader::parse(
            "Content-Type: text/plain\nReceived: a\nContent-Type: text/html\nReceived: b\n",
        )
        .unwrap();
        assert_eq!(header.fields.len(), 4);
        assert_eq!(header.content_type().unwrap().raw(), "text/plain");
        assert_eq!(header.duplicate_fields(), vec![CONTENT_TYPE]);
        assert_eq!(header.get_all("received"), vec!["a", "b"]);
    }

    #[test]
    fn test_malformed_recognized_field_fails() {
        assert!(matches!(
            MimeHeader::parse("Content-Type: text"),
            Err(Error::NoMoreTokens)
        ));
    }

    #[test]
    fn test_invalid_line_fails() {
        assert!(matches!(
            MimeHeader::parse("Subject: ok\ngarbage\n"),
            Err(Error::InvalidFieldStructure(_))
        ));
    }

    #[test]
    fn test_lookup_result_outlives_name() {
        let header = MimeHeader::new().with_other("Subject", "Hi").with_other("Received", "a");
        let subject = {
            let name = String::from("subject");
            header.get(&name)
        };
        let received = {
            let name = "RECEIVED".to_lowercase();
            header.get_all(&name)
        };
        assert_eq!(subject, Some("Hi"));
        assert_eq!(received, vec!["a"]);
    }

    #[test]
    fn test_decoded() {
        let header = MimeHeader::new().with_other("Subject", "=?utf-8?Q?caf=C3=A9?= time");
        assert_eq!(header.decoded("subject").unwrap().as_deref(), Some("café time"));
        assert_eq!(header.decoded("to").unwrap(), None);
    }

    #[test]
    fn test_convenience_getters() {
        let header = MimeHeader::parse(
            "From: a@example.com\nTo: b@example.com\nCc: c@example.com\n\
             Date: Mon, 1 Jan 2024 00:00:00 +0000\nMessage-ID: <1@x>\n\
             Content-Description: notes\n",
        )
        .unwrap();
        assert_eq!(header.from(), Some("a@example.com"));
        assert_eq!(header.to(), Some("b@example.com"));
        assert_eq!(header.cc(), Some("c@example.com"));
        assert_eq!(header.date(), Some("Mon, 1 Jan 2024 00:00:00 +0000"));
        assert_eq!(header.message_id(), Some("<1@x>"));
        assert_eq!(header.content_description(), Some("notes"));
    }

    #[test]
    fn test_write_to() {
        let header = MimeHeader::new()
            .with_other("Subject", "Hi")
            .with_field(HeaderField::ContentType(ContentType::multipart_mixed("b1")))
            .with_field(HeaderField::ContentTransferEncoding(
                ContentTransferEncoding::QuotedPrintable,
            ));

        let mut out = String::new();
        header.write_to(&mut out, LineEnding::Mixed);
        assert_eq!(
            out,
            "Subject: Hi\nContent-Type: multipart/mixed;\n    boundary=\"b1\"\n\
             Content-Transfer-Encoding: quoted-printable\n"
        );
    }
}
