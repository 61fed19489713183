//! Integration tests for writing trees back to message text.

#![allow(clippy::unwrap_used)]

use mimetree::{
    ContentDisposition, ContentTransferEncoding, ContentType, HeaderField, LineEnding, Mime,
    MimeBody, MimeContent, MimeHeader,
};

const NESTED: &str = include_str!("fixtures/nested.eml");
const SIMPLE: &str = include_str!("fixtures/simple.eml");

/// Subtype, child count and leaf bodies of a tree.
fn shape(mime: &Mime) -> String {
    match &mime.content {
        MimeContent::Body(body) => format!("body({:?})", body.raw),
        MimeContent::Mixed(parts) | MimeContent::Alternative(parts) => {
            let kind = if matches!(mime.content, MimeContent::Mixed(_)) {
                "mixed"
            } else {
                "alternative"
            };
            let children: Vec<_> = parts.iter().map(shape).collect();
            format!("{kind}[{}]", children.join(", "))
        }
    }
}

#[test]
fn test_nested_round_trip() {
    let mime = mimetree::parse(NESTED).unwrap();

    for line_ending in [LineEnding::Crlf, LineEnding::Mixed] {
        let serialized = mime.to_rfc822_string(line_ending);
        let reparsed = mimetree::parse(&serialized).unwrap();
        assert_eq!(shape(&reparsed), shape(&mime), "{line_ending:?}");
        assert_eq!(reparsed, mime, "{line_ending:?}");
    }
}

#[test]
fn test_simple_round_trip() {
    let mime = mimetree::parse(SIMPLE).unwrap();
    let reparsed = mimetree::parse(&mime.to_rfc822_string(LineEnding::Crlf)).unwrap();
    assert_eq!(reparsed, mime);
}

#[test]
fn test_serialize_is_stable() {
    let mime = mimetree::parse(NESTED).unwrap();
    let once = mime.to_rfc822_string(LineEnding::Crlf);
    let twice = mimetree::parse(&once).unwrap().to_rfc822_string(LineEnding::Crlf);
    assert_eq!(once, twice);
}

#[test]
fn test_crlf_output() {
    let mime = Mime::new(
        MimeHeader::new()
            .with_other("Subject", "Hi")
            .with_field(HeaderField::ContentType(ContentType::multipart_alternative("alt"))),
        MimeContent::Alternative(vec![
            Mime::new(
                MimeHeader::new().with_field(HeaderField::ContentType(ContentType::text_plain())),
                MimeContent::Body(MimeBody::new("plain", ContentTransferEncoding::SevenBit)),
            ),
            Mime::new(
                MimeHeader::new().with_field(HeaderField::ContentType(ContentType::text_html())),
                MimeContent::Body(MimeBody::new("<p>html</p>", ContentTransferEncoding::SevenBit)),
            ),
        ]),
    );

    let expected = "Subject: Hi\r\n\
                    Content-Type: multipart/alternative;\r\n    boundary=\"alt\"\r\n\
                    \r\n\
                    \r\n--alt\r\n\
                    Content-Type: text/plain;\r\n    charset=\"utf-8\"\r\n\
                    \r\n\
                    plain\
                    \r\n--alt\r\n\
                    Content-Type: text/html;\r\n    charset=\"utf-8\"\r\n\
                    \r\n\
                    <p>html</p>\
                    \r\n--alt--\r\n";
    assert_eq!(mime.to_rfc822_string(LineEnding::Crlf), expected);
    assert!(!expected.replace("\r\n", "").contains('\n'));
}

#[test]
fn test_build_outgoing_message() {
    let text = Mime::new(
        MimeHeader::new()
            .with_field(HeaderField::ContentType(ContentType::text_plain()))
            .with_field(HeaderField::ContentTransferEncoding(
                ContentTransferEncoding::QuotedPrintable,
            )),
        MimeContent::Body(
            MimeBody::encode("Grüße = greetings".as_bytes(), ContentTransferEncoding::QuotedPrintable)
                .unwrap(),
        ),
    );
    let file = Mime::new(
        MimeHeader::new()
            .with_field(HeaderField::ContentType(ContentType::new("application", "pdf")))
            .with_field(HeaderField::ContentDisposition(ContentDisposition::attachment(
                "report.pdf",
            )))
            .with_field(HeaderField::ContentTransferEncoding(ContentTransferEncoding::Base64)),
        MimeContent::Body(MimeBody::encode(&[0x25, 0x50, 0x44, 0x46], ContentTransferEncoding::Base64).unwrap()),
    );
    let message = Mime::new(
        MimeHeader::new()
            .with_other("Subject", mimetree::encoding::encode_rfc2047("Grüße"))
            .with_field(HeaderField::ContentType(ContentType::multipart_mixed("mix-1"))),
        MimeContent::Mixed(vec![text, file]),
    );

    let parsed = mimetree::parse(&message.to_rfc822_string(LineEnding::Crlf)).unwrap();
    assert_eq!(parsed.header.decoded("Subject").unwrap().as_deref(), Some("Grüße"));
    assert_eq!(parsed.text_part().unwrap().as_deref(), Some("Grüße = greetings"));
    assert_eq!(
        parsed.attachment("report.pdf").unwrap().decoded_content_data().unwrap(),
        Some(b"%PDF".to_vec())
    );
}
