//! RFC 822 header block handling: unfolding and field partitioning.

use crate::error::{Error, Result};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Line break followed by horizontal whitespace (RFC 822 §3.1.1).
#[allow(clippy::expect_used)]
static FOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n[ \t]+").expect("fold pattern is valid"));

/// Unparsed `name: body` header field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rfc822Field {
    /// Field name as written.
    pub name: String,
    /// Field body with leading whitespace removed.
    pub body: String,
}

impl Rfc822Field {
    /// Creates a field.
    #[must_use]
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    /// Compares the field name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name)
    }
}

/// Joins continuation lines into single logical lines.
#[must_use]
pub fn unfold(header: &str) -> Cow<'_, str> {
    FOLD.replace_all(header, " ")
}

/// Splits an unfolded header block into fields, keeping order and
/// duplicates.
///
/// # Errors
///
/// Returns [`Error::InvalidFieldStructure`] for a non-empty line without a
/// `name:` prefix.
pub fn partition(unfolded: &str) -> Result<Vec<Rfc822Field>> {
    unfolded
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(':') {
            Some((name, body)) if !name.trim().is_empty() => {
                Ok(Rfc822Field::new(name, body.trim_start_matches([' ', '\t'])))
            }
            _ => Err(Error::InvalidFieldStructure(line.to_string())),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unfold() {
        let header = "Content-Type: text/plain;\r\n\tcharset=utf-8\r\nSubject: a\n  b\n";
        assert_eq!(
            unfold(header),
            "Content-Type: text/plain; charset=utf-8\r\nSubject: a b\n"
        );
    }

    #[test]
    fn test_unfold_leaves_plain_lines() {
        assert!(matches!(unfold("A: b\nC: d"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_partition() {
        let fields = partition("From: a@example.com\r\nSubject:   Hello: world\r\nCc:\r\n").unwrap();
        assert_eq!(
            fields,
            vec![
                Rfc822Field::new("From", "a@example.com"),
                Rfc822Field::new("Subject", "Hello: world"),
                Rfc822Field::new("Cc", ""),
            ]
        );
    }

    #[test]
    fn test_partition_keeps_duplicates() {
        let fields = partition("Received: one\nReceived: two").unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].body, "two");
    }

    #[test]
    fn test_partition_rejects_line_without_colon() {
        assert!(matches!(
            partition("From: a\nnot a header\n"),
            Err(Error::InvalidFieldStructure(line)) if line == "not a header"
        ));
        assert!(matches!(
            partition(": empty name"),
            Err(Error::InvalidFieldStructure(_))
        ));
    }

    #[test]
    fn test_is_named() {
        let field = Rfc822Field::new("CONTENT-TYPE", "text/plain");
        assert!(field.is_named("content-type"));
    }
}
