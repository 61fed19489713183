//! Header field parameters (`; name=value` lists).

use crate::error::{Error, Result};
use crate::lexer::Special;
use crate::processor::TokenProcessor;

/// Parameters of a structured header field.
///
/// Names are matched case-insensitively (RFC 2045 §5.1). Inserting an
/// existing name replaces its value in place, so every name appears once and
/// parse order is kept for serialization. Equality ignores order.
#[derive(Debug, Clone, Default, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameters(Vec<(String, String)>);

impl Parameters {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Sets a parameter, replacing any value stored under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(&name)) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Gets a parameter value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if a parameter with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in parse order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(n, v)| other.get(n) == Some(v))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Parses `(";" name "=" value)*` until the tokens run out.
///
/// A semicolon with nothing after it is accepted and ignored.
///
/// # Errors
///
/// Returns a grammar error for anything else that does not fit, or
/// [`Error::InvalidParameterValue`] when the value is missing.
pub fn parse_parameters(processor: &mut TokenProcessor<'_>) -> Result<Parameters> {
    let mut params = Parameters::new();

    while !processor.is_at_end() {
        processor.expect_special(Special::Semicolon)?;
        if processor.is_at_end() {
            break;
        }

        let name = processor.expect_token()?;
        processor.expect_special(Special::Equals)?;
        let value = processor
            .expect_quoted_string()
            .or_else(|_| processor.expect_token())
            .map_err(|_| Error::InvalidParameterValue(name.to_string()))?;

        params.insert(name, value);
    }

    Ok(params)
}
