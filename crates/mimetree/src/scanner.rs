//! Cursor based character scanner.
//!
//! Every `scan_*` method either consumes input and returns it, or returns
//! `None` with the cursor left where it was, so callers can try alternatives
//! in sequence.

/// Character scanner over a slice of text.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    specials: &'a [char],
    pos: usize,
    end: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over the whole input.
    #[must_use]
    pub const fn new(input: &'a str, specials: &'a [char]) -> Self {
        Self {
            input,
            specials,
            pos: 0,
            end: input.len(),
        }
    }

    /// Creates a scanner over `input[start..end]`.
    ///
    /// Bounds are clamped to the input and moved back to char boundaries.
    #[must_use]
    pub fn with_range(input: &'a str, specials: &'a [char], start: usize, end: usize) -> Self {
        let end = floor_char_boundary(input, end.min(input.len()));
        let start = floor_char_boundary(input, start.min(end));
        Self {
            input,
            specials,
            pos: start,
            end,
        }
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns true if the cursor reached the end of the range.
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.end
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..self.end].chars().next()
    }

    /// Returns true if `c` belongs to this scanner's special alphabet.
    #[must_use]
    pub fn is_special(&self, c: char) -> bool {
        self.specials.contains(&c)
    }

    /// Skips spaces and horizontal tabs.
    pub fn trim_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c != ' ' && c != '\t' {
                break;
            }
            self.pos += 1;
        }
    }

    /// Consumes one special character.
    pub fn scan_special(&mut self) -> Option<char> {
        let c = self.peek().filter(|&c| self.is_special(c))?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes the longest non-empty run of characters not rejected by
    /// `excluded`.
    pub fn scan_text(&mut self, excluded: impl Fn(char) -> bool) -> Option<&'a str> {
        let start = self.pos;
        let len = self.input[start..self.end]
            .char_indices()
            .find(|&(_, c)| excluded(c))
            .map_or(self.end - start, |(i, _)| i);

        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&self.input[start..self.pos])
    }

    /// Scans `left`, an interior run, then `right`, as one step.
    ///
    /// The interior may be empty (`""`).
    pub fn scan_text_enclosed(
        &mut self,
        left: char,
        right: char,
        excluded: impl Fn(char) -> bool,
    ) -> Option<&'a str> {
        let snapshot = self.pos;
        let result = self.enclosed(left, right, &excluded);
        if result.is_none() {
            self.pos = snapshot;
        }
        result
    }

    fn enclosed(
        &mut self,
        left: char,
        right: char,
        excluded: &impl Fn(char) -> bool,
    ) -> Option<&'a str> {
        if self.scan_special()? != left {
            return None;
        }
        let interior_start = self.pos;
        let interior = self
            .scan_text(excluded)
            .unwrap_or(&self.input[interior_start..interior_start]);
        if self.scan_special()? != right {
            return None;
        }
        Some(interior)
    }

    /// Scans an atom: text without whitespace, controls or specials.
    pub fn scan_atom(&mut self) -> Option<&'a str> {
        let specials = self.specials;
        self.scan_text(|c| c <= ' ' || specials.contains(&c))
    }
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SPECIALS: &[char] = &['/', ';', '=', '"'];

    #[test]
    fn test_scan_atom_stops_at_special() {
        let mut scanner = Scanner::new("text/plain", SPECIALS);
        assert_eq!(scanner.scan_atom(), Some("text"));
        assert_eq!(scanner.scan_special(), Some('/'));
        assert_eq!(scanner.scan_atom(), Some("plain"));
        assert!(scanner.is_at_end());
    }

    #[test]
    fn test_scan_text_fails_without_consuming() {
        let mut scanner = Scanner::new(";x", SPECIALS);
        assert_eq!(scanner.scan_text(|c| c == ';'), None);
        assert_eq!(scanner.position(), 0);
    }

    #[test]
    fn test_scan_special_rejects_ordinary_char() {
        let mut scanner = Scanner::new("a", SPECIALS);
        assert_eq!(scanner.scan_special(), None);
        assert_eq!(scanner.position(), 0);
    }

    #[test]
    fn test_scan_text_enclosed() {
        let mut scanner = Scanner::new("\"hello world\" rest", SPECIALS);
        let text = scanner.scan_text_enclosed('"', '"', |c| c == '"' || c == '\\');
        assert_eq!(text, Some("hello world"));
        scanner.trim_whitespace();
        assert_eq!(scanner.scan_atom(), Some("rest"));
    }

    #[test]
    fn test_scan_text_enclosed_empty_interior() {
        let mut scanner = Scanner::new("\"\"", SPECIALS);
        let text = scanner.scan_text_enclosed('"', '"', |c| c == '"' || c == '\\');
        assert_eq!(text, Some(""));
        assert!(scanner.is_at_end());
    }

    #[test]
    fn test_scan_text_enclosed_restores_on_failure() {
        let mut scanner = Scanner::new("\"unterminated", SPECIALS);
        let text = scanner.scan_text_enclosed('"', '"', |c| c == '"' || c == '\\');
        assert_eq!(text, None);
        assert_eq!(scanner.position(), 0);
    }

    #[test]
    fn test_trim_whitespace() {
        let mut scanner = Scanner::new("  \t x", SPECIALS);
        scanner.trim_whitespace();
        assert_eq!(scanner.position(), 4);
    }

    #[test]
    fn test_with_range() {
        let mut scanner = Scanner::with_range("abc;def", SPECIALS, 4, 6);
        assert_eq!(scanner.scan_atom(), Some("de"));
        assert!(scanner.is_at_end());
    }

    #[test]
    fn test_atom_allows_non_ascii() {
        let mut scanner = Scanner::new("Grüße;", SPECIALS);
        assert_eq!(scanner.scan_atom(), Some("Grüße"));
    }
}
