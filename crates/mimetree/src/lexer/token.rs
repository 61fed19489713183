//! Header field token types.

/// MIME special characters (RFC 2045 `tspecials`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Special {
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `<`
    LeftAngle,
    /// `>`
    RightAngle,
    /// `@`
    At,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `\`
    Backslash,
    /// `"`
    Quote,
    /// `/`
    Slash,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `?`
    Question,
    /// `=`
    Equals,
}

impl Special {
    /// The special alphabet as characters, in the order of the variants.
    pub const CHARS: &'static [char] = &[
        '(', ')', '<', '>', '@', ',', ';', ':', '\\', '"', '/', '[', ']', '?', '=',
    ];

    /// Maps a character to its special, if it is one.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '(' => Self::LeftParen,
            ')' => Self::RightParen,
            '<' => Self::LeftAngle,
            '>' => Self::RightAngle,
            '@' => Self::At,
            ',' => Self::Comma,
            ';' => Self::Semicolon,
            ':' => Self::Colon,
            '\\' => Self::Backslash,
            '"' => Self::Quote,
            '/' => Self::Slash,
            '[' => Self::LeftBracket,
            ']' => Self::RightBracket,
            '?' => Self::Question,
            '=' => Self::Equals,
            _ => return None,
        })
    }

    /// Returns the character for this special.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::LeftParen => '(',
            Self::RightParen => ')',
            Self::LeftAngle => '<',
            Self::RightAngle => '>',
            Self::At => '@',
            Self::Comma => ',',
            Self::Semicolon => ';',
            Self::Colon => ':',
            Self::Backslash => '\\',
            Self::Quote => '"',
            Self::Slash => '/',
            Self::LeftBracket => '[',
            Self::RightBracket => ']',
            Self::Question => '?',
            Self::Equals => '=',
        }
    }
}

/// Token types produced by the header field lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Quoted string, without the enclosing quotes.
    QuotedString(&'a str),
    /// Atom (RFC 2045 `token`).
    Atom(&'a str),
    /// Single special character.
    Special(Special),
}
