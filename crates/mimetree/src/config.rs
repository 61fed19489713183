//! Parser limits and serialization options.

/// Default maximum multipart nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Line break convention used when serializing a [`Mime`](crate::Mime) tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\r\n` for every line break.
    #[default]
    Crlf,
    /// Bare `\n` for header lines and the header/body separator, `\r\n` on
    /// both sides of boundary delimiter lines.
    Mixed,
}

impl LineEnding {
    /// Line break between header lines and folded parameters.
    #[must_use]
    pub const fn header_break(self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Mixed => "\n",
        }
    }

    /// Line break around boundary delimiter lines.
    #[must_use]
    pub const fn boundary_break(self) -> &'static str {
        "\r\n"
    }
}

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum multipart nesting depth. The top-level part is depth 0.
    pub max_depth: usize,
    /// Maximum message size in bytes, if any.
    pub max_message_size: Option<usize>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_message_size: None,
        }
    }
}

impl ParserConfig {
    /// Creates a configuration builder.
    #[must_use]
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::new()
    }
}

/// Builder for parser configuration.
#[derive(Debug, Clone, Default)]
pub struct ParserConfigBuilder {
    config: ParserConfig,
}

impl ParserConfigBuilder {
    /// Creates a new builder with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum multipart nesting depth.
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Sets the maximum message size in bytes.
    #[must_use]
    pub const fn max_message_size(mut self, bytes: usize) -> Self {
        self.config.max_message_size = Some(bytes);
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ParserConfig {
        self.config
    }
}
