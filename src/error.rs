//! Error types and handling for postal-variants.

/// Result type alias for postal-variants operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for postal-variants operations.
///
/// The normalization and variant-generation pipeline itself is total and
/// never fails; errors only arise at the gazetteer boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The external matcher failed to process a token sequence
    #[error("Matcher error: {message}")]
    MatcherError {
        /// Error message from the matcher
        message: String,
    },

    /// A hierarchy level integer from the matcher is not a known level
    #[error("Unknown hierarchy level: {value}")]
    InvalidLevel {
        /// The integer that failed to convert
        value: i32,
    },
}

impl Error {
    /// Create a new matcher error
    pub fn matcher(message: impl Into<String>) -> Self {
        Self::MatcherError {
            message: message.into(),
        }
    }

    /// Create a new invalid-level error
    pub fn invalid_level(value: i32) -> Self {
        Self::InvalidLevel { value }
    }
}
