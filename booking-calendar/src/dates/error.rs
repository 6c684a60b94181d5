//! Date normalization error types.

/// Errors from parsing, formatting, or shifting calendar dates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Input string is not a recognised ISO-8601 date or date-time
    #[error("unparseable date: {input:?}")]
    Unparseable { input: String },

    /// Arithmetic left the representable calendar range
    #[error("date out of range")]
    OutOfRange,

    /// Format pattern contains a letter with no meaning
    #[error("unsupported pattern token: {token:?}")]
    Pattern { token: String },
}
