//! Errors reported while decoding compressed data.

use thiserror::Error;

/// Result type alias for decoding operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Ways a decode can fail.
///
/// [`InvalidStream`](Error::InvalidStream) covers everything wrong with the
/// bits themselves - a mangled block header, a code-length schedule no prefix
/// code can satisfy, a back-reference into bytes that were never written.
/// The other two variants are sizing problems: the compressed input stopped
/// before the stream did, or the caller's output buffer cannot hold the
/// plaintext. The distinction matters because sizing problems are worth
/// retrying with a bigger buffer, while a corrupt stream never is.
#[derive(Debug, Error)]
pub enum Error {
    /// The compressed bit stream violates its format.
    #[error("invalid compressed stream: {reason}")]
    InvalidStream { reason: String },

    /// The plaintext does not fit the caller's output buffer.
    #[error("plaintext needs at least {needed} bytes, output buffer holds {capacity}")]
    OutputTooSmall { needed: usize, capacity: usize },

    /// The compressed input ended mid-stream.
    #[error("compressed input truncated after {bytes_read} bytes")]
    TruncatedInput { bytes_read: usize },
}

impl Error {
    /// A malformed bit stream, described by `reason`.
    pub fn invalid_stream(reason: impl Into<String>) -> Self {
        Error::InvalidStream {
            reason: reason.into(),
        }
    }

    /// An output buffer of `capacity` bytes facing at least `needed` bytes
    /// of plaintext.
    pub fn output_too_small(needed: usize, capacity: usize) -> Self {
        Error::OutputTooSmall { needed, capacity }
    }

    /// Compressed input that ran out after `bytes_read` bytes.
    pub fn truncated_input(bytes_read: usize) -> Self {
        Error::TruncatedInput { bytes_read }
    }

    /// Whether the failure is about buffer sizing rather than the stream
    /// content. Retrying a sizing failure with a larger buffer or the rest
    /// of the input can succeed; retrying a corrupt stream cannot.
    pub fn is_sizing(&self) -> bool {
        matches!(
            self,
            Error::OutputTooSmall { .. } | Error::TruncatedInput { .. }
        )
    }

    /// Stable name of the failure class, for logs and counters.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidStream { .. } => "invalid_stream",
            Error::OutputTooSmall { .. } => "output_too_small",
            Error::TruncatedInput { .. } => "truncated_input",
        }
    }
}
