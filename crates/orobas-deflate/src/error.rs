//! Decompression error types.

use orobas_huffman::TableError;
use thiserror::Error;

/// Failure statuses of [`decompress`](crate::decompress).
///
/// Every error is final: the contents of the output buffer up to the point
/// of failure are unspecified and callers should discard them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecompressError {
    /// Fewer than 3 bits left for a block header, or reserved block type 3.
    #[error("invalid block header")]
    InvalidBlockHeader,

    /// A stored block's `LEN` field does not match the complement of `NLEN`.
    #[error("stored block length mismatch")]
    NoCompressionLenMismatch,

    /// The input ended inside a stored block.
    #[error("source buffer exhausted")]
    SrcTooSmall,

    /// The output buffer cannot hold the decompressed data.
    #[error("destination buffer exhausted")]
    DstTooSmall,

    /// No Huffman match, a literal/length code above 285, or a malformed
    /// dynamic code-length schedule.
    #[error("invalid literal/length code")]
    InvalidLitOrLen,

    /// A distance code of 30 or 31, or a distance reaching past the start of
    /// the output.
    #[error("invalid distance code")]
    InvalidDistance,
}

/// Wire-derived table failures all mean the same thing to the decoder: the
/// compressed stream described an impossible alphabet.
impl From<TableError> for DecompressError {
    fn from(_: TableError) -> Self {
        DecompressError::InvalidLitOrLen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_errors_collapse_to_invalid_lit_or_len() {
        assert_eq!(
            DecompressError::from(TableError::Oversubscribed),
            DecompressError::InvalidLitOrLen
        );
        assert_eq!(
            DecompressError::from(TableError::DuplicateSymbol),
            DecompressError::InvalidLitOrLen
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            DecompressError::NoCompressionLenMismatch.to_string(),
            "stored block length mismatch"
        );
    }
}
