//! Error types for table construction.

use thiserror::Error;

/// Result type alias for table construction.
pub type Result<T> = core::result::Result<T, TableError>;

/// Failures while constructing a code table.
///
/// These are programmer errors on user-supplied inputs and runtime errors on
/// wire-derived inputs; a decoder is expected to translate them into its own
/// corrupted-stream status.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// The same symbol appears twice in the input.
    #[error("duplicate symbol in table input")]
    DuplicateSymbol,

    /// The same code appears twice in an explicit code-symbol listing.
    #[error("duplicate code in table input")]
    DuplicateCode,

    /// An explicit code-symbol listing is not in DEFLATE canonical form.
    #[error("table contents are not in canonical form")]
    NotCanonical,

    /// A bitsize schedule assigns more codes of a given length than a prefix
    /// code admits (violates Kraft's inequality).
    #[error("code lengths oversubscribe the alphabet")]
    Oversubscribed,
}
