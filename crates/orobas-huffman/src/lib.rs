//! # Orobas Huffman
//!
//! Canonical Huffman code tables with fast prefix-search decoding.
//!
//! The centerpiece is [`Table`], which can be built four ways - from symbol
//! frequencies, from raw symbol data, from an explicit code-symbol listing,
//! or from a symbol-to-bitsize schedule - and always ends up in the
//! "DEFLATE" canonical form of RFC 1951 section 3.2.2:
//!
//! * All codes of a given bit length have lexicographically consecutive
//!   values, in the same order as the symbols they represent;
//! * Shorter codes lexicographically precede longer codes.
//!
//! Canonical form makes decoding a search over at most one table entry per
//! distinct code length: [`Table::find`] jumps over whole equal-length runs
//! using precomputed skip counts, and [`decode_one`] resumes that search as
//! bits arrive.
//!
//! [`BitReader`] supplies bits in DEFLATE order: within a byte the
//! least-significant bit is consumed first, multi-bit integer fields are
//! packed LSB-first, and Huffman codes accumulate MSB-first into their code
//! value. The two rules both follow from "earliest bit in the stream sits in
//! the lowest position"; they differ only in how the consumer shifts that
//! position into its result.
//!
//! ## Example
//!
//! ```
//! use orobas_huffman::Table;
//!
//! let table: Table<char> =
//!     Table::from_frequencies([('e', 100), ('i', 40), ('n', 20)], None).unwrap();
//! ```

pub mod bit;
pub mod bits;
pub mod code;
pub mod decode;
pub mod encoding;
pub mod error;
mod node;
pub mod symbol;
pub mod table;

pub use bit::Bit;
pub use bits::BitReader;
pub use code::Code;
pub use decode::{decode, decode_one, Decoded};
pub use encoding::Encoding;
pub use error::{Result, TableError};
pub use symbol::{IndexedSymbol, Symbol, SymbolRange};
pub use table::Table;
