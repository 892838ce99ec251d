//! # Orobas
//!
//! DEFLATE (RFC 1951) decompression built on a reusable canonical
//! Huffman-code library.
//!
//! Orobas is named after the 55th demon of the Ars Goetia, who gives true
//! answers of things past - just as decompression recovers the original
//! form of transformed data.
//!
//! ## Crates
//!
//! - [`huffman`] - canonical Huffman code tables and prefix-search decoding
//! - [`deflate`] - the DEFLATE block decoder
//! - [`core`](orobas_core) - shared error types and the [`Decompressor`] trait
//!
//! ## Example
//!
//! ```
//! use orobas::decompress;
//!
//! // a stored block holding "Hi"
//! let src = [0x01, 0x02, 0x00, 0xFD, 0xFF, b'H', b'i'];
//! let mut dst = [0u8; 2];
//! assert_eq!(decompress(&src, &mut dst), Ok(2));
//! assert_eq!(&dst, b"Hi");
//! ```

pub use orobas_core as core;
pub use orobas_deflate as deflate;
pub use orobas_huffman as huffman;

pub use orobas_core::{Decompressor, Error, Result};
pub use orobas_deflate::{decompress, DecompressError, DeflateDecompressor};
