//! # Orobas Deflate
//!
//! DEFLATE (RFC 1951) decompression.
//!
//! DEFLATE combines LZ77 back-references with Huffman coding and is the
//! payload format of gzip and zlib streams. This crate decodes raw DEFLATE
//! data - framing and checksums belong to outer layers.
//!
//! The core entry point is [`decompress`], which reads a complete compressed
//! buffer and writes into a caller-sized output buffer:
//!
//! ```
//! use orobas_deflate::decompress;
//!
//! // a stored block holding "Hi"
//! let src = [0x01, 0x02, 0x00, 0xFD, 0xFF, b'H', b'i'];
//! let mut dst = [0u8; 2];
//! assert_eq!(decompress(&src, &mut dst), Ok(2));
//! assert_eq!(&dst, b"Hi");
//! ```
//!
//! [`DeflateDecompressor`] wraps the same machinery in the
//! [`Decompressor`](orobas_core::Decompressor) trait for callers that want
//! owned output buffers.

pub mod block;
pub mod codec;
mod copy;
pub mod error;
pub mod inflate;

pub use codec::DeflateDecompressor;
pub use error::DecompressError;
pub use inflate::decompress;
