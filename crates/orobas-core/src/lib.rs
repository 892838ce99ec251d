//! # Orobas Core
//!
//! Core traits and types for the Orobas decompression library.
//!
//! Orobas is named after the 55th demon of the Ars Goetia, who gives true
//! answers of things past - just as decompression recovers the original
//! form of transformed data.
//!
//! ## Contents
//!
//! - [`Decompressor`] - decode a complete compressed buffer in one call
//! - [`Error`] / [`Result`] - the failure surface shared by decoders
//!
//! ## Example
//!
//! ```ignore
//! use orobas_core::Decompressor;
//! use orobas_deflate::DeflateDecompressor;
//!
//! let codec = DeflateDecompressor::new();
//! let original = codec.decompress(&compressed)?;
//! ```

pub mod error;
pub mod traits;

pub use error::{Error, Result};
pub use traits::Decompressor;
