//! Codec wrapper around the raw decompression entry point.

use orobas_core::{Decompressor, Error, Result};

use crate::error::DecompressError;
use crate::inflate::decompress;

/// Raw DEFLATE decompressor.
#[derive(Debug, Clone, Default)]
pub struct DeflateDecompressor;

impl DeflateDecompressor {
    /// Create a new DEFLATE decompressor.
    pub fn new() -> Self {
        Self
    }
}

/// Translate a decompression status into the shared error type.
fn map_status(err: DecompressError, src_len: usize, dst_len: usize) -> Error {
    match err {
        DecompressError::SrcTooSmall => Error::truncated_input(src_len),
        DecompressError::DstTooSmall => Error::output_too_small(dst_len + 1, dst_len),
        other => Error::invalid_stream(other.to_string()),
    }
}

impl Decompressor for DeflateDecompressor {
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        // the plaintext size is not known up front: grow geometrically until
        // the stream fits
        let mut capacity = input.len().saturating_mul(4).max(64);
        loop {
            let mut output = vec![0u8; capacity];
            match decompress(input, &mut output) {
                Ok(written) => {
                    output.truncate(written);
                    return Ok(output);
                }
                Err(DecompressError::DstTooSmall) => {
                    capacity = capacity.saturating_mul(2);
                }
                Err(err) => return Err(map_status(err, input.len(), capacity)),
            }
        }
    }

    fn decompress_to(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        decompress(input, output).map_err(|err| map_status(err, input.len(), output.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn reference_deflate(data: &[u8]) -> Vec<u8> {
        let mut encoder =
            flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_decompress_reference_stream() {
        let input = b"Hello, World! This is a test of DEFLATE decompression.";
        let compressed = reference_deflate(input);

        let output = DeflateDecompressor::new().decompress(&compressed).unwrap();
        assert_eq!(output.as_slice(), input);
    }

    #[test]
    fn test_decompress_repetitive_stream() {
        let input = b"AAAAAAAAAAAAAAAAAAAA";
        let compressed = reference_deflate(input);

        let output = DeflateDecompressor::new().decompress(&compressed).unwrap();
        assert_eq!(output.as_slice(), input);
    }

    #[test]
    fn test_decompress_grows_past_initial_guess() {
        // a short stream expanding far beyond 4x its compressed size
        let input = vec![b'x'; 1 << 16];
        let compressed = reference_deflate(&input);
        assert!(compressed.len() * 4 < input.len());

        let output = DeflateDecompressor::new().decompress(&compressed).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_decompress_to_exact_buffer() {
        let input = b"exact fit";
        let compressed = reference_deflate(input);

        let mut output = vec![0u8; input.len()];
        let written = DeflateDecompressor::new()
            .decompress_to(&compressed, &mut output)
            .unwrap();
        assert_eq!(written, input.len());
        assert_eq!(output.as_slice(), input);
    }

    #[test]
    fn test_decompress_with_size() {
        let input = b"known size";
        let compressed = reference_deflate(input);

        let output = DeflateDecompressor::new()
            .decompress_with_size(&compressed, input.len())
            .unwrap();
        assert_eq!(output.as_slice(), input);
    }

    #[test]
    fn test_corrupted_stream_maps_to_shared_error() {
        let err = DeflateDecompressor::new()
            .decompress(&[0x07, 0xFF])
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_stream");
        assert!(!err.is_sizing());
    }
}
