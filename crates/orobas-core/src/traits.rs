//! The decompression interface.

use crate::error::Result;

/// A one-shot decoder for a complete compressed buffer.
///
/// Compressed formats in the DEFLATE family do not declare their plaintext
/// size, so the trait offers three ways to land the output: let the decoder
/// size an owned buffer itself, hand it a preallocated slice, or promise the
/// size up front. Implementations see the whole input at once; feeding a
/// stream in chunks is out of scope for this library.
pub trait Decompressor {
    /// Decode `input` into a freshly allocated buffer.
    ///
    /// Use this when the plaintext size is unknown; the implementation has
    /// to guess a capacity and regrow until the plaintext fits.
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Decode `input` into `output`, returning the number of plaintext
    /// bytes written.
    ///
    /// Fails with [`Error::OutputTooSmall`](crate::Error::OutputTooSmall)
    /// when `output` cannot hold the plaintext.
    fn decompress_to(&self, input: &[u8], output: &mut [u8]) -> Result<usize>;

    /// Decode `input` when the exact plaintext size is known, allocating
    /// once instead of regrowing.
    fn decompress_with_size(&self, input: &[u8], plaintext_size: usize) -> Result<Vec<u8>> {
        let mut output = vec![0u8; plaintext_size];
        let written = self.decompress_to(input, &mut output)?;
        output.truncate(written);
        Ok(output)
    }
}
