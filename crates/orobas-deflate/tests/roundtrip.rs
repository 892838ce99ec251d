//! Round-trips against a reference DEFLATE encoder.

use std::io::Write;

use orobas_deflate::decompress;
use proptest::prelude::*;

fn reference_deflate(data: &[u8], level: u32) -> Vec<u8> {
    let mut encoder =
        flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::new(level));
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn roundtrip(data: &[u8], level: u32) {
    let compressed = reference_deflate(data, level);

    let mut output = vec![0u8; data.len()];
    let written = decompress(&compressed, &mut output)
        .unwrap_or_else(|err| panic!("decompression failed at level {level}: {err}"));

    assert_eq!(written, data.len());
    assert_eq!(output, data);
}

#[test]
fn test_text_all_levels() {
    let input = b"The quick brown fox jumps over the lazy dog. \
                  Pack my box with five dozen liquor jugs.";
    // level 0 emits stored blocks, low levels fixed, high levels dynamic
    for level in 0..=9 {
        roundtrip(input, level);
    }
}

#[test]
fn test_repetitive_data_forces_matches() {
    let input: Vec<u8> = b"abcdefgh".repeat(512);
    for level in [1, 6, 9] {
        roundtrip(&input, level);
    }
}

#[test]
fn test_long_runs_force_max_length_matches() {
    let input = vec![0u8; 100_000];
    roundtrip(&input, 9);
}

#[test]
fn test_incompressible_data() {
    // a fixed pseudo-random pattern the encoder cannot shrink
    let input: Vec<u8> = (0..4096u32)
        .map(|i| (i.wrapping_mul(2654435761) >> 24) as u8)
        .collect();
    for level in [0, 6] {
        roundtrip(&input, level);
    }
}

#[test]
fn test_empty_input() {
    roundtrip(b"", 6);
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Property: any stream a reference encoder produces decompresses back
    /// to the original plaintext, byte for byte.
    #[test]
    fn prop_reference_streams_roundtrip(
        data in prop::collection::vec(any::<u8>(), 0..4096),
        level in 0u32..=9,
    ) {
        let compressed = reference_deflate(&data, level);

        let mut output = vec![0u8; data.len()];
        let written = decompress(&compressed, &mut output).unwrap();

        prop_assert_eq!(written, data.len());
        prop_assert_eq!(output, data);
    }

    /// Property: the write cursor never passes a too-small destination, and
    /// the bytes that fit match the plaintext prefix.
    #[test]
    fn prop_short_destination_fails_cleanly(
        data in prop::collection::vec(any::<u8>(), 2..1024),
    ) {
        let compressed = reference_deflate(&data, 6);

        let mut output = vec![0u8; data.len() - 1];
        let result = decompress(&compressed, &mut output);

        prop_assert_eq!(result, Err(orobas_deflate::DecompressError::DstTooSmall));
        prop_assert_eq!(output, data[..data.len() - 1].to_vec());
    }
}
