//! DEFLATE decompression (RFC 1951).

use orobas_huffman::{decode_one, BitReader};
use tracing::debug;

use crate::block::{
    self, BlockType, DistanceTable, LitLenTable,
};
use crate::copy::copy_from_before;
use crate::error::DecompressError;

/// End-of-block symbol in the literal/length alphabet.
const END_OF_BLOCK: u16 = 256;

/// Largest literal/length symbol.
const MAX_LIT_SYMBOL: u16 = 285;

/// Match length of the dedicated symbol 285.
const MAX_MATCH_LEN: usize = 258;

/// How many extra bits refine a length or distance code, and the value the
/// extra bits count up from.
#[derive(Debug, Clone, Copy)]
struct LengthInfo {
    extra_bits: u8,
    base: u16,
}

const fn li(extra_bits: u8, base: u16) -> LengthInfo {
    LengthInfo { extra_bits, base }
}

/// Length codes 257-284 (RFC 1951 section 3.2.5). Symbol 285 is handled
/// separately as an exact 258.
#[rustfmt::skip]
const LENGTH_INFOS: [LengthInfo; 28] = [
    li(0, 3),  li(0, 4),  li(0, 5),   li(0, 6),   li(0, 7),   li(0, 8),   li(0, 9),
    li(0, 10), li(1, 11), li(1, 13),  li(1, 15),  li(1, 17),  li(2, 19),  li(2, 23),
    li(2, 27), li(2, 31), li(3, 35),  li(3, 43),  li(3, 51),  li(3, 59),  li(4, 67),
    li(4, 83), li(4, 99), li(4, 115), li(5, 131), li(5, 163), li(5, 195), li(5, 227),
];

/// Distance codes 0-29 (RFC 1951 section 3.2.5).
#[rustfmt::skip]
const DISTANCE_INFOS: [LengthInfo; 30] = [
    li(0, 1),     li(0, 2),     li(0, 3),      li(0, 4),      li(1, 5),
    li(1, 7),     li(2, 9),     li(2, 13),     li(3, 17),     li(3, 25),
    li(4, 33),    li(4, 49),    li(5, 65),     li(5, 97),     li(6, 129),
    li(6, 193),   li(7, 257),   li(7, 385),    li(8, 513),    li(8, 769),
    li(9, 1025),  li(9, 1537),  li(10, 2049),  li(10, 3073),  li(11, 4097),
    li(11, 6145), li(12, 8193), li(12, 12289), li(13, 16385), li(13, 24577),
];

/// Decompress a complete DEFLATE stream from `src` into `dst`.
///
/// `dst` is caller-sized; on success the returned byte count is the exact
/// plaintext size. On error the contents of `dst` are unspecified.
///
/// # Arguments
/// * `src` - the full compressed buffer
/// * `dst` - output buffer, at least as large as the plaintext
///
/// # Returns
/// Number of bytes written to `dst`.
pub fn decompress(src: &[u8], dst: &mut [u8]) -> Result<usize, DecompressError> {
    let mut reader = BitReader::new(src);
    let mut written = 0usize;

    loop {
        let header = block::read_header(&mut reader)?;
        debug!(
            "block: {:?}, final: {}, dst at {}",
            header.block_type, header.final_block, written
        );

        match header.block_type {
            BlockType::Stored => stored_block(&mut reader, dst, &mut written)?,
            BlockType::FixedHuffman => {
                let literal = block::fixed_literal_table()?;
                let distance = block::fixed_distance_table()?;
                compressed_block(&mut reader, dst, &mut written, &literal, &distance)?;
            }
            BlockType::DynamicHuffman => {
                let (literal, distance) = block::read_dynamic_tables(&mut reader)?;
                compressed_block(&mut reader, dst, &mut written, &literal, &distance)?;
            }
        }

        if header.final_block {
            break;
        }
    }

    Ok(written)
}

/// Copy a stored block (BTYPE 00): byte-align, check `LEN`/`NLEN`, copy.
fn stored_block(
    reader: &mut BitReader<'_>,
    dst: &mut [u8],
    written: &mut usize,
) -> Result<(), DecompressError> {
    reader.consume_to_byte_boundary();

    let len = reader.pop_u16().ok_or(DecompressError::SrcTooSmall)?;
    let nlen = reader.pop_u16().ok_or(DecompressError::SrcTooSmall)?;
    if len != !nlen {
        return Err(DecompressError::NoCompressionLenMismatch);
    }

    let len = usize::from(len);
    if reader.len() < len * 8 {
        return Err(DecompressError::SrcTooSmall);
    }
    let avail = dst.len() - *written;
    if len > avail {
        // keep the plaintext prefix that fits
        dst[*written..].copy_from_slice(&reader.as_bytes()[..avail]);
        *written = dst.len();
        return Err(DecompressError::DstTooSmall);
    }

    dst[*written..*written + len].copy_from_slice(&reader.as_bytes()[..len]);
    reader.consume(len * 8);
    *written += len;
    Ok(())
}

/// Run the literal/length/distance loop until the end-of-block symbol.
fn compressed_block(
    reader: &mut BitReader<'_>,
    dst: &mut [u8],
    written: &mut usize,
    literal: &LitLenTable,
    distance: &DistanceTable,
) -> Result<(), DecompressError> {
    loop {
        let decoded = decode_one(literal, reader).ok_or(DecompressError::InvalidLitOrLen)?;
        reader.consume(usize::from(decoded.bitsize));
        let symbol = decoded.symbol;

        if symbol < END_OF_BLOCK {
            if *written == dst.len() {
                return Err(DecompressError::DstTooSmall);
            }
            dst[*written] = symbol as u8;
            *written += 1;
        } else if symbol == END_OF_BLOCK {
            return Ok(());
        } else if symbol <= MAX_LIT_SYMBOL {
            let len = match_length(reader, symbol)?;
            let dist = match_distance(reader, distance)?;

            if dist > *written {
                return Err(DecompressError::InvalidDistance);
            }
            let avail = dst.len() - *written;
            if len > avail {
                // keep the plaintext prefix that fits
                copy_from_before(dst, *written, dist, avail);
                *written = dst.len();
                return Err(DecompressError::DstTooSmall);
            }

            copy_from_before(dst, *written, dist, len);
            *written += len;
        } else {
            return Err(DecompressError::InvalidLitOrLen);
        }
    }
}

/// Resolve a length symbol in `257..=285` to a match length in `3..=258`.
fn match_length(reader: &mut BitReader<'_>, symbol: u16) -> Result<usize, DecompressError> {
    if symbol == MAX_LIT_SYMBOL {
        return Ok(MAX_MATCH_LEN);
    }
    let info = LENGTH_INFOS[usize::from(symbol - 257)];
    let extra = reader
        .pop_bits(info.extra_bits)
        .ok_or(DecompressError::InvalidLitOrLen)?;
    Ok(usize::from(info.base) + usize::from(extra))
}

/// Decode a distance code and resolve it to a distance in `1..=32768`.
fn match_distance(
    reader: &mut BitReader<'_>,
    distance: &DistanceTable,
) -> Result<usize, DecompressError> {
    let decoded = decode_one(distance, reader).ok_or(DecompressError::InvalidDistance)?;
    reader.consume(usize::from(decoded.bitsize));

    // the fixed table carries the two reserved 30/31 symbols
    if usize::from(decoded.symbol) >= DISTANCE_INFOS.len() {
        return Err(DecompressError::InvalidDistance);
    }

    let info = DISTANCE_INFOS[usize::from(decoded.symbol)];
    let extra = reader
        .pop_bits(info.extra_bits)
        .ok_or(DecompressError::InvalidDistance)?;
    Ok(usize::from(info.base) + usize::from(extra))
}
