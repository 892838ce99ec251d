//! Block headers and per-block Huffman table construction.

use orobas_huffman::{decode_one, BitReader, SymbolRange, Table};
use tracing::trace;

use crate::error::DecompressError;

/// Literal/length alphabet table: 286 live symbols plus two reserved.
pub type LitLenTable = Table<u16, 288>;

/// Distance alphabet table: 30 live symbols plus two reserved.
pub type DistanceTable = Table<u8, 32>;

/// Code-length alphabet table for dynamic blocks.
pub type CodeLenTable = Table<u8, 19>;

/// The three DEFLATE block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Stored,
    FixedHuffman,
    DynamicHuffman,
}

/// A parsed 3-bit block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub final_block: bool,
    pub block_type: BlockType,
}

/// Read the `BFINAL` bit and two `BTYPE` bits that begin every block.
pub fn read_header(reader: &mut BitReader<'_>) -> Result<BlockHeader, DecompressError> {
    if reader.len() < 3 {
        return Err(DecompressError::InvalidBlockHeader);
    }

    let final_block = reader.bit(0).is_set();
    let type_bits = u8::from(reader.bit(1)) | (u8::from(reader.bit(2)) << 1);
    let block_type = match type_bits {
        0 => BlockType::Stored,
        1 => BlockType::FixedHuffman,
        2 => BlockType::DynamicHuffman,
        _ => return Err(DecompressError::InvalidBlockHeader),
    };

    reader.consume(3);
    Ok(BlockHeader {
        final_block,
        block_type,
    })
}

/// Fixed literal/length code bitsizes (RFC 1951 section 3.2.6).
///
/// ```text
/// literal/length  bitsize  code
/// ==============  =======  =========================
///   0 - 143       8          0011'0000 - 1011'1111
/// 144 - 255       9        1'1001'0000 - 1'1111'1111
/// 256 - 279       7           000'0000 - 001'0111
/// 280 - 287       8          1100'0000 - 1100'0111
/// ```
pub fn fixed_literal_table() -> Result<LitLenTable, DecompressError> {
    Ok(Table::from_bitsizes([
        (SymbolRange::new(0, 143), 8),
        (SymbolRange::new(144, 255), 9),
        (SymbolRange::new(256, 279), 7),
        (SymbolRange::new(280, 287), 8),
    ])?)
}

/// Fixed distance code bitsizes: all 32 symbols at 5 bits.
pub fn fixed_distance_table() -> Result<DistanceTable, DecompressError> {
    Ok(Table::from_bitsizes([(SymbolRange::new(0, 31), 5)])?)
}

/// Order in which the dynamic header lists code-length alphabet bitsizes.
pub const CODE_LENGTH_ORDER: [u8; 19] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Upper bound of live literal/length symbols.
const MAX_LIT_SYMBOLS: usize = 286;

/// Upper bound of live distance symbols.
const MAX_DIST_SYMBOLS: usize = 30;

/// Parse the dynamic-block preamble and build its two alphabets
/// (RFC 1951 section 3.2.7).
///
/// Reads `HLIT`, `HDIST`, and `HCLEN`, builds the code-length alphabet, then
/// decodes the `HLIT + 257` literal/length bitsizes and `HDIST + 1` distance
/// bitsizes as one run-length-coded sequence:
///
/// * 0-15: a literal bitsize
/// * 16: repeat the previous bitsize 3-6 times (2 extra bits)
/// * 17: repeat zero 3-10 times (3 extra bits)
/// * 18: repeat zero 11-138 times (7 extra bits)
///
/// Any violation - truncated fields, alphabet overruns, a repeat with no
/// previous bitsize, or a schedule no prefix code can satisfy - is
/// `InvalidLitOrLen`.
pub fn read_dynamic_tables(
    reader: &mut BitReader<'_>,
) -> Result<(LitLenTable, DistanceTable), DecompressError> {
    use DecompressError::InvalidLitOrLen;

    let n_lit = reader.pop_bits(5).ok_or(InvalidLitOrLen)? as usize + 257;
    let n_dist = reader.pop_bits(5).ok_or(InvalidLitOrLen)? as usize + 1;
    let n_clen = reader.pop_bits(4).ok_or(InvalidLitOrLen)? as usize + 4;

    if n_lit > MAX_LIT_SYMBOLS || n_dist > MAX_DIST_SYMBOLS {
        return Err(InvalidLitOrLen);
    }
    trace!(
        "dynamic block: {} lit/len symbols, {} distance symbols, {} code-length symbols",
        n_lit,
        n_dist,
        n_clen
    );

    let mut cl_lengths = [0u8; 19];
    for &symbol in CODE_LENGTH_ORDER.iter().take(n_clen) {
        cl_lengths[symbol as usize] = reader.pop_bits(3).ok_or(InvalidLitOrLen)? as u8;
    }

    let cl_table: CodeLenTable = Table::from_bitsizes(
        cl_lengths
            .iter()
            .enumerate()
            .map(|(symbol, &bitsize)| (SymbolRange::single(symbol as u8), bitsize)),
    )?;

    // the two schedules are decoded as one sequence; operator 16 may repeat
    // across the boundary between them
    let total = n_lit + n_dist;
    let mut lengths = [0u8; MAX_LIT_SYMBOLS + MAX_DIST_SYMBOLS];
    let mut i = 0;

    while i < total {
        let decoded = decode_one(&cl_table, reader).ok_or(InvalidLitOrLen)?;
        reader.consume(usize::from(decoded.bitsize));

        match decoded.symbol {
            0..=15 => {
                lengths[i] = decoded.symbol;
                i += 1;
            }
            16 => {
                if i == 0 {
                    return Err(InvalidLitOrLen);
                }
                let count = reader.pop_bits(2).ok_or(InvalidLitOrLen)? as usize + 3;
                if i + count > total {
                    return Err(InvalidLitOrLen);
                }
                let previous = lengths[i - 1];
                lengths[i..i + count].fill(previous);
                i += count;
            }
            17 => {
                let count = reader.pop_bits(3).ok_or(InvalidLitOrLen)? as usize + 3;
                if i + count > total {
                    return Err(InvalidLitOrLen);
                }
                i += count;
            }
            18 => {
                let count = reader.pop_bits(7).ok_or(InvalidLitOrLen)? as usize + 11;
                if i + count > total {
                    return Err(InvalidLitOrLen);
                }
                i += count;
            }
            _ => return Err(InvalidLitOrLen),
        }
    }

    let literal = Table::from_bitsizes(
        lengths[..n_lit]
            .iter()
            .enumerate()
            .map(|(symbol, &bitsize)| (SymbolRange::single(symbol as u16), bitsize)),
    )?;
    let distance = Table::from_bitsizes(
        lengths[n_lit..total]
            .iter()
            .enumerate()
            .map(|(symbol, &bitsize)| (SymbolRange::single(symbol as u8), bitsize)),
    )?;

    Ok((literal, distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_header_needs_three_bits() {
        let mut empty = BitReader::new(&[]);
        assert_eq!(
            read_header(&mut empty),
            Err(DecompressError::InvalidBlockHeader)
        );

        let data = [0b01];
        let mut short = BitReader::new(&data);
        short.consume(6);
        assert_eq!(
            read_header(&mut short),
            Err(DecompressError::InvalidBlockHeader)
        );
    }

    #[test]
    fn test_read_header_rejects_reserved_type() {
        let data = [0b111];
        let mut reader = BitReader::new(&data);
        assert_eq!(
            read_header(&mut reader),
            Err(DecompressError::InvalidBlockHeader)
        );
    }

    #[test]
    fn test_read_header_fixed_not_final() {
        let data = [0b010];
        let mut reader = BitReader::new(&data);
        let header = read_header(&mut reader).unwrap();
        assert!(!header.final_block);
        assert_eq!(header.block_type, BlockType::FixedHuffman);
        assert_eq!(reader.len(), 5);
    }

    #[test]
    fn test_read_header_stored_final() {
        let data = [0b001];
        let mut reader = BitReader::new(&data);
        let header = read_header(&mut reader).unwrap();
        assert!(header.final_block);
        assert_eq!(header.block_type, BlockType::Stored);
    }

    #[test]
    fn test_read_header_dynamic() {
        let data = [0b100];
        let mut reader = BitReader::new(&data);
        let header = read_header(&mut reader).unwrap();
        assert!(!header.final_block);
        assert_eq!(header.block_type, BlockType::DynamicHuffman);
    }

    #[test]
    fn test_fixed_tables_shape() {
        let literal = fixed_literal_table().unwrap();
        assert_eq!(literal.len(), 288);
        assert_eq!(literal.max_bitsize(), Some(9));

        let distance = fixed_distance_table().unwrap();
        assert_eq!(distance.len(), 32);
        assert_eq!(distance.max_bitsize(), Some(5));
    }

    #[test]
    fn test_dynamic_tables_reject_truncated_preamble() {
        // one byte cannot hold HLIT + HDIST + HCLEN
        let data = [0xFF];
        let mut reader = BitReader::new(&data);
        assert_eq!(
            read_dynamic_tables(&mut reader),
            Err(DecompressError::InvalidLitOrLen)
        );
    }
}
