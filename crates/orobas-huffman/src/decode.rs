//! Decoding a bit stream against a code table.

use crate::bits::BitReader;
use crate::code::Code;
use crate::symbol::Symbol;
use crate::table::Table;

/// A successfully decoded symbol and the number of bits its code occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded<S> {
    pub symbol: S,
    pub bitsize: u8,
}

/// Decode a single symbol from the front of `reader`.
///
/// Bits are accumulated into a candidate code, most-significant first, and
/// the table is probed after each bit; the probe resumes where the previous
/// one stopped, so each equal-bitsize run is visited at most once.
///
/// The reader is *not* advanced - on success the caller consumes
/// [`Decoded::bitsize`] bits.
///
/// Returns `None` when the stream ends mid-code or the candidate grows past
/// the longest code in the table; either way the input is not decodable.
pub fn decode_one<S: Symbol, const N: usize>(
    table: &Table<S, N>,
    reader: &BitReader<'_>,
) -> Option<Decoded<S>> {
    let mut current = Code::default();
    let mut pos = 0;

    for i in 0..reader.len() {
        current.pad_right(reader.bit(i));

        match table.find(current, pos) {
            Ok(index) => {
                let encoding = table.get(index)?;
                return Some(Decoded {
                    symbol: encoding.symbol,
                    bitsize: current.bitsize(),
                });
            }
            Err(resume) if resume == table.len() => return None,
            Err(resume) => pos = resume,
        }
    }

    None
}

/// Decode symbols from `reader` until it is exhausted or a code is not
/// found, consuming the decoded bits.
///
/// Trailing bits that do not form a complete code are left unconsumed.
pub fn decode<S: Symbol, const N: usize>(table: &Table<S, N>, reader: &mut BitReader<'_>) -> Vec<S> {
    let mut output = Vec::new();
    while let Some(decoded) = decode_one(table, reader) {
        reader.consume(usize::from(decoded.bitsize));
        output.push(decoded.symbol);
    }
    output
}
