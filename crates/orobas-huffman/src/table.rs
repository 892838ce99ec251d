//! Huffman code table.

use std::fmt;

use smallvec::SmallVec;

use crate::bit::Bit;
use crate::code::Code;
use crate::encoding::Encoding;
use crate::error::{Result, TableError};
use crate::node::TableNode;
use crate::symbol::{IndexedSymbol, Symbol, SymbolRange};

/// Huffman code table.
///
/// Determines the Huffman code for a collection of symbols and supports the
/// prefix search used during decoding.
///
/// `N` is the upper bound for the alphabet size. When it is non-zero the
/// nodes are stored inline without heap allocation, which suits alphabets
/// whose size is a compile-time constant (the DEFLATE literal/length
/// alphabet is 288, distance 32, code-length 19). With the default `N = 0`
/// storage lives on the heap.
///
/// Whichever constructor is used, the finished table is in DEFLATE canonical
/// form and iterates its encodings sorted by `(bitsize, symbol)`:
///
/// * All codes of a given bit length have lexicographically consecutive
///   values, in the same order as the symbols they represent;
/// * Shorter codes lexicographically precede longer codes.
#[derive(Debug, Clone)]
pub struct Table<S: Symbol, const N: usize = 0> {
    nodes: SmallVec<[TableNode<S>; N]>,
}

impl<S: Symbol, const N: usize> Table<S, N> {
    /// Constructs a table from a symbol-frequency mapping.
    ///
    /// An end-of-transmission symbol, if supplied, participates as if its
    /// frequency were 1. It must not also be a symbol of `frequencies`.
    ///
    /// # Arguments
    /// * `frequencies` - `(symbol, count)` pairs; counts must be positive
    /// * `eot` - optional end-of-transmission symbol
    pub fn from_frequencies<I>(frequencies: I, eot: Option<S>) -> Result<Self>
    where
        I: IntoIterator<Item = (S, usize)>,
    {
        let mut nodes = SmallVec::new();
        if let Some(symbol) = eot {
            nodes.push(TableNode::leaf(symbol, 1));
        }
        for (symbol, frequency) in frequencies {
            debug_assert!(frequency > 0, "the frequency for a symbol must be positive");
            nodes.push(TableNode::leaf(symbol, frequency));
        }

        let mut table = Table { nodes };
        table.check_unique_symbols()?;
        table.construct_from_leaves();
        table.canonicalize()?;
        Ok(table)
    }

    /// Constructs a table from a sequence of symbols, using each symbol's
    /// occurrence count as its frequency.
    pub fn from_data<I>(data: I, eot: Option<S>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        // insertion-sorted counting keeps the leaf set ordered by symbol
        let mut counts: Vec<(S, usize)> = Vec::new();
        for symbol in data {
            match counts.binary_search_by(|(s, _)| s.cmp(&symbol)) {
                Ok(i) => counts[i].1 += 1,
                Err(i) => counts.insert(i, (symbol, 1)),
            }
        }
        Self::from_frequencies(counts, eot)
    }

    /// Constructs a table from an explicit `(code, symbol)` listing.
    ///
    /// The listing must already be in DEFLATE canonical form, in ascending
    /// `(bitsize, symbol)` order. Huffman construction and canonicalization
    /// are skipped; only the skip fields are computed.
    pub fn from_code_mapping<I>(map: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Code, S)>,
    {
        let mut nodes: SmallVec<[TableNode<S>; N]> = SmallVec::new();
        for (code, symbol) in map {
            nodes.push(TableNode::with_code(symbol, code));
        }

        for pair in nodes.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if b.bitsize() == a.bitsize() {
                if b.value() == a.value() {
                    return Err(TableError::DuplicateCode);
                }
                // within one bit length, values are consecutive and follow
                // symbol order
                if b.value() != a.value() + 1 || b.symbol() <= a.symbol() {
                    return Err(TableError::NotCanonical);
                }
            } else {
                if b.bitsize() < a.bitsize() {
                    return Err(TableError::NotCanonical);
                }
                // crossing a bit-length boundary must keep prefix-freeness
                let min_value = (a.value() + 1) << (b.bitsize() - a.bitsize());
                if b.value() < min_value {
                    return Err(TableError::NotCanonical);
                }
            }
        }
        if nodes.iter().any(|n| n.bitsize() == 0) {
            return Err(TableError::NotCanonical);
        }

        let mut table = Table { nodes };
        table.check_unique_symbols()?;
        table.set_skip_fields();
        Ok(table)
    }

    /// Returns an iterator over the encodings, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Encoding<S>> {
        self.nodes.iter().map(|n| &n.encoding)
    }

    /// Number of encodings in the table.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the table holds no encodings.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The encoding at `index`, counting in canonical order.
    pub fn get(&self, index: usize) -> Option<&Encoding<S>> {
        self.nodes.get(index).map(|n| &n.encoding)
    }

    /// The largest code bitsize in the table.
    pub fn max_bitsize(&self) -> Option<u8> {
        self.nodes.last().map(|n| n.bitsize())
    }

    /// Finds the element with code `code`, searching from `start`.
    ///
    /// Elements are sorted by code bitsize, and each bitsize forms one
    /// contiguous run of consecutive values, so the search jumps whole runs
    /// using the precomputed skip counts.
    ///
    /// # Returns
    /// `Ok(index)` of the element whose code equals `code`, or `Err(index)`
    /// of the earliest element with a larger bitsize - `Err(self.len())`
    /// when no such element exists. The error index is where a caller should
    /// resume once the candidate code has grown by a bit; `Err(self.len())`
    /// means the candidate exceeds every code in the table and the input is
    /// not decodable against it.
    pub fn find(&self, code: Code, start: usize) -> std::result::Result<usize, usize> {
        let mut pos = start;
        while let Some(node) = self.nodes.get(pos) {
            if node.bitsize() > code.bitsize() {
                break;
            }
            if node.bitsize() == code.bitsize() && code.value() >= node.value() {
                let dist = (code.value() - node.value()) as usize;
                if dist < node.skip {
                    return Ok(pos + dist);
                }
            }
            pos += node.skip;
        }
        Err(pos)
    }

    /// Reject inputs that mention the same symbol twice.
    fn check_unique_symbols(&self) -> Result<()> {
        let mut symbols: Vec<S> = self.nodes.iter().map(|n| n.symbol()).collect();
        symbols.sort_unstable();
        if symbols.windows(2).any(|w| w[0] == w[1]) {
            return Err(TableError::DuplicateSymbol);
        }
        Ok(())
    }

    /// In-place Huffman construction over leaf nodes carrying frequencies.
    ///
    /// Repeatedly joins the subtree at the head of storage with the adjacent
    /// one, then rotates the merged subtree right to its frequency-ordered
    /// position. Terminates when one subtree spans the whole storage, at
    /// which point every leaf holds a code of the correct bitsize (values
    /// are made canonical afterwards).
    fn construct_from_leaves(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        if self.nodes.len() == 1 {
            self.nodes[0].encoding.code = Code::new(1, 0);
            return;
        }

        let nodes = &mut self.nodes[..];
        nodes.sort_unstable_by_key(|n| n.build_key());

        while nodes[0].node_size != nodes.len() {
            join_adjacent(nodes);

            let lower = nodes[0].node_size;
            let mut upper = lower;
            while upper < nodes.len() && nodes[upper].frequency <= nodes[0].frequency {
                upper += nodes[upper].node_size;
            }

            // re-sort after creating a new internal node
            nodes[..upper].rotate_left(lower);
        }
    }

    /// Update code values to DEFLATE canonical form.
    ///
    /// Uses the RFC 1951 section 3.2.2 derivation: count codes per bit
    /// length, derive the starting code of each length, then assign
    /// consecutive values in `(bitsize, symbol)` order.
    fn canonicalize(&mut self) -> Result<()> {
        self.nodes
            .sort_unstable_by_key(|n| (n.bitsize(), n.symbol()));

        let max_bits = match self.nodes.last() {
            Some(node) => node.bitsize(),
            None => return Ok(()),
        };
        debug_assert!(
            self.nodes.iter().all(|n| n.bitsize() > 0),
            "zero-bitsize entries cannot be canonicalized"
        );

        let mut bl_count = vec![0u64; max_bits as usize + 1];
        for node in &self.nodes {
            bl_count[node.bitsize() as usize] += 1;
        }

        let mut kraft = 0u128;
        for (bits, &count) in bl_count.iter().enumerate().skip(1) {
            kraft += u128::from(count) << (max_bits as usize - bits);
        }
        if kraft > 1u128 << max_bits {
            return Err(TableError::Oversubscribed);
        }

        let mut next_code = vec![0u64; max_bits as usize + 1];
        let mut code = 0u64;
        for bits in 1..=max_bits as usize {
            code = (code + bl_count[bits - 1]) << 1;
            next_code[bits] = code;
        }

        for node in &mut self.nodes {
            let bits = node.bitsize() as usize;
            node.encoding.code = Code::new(node.bitsize(), next_code[bits]);
            next_code[bits] += 1;
        }

        self.set_skip_fields();
        Ok(())
    }

    /// Walk the table in reverse, recording for each entry the run length of
    /// its bitsize group from that entry onwards.
    fn set_skip_fields(&mut self) {
        let mut prev: Option<(u8, usize)> = None;
        for node in self.nodes.iter_mut().rev() {
            let skip = match prev {
                Some((bitsize, skip)) if bitsize == node.bitsize() => skip + 1,
                _ => 1,
            };
            node.skip = skip;
            prev = Some((node.bitsize(), skip));
        }
    }
}

impl<S: IndexedSymbol, const N: usize> Table<S, N> {
    /// Constructs a table from a symbol-to-bitsize schedule.
    ///
    /// Each entry assigns one bitsize to an inclusive range of symbols;
    /// zero-bitsize ranges mark absent symbols and are omitted. Code values
    /// are then assigned by canonicalization.
    ///
    /// # Arguments
    /// * `schedule` - `(symbol range, bitsize)` pairs
    pub fn from_bitsizes<I>(schedule: I) -> Result<Self>
    where
        I: IntoIterator<Item = (SymbolRange<S>, u8)>,
    {
        let mut nodes: SmallVec<[TableNode<S>; N]> = SmallVec::new();
        for (range, bitsize) in schedule {
            if bitsize == 0 {
                continue;
            }
            for symbol in range.iter() {
                nodes.push(TableNode::with_code(symbol, Code::new(bitsize, 0)));
            }
        }

        let mut table = Table { nodes };
        table.check_unique_symbols()?;
        table.canonicalize()?;
        Ok(table)
    }
}

/// Join the subtree at the head of `nodes` with the next adjacent subtree.
///
/// Left pads every code of the left subtree with a 0 and every code of the
/// right subtree with a 1, then folds the right subtree's frequency and size
/// into the head.
fn join_adjacent<S: Symbol>(nodes: &mut [TableNode<S>]) {
    let j = nodes[0].node_size;
    let k = j + nodes[j].node_size;
    debug_assert!(k <= nodes.len());

    for node in &mut nodes[..j] {
        node.encoding.code.pad_left(Bit::ZERO);
    }
    for node in &mut nodes[j..k] {
        node.encoding.code.pad_left(Bit::ONE);
    }

    let (frequency, node_size) = (nodes[j].frequency, nodes[j].node_size);
    nodes[0].frequency += frequency;
    nodes[0].node_size += node_size;
}

impl<S: Symbol, const N: usize, const M: usize> PartialEq<Table<S, M>> for Table<S, N> {
    fn eq(&self, other: &Table<S, M>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<S: Symbol + fmt::Display, const N: usize> fmt::Display for Table<S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bits\tCode\tValue\tSymbol")?;
        for encoding in self.iter() {
            writeln!(f, "{encoding}")?;
        }
        Ok(())
    }
}
