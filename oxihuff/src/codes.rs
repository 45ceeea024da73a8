//! Code derivation from a Huffman tree.

use crate::frequency::Histogram;
use crate::tree::{HuffmanNode, HuffmanTree};
use oxihuff_core::error::{OxiHuffError, Result};
use std::fmt;
use tracing::{debug, trace};

/// A variable-length code.
///
/// The bits are right-aligned: the first bit of the code is bit
/// `length - 1` of `bits`, the last is bit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    bits: u32,
    length: u8,
}

impl Code {
    /// Create a code from right-aligned bits.
    pub fn new(bits: u32, length: u8) -> Self {
        debug_assert!(length <= 32, "Codes are at most 32 bits");
        debug_assert!(
            length == 32 || bits >> length == 0,
            "Code bits wider than code length"
        );
        Self { bits, length }
    }

    /// The code bits, right-aligned.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Number of bits in the code.
    pub fn length(&self) -> u8 {
        self.length
    }

    /// Append one bit.
    pub fn push(self, bit: bool) -> Self {
        Self::new((self.bits << 1) | u32::from(bit), self.length + 1)
    }

    /// Whether `self` is a prefix of `other` (a code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.length <= other.length && other.bits >> (other.length - self.length) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.length).rev() {
            let bit = (self.bits >> i) & 1;
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

/// Mapping from symbol to code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
    len: usize,
}

impl CodeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            codes: [None; 256],
            len: 0,
        }
    }

    /// Derive the code of every leaf of `tree`.
    ///
    /// A `0` bit selects the left child and a `1` bit the right one. A tree
    /// whose root is a leaf gives its only symbol the one-bit code `0`.
    /// The tree is consumed; its nodes are dropped as the walk unwinds.
    pub fn from_tree(tree: HuffmanTree, max_length: u8) -> Result<Self> {
        let root = tree.into_root();

        let (symbol, depth) = deepest_leaf(&root);
        if depth.max(1) > usize::from(max_length) {
            return Err(OxiHuffError::code_too_long(
                symbol,
                depth.max(1),
                max_length,
            ));
        }

        let mut table = Self::new();
        match root {
            HuffmanNode::Leaf { symbol, .. } => {
                table.insert(symbol, Code::new(0, 1));
            }
            internal => table.assign(internal, Code::new(0, 0)),
        }

        debug!(
            symbols = table.len(),
            min_length = table.min_code_len(),
            max_length = table.max_code_len(),
            "derived code table"
        );
        Ok(table)
    }

    fn assign(&mut self, node: HuffmanNode, prefix: Code) {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                trace!(symbol, code = %prefix, "assigned code");
                self.insert(symbol, prefix);
            }
            HuffmanNode::Internal { left, right, .. } => {
                self.assign(*left, prefix.push(false));
                self.assign(*right, prefix.push(true));
            }
        }
    }

    /// Set the code of `symbol`, returning the previous one.
    pub fn insert(&mut self, symbol: u8, code: Code) -> Option<Code> {
        let previous = self.codes[symbol as usize].replace(code);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// The code of `symbol`, if it has one.
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table holds no code.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over `(symbol, code)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(sym, code)| code.map(|c| (sym as u8, c)))
    }

    /// Length of the shortest code, or 0 for an empty table.
    pub fn min_code_len(&self) -> u8 {
        self.iter().map(|(_, c)| c.length()).min().unwrap_or(0)
    }

    /// Length of the longest code, or 0 for an empty table.
    pub fn max_code_len(&self) -> u8 {
        self.iter().map(|(_, c)| c.length()).max().unwrap_or(0)
    }

    /// Whether no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<Code> = self.iter().map(|(_, c)| c).collect();
        // Sorting by left-aligned value puts a prefix right before the codes it starts
        codes.sort_by_key(|c| (u64::from(c.bits()) << (32 - c.length()), c.length()));
        codes.windows(2).all(|w| !w[0].is_prefix_of(&w[1]))
    }

    /// Number of payload bits needed to encode the input described by
    /// `histogram`.
    pub fn encoded_bit_len(&self, histogram: &Histogram) -> u64 {
        histogram
            .iter()
            .map(|(sym, count)| {
                let length = self.get(sym).map_or(0, |c| u64::from(c.length()));
                count * length
            })
            .sum()
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The leftmost leaf among the deepest ones, with its depth.
fn deepest_leaf(node: &HuffmanNode) -> (u8, usize) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => (*symbol, 0),
        HuffmanNode::Internal { left, right, .. } => {
            let (left_sym, left_depth) = deepest_leaf(left);
            let (right_sym, right_depth) = deepest_leaf(right);
            if right_depth > left_depth {
                (right_sym, right_depth + 1)
            } else {
                (left_sym, left_depth + 1)
            }
        }
    }
}
