use std::time::Instant;

use log::{debug, info, trace};

use crate::error::{CodecError, Result};
use crate::huffman::{
    CodeTable, HuffmanTree, Node, Symbol, build_code_table, build_huffman_tree, count_frequencies,
};

/// Holds a Huffman tree and the code table derived from it.
///
/// Both are replaced together on every [`Codec::build`]; `encode` and `decode`
/// borrow the codec immutably, so a rebuild can never overlap with them.
#[derive(Debug, Default)]
pub struct Codec {
    tree: HuffmanTree,
    table: CodeTable,
}

enum DecodeState<'t> {
    AtRoot,
    AtInternalNode(&'t Node),
}

impl Codec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut for `Codec::new()` followed by `build(text)`.
    pub fn from_text(text: &[Symbol]) -> Self {
        let mut codec = Self::new();
        codec.build(text);
        codec
    }

    pub fn build(&mut self, text: &[Symbol]) {
        let freq = count_frequencies(text);
        let tree = build_huffman_tree(&freq);
        let table = build_code_table(&tree);
        info!(
            "Built code table for {} symbols from {} bytes",
            table.len(),
            text.len()
        );
        self.tree = tree;
        self.table = table;
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn code_table_snapshot(&self) -> &CodeTable {
        &self.table
    }

    pub fn encode(&self, text: &[Symbol]) -> Result<String> {
        if text.is_empty() {
            return Ok(String::new());
        }
        if self.tree.is_empty() {
            return Err(CodecError::EmptyAlphabet);
        }

        let mut bits = String::with_capacity(text.len() * 2);
        for &symbol in text {
            let code = self
                .table
                .get(&symbol)
                .ok_or(CodecError::SymbolNotInTable { symbol })?;
            bits.push_str(code);
        }

        debug!("Encoded {} bytes into {} bits", text.len(), bits.len());
        Ok(bits)
    }

    pub fn decode(&self, bits: &str) -> Result<Vec<Symbol>> {
        let Some(root) = self.tree.root() else {
            return if bits.is_empty() {
                Ok(Vec::new())
            } else {
                Err(CodecError::EmptyAlphabet)
            };
        };

        let start_time = Instant::now();
        let mut result = Vec::new();
        let mut state = DecodeState::AtRoot;
        let mut consumed = 0;

        for (position, bit) in bits.chars().enumerate() {
            let go_right = match bit {
                '0' => false,
                '1' => true,
                found => return Err(CodecError::InvalidBitSymbol { found, position }),
            };
            consumed += 1;

            let node = match state {
                DecodeState::AtRoot => root,
                DecodeState::AtInternalNode(node) => node,
            };

            let next = match node {
                // Lone leaf at the root: its only code is "0".
                Node::Leaf { .. } if go_right => {
                    return Err(CodecError::UnknownCode { position });
                }
                Node::Leaf { .. } => node,
                Node::Internal { left, right, .. } => {
                    if go_right {
                        right.as_ref()
                    } else {
                        left.as_ref()
                    }
                }
            };

            state = match next {
                Node::Leaf { byte, .. } => {
                    result.push(*byte);
                    DecodeState::AtRoot
                }
                Node::Internal { .. } => DecodeState::AtInternalNode(next),
            };
        }

        if let DecodeState::AtInternalNode(_) = state {
            return Err(CodecError::TruncatedCode { bits: consumed });
        }

        trace!("Decoded {} bits into {} bytes", consumed, result.len());
        debug!(
            "Bitstream decoding finished in {:.2?}.",
            start_time.elapsed()
        );
        Ok(result)
    }
}

/// Encoded size as a percentage of the original 8-bit-per-symbol size.
///
/// Returns `0.0` for empty `original`.
pub fn compression_ratio(original: &[Symbol], encoded: &str) -> f64 {
    if original.is_empty() {
        return 0.0;
    }
    let original_bits = original.len() as f64 * 8.0;
    encoded.len() as f64 / original_bits * 100.0
}
