use std::fmt;

use crate::codec::compression_ratio;
use crate::huffman::{CodeTable, FreqTable, Symbol, entropy_from_freq};

/// Renders the code table as a two-column listing, quoting the space symbol.
///
/// ASCII symbols, control bytes included, are printed verbatim. Bytes above
/// 0x7f are fragments of multi-byte characters and are printed as hex.
pub fn render_code_table(table: &CodeTable) -> String {
    let mut out = String::from("Char | Code\n-------------\n");
    for (&byte, code) in table {
        if byte == b' ' {
            out.push_str(&format!("' '  | {}\n", code));
        } else if byte.is_ascii() {
            out.push_str(&format!(" {}   | {}\n", byte as char, code));
        } else {
            out.push_str(&format!("{:#04x} | {}\n", byte, code));
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompressionReport {
    pub original_bits: usize,
    pub compressed_bits: usize,
    pub ratio: f64,
    pub entropy: f64,
}

impl CompressionReport {
    pub fn new(original: &[Symbol], encoded: &str, freq: &FreqTable) -> Self {
        CompressionReport {
            original_bits: original.len() * 8,
            compressed_bits: encoded.len(),
            ratio: compression_ratio(original, encoded),
            entropy: entropy_from_freq(freq),
        }
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Original size:    {} bits", self.original_bits)?;
        writeln!(f, "Compressed size:  {} bits", self.compressed_bits)?;
        writeln!(f, "Compression rate: {:.2} %", self.ratio)?;
        write!(f, "Entropy:          {:.2} bits/symbol", self.entropy)
    }
}
