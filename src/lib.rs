//! # huffman_text
//!
//! Frequency-based Huffman coding of byte text into a human-readable
//! bitstream of `'0'`/`'1'` characters, and back.
//!
//! ```rust
//! use huffman_text::Codec;
//!
//! let codec = Codec::from_text(b"abacabad");
//! let bits = codec.encode(b"abacabad")?;
//! assert_eq!(bits, "01001100100111");
//! assert_eq!(codec.decode(&bits)?, b"abacabad");
//! # Ok::<(), huffman_text::CodecError>(())
//! ```

pub mod codec;
pub mod error;
pub mod huffman;
pub mod report;

pub use codec::{Codec, compression_ratio};
pub use error::{CodecError, Result};
pub use huffman::{CodeTable, FreqTable, HuffmanTree, Node, Symbol};
