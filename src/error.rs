use thiserror::Error;

use crate::huffman::Symbol;

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("no tree built: cannot process non-empty content with an empty alphabet")]
    EmptyAlphabet,
    #[error("symbol {symbol:#04x} ('{}') not in current code table", as_char(.symbol))]
    SymbolNotInTable { symbol: Symbol },
    #[error("invalid bit symbol {found:?} at position {position}")]
    InvalidBitSymbol { found: char, position: usize },
    #[error("truncated/incomplete code sequence: bitstream of {bits} bits ends inside a code")]
    TruncatedCode { bits: usize },
    #[error("bit at position {position} does not continue any code")]
    UnknownCode { position: usize },
}

fn as_char(symbol: &Symbol) -> char {
    *symbol as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = CodecError::SymbolNotInTable { symbol: b'c' };
        assert_eq!(
            err.to_string(),
            "symbol 0x63 ('c') not in current code table"
        );

        let err = CodecError::InvalidBitSymbol {
            found: '2',
            position: 3,
        };
        assert_eq!(err.to_string(), "invalid bit symbol '2' at position 3");
    }
}
