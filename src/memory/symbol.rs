//! The four-symbol alphabet
//!
//! This module defines [`Symbol`], the atomic value stored in every node of the
//! feed and written to both output streams. Symbols carry no internal structure;
//! the only relation between them is the cyclic order `I → C → F → P → I` used by
//! the protection transform.
//!
//! Loading helpers ([`parse_symbols`], [`render`]) convert between the textual
//! form (`"ICFP"`) and symbol vectors. ASCII whitespace is skipped on input so
//! that files with trailing newlines load cleanly.

use std::fmt;

/// A single alphabet symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Symbol {
    I = 0,
    C = 1,
    F = 2,
    P = 3,
}

impl Symbol {
    /// All symbols in cyclic order
    pub const ALL: [Symbol; 4] = [Symbol::I, Symbol::C, Symbol::F, Symbol::P];

    /// Parse a single character, returns None for anything outside the alphabet
    pub fn from_char(c: char) -> Option<Symbol> {
        match c {
            'I' => Some(Symbol::I),
            'C' => Some(Symbol::C),
            'F' => Some(Symbol::F),
            'P' => Some(Symbol::P),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::I => 'I',
            Symbol::C => 'C',
            Symbol::F => 'F',
            Symbol::P => 'P',
        }
    }

    /// Byte written to the output and trace streams
    pub fn as_byte(self) -> u8 {
        self.as_char() as u8
    }

    /// Dense index (0..4), used by the search automaton
    pub fn index(self) -> usize {
        self as usize
    }

    /// Next symbol in the cycle; `P` wraps to `I`
    pub fn successor(self) -> Symbol {
        match self {
            Symbol::I => Symbol::C,
            Symbol::C => Symbol::F,
            Symbol::F => Symbol::P,
            Symbol::P => Symbol::I,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Errors produced while loading symbol text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// Character outside the alphabet (position counts characters, not bytes)
    InvalidSymbol { ch: char, position: usize },
}

impl fmt::Display for SymbolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolError::InvalidSymbol { ch, position } => {
                write!(
                    f,
                    "Invalid symbol {:?} at position {} (expected one of I, C, F, P)",
                    ch, position
                )
            }
        }
    }
}

impl std::error::Error for SymbolError {}

/// Parse symbol text, skipping ASCII whitespace
pub fn parse_symbols(text: &str) -> Result<Vec<Symbol>, SymbolError> {
    let mut symbols = Vec::with_capacity(text.len());
    for (position, ch) in text.chars().enumerate() {
        if ch.is_ascii_whitespace() {
            continue;
        }
        let symbol = Symbol::from_char(ch).ok_or(SymbolError::InvalidSymbol { ch, position })?;
        symbols.push(symbol);
    }
    Ok(symbols)
}

/// Render symbols back to text
pub fn render<'a, I>(symbols: I) -> String
where
    I: IntoIterator<Item = &'a Symbol>,
{
    symbols.into_iter().map(|s| s.as_char()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_whitespace() {
        let symbols = parse_symbols("IC FP\n").unwrap();
        assert_eq!(symbols, vec![Symbol::I, Symbol::C, Symbol::F, Symbol::P]);
        assert_eq!(render(&symbols), "ICFP");
    }

    #[test]
    fn test_parse_rejects_foreign_characters() {
        let err = parse_symbols("ICX").unwrap_err();
        assert_eq!(err, SymbolError::InvalidSymbol { ch: 'X', position: 2 });
    }

    #[test]
    fn test_successor_cycles() {
        let mut s = Symbol::I;
        for expected in [Symbol::C, Symbol::F, Symbol::P, Symbol::I] {
            s = s.successor();
            assert_eq!(s, expected);
        }
    }
}
