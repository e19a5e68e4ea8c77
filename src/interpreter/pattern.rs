//! Pattern programs and their reader
//!
//! A pattern is read straight off the front of the feed. Decoding table (raw
//! symbols on the left):
//!
//! ```text
//! C        literal I          IIP      open group
//! F        literal C          IIC/IIF  close group, or end of pattern at level 0
//! P        literal F          III      echo 7 raw symbols to the output stream
//! IC       literal P
//! IP n     skip n
//! IF x c   search for constant c (x is discarded)
//! ```
//!
//! Constants use the literal table (`C F P IC`); the first `I` that is not
//! followed by `C` ends the constant, and both symbols are pushed back for the
//! pattern reader to decode again.

use super::channel::ReadChannel;
use super::codec::read_nat;
use super::errors::EndOfInput;
use crate::memory::symbol::Symbol;
use std::fmt;

/// One pattern instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternOp {
    Literal(Symbol),
    Skip(usize),
    Search(Vec<Symbol>),
    Open,
    Close,
}

impl fmt::Display for PatternOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternOp::Literal(symbol) => write!(f, "{}", symbol),
            PatternOp::Skip(n) => write!(f, "![{}]", n),
            PatternOp::Search(constant) => {
                write!(f, "?[")?;
                for symbol in constant {
                    write!(f, "{}", symbol)?;
                }
                write!(f, "]")
            }
            PatternOp::Open => write!(f, "("),
            PatternOp::Close => write!(f, ")"),
        }
    }
}

/// A decoded pattern program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    pub ops: Vec<PatternOp>,
}

impl Pattern {
    pub fn new(ops: Vec<PatternOp>) -> Self {
        Pattern { ops }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

/// Read one pattern off the channel
///
/// Stops at the first close-group seen with no group open. Echo constructs are
/// executed immediately and leave no trace in the program.
pub fn read_pattern(channel: &mut ReadChannel<'_>) -> Result<Pattern, EndOfInput> {
    let mut ops = Vec::new();
    let mut level = 0usize;
    loop {
        match channel.next()? {
            Symbol::C => ops.push(PatternOp::Literal(Symbol::I)),
            Symbol::F => ops.push(PatternOp::Literal(Symbol::C)),
            Symbol::P => ops.push(PatternOp::Literal(Symbol::F)),
            Symbol::I => match channel.next()? {
                Symbol::C => ops.push(PatternOp::Literal(Symbol::P)),
                Symbol::P => ops.push(PatternOp::Skip(read_nat(channel)?)),
                Symbol::F => {
                    channel.next()?;
                    ops.push(PatternOp::Search(read_constant(channel)?));
                }
                Symbol::I => match channel.next()? {
                    Symbol::P => {
                        level += 1;
                        ops.push(PatternOp::Open);
                    }
                    Symbol::C | Symbol::F => {
                        if level == 0 {
                            return Ok(Pattern::new(ops));
                        }
                        level -= 1;
                        ops.push(PatternOp::Close);
                    }
                    Symbol::I => channel.echo()?,
                },
            },
        }
    }
}

/// Read an embedded constant, pushing back the construct that ends it
pub fn read_constant(channel: &mut ReadChannel<'_>) -> Result<Vec<Symbol>, EndOfInput> {
    let mut constant = Vec::new();
    loop {
        match channel.next()? {
            Symbol::C => constant.push(Symbol::I),
            Symbol::F => constant.push(Symbol::C),
            Symbol::P => constant.push(Symbol::F),
            Symbol::I => match channel.next()? {
                Symbol::C => constant.push(Symbol::P),
                other => {
                    channel.unread(Symbol::I, other);
                    return Ok(constant);
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::feed::Feed;
    use crate::memory::symbol::{parse_symbols, render};

    struct Read<T> {
        result: Result<T, EndOfInput>,
        rest: String,
        consumed: String,
        echoed: String,
    }

    fn read_with<T>(
        text: &str,
        reader: fn(&mut ReadChannel<'_>) -> Result<T, EndOfInput>,
    ) -> Read<T> {
        let mut feed = Feed::from_symbols(&parse_symbols(text).unwrap());
        let mut consumed = Vec::new();
        let mut echoed = Vec::new();
        let result = {
            let mut channel = ReadChannel::new(&mut feed, &mut consumed, &mut echoed);
            reader(&mut channel)
        };
        feed.settle();
        Read {
            result,
            rest: render(&feed.to_symbols()),
            consumed: render(&consumed),
            echoed: render(&echoed),
        }
    }

    fn pattern_text(text: &str) -> String {
        read_with(text, read_pattern).result.unwrap().to_string()
    }

    #[test]
    fn test_literals_and_end() {
        assert_eq!(pattern_text("CIIC"), "I");
        assert_eq!(pattern_text("CFPICIIC"), "ICFP");
    }

    #[test]
    fn test_groups_and_skip() {
        assert_eq!(pattern_text("IIPIPICPIICICIIF"), "(![2])P");
        assert_eq!(pattern_text("IIPIIPIIFIICIIC"), "(())");
    }

    #[test]
    fn test_search_constant() {
        assert_eq!(pattern_text("IFFCFPICIIC"), "?[ICFP]");
    }

    #[test]
    fn test_constant_pushes_back_terminator() {
        let read = read_with("CFICIIFPP", read_constant);
        assert_eq!(read.result.unwrap(), vec![Symbol::I, Symbol::C, Symbol::P]);
        // the consumed "II" is replayed ahead of the remaining "FPP"
        assert_eq!(read.rest, "IIFPP");
        assert_eq!(read.consumed, "CFICII");
    }

    #[test]
    fn test_echo_is_not_stored() {
        let read = read_with("IIIICFPICFCIIC", read_pattern);
        assert_eq!(read.result.unwrap().to_string(), "I");
        assert_eq!(read.echoed, "ICFPICF");
        assert!(read.rest.is_empty());
    }

    #[test]
    fn test_pattern_end_of_input() {
        let read = read_with("CFIIP", read_pattern);
        assert_eq!(read.result, Err(EndOfInput));
        assert_eq!(read.consumed, "CFIIP");
    }
}
