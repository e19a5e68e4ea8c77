//! Number and quoting codec
//!
//! - [`read_nat`]: decode a number from the read channel
//! - [`write_nat`]: encode a number onto a replacement chain
//! - [`protect`]: copy a captured substring and apply the protection transform
//!
//! # Number format
//!
//! Numbers are little-endian binary, one symbol per bit, terminated by `P`:
//! `C` is a one bit, `I` (and `F` on the read side) a zero bit. `CCICP` is
//! 1 + 2 + 8 = 11; a bare `P` is zero.
//!
//! # Protection
//!
//! One protection pass rewrites `I→C`, `C→F`, `F→P` and `P→IC`. The last case
//! grows the substring, so passes run in place over the chain rather than as a
//! table lookup over a fixed-size buffer.

use super::channel::ReadChannel;
use super::constants::{NAT_MAX_LEVEL, NAT_SATURATED};
use super::errors::EndOfInput;
use crate::memory::arena::{NodeArena, NodeRef};
use crate::memory::feed::Chain;
use crate::memory::symbol::Symbol;

/// Read a terminated number off the channel
///
/// A one bit above [`NAT_MAX_LEVEL`] saturates the result at
/// [`NAT_SATURATED`]; the remaining bits are still consumed up to the
/// terminator.
pub fn read_nat(channel: &mut ReadChannel<'_>) -> Result<usize, EndOfInput> {
    let mut value = 0usize;
    let mut saturated = false;
    let mut level = 0u32;
    loop {
        match channel.next()? {
            Symbol::P => return Ok(if saturated { NAT_SATURATED } else { value }),
            Symbol::C => {
                if level > NAT_MAX_LEVEL {
                    saturated = true;
                } else {
                    value += 1 << level;
                }
            }
            Symbol::I | Symbol::F => {}
        }
        level = level.saturating_add(1);
    }
}

/// Append the encoding of `n` (terminator included) to `chain`
pub fn write_nat(arena: &mut NodeArena, chain: &mut Chain, mut n: usize) {
    while n > 0 {
        let bit = if n % 2 == 1 { Symbol::C } else { Symbol::I };
        chain.push(arena, bit);
        n /= 2;
    }
    chain.push(arena, Symbol::P);
}

/// Copy `len` symbols from `source` onto `chain`, protected `level` times
pub fn protect(
    arena: &mut NodeArena,
    chain: &mut Chain,
    source: Option<NodeRef>,
    len: usize,
    level: usize,
) {
    let before = chain.tail();
    if chain.extend_from(arena, source, len) == 0 {
        return;
    }

    for _ in 0..level {
        let mut prev = before;
        let mut cursor = match before {
            Some(node) => arena.next(node),
            None => chain.head(),
        };
        while let Some(node) = cursor {
            let Some(symbol) = arena.symbol(node) else {
                break;
            };
            match symbol {
                Symbol::P => {
                    arena.set_symbol(node, Symbol::C);
                    chain.insert_after(arena, prev, Symbol::I);
                }
                other => {
                    arena.set_symbol(node, other.successor());
                }
            }
            prev = Some(node);
            cursor = arena.next(node);
        }
    }
}
