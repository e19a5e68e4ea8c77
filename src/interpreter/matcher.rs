//! Match and replace
//!
//! [`match_pattern`] runs a pattern against the feed from its front without
//! mutating it. The cursor `i` only counts symbols; nodes are looked up through
//! a [`LocalityCache`] backed by the [`ChunkedIndex`] when an instruction needs
//! to read the feed.
//!
//! On success the caller builds the replacement with [`build_replacement`]
//! while the captured nodes are still live, then splices it in. On abort
//! nothing has changed and the captures are simply dropped.

use super::codec::{protect, write_nat};
use super::errors::RuntimeError;
use super::pattern::{Pattern, PatternOp};
use super::template::{Template, TemplateOp};
use crate::memory::arena::NodeRef;
use crate::memory::feed::{Chain, Feed};
use crate::memory::index::{ChunkedIndex, LocalityCache};
use crate::memory::symbol::Symbol;
use std::fmt;

/// A captured substring of the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    /// Node at the capture start (None when the capture starts at the feed end)
    pub start: Option<NodeRef>,
    pub offset: usize,
    pub len: usize,
}

/// Why a match attempt gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// A skip moved past the end of the feed
    SkipOverrun,
    /// A literal did not match (or the feed ended)
    LiteralMismatch,
    /// A searched constant does not occur in the rest of the feed
    ConstantNotFound,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::SkipOverrun => write!(f, "skip overrun"),
            AbortReason::LiteralMismatch => write!(f, "literal mismatch"),
            AbortReason::ConstantNotFound => write!(f, "constant not found"),
        }
    }
}

/// Result of one match attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The first `consumed` symbols matched; captures in close order
    Success {
        consumed: usize,
        captures: Vec<Capture>,
    },
    Abort(AbortReason),
}

/// Match `pattern` against the feed front
pub fn match_pattern(
    feed: &Feed,
    index: &mut ChunkedIndex,
    pattern: &Pattern,
) -> Result<MatchOutcome, RuntimeError> {
    let mut cache = LocalityCache::at_front(feed);
    let mut i = 0usize;
    let mut open: Vec<usize> = Vec::new();
    let mut captures = Vec::new();

    for op in &pattern.ops {
        match op {
            PatternOp::Literal(expected) => {
                let node = cache.resolve(index, feed, i)?;
                if node.and_then(|n| feed.symbol(n)) != Some(*expected) {
                    return Ok(MatchOutcome::Abort(AbortReason::LiteralMismatch));
                }
                i += 1;
            }
            PatternOp::Skip(n) => {
                i = i.saturating_add(*n);
                if i > feed.len() {
                    return Ok(MatchOutcome::Abort(AbortReason::SkipOverrun));
                }
            }
            PatternOp::Search(constant) => {
                if constant.is_empty() {
                    continue;
                }
                let node = cache.resolve(index, feed, i)?;
                match search(feed, node, constant) {
                    Some(advance) => i += advance,
                    None => return Ok(MatchOutcome::Abort(AbortReason::ConstantNotFound)),
                }
            }
            PatternOp::Open => open.push(i),
            PatternOp::Close => {
                let Some(offset) = open.pop() else { continue };
                let start = cache.resolve(index, feed, offset)?;
                let len = i
                    .saturating_sub(offset)
                    .min(feed.len().saturating_sub(offset));
                captures.push(Capture { start, offset, len });
            }
        }
    }

    Ok(MatchOutcome::Success {
        consumed: i,
        captures,
    })
}

/// Distance from `start` to the end of the first occurrence of `constant`
///
/// Runs a prefix automaton over the four-symbol alphabet so every feed symbol
/// is visited once.
fn search(feed: &Feed, start: Option<NodeRef>, constant: &[Symbol]) -> Option<usize> {
    let automaton = build_automaton(constant);
    let mut state = 0;
    for (walked, symbol) in feed.iter_from(start).enumerate() {
        state = automaton[state][symbol.index()];
        if state == constant.len() {
            return Some(walked + 1);
        }
    }
    None
}

fn build_automaton(constant: &[Symbol]) -> Vec<[usize; 4]> {
    let mut automaton = vec![[0usize; 4]; constant.len()];
    automaton[0][constant[0].index()] = 1;
    let mut fallback = 0;
    for j in 1..constant.len() {
        automaton[j] = automaton[fallback];
        let k = constant[j].index();
        automaton[j][k] = j + 1;
        fallback = automaton[fallback][k];
    }
    automaton
}

/// Build the replacement chain for a successful match
///
/// Back-references to groups that were never captured produce nothing;
/// length references to them produce an encoded zero.
pub fn build_replacement(
    feed: &mut Feed,
    template: &Template,
    captures: &[Capture],
) -> Result<Chain, RuntimeError> {
    let mut chain = Chain::new();
    for op in &template.ops {
        match *op {
            TemplateOp::Literal(symbol) => {
                chain.push(feed.arena_mut(), symbol);
            }
            TemplateOp::Length(group) => {
                let len = captures.get(group).map_or(0, |c| c.len);
                write_nat(feed.arena_mut(), &mut chain, len);
            }
            TemplateOp::Reference { group, level } => {
                let Some(capture) = captures.get(group) else {
                    continue;
                };
                if capture.len == 0 {
                    continue;
                }
                let start = match capture.start {
                    Some(node) if feed.is_live(node) => node,
                    Some(node) => {
                        chain.discard(feed.arena_mut());
                        return Err(RuntimeError::DanglingNode {
                            slot: node.slot(),
                            context: "replacement",
                        });
                    }
                    None => continue,
                };
                protect(feed.arena_mut(), &mut chain, Some(start), capture.len, level);
            }
        }
    }
    Ok(chain)
}
