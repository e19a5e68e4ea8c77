//! The feed: the self-modifying symbol sequence
//!
//! This module provides the sequence store the engine reads from and rewrites:
//! - [`Feed`]: an owning chain of arena nodes plus a small pushback queue
//! - [`Chain`]: a detached chain under construction (replacements are built here
//!   before being spliced in)
//! - [`Iter`]: read-only traversal from any node
//!
//! # Mutation
//!
//! The feed changes shape in exactly two ways: [`Feed::pop_front`] consumes the
//! first symbol, and [`Feed::splice`] deletes a prefix and prepends a chain in
//! one step. Everything behind the affected prefix keeps its nodes, so handles
//! held by the index into that region survive; handles into the deleted prefix
//! go stale.
//!
//! # Pushback
//!
//! Constant parsing reads one construct too far. The two overshoot symbols are
//! handed back with [`Feed::unread`] and replayed by the next two pops. They sit
//! outside the node chain, so [`Feed::len`] never counts them;
//! [`Feed::settle`] turns any leftovers back into nodes before matching.

use super::arena::{NodeArena, NodeRef};
use super::symbol::Symbol;
use std::collections::VecDeque;

/// Maximum number of symbols waiting in the pushback queue
pub const PUSHBACK_CAPACITY: usize = 2;

/// The live program/data sequence
#[derive(Debug, Clone, Default)]
pub struct Feed {
    arena: NodeArena,
    head: Option<NodeRef>,
    len: usize,
    pushback: VecDeque<Symbol>,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a feed holding `symbols` in order
    pub fn from_symbols(symbols: &[Symbol]) -> Self {
        let mut arena = NodeArena::with_capacity(symbols.len());
        let mut chain = Chain::new();
        for &symbol in symbols {
            chain.push(&mut arena, symbol);
        }
        Feed {
            arena,
            head: chain.head,
            len: chain.len,
            pushback: VecDeque::with_capacity(PUSHBACK_CAPACITY),
        }
    }

    /// Number of nodes reachable from the front (pushback excluded)
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Symbols waiting in the pushback queue
    pub fn pending(&self) -> usize {
        self.pushback.len()
    }

    /// Current front node
    pub fn head(&self) -> Option<NodeRef> {
        self.head
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub(crate) fn arena_mut(&mut self) -> &mut NodeArena {
        &mut self.arena
    }

    #[inline]
    pub fn symbol(&self, node: NodeRef) -> Option<Symbol> {
        self.arena.symbol(node)
    }

    #[inline]
    pub fn next(&self, node: NodeRef) -> Option<NodeRef> {
        self.arena.next(node)
    }

    /// Whether a handle still points into live storage
    #[inline]
    pub fn is_live(&self, node: NodeRef) -> bool {
        self.arena.is_live(node)
    }

    /// Consume the first symbol: pushback first, then the chain
    pub fn pop_front(&mut self) -> Option<Symbol> {
        if let Some(symbol) = self.pushback.pop_front() {
            return Some(symbol);
        }
        let head = self.head?;
        let symbol = self.arena.symbol(head)?;
        self.head = self.arena.release(head);
        self.len -= 1;
        Some(symbol)
    }

    /// Hand back two read-ahead symbols; `first` is replayed first
    pub fn unread(&mut self, first: Symbol, second: Symbol) {
        debug_assert!(
            self.pushback.len() + 2 <= PUSHBACK_CAPACITY,
            "pushback overflow"
        );
        self.pushback.push_front(second);
        self.pushback.push_front(first);
    }

    /// Move pending pushback symbols back onto the chain front
    ///
    /// Returns the number of nodes created.
    pub fn settle(&mut self) -> usize {
        let mut created = 0;
        while let Some(symbol) = self.pushback.pop_back() {
            let node = self.arena.alloc(symbol);
            self.arena.link(node, self.head);
            self.head = Some(node);
            self.len += 1;
            created += 1;
        }
        created
    }

    /// Delete `delete_count` nodes from the front and prepend `insert`
    ///
    /// Deletion is clamped to the feed length. Returns the number of nodes
    /// actually deleted.
    pub fn splice(&mut self, delete_count: usize, insert: Chain) -> usize {
        let mut cursor = self.head;
        let mut deleted = 0;
        while deleted < delete_count {
            match cursor {
                Some(node) => {
                    cursor = self.arena.release(node);
                    deleted += 1;
                }
                None => break,
            }
        }
        self.len -= deleted;

        match insert.tail {
            Some(tail) => {
                self.arena.link(tail, cursor);
                self.head = insert.head;
            }
            None => self.head = cursor,
        }
        self.len += insert.len;
        deleted
    }

    /// Iterate the chain from the front (pushback excluded)
    pub fn iter(&self) -> Iter<'_> {
        self.iter_from(self.head)
    }

    /// Iterate the chain starting at `node`
    pub fn iter_from(&self, node: Option<NodeRef>) -> Iter<'_> {
        Iter {
            arena: &self.arena,
            cursor: node,
        }
    }

    /// First `count` symbols of the chain
    pub fn preview(&self, count: usize) -> Vec<Symbol> {
        self.iter().take(count).collect()
    }

    pub fn to_symbols(&self) -> Vec<Symbol> {
        self.iter().collect()
    }
}

/// Read-only traversal over a node chain
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    arena: &'a NodeArena,
    cursor: Option<NodeRef>,
}

impl Iterator for Iter<'_> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        let node = self.cursor?;
        let symbol = self.arena.symbol(node)?;
        self.cursor = self.arena.next(node);
        Some(symbol)
    }
}

/// A detached chain of nodes, built up before being spliced into the feed
#[derive(Debug, Default)]
pub struct Chain {
    head: Option<NodeRef>,
    tail: Option<NodeRef>,
    len: usize,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<NodeRef> {
        self.head
    }

    pub fn tail(&self) -> Option<NodeRef> {
        self.tail
    }

    /// Append one symbol
    pub fn push(&mut self, arena: &mut NodeArena, symbol: Symbol) -> NodeRef {
        let node = arena.alloc(symbol);
        match self.tail {
            Some(tail) => {
                arena.link(tail, Some(node));
            }
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
        node
    }

    /// Insert a symbol right after `prev` (or at the head when `prev` is None)
    pub fn insert_after(
        &mut self,
        arena: &mut NodeArena,
        prev: Option<NodeRef>,
        symbol: Symbol,
    ) -> NodeRef {
        let node = arena.alloc(symbol);
        match prev {
            Some(prev) => {
                arena.link(node, arena.next(prev));
                arena.link(prev, Some(node));
                if self.tail == Some(prev) {
                    self.tail = Some(node);
                }
            }
            None => {
                arena.link(node, self.head);
                self.head = Some(node);
                if self.tail.is_none() {
                    self.tail = Some(node);
                }
            }
        }
        self.len += 1;
        node
    }

    /// Copy up to `count` symbols starting at `start`
    ///
    /// Stops early at the end of the source chain; returns the number copied.
    pub fn extend_from(
        &mut self,
        arena: &mut NodeArena,
        start: Option<NodeRef>,
        count: usize,
    ) -> usize {
        let mut cursor = start;
        let mut copied = 0;
        while copied < count {
            let Some(node) = cursor else { break };
            let Some(symbol) = arena.symbol(node) else { break };
            cursor = arena.next(node);
            self.push(arena, symbol);
            copied += 1;
        }
        copied
    }

    /// Symbols currently in the chain
    pub fn symbols(&self, arena: &NodeArena) -> Vec<Symbol> {
        Iter {
            arena,
            cursor: self.head,
        }
        .collect()
    }

    /// Free every node of a chain that will not be spliced
    pub fn discard(self, arena: &mut NodeArena) {
        let mut cursor = self.head;
        while let Some(node) = cursor {
            cursor = arena.release(node);
        }
    }
}
