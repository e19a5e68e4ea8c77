//! Node arena backing every symbol chain
//!
//! This module provides slot-based node storage with:
//! - Free-list reuse of released slots
//! - Generation counters so stale handles are detected instead of followed
//! - Forward-only links between nodes (the owning chain structure)
//!
//! # Handles
//!
//! A [`NodeRef`] is a `(slot, generation)` pair. Releasing a node bumps the
//! slot's generation, so every handle taken before the release stops resolving.
//! The chunked index and capture environments hold `NodeRef`s and never own
//! the nodes they point at; [`NodeArena::is_live`] is how they find out that a
//! splice has dropped their target.
//!
//! Links between nodes are stored as raw slot numbers. A live node's successor
//! is always live, so the successor handle is rebuilt from the successor slot's
//! current generation.

use super::symbol::Symbol;

const NIL: u32 = u32::MAX;

/// Non-owning handle to an arena node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    slot: u32,
    generation: u32,
}

impl NodeRef {
    /// Raw slot number (diagnostics only)
    pub fn slot(&self) -> u32 {
        self.slot
    }
}

#[derive(Debug, Clone)]
struct Slot {
    next: u32,
    generation: u32,
    symbol: Symbol,
    live: bool,
}

/// Slot storage for symbol nodes
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live_count: usize,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live_count: 0,
        }
    }

    /// Allocate an unlinked node
    pub fn alloc(&mut self, symbol: Symbol) -> NodeRef {
        self.live_count += 1;
        if let Some(slot) = self.free.pop() {
            let cell = &mut self.slots[slot as usize];
            cell.next = NIL;
            cell.symbol = symbol;
            cell.live = true;
            return NodeRef {
                slot,
                generation: cell.generation,
            };
        }

        let slot = self.slots.len() as u32;
        self.slots.push(Slot {
            next: NIL,
            generation: 0,
            symbol,
            live: true,
        });
        NodeRef {
            slot,
            generation: 0,
        }
    }

    /// Release a node and return its successor
    ///
    /// Returns None both at the end of a chain and for a stale handle; the
    /// latter is a no-op.
    pub fn release(&mut self, node: NodeRef) -> Option<NodeRef> {
        if !self.is_live(node) {
            return None;
        }
        let next = self.next(node);
        let cell = &mut self.slots[node.slot as usize];
        cell.live = false;
        cell.next = NIL;
        cell.generation = cell.generation.wrapping_add(1);
        self.free.push(node.slot);
        self.live_count -= 1;
        next
    }

    /// Whether the handle still refers to the node it was taken from
    #[inline]
    pub fn is_live(&self, node: NodeRef) -> bool {
        self.slots
            .get(node.slot as usize)
            .is_some_and(|cell| cell.live && cell.generation == node.generation)
    }

    #[inline]
    pub fn symbol(&self, node: NodeRef) -> Option<Symbol> {
        self.cell(node).map(|cell| cell.symbol)
    }

    /// Successor of a live node
    #[inline]
    pub fn next(&self, node: NodeRef) -> Option<NodeRef> {
        let cell = self.cell(node)?;
        if cell.next == NIL {
            return None;
        }
        let next = &self.slots[cell.next as usize];
        Some(NodeRef {
            slot: cell.next,
            generation: next.generation,
        })
    }

    /// Overwrite a node's symbol in place
    pub fn set_symbol(&mut self, node: NodeRef, symbol: Symbol) -> bool {
        match self.cell_mut(node) {
            Some(cell) => {
                cell.symbol = symbol;
                true
            }
            None => false,
        }
    }

    /// Point `node` at `next` (or terminate the chain with None)
    pub fn link(&mut self, node: NodeRef, next: Option<NodeRef>) -> bool {
        let raw = next.map_or(NIL, |n| n.slot);
        match self.cell_mut(node) {
            Some(cell) => {
                cell.next = raw;
                true
            }
            None => false,
        }
    }

    /// Walk `steps` links forward from `node`
    pub fn advance(&self, node: NodeRef, steps: usize) -> Option<NodeRef> {
        let mut current = node;
        for _ in 0..steps {
            current = self.next(current)?;
        }
        Some(current)
    }

    /// Number of live nodes
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// Number of slots ever allocated (live + free)
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn cell(&self, node: NodeRef) -> Option<&Slot> {
        self.slots
            .get(node.slot as usize)
            .filter(|cell| cell.live && cell.generation == node.generation)
    }

    #[inline]
    fn cell_mut(&mut self, node: NodeRef) -> Option<&mut Slot> {
        self.slots
            .get_mut(node.slot as usize)
            .filter(|cell| cell.live && cell.generation == node.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_released_handle_goes_stale() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(Symbol::I);
        let b = arena.alloc(Symbol::C);
        arena.link(a, Some(b));

        assert_eq!(arena.release(a), Some(b));
        assert!(!arena.is_live(a));
        assert_eq!(arena.symbol(a), None);
        assert_eq!(arena.live_count(), 1);

        // Reusing the slot must not revive the old handle
        let c = arena.alloc(Symbol::F);
        assert_eq!(c.slot(), a.slot());
        assert!(!arena.is_live(a));
        assert_eq!(arena.symbol(c), Some(Symbol::F));
        assert_eq!(arena.next(c), None);
    }

    #[test]
    fn test_release_of_stale_handle_is_noop() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(Symbol::P);
        arena.release(a);
        assert_eq!(arena.release(a), None);
        assert_eq!(arena.live_count(), 0);
    }

    #[test]
    fn test_advance_stops_at_chain_end() {
        let mut arena = NodeArena::new();
        let nodes: Vec<NodeRef> = Symbol::ALL.iter().map(|&s| arena.alloc(s)).collect();
        for pair in nodes.windows(2) {
            arena.link(pair[0], Some(pair[1]));
        }
        assert_eq!(arena.advance(nodes[0], 3), Some(nodes[3]));
        assert_eq!(arena.advance(nodes[0], 4), None);
        assert_eq!(arena.advance(nodes[2], 0), Some(nodes[2]));
    }
}
