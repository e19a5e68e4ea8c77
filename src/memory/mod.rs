//! Sequence store for the rewriting engine
//!
//! This module provides the storage side of the machine:
//! - [`symbol`]: the four-symbol alphabet and its text form
//! - [`arena`]: slot storage for chain nodes with generation-checked handles
//! - [`feed`]: the live symbol sequence and detached replacement chains
//! - [`index`]: chunked offset index and the per-match locality cache
//!
//! # Ownership
//!
//! The [`feed::Feed`] owns its arena and therefore every node. Everything else
//! (index samples, captures, cache entries) holds [`arena::NodeRef`] handles
//! that can go stale and are checked before use:
//!
//! ```text
//! Feed ──owns──▶ NodeArena ◀──handles── ChunkedIndex / Capture / LocalityCache
//! ```

pub mod arena;
pub mod feed;
pub mod index;
pub mod symbol;
