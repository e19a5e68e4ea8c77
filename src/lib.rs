//! # Introduction
//!
//! Splicer runs a self-rewriting program over the four-symbol alphabet
//! `I C F P`. The program and its data are one sequence, the *feed*: each
//! iteration decodes a pattern and a template from the feed's front, matches
//! the pattern against the rest, and splices the instantiated template over the
//! matched prefix. Echo constructs met while decoding go to an output stream;
//! every decoded symbol goes to a trace stream.
//!
//! ## Execution pipeline
//!
//! ```text
//! Feed → read pattern/template → match → build replacement → splice → Feed
//!            │                                                   │
//!            └─▶ trace / output streams        index rebuild ◀──┘
//! ```
//!
//! 1. [`memory`]: the feed as an arena-backed chain with generation-checked
//!    handles, plus the chunked offset index used to reach deep offsets.
//! 2. [`interpreter`]: program decoding, matching, replacement construction
//!    and the [`interpreter::engine::Engine`] iteration loop.
//! 3. [`stream`]: terminated byte streams for output and trace.
//! 4. [`ui`]: ratatui-based step inspector; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use splicer::interpreter::engine::{Engine, EngineConfig};
//! use splicer::memory::symbol::parse_symbols;
//!
//! // pattern "I", template "C": replaces a leading I with C
//! let symbols = parse_symbols("CIICFIICIPP").unwrap();
//! let mut engine = Engine::new(&symbols, Vec::new(), Vec::new(), EngineConfig::default()).unwrap();
//! engine.run().unwrap();
//! assert_eq!(engine.stats().rewrites, 1);
//! ```

pub mod interpreter;
pub mod memory;
pub mod stream;
pub mod ui;
