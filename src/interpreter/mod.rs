//! Rewrite engine
//!
//! This module provides the execution logic:
//! - [`engine`]: the iteration loop, streams and run statistics
//! - [`channel`]: destructive reads off the feed front
//! - [`codec`]: number encoding and the protection transform
//! - [`pattern`] / [`template`]: program decoding
//! - [`matcher`]: pattern matching and replacement construction
//! - [`errors`]: runtime error types
//! - [`constants`]: default sizes and wire constants
//!
//! # Execution Model
//!
//! Each iteration reads a pattern and a template from the front of the feed,
//! matches the pattern against what remains, and on success replaces the
//! matched prefix with the instantiated template. The run ends when the feed
//! runs out in the middle of reading a program.

pub mod channel;
pub mod codec;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod matcher;
pub mod pattern;
pub mod template;
