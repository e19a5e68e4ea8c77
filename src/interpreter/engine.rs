//! The rewrite engine
//!
//! One [`Engine::step`] is one iteration of the machine:
//!
//! 1. read a pattern and a template off the feed front (echo constructs write
//!    to the output stream as they are read)
//! 2. append every consumed symbol to the trace stream
//! 3. match the pattern against what is left of the feed
//! 4. on success, splice the instantiated template over the matched prefix
//!
//! Running out of feed while reading a program ends the run: both streams get
//! their terminator and [`Step::Finished`] is returned from then on.

use super::channel::ReadChannel;
use super::constants::{INDEX_CAPACITY, INDEX_STRIDE};
use super::errors::{EndOfInput, RuntimeError};
use super::matcher::{build_replacement, match_pattern, AbortReason, MatchOutcome};
use super::pattern::{read_pattern, Pattern};
use super::template::{read_template, Template};
use crate::memory::feed::Feed;
use crate::memory::index::ChunkedIndex;
use crate::memory::symbol::Symbol;
use crate::stream::SymbolStream;
use log::{debug, info, trace};
use std::fmt;
use std::io::Write;

/// Sizing of the chunked index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Symbols between two index samples
    pub index_stride: usize,
    /// Largest feed offset the index can resolve
    pub index_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            index_stride: INDEX_STRIDE,
            index_capacity: INDEX_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), RuntimeError> {
        if self.index_stride == 0 {
            return Err(RuntimeError::InvalidConfig {
                message: "index stride must be at least 1".to_string(),
            });
        }
        if self.index_capacity < self.index_stride {
            return Err(RuntimeError::InvalidConfig {
                message: format!(
                    "index capacity {} is smaller than the stride {}",
                    self.index_capacity, self.index_stride
                ),
            });
        }
        Ok(())
    }
}

/// Running totals for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Completed iterations (programs read and matched)
    pub iterations: usize,
    pub rewrites: usize,
    pub aborts: usize,
    /// Symbols written to the trace stream
    pub read: usize,
    /// Symbols written to the output stream
    pub echoed: usize,
}

/// What the match phase of an iteration did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Rewritten { consumed: usize, inserted: usize },
    Aborted(AbortReason),
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Rewritten { consumed, inserted } => {
                write!(f, "rewrote {} symbols as {}", consumed, inserted)
            }
            StepOutcome::Aborted(reason) => write!(f, "aborted: {}", reason),
        }
    }
}

/// Summary of one completed iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub iteration: usize,
    pub outcome: StepOutcome,
    /// Symbols read off the front for the two programs
    pub read: usize,
    pub echoed: usize,
    /// Feed length after the iteration
    pub feed_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue(StepReport),
    Finished,
}

/// The rewriting machine: feed, index and both output streams
pub struct Engine<O: Write, T: Write> {
    feed: Feed,
    index: ChunkedIndex,
    output: SymbolStream<O>,
    trace: SymbolStream<T>,
    stats: EngineStats,
    last_report: Option<StepReport>,
    last_pattern: Pattern,
    last_template: Template,
    finished: bool,
}

impl<O: Write, T: Write> Engine<O, T> {
    /// Load `symbols` as the initial feed
    pub fn new(
        symbols: &[Symbol],
        output: O,
        trace: T,
        config: EngineConfig,
    ) -> Result<Self, RuntimeError> {
        config.validate()?;
        let feed = Feed::from_symbols(symbols);
        let mut index = ChunkedIndex::new(config.index_stride, config.index_capacity);
        index.warm(&feed);
        info!(
            "Loaded {} symbols (index stride {}, {} buckets)",
            feed.len(),
            index.stride(),
            index.bucket_count()
        );

        Ok(Engine {
            feed,
            index,
            output: SymbolStream::new("output", output),
            trace: SymbolStream::new("trace", trace),
            stats: EngineStats::default(),
            last_report: None,
            last_pattern: Pattern::default(),
            last_template: Template::default(),
            finished: false,
        })
    }

    /// Run one iteration
    pub fn step(&mut self) -> Result<Step, RuntimeError> {
        if self.finished {
            return Ok(Step::Finished);
        }

        let before = self.feed.len();
        let mut consumed = Vec::new();
        let mut echoed = Vec::new();
        let programs = {
            let mut channel = ReadChannel::new(&mut self.feed, &mut consumed, &mut echoed);
            read_programs(&mut channel)
        };

        self.trace.write_all(&consumed)?;
        self.output.write_all(&echoed)?;
        self.stats.read += consumed.len();
        self.stats.echoed += echoed.len();

        let (pattern, template) = match programs {
            Ok(programs) => programs,
            Err(EndOfInput) => {
                self.finish()?;
                return Ok(Step::Finished);
            }
        };

        self.feed.settle();
        self.index.rebuild(&self.feed, before, self.feed.len());
        self.stats.iterations += 1;
        trace!("pattern  {}", pattern);
        trace!("template {}", template);

        let outcome = match match_pattern(&self.feed, &mut self.index, &pattern)? {
            MatchOutcome::Success { consumed, captures } => {
                let chain = build_replacement(&mut self.feed, &template, &captures)?;
                let inserted = chain.len();
                let old_len = self.feed.len();
                let deleted = self.feed.splice(consumed, chain);
                self.index.rebuild(&self.feed, old_len, self.feed.len());
                self.stats.rewrites += 1;
                StepOutcome::Rewritten {
                    consumed: deleted,
                    inserted,
                }
            }
            MatchOutcome::Abort(reason) => {
                self.stats.aborts += 1;
                StepOutcome::Aborted(reason)
            }
        };

        let report = StepReport {
            iteration: self.stats.iterations,
            outcome,
            read: consumed.len(),
            echoed: echoed.len(),
            feed_len: self.feed.len(),
        };
        debug!(
            "iteration {}: {} (feed {} symbols)",
            report.iteration, report.outcome, report.feed_len
        );

        self.last_pattern = pattern;
        self.last_template = template;
        self.last_report = Some(report);
        Ok(Step::Continue(report))
    }

    /// Run until the feed runs dry
    pub fn run(&mut self) -> Result<EngineStats, RuntimeError> {
        while let Step::Continue(_) = self.step()? {}
        Ok(self.stats)
    }

    /// Run at most `limit` iterations; returns how many completed
    pub fn run_steps(&mut self, limit: usize) -> Result<usize, RuntimeError> {
        let mut completed = 0;
        while completed < limit {
            match self.step()? {
                Step::Continue(_) => completed += 1,
                Step::Finished => break,
            }
        }
        Ok(completed)
    }

    /// Terminate and flush both streams
    ///
    /// Safe to call more than once; the terminators are written only the first
    /// time.
    pub fn finish(&mut self) -> Result<(), RuntimeError> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.output.close()?;
        self.trace.close()?;
        info!(
            "Finished after {} iterations ({} rewrites, {} aborts); {} symbols echoed, {} left in feed",
            self.stats.iterations,
            self.stats.rewrites,
            self.stats.aborts,
            self.stats.echoed,
            self.feed.len()
        );
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn index(&self) -> &ChunkedIndex {
        &self.index
    }

    pub fn output(&self) -> &SymbolStream<O> {
        &self.output
    }

    pub fn trace(&self) -> &SymbolStream<T> {
        &self.trace
    }

    pub fn last_report(&self) -> Option<&StepReport> {
        self.last_report.as_ref()
    }

    /// Programs decoded by the last completed iteration
    pub fn last_program(&self) -> (&Pattern, &Template) {
        (&self.last_pattern, &self.last_template)
    }

    /// Give back the stream sinks
    pub fn into_sinks(self) -> (O, T) {
        (self.output.into_inner(), self.trace.into_inner())
    }
}

fn read_programs(channel: &mut ReadChannel<'_>) -> Result<(Pattern, Template), EndOfInput> {
    let pattern = read_pattern(channel)?;
    let template = read_template(channel)?;
    Ok((pattern, template))
}
