//! The read channel: destructive reads off the feed front
//!
//! Pattern and template readers never touch the feed directly. They pull
//! symbols through a [`ReadChannel`], which records every consumed symbol for
//! the trace stream and collects echoed symbols for the output stream. The
//! engine writes both batches once the programs have been read.

use super::constants::ECHO_WIDTH;
use super::errors::EndOfInput;
use crate::memory::{feed::Feed, symbol::Symbol};

pub struct ReadChannel<'a> {
    feed: &'a mut Feed,
    consumed: &'a mut Vec<Symbol>,
    echoed: &'a mut Vec<Symbol>,
}

impl<'a> ReadChannel<'a> {
    pub fn new(
        feed: &'a mut Feed,
        consumed: &'a mut Vec<Symbol>,
        echoed: &'a mut Vec<Symbol>,
    ) -> Self {
        ReadChannel {
            feed,
            consumed,
            echoed,
        }
    }

    /// Pop the next symbol
    pub fn next(&mut self) -> Result<Symbol, EndOfInput> {
        let symbol = self.feed.pop_front().ok_or(EndOfInput)?;
        self.consumed.push(symbol);
        Ok(symbol)
    }

    /// Return two read-ahead symbols to the front of the channel
    pub fn unread(&mut self, first: Symbol, second: Symbol) {
        self.feed.unread(first, second);
    }

    /// Copy the next [`ECHO_WIDTH`] raw symbols to the output stream
    pub fn echo(&mut self) -> Result<(), EndOfInput> {
        for _ in 0..ECHO_WIDTH {
            let symbol = self.next()?;
            self.echoed.push(symbol);
        }
        Ok(())
    }
}
