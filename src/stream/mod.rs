//! Byte streams written by the engine
//!
//! The engine writes two streams: the output stream (echoed symbols) and the
//! trace stream (every symbol read off the feed front). Both carry one byte per
//! symbol and end with a single [`STREAM_TERMINATOR`] byte.
//!
//! [`SymbolStream`] wraps any [`Write`] sink and keeps a bounded tail of the
//! most recent symbols so the step inspector can show them without reading the
//! sink back.

use crate::interpreter::constants::STREAM_TERMINATOR;
use crate::interpreter::errors::RuntimeError;
use crate::memory::symbol::Symbol;
use std::collections::VecDeque;
use std::io::Write;

/// Number of recent symbols retained for display
pub const RECENT_LIMIT: usize = 4096;

/// A terminated symbol stream over a byte sink
#[derive(Debug)]
pub struct SymbolStream<W: Write> {
    name: &'static str,
    sink: W,
    written: usize,
    closed: bool,
    recent: VecDeque<Symbol>,
}

impl<W: Write> SymbolStream<W> {
    pub fn new(name: &'static str, sink: W) -> Self {
        SymbolStream {
            name,
            sink,
            written: 0,
            closed: false,
            recent: VecDeque::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Write a batch of symbols
    ///
    /// Writes after [`SymbolStream::close`] are dropped.
    pub fn write_all(&mut self, symbols: &[Symbol]) -> Result<(), RuntimeError> {
        if self.closed || symbols.is_empty() {
            return Ok(());
        }
        let bytes: Vec<u8> = symbols.iter().map(|s| s.as_byte()).collect();
        self.sink.write_all(&bytes).map_err(|e| self.failure(e))?;
        self.written += symbols.len();

        for &symbol in symbols {
            if self.recent.len() == RECENT_LIMIT {
                self.recent.pop_front();
            }
            self.recent.push_back(symbol);
        }
        Ok(())
    }

    pub fn append(&mut self, symbol: Symbol) -> Result<(), RuntimeError> {
        self.write_all(&[symbol])
    }

    /// Write the terminator and flush; later calls do nothing
    pub fn close(&mut self) -> Result<(), RuntimeError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.sink
            .write_all(&[STREAM_TERMINATOR])
            .map_err(|e| self.failure(e))?;
        self.sink.flush().map_err(|e| self.failure(e))
    }

    /// Symbols written so far (terminator excluded)
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The most recent symbols, oldest first
    pub fn recent(&self) -> &VecDeque<Symbol> {
        &self.recent
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn failure(&self, error: std::io::Error) -> RuntimeError {
        RuntimeError::StreamWrite {
            stream: self.name,
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed pipe"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_symbols_written_as_bytes() {
        let mut stream = SymbolStream::new("output", Vec::new());
        stream
            .write_all(&[Symbol::I, Symbol::C, Symbol::F, Symbol::P])
            .unwrap();
        assert_eq!(stream.get_ref(), &vec![b'I', b'C', b'F', b'P']);
        assert_eq!(stream.written(), 4);
    }

    #[test]
    fn test_close_writes_terminator_once() {
        let mut stream = SymbolStream::new("trace", Vec::new());
        stream.append(Symbol::P).unwrap();
        stream.close().unwrap();
        stream.close().unwrap();
        stream.append(Symbol::C).unwrap();
        assert_eq!(stream.into_inner(), vec![b'P', STREAM_TERMINATOR]);
    }

    #[test]
    fn test_recent_is_bounded() {
        let mut stream = SymbolStream::new("output", io::sink());
        let batch = vec![Symbol::C; RECENT_LIMIT + 10];
        stream.write_all(&batch).unwrap();
        stream.append(Symbol::F).unwrap();
        assert_eq!(stream.recent().len(), RECENT_LIMIT);
        assert_eq!(stream.recent().back(), Some(&Symbol::F));
        assert_eq!(stream.written(), RECENT_LIMIT + 11);
    }

    #[test]
    fn test_write_failure_names_stream() {
        let mut stream = SymbolStream::new("trace", FailingSink);
        let err = stream.append(Symbol::I).unwrap_err();
        assert!(matches!(err, RuntimeError::StreamWrite { stream: "trace", .. }));
    }
}
