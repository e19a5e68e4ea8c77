// Constants for the rewriting engine

/// Reference stride of the chunked index (symbols per bucket)
pub const INDEX_STRIDE: usize = 5000;

/// Reference maximum indexable feed length
pub const INDEX_CAPACITY: usize = 30_000_000;

/// Raw symbols copied to the output stream by one echo construct
pub const ECHO_WIDTH: usize = 7;

/// Highest bit level a read-side number may set before it saturates
pub const NAT_MAX_LEVEL: u32 = 30;

/// Value of a saturated read-side number
pub const NAT_SATURATED: usize = 1 << NAT_MAX_LEVEL;

/// Byte closing both the output and the trace stream
pub const STREAM_TERMINATOR: u8 = 0xFF;
