//! Parse limits for untrusted input.

use crate::{DEFAULT_MAX_ARRAY_LEN, DEFAULT_MAX_BULK_LEN, DEFAULT_MAX_DEPTH, DEFAULT_MAX_LINE_LEN};

/// Bounds enforced while decoding.
///
/// Each bound is checked against the length or count *declared* by the
/// input before the corresponding bytes are read, so a hostile stream
/// cannot make the decoder buffer unbounded data. Exceeding a bound is a
/// protocol error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum content length of a scanned line, terminator excluded.
    pub max_line_len: usize,
    /// Maximum declared bulk string payload length in bytes.
    pub max_bulk_len: u64,
    /// Maximum declared array element count.
    pub max_array_len: u64,
    /// Maximum array nesting depth.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self::new()
    }
}

impl Limits {
    /// Creates the default limits.
    pub const fn new() -> Self {
        Self {
            max_line_len: DEFAULT_MAX_LINE_LEN,
            max_bulk_len: DEFAULT_MAX_BULK_LEN,
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub const fn with_max_line_len(mut self, len: usize) -> Self {
        self.max_line_len = len;
        self
    }

    pub const fn with_max_bulk_len(mut self, len: u64) -> Self {
        self.max_bulk_len = len;
        self
    }

    pub const fn with_max_array_len(mut self, len: u64) -> Self {
        self.max_array_len = len;
        self
    }

    pub const fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let limits = Limits::default();
        assert_eq!(limits.max_line_len, 64 * 1024);
        assert_eq!(limits.max_bulk_len, 512 * 1024 * 1024);
        assert_eq!(limits.max_array_len, 1024 * 1024);
        assert_eq!(limits.max_depth, 32);
    }

    #[test]
    fn test_builders() {
        let limits = Limits::new()
            .with_max_line_len(128)
            .with_max_bulk_len(1024)
            .with_max_array_len(16)
            .with_max_depth(4);

        assert_eq!(limits.max_line_len, 128);
        assert_eq!(limits.max_bulk_len, 1024);
        assert_eq!(limits.max_array_len, 16);
        assert_eq!(limits.max_depth, 4);
    }
}
