//! # respkit-protocol
//!
//! RESP2 wire protocol implementation (REdis Serialization Protocol,
//! version 2).
//!
//! This crate provides:
//! - A streaming, recursive-descent decoder over any buffered byte source
//! - The RESP2 value model with explicit Null bulk string and Null array forms
//! - A matching encoder for writing values back to the wire
//! - Configurable parse limits for untrusted input

pub mod decode;
pub mod encode;
pub mod error;
pub mod limits;
pub mod value;

pub use decode::Decoder;
pub use encode::Encoder;
pub use error::DecodeError;
pub use limits::Limits;
pub use value::Value;

/// Default maximum line length accepted by the line scanner (64 KiB).
pub const DEFAULT_MAX_LINE_LEN: usize = 64 * 1024;

/// Default maximum declared bulk string payload length (512 MiB).
pub const DEFAULT_MAX_BULK_LEN: u64 = 512 * 1024 * 1024;

/// Default maximum declared array element count.
pub const DEFAULT_MAX_ARRAY_LEN: u64 = 1024 * 1024;

/// Default maximum array nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 32;
