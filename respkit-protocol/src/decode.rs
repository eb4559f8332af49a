//! Streaming RESP2 decoder.
//!
//! Wire grammar:
//!
//! ```text
//! value   = simple / error / integer / bulk / array
//! simple  = "+" text CRLF          ; text contains no CR or LF
//! error   = "-" text CRLF
//! integer = ":" number CRLF        ; signed base-10 64-bit
//! bulk    = "$" number CRLF        ; -1 encodes the Null bulk string
//!           [ length bytes CRLF ]  ; payload is binary-safe
//! array   = "*" number CRLF        ; -1 encodes the Null array
//!           count values
//! ```
//!
//! The decoder pulls bytes from any [`BufRead`] source and produces one
//! [`Value`] tree per call, blocking until the frame is complete. It keeps
//! no buffer of its own; each frame is consumed from the source exactly
//! once, with nothing read past its end.

use crate::error::DecodeError;
use crate::limits::Limits;
use crate::value::Value;
use bytes::Bytes;
use std::io::{BufRead, ErrorKind, Read};

/// Streaming decoder over a buffered byte source.
///
/// One decoder owns one stream. [`read_value`](Self::read_value) is called
/// repeatedly to pull frames; `Ok(None)` marks a clean end of input at a
/// frame boundary.
pub struct Decoder<R> {
    src: R,
    limits: Limits,
    consumed: u64,
}

impl<R: BufRead> Decoder<R> {
    /// Creates a decoder with default [`Limits`].
    pub fn new(src: R) -> Self {
        Self::with_limits(src, Limits::default())
    }

    /// Creates a decoder with explicit limits.
    pub fn with_limits(src: R, limits: Limits) -> Self {
        Self {
            src,
            limits,
            consumed: 0,
        }
    }

    /// Total number of bytes pulled from the source so far.
    ///
    /// After a successful [`read_value`](Self::read_value) this is the
    /// offset of the next frame boundary, which makes it usable for
    /// per-frame offset and size accounting.
    pub fn bytes_consumed(&self) -> u64 {
        self.consumed
    }

    /// Consumes the decoder, returning the underlying source.
    pub fn into_inner(self) -> R {
        self.src
    }

    /// Reads the next complete value from the stream.
    ///
    /// Blocks until a full frame is available, then returns it as
    /// `Ok(Some(value))`. Returns `Ok(None)` when the source ends cleanly
    /// at a frame boundary. End of input anywhere inside a frame is
    /// [`DecodeError::Incomplete`], a grammar violation is
    /// [`DecodeError::Protocol`], and a source failure is
    /// [`DecodeError::Io`].
    ///
    /// A call either consumes one whole frame or fails. After an error the
    /// stream position is unspecified and the decoder should be discarded.
    pub fn read_value(&mut self) -> Result<Option<Value>, DecodeError> {
        let tag = loop {
            match self.src.fill_buf() {
                Ok(buf) if buf.is_empty() => return Ok(None),
                Ok(buf) => break buf[0],
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        self.src.consume(1);
        self.consumed += 1;

        let start = self.consumed - 1;
        let value = self.read_body(tag, 0)?;
        tracing::trace!(
            "decoded {} frame ({} bytes)",
            value.type_name(),
            self.consumed - start
        );
        Ok(Some(value))
    }

    /// Decodes one value body given its already-consumed type tag.
    fn read_body(&mut self, tag: u8, depth: usize) -> Result<Value, DecodeError> {
        match tag {
            b'+' => {
                let line = self.read_line()?;
                Ok(Value::SimpleString(Bytes::from(line)))
            }
            b'-' => {
                let line = self.read_line()?;
                Ok(Value::Error(Bytes::from(line)))
            }
            b':' => {
                let line = self.read_line()?;
                Ok(Value::Integer(parse_integer(&line)?))
            }
            b'$' => self.read_bulk(),
            b'*' => self.read_array(depth),
            other => Err(DecodeError::Protocol(format!(
                "unknown type tag 0x{:02x}",
                other
            ))),
        }
    }

    /// Reads one byte, mapping end of input to an incomplete-frame error.
    fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let mut byte = [0u8; 1];
        match self.src.read_exact(&mut byte) {
            Ok(()) => {
                self.consumed += 1;
                Ok(byte[0])
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(DecodeError::Incomplete(context)),
            Err(e) => Err(e.into()),
        }
    }

    /// Scans one CRLF-terminated line, returning its content.
    ///
    /// Line content excludes CR and LF entirely, so a CR must be followed
    /// by LF and a bare LF is malformed rather than a terminator.
    fn read_line(&mut self) -> Result<Vec<u8>, DecodeError> {
        let mut line = Vec::new();
        loop {
            match self.read_byte("line")? {
                b'\r' => {
                    let next = self.read_byte("line terminator")?;
                    if next != b'\n' {
                        return Err(DecodeError::Protocol(format!(
                            "expected LF after CR, got 0x{:02x}",
                            next
                        )));
                    }
                    return Ok(line);
                }
                b'\n' => return Err(DecodeError::Protocol("bare LF in line".to_string())),
                byte => {
                    if line.len() >= self.limits.max_line_len {
                        return Err(DecodeError::Protocol(format!(
                            "line too long: exceeds {} bytes",
                            self.limits.max_line_len
                        )));
                    }
                    line.push(byte);
                }
            }
        }
    }

    /// Reads a bulk string body: a length line, then exactly that many
    /// payload bytes and their trailing CRLF. A declared length of -1 is
    /// the Null bulk string and carries no payload bytes at all.
    fn read_bulk(&mut self) -> Result<Value, DecodeError> {
        let line = self.read_line()?;
        let declared = parse_integer(&line)?;
        if declared == -1 {
            return Ok(Value::BulkString(None));
        }
        if declared < -1 {
            return Err(DecodeError::Protocol(format!(
                "invalid bulk string length {}",
                declared
            )));
        }

        let len = declared as u64;
        if len > self.limits.max_bulk_len {
            return Err(DecodeError::Protocol(format!(
                "bulk string too large: {} bytes (max {})",
                len, self.limits.max_bulk_len
            )));
        }

        // Cap the initial allocation; read_to_end grows it as bytes
        // actually arrive.
        let mut payload = Vec::with_capacity(len.min(64 * 1024) as usize);
        let read = (&mut self.src).take(len).read_to_end(&mut payload)?;
        self.consumed += read as u64;
        if (read as u64) < len {
            return Err(DecodeError::Incomplete("bulk string payload"));
        }

        self.read_bulk_terminator()?;
        Ok(Value::BulkString(Some(Bytes::from(payload))))
    }

    /// Reads the two terminator bytes after a bulk payload. The declared
    /// frame never completed if they are absent or not CRLF.
    fn read_bulk_terminator(&mut self) -> Result<(), DecodeError> {
        let mut term = [0u8; 2];
        match self.src.read_exact(&mut term) {
            Ok(()) => {
                self.consumed += 2;
                if term != *b"\r\n" {
                    return Err(DecodeError::Incomplete("bulk string terminator"));
                }
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                Err(DecodeError::Incomplete("bulk string terminator"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Reads an array body: a count line, then exactly that many values in
    /// order. A declared count of -1 is the Null array.
    fn read_array(&mut self, depth: usize) -> Result<Value, DecodeError> {
        if depth >= self.limits.max_depth {
            return Err(DecodeError::Protocol(format!(
                "array nesting deeper than {} levels",
                self.limits.max_depth
            )));
        }

        let line = self.read_line()?;
        let declared = parse_integer(&line)?;
        if declared == -1 {
            return Ok(Value::Array(None));
        }
        if declared < -1 {
            return Err(DecodeError::Protocol(format!(
                "invalid array length {}",
                declared
            )));
        }

        let count = declared as u64;
        if count > self.limits.max_array_len {
            return Err(DecodeError::Protocol(format!(
                "array too large: {} elements (max {})",
                count, self.limits.max_array_len
            )));
        }

        let mut items = Vec::with_capacity(count.min(1024) as usize);
        for _ in 0..count {
            let tag = self.read_byte("array element")?;
            items.push(self.read_body(tag, depth + 1)?);
        }
        Ok(Value::Array(Some(items)))
    }
}

/// Parses a base-10 signed integer from line content.
///
/// Accepts an optional single leading minus and digits only. Anything
/// else, including a leading plus, whitespace, or an empty line, is a
/// protocol error, as is a magnitude outside the i64 range.
fn parse_integer(line: &[u8]) -> Result<i64, DecodeError> {
    let (negative, digits) = match line.first() {
        Some(&b'-') => (true, &line[1..]),
        _ => (false, line),
    };
    if digits.is_empty() {
        return Err(bad_integer(line));
    }

    // Accumulate in the negative domain so that i64::MIN parses without
    // overflow.
    let mut value = 0i64;
    for &byte in digits {
        if !byte.is_ascii_digit() {
            return Err(bad_integer(line));
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_sub((byte - b'0') as i64))
            .ok_or_else(|| out_of_range(line))?;
    }

    if negative {
        Ok(value)
    } else {
        value.checked_neg().ok_or_else(|| out_of_range(line))
    }
}

fn bad_integer(line: &[u8]) -> DecodeError {
    DecodeError::Protocol(format!(
        "invalid integer {:?}",
        String::from_utf8_lossy(line)
    ))
}

fn out_of_range(line: &[u8]) -> DecodeError {
    DecodeError::Protocol(format!(
        "integer out of range: {}",
        String::from_utf8_lossy(line)
    ))
}
