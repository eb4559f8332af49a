//! RESP2 encoder.
//!
//! Writes [`Value`] trees back to the wire. Output is the byte-exact
//! inverse of the decoder for every representable value.

use crate::value::Value;
use std::io::{self, Write};

const CRLF: &[u8] = b"\r\n";

/// Serializes values into a [`Write`] sink.
pub struct Encoder<W> {
    dst: W,
}

impl<W: Write> Encoder<W> {
    /// Creates an encoder over the given sink.
    pub fn new(dst: W) -> Self {
        Self { dst }
    }

    /// Writes one value, recursing through arrays.
    ///
    /// Simple string and error content must not contain CR or LF; such a
    /// value has no line representation and is rejected with
    /// [`io::ErrorKind::InvalidInput`].
    pub fn write_value(&mut self, value: &Value) -> io::Result<()> {
        match value {
            Value::SimpleString(text) => self.write_line(b'+', text),
            Value::Error(text) => self.write_line(b'-', text),
            Value::Integer(n) => write!(self.dst, ":{}\r\n", n),
            Value::BulkString(None) => self.dst.write_all(b"$-1\r\n"),
            Value::BulkString(Some(payload)) => {
                write!(self.dst, "${}\r\n", payload.len())?;
                self.dst.write_all(payload)?;
                self.dst.write_all(CRLF)
            }
            Value::Array(None) => self.dst.write_all(b"*-1\r\n"),
            Value::Array(Some(items)) => {
                write!(self.dst, "*{}\r\n", items.len())?;
                for item in items {
                    self.write_value(item)?;
                }
                Ok(())
            }
        }
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.dst.flush()
    }

    /// Consumes the encoder, returning the sink.
    pub fn into_inner(self) -> W {
        self.dst
    }

    fn write_line(&mut self, tag: u8, text: &[u8]) -> io::Result<()> {
        if text.iter().any(|&b| b == b'\r' || b == b'\n') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "line content contains CR or LF",
            ));
        }
        self.dst.write_all(&[tag])?;
        self.dst.write_all(text)?;
        self.dst.write_all(CRLF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Decoder;
    use bytes::Bytes;
    use proptest::prelude::*;

    fn encode_to_vec(value: &Value) -> Vec<u8> {
        let mut encoder = Encoder::new(Vec::new());
        encoder.write_value(value).unwrap();
        encoder.into_inner()
    }

    #[test]
    fn test_encode_simple_string() {
        assert_eq!(encode_to_vec(&Value::simple("OK")), b"+OK\r\n");
    }

    #[test]
    fn test_encode_error() {
        assert_eq!(
            encode_to_vec(&Value::error("ERR wrong type")),
            b"-ERR wrong type\r\n"
        );
    }

    #[test]
    fn test_encode_integer() {
        assert_eq!(encode_to_vec(&Value::Integer(1000)), b":1000\r\n");
        assert_eq!(encode_to_vec(&Value::Integer(-42)), b":-42\r\n");
        assert_eq!(
            encode_to_vec(&Value::Integer(i64::MIN)),
            b":-9223372036854775808\r\n"
        );
    }

    #[test]
    fn test_encode_bulk_string() {
        assert_eq!(encode_to_vec(&Value::bulk("foobar")), b"$6\r\nfoobar\r\n");
        assert_eq!(encode_to_vec(&Value::bulk(Bytes::new())), b"$0\r\n\r\n");
        assert_eq!(encode_to_vec(&Value::null_bulk()), b"$-1\r\n");
    }

    #[test]
    fn test_encode_bulk_string_binary() {
        assert_eq!(
            encode_to_vec(&Value::bulk(&b"a\r\nb"[..])),
            b"$4\r\na\r\nb\r\n"
        );
    }

    #[test]
    fn test_encode_array() {
        let value = Value::array(vec![
            Value::bulk("get"),
            Value::bulk("key"),
        ]);
        assert_eq!(encode_to_vec(&value), b"*2\r\n$3\r\nget\r\n$3\r\nkey\r\n");

        assert_eq!(encode_to_vec(&Value::array(vec![])), b"*0\r\n");
        assert_eq!(encode_to_vec(&Value::null_array()), b"*-1\r\n");
    }

    #[test]
    fn test_encode_nested_array() {
        let value = Value::array(vec![
            Value::array(vec![Value::Integer(1)]),
            Value::simple("x"),
        ]);
        assert_eq!(encode_to_vec(&value), b"*2\r\n*1\r\n:1\r\n+x\r\n");
    }

    #[test]
    fn test_rejects_embedded_line_breaks() {
        let mut encoder = Encoder::new(Vec::new());
        let err = encoder.write_value(&Value::simple("bad\r\nvalue")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let err = encoder.write_value(&Value::error("bad\nvalue")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    fn value_strategy() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            "[a-zA-Z0-9 ]{0,24}".prop_map(|s| Value::simple(Bytes::from(s.into_bytes()))),
            "[a-zA-Z0-9 ]{0,24}".prop_map(|s| Value::error(Bytes::from(s.into_bytes()))),
            any::<i64>().prop_map(Value::Integer),
            proptest::collection::vec(any::<u8>(), 0..48)
                .prop_map(|payload| Value::bulk(Bytes::from(payload))),
            Just(Value::null_bulk()),
            Just(Value::null_array()),
        ];
        leaf.prop_recursive(4, 48, 6, |inner| {
            proptest::collection::vec(inner, 0..6).prop_map(Value::array)
        })
    }

    proptest! {
        #[test]
        fn prop_wire_roundtrip(value in value_strategy()) {
            let wire = encode_to_vec(&value);

            let mut decoder = Decoder::new(&wire[..]);
            let decoded = decoder.read_value().unwrap().unwrap();
            prop_assert_eq!(decoded, value);
            prop_assert_eq!(decoder.read_value().unwrap(), None);
            prop_assert_eq!(decoder.bytes_consumed(), wire.len() as u64);
        }
    }
}
