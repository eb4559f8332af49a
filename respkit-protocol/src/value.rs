//! RESP2 value model.
//!
//! A decoded frame is a tree of [`Value`] nodes. The two wire-level Null
//! forms stay explicit: the Null bulk string (`$-1`) is `BulkString(None)`
//! and the Null array (`*-1`) is `Array(None)`, both distinct from their
//! empty counterparts.

use bytes::Bytes;

/// A single RESP2 value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Line-oriented status text (`+OK`). Never contains CR or LF.
    SimpleString(Bytes),
    /// Line-oriented error text (`-ERR ...`). Never contains CR or LF.
    Error(Bytes),
    /// Signed 64-bit integer (`:42`).
    Integer(i64),
    /// Length-prefixed binary payload (`$5`), or `None` for the Null bulk
    /// string (`$-1`). Payload bytes are opaque and may contain CR or LF.
    BulkString(Option<Bytes>),
    /// Ordered sequence of values (`*2`), possibly nested, or `None` for
    /// the Null array (`*-1`).
    Array(Option<Vec<Value>>),
}

impl Value {
    /// Creates a simple string value.
    pub fn simple(text: impl Into<Bytes>) -> Self {
        Value::SimpleString(text.into())
    }

    /// Creates an error value.
    pub fn error(text: impl Into<Bytes>) -> Self {
        Value::Error(text.into())
    }

    /// Creates a non-null bulk string value.
    pub fn bulk(payload: impl Into<Bytes>) -> Self {
        Value::BulkString(Some(payload.into()))
    }

    /// Creates the Null bulk string.
    pub const fn null_bulk() -> Self {
        Value::BulkString(None)
    }

    /// Creates a non-null array value.
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Some(items))
    }

    /// Creates the Null array.
    pub const fn null_array() -> Self {
        Value::Array(None)
    }

    /// Returns the protocol name of this value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::SimpleString(_) => "simple string",
            Value::Error(_) => "error",
            Value::Integer(_) => "integer",
            Value::BulkString(_) => "bulk string",
            Value::Array(_) => "array",
        }
    }

    /// Returns whether this is the Null bulk string or the Null array.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::BulkString(None) | Value::Array(None))
    }

    /// Returns whether this is an error value.
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Returns the integer payload, if this is an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the byte content of a simple string, an error, or a
    /// non-null bulk string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::SimpleString(text) | Value::Error(text) => Some(text),
            Value::BulkString(Some(payload)) => Some(payload),
            _ => None,
        }
    }

    /// Returns the elements of a non-null array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(Some(items)) => Some(items),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_forms_distinct_from_empty() {
        assert_ne!(Value::null_bulk(), Value::bulk(Bytes::new()));
        assert_ne!(Value::null_array(), Value::array(vec![]));

        assert!(Value::null_bulk().is_null());
        assert!(Value::null_array().is_null());
        assert!(!Value::bulk(Bytes::new()).is_null());
        assert!(!Value::array(vec![]).is_null());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Integer(42).as_integer(), Some(42));
        assert_eq!(Value::simple("OK").as_integer(), None);

        assert_eq!(Value::simple("OK").as_bytes(), Some(&b"OK"[..]));
        assert_eq!(Value::error("ERR boom").as_bytes(), Some(&b"ERR boom"[..]));
        assert_eq!(Value::bulk("payload").as_bytes(), Some(&b"payload"[..]));
        assert_eq!(Value::null_bulk().as_bytes(), None);
        assert_eq!(Value::Integer(1).as_bytes(), None);

        let array = Value::array(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(array.as_array().map(<[Value]>::len), Some(2));
        assert_eq!(Value::null_array().as_array(), None);
    }

    #[test]
    fn test_is_error() {
        assert!(Value::error("ERR").is_error());
        assert!(!Value::simple("OK").is_error());
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::simple("x").type_name(), "simple string");
        assert_eq!(Value::error("x").type_name(), "error");
        assert_eq!(Value::Integer(0).type_name(), "integer");
        assert_eq!(Value::null_bulk().type_name(), "bulk string");
        assert_eq!(Value::null_array().type_name(), "array");
    }
}
