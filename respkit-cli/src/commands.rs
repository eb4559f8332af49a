//! Command execution.

use crate::Commands;
use colored::Colorize;
use respkit_protocol::{DecodeError, Decoder, Value};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Executes a command and returns the formatted output.
pub fn execute(cmd: Commands) -> Result<String, Box<dyn std::error::Error>> {
    match cmd {
        Commands::Dump { file, offsets } => dump(file.as_deref(), offsets),
        Commands::Check { file } => check(file.as_deref()),
    }
}

fn dump(path: Option<&Path>, offsets: bool) -> Result<String, Box<dyn std::error::Error>> {
    let mut decoder = Decoder::new(open_input(path)?);
    let mut output = String::new();

    loop {
        let start = decoder.bytes_consumed();
        match decoder.read_value() {
            Ok(Some(value)) => {
                if offsets {
                    let size = decoder.bytes_consumed() - start;
                    let prefix = format!("@{} +{}", start, size);
                    output.push_str(&format!("{} ", prefix.dimmed()));
                }
                output.push_str(&render(&value, 0));
                output.push('\n');
            }
            Ok(None) => break,
            Err(e) => return Err(decode_failure(start, decoder.bytes_consumed(), e)),
        }
    }

    // The caller prints with a trailing newline of its own.
    output.pop();
    Ok(output)
}

fn check(path: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    let mut decoder = Decoder::new(open_input(path)?);
    let mut count = 0u64;

    loop {
        let start = decoder.bytes_consumed();
        match decoder.read_value() {
            Ok(Some(_)) => count += 1,
            Ok(None) => break,
            Err(e) => return Err(decode_failure(start, decoder.bytes_consumed(), e)),
        }
    }

    Ok(format!(
        "{} {} values ({} bytes)",
        "Valid".green(),
        count,
        decoder.bytes_consumed()
    ))
}

fn open_input(path: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path)?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn decode_failure(frame_start: u64, consumed: u64, err: DecodeError) -> Box<dyn std::error::Error> {
    let kind = if err.is_incomplete() {
        "stream truncated"
    } else if err.is_protocol() {
        "malformed stream"
    } else {
        "read failed"
    };
    format!(
        "{} at byte {} (frame started at byte {}): {}",
        kind, consumed, frame_start, err
    )
    .into()
}

/// Renders a value tree in redis-cli notation.
fn render(value: &Value, indent: usize) -> String {
    match value {
        Value::SimpleString(text) => String::from_utf8_lossy(text).to_string(),
        Value::Error(text) => format!("(error) {}", String::from_utf8_lossy(text))
            .red()
            .to_string(),
        Value::Integer(n) => format!("(integer) {}", n),
        Value::BulkString(None) | Value::Array(None) => "(nil)".dimmed().to_string(),
        Value::BulkString(Some(payload)) => format!("\"{}\"", escape_bytes(payload)),
        Value::Array(Some(items)) if items.is_empty() => "(empty array)".to_string(),
        Value::Array(Some(items)) => {
            let mut out = String::new();
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                    out.push_str(&" ".repeat(indent));
                }
                let marker = format!("{}) ", i + 1);
                out.push_str(&marker);
                out.push_str(&render(item, indent + marker.len()));
            }
            out
        }
    }
}

/// Escapes non-printable bytes so binary payloads stay on one line.
fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &byte in bytes {
        match byte {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'\r' => out.push_str("\\r"),
            b'\n' => out.push_str("\\n"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\x{:02x}", byte)),
        }
    }
    out
}
