//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//! ```text
//! ┌─────────┬──────────────────────────────────────────────────┐
//! │ Tag (1) │ Body                                             │
//! ├─────────┼──────────────────────────────────────────────────┤
//! │   '-'   │ text CRLF                                        │
//! │   '+'   │ text CRLF                                        │
//! │   ':'   │ decimal CRLF                                     │
//! │   '$'   │ len CRLF, len raw bytes, CRLF   (len -1 = nil)   │
//! │   '*'   │ count CRLF, count values        (count -1 = nil) │
//! └─────────┴──────────────────────────────────────────────────┘
//! ```
//!
//! Line reads skip every CR and end at the first LF.

use std::io::{BufRead, Cursor, Read, Write};

use bytes::Bytes;

use super::value::{parse_decimal, Value, ValueType};
use crate::error::{RespError, Result};

/// Line terminator
pub const CRLF: &[u8] = b"\r\n";

/// Largest bulk payload accepted from the wire (512 MB)
pub const MAX_BULK_LEN: i64 = 512 * 1024 * 1024;

/// Deepest array nesting accepted from the wire
pub const MAX_DEPTH: usize = 128;

/// Upper bound on up-front allocation for an incoming array
const MAX_PREALLOC: usize = 1024;

/// Upper bound on bulk buffer capacity reserved ahead of the payload
const MAX_BULK_PREALLOC: usize = 64 * 1024;

// =============================================================================
// Encoding
// =============================================================================

/// Encode a value to bytes
pub fn encode_value(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_value(&mut buf, value)?;
    Ok(buf)
}

/// Encode a command (an array of bulk strings) to bytes
pub fn encode_command(args: &[Bytes]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(16 + args.iter().map(|a| a.len() + 16).sum::<usize>());
    write_command(&mut buf, args)?;
    Ok(buf)
}

/// Write a value to a stream
///
/// The value is checked before anything is written, so a misuse error never
/// leaves a partial frame behind. Does not flush.
pub fn write_value<W: Write>(writer: &mut W, value: &Value) -> Result<()> {
    check_writable(value)?;
    write_unchecked(writer, value)
}

/// Write a command as an array of bulk strings. Does not flush.
pub fn write_command<W: Write>(writer: &mut W, args: &[Bytes]) -> Result<()> {
    write_header(writer, ValueType::Array, args.len() as i64)?;
    for arg in args {
        write_bulk(writer, arg)?;
    }
    Ok(())
}

fn check_writable(value: &Value) -> Result<()> {
    match value {
        Value::Error(text) | Value::Status(text) => {
            if text.iter().any(|&b| b == b'\r' || b == b'\n') {
                return Err(RespError::ProtocolMisuse(format!(
                    "{} line contains CR or LF",
                    value.value_type().name()
                )));
            }
            Ok(())
        }
        Value::Array(Some(values)) => values.iter().try_for_each(check_writable),
        Value::Integer(_) | Value::Bulk(_) | Value::Array(None) => Ok(()),
    }
}

fn write_unchecked<W: Write>(writer: &mut W, value: &Value) -> Result<()> {
    match value {
        Value::Error(text) | Value::Status(text) => {
            writer.write_all(&[value.value_type().tag()])?;
            writer.write_all(text)?;
            writer.write_all(CRLF)?;
        }
        Value::Integer(i) => write_header(writer, ValueType::Integer, *i)?,
        Value::Bulk(Some(data)) => write_bulk(writer, data)?,
        Value::Bulk(None) => write_header(writer, ValueType::Bulk, -1)?,
        Value::Array(Some(values)) => {
            write_header(writer, ValueType::Array, values.len() as i64)?;
            for child in values {
                write_unchecked(writer, child)?;
            }
        }
        Value::Array(None) => write_header(writer, ValueType::Array, -1)?,
    }
    Ok(())
}

/// Tag byte followed by a decimal line
fn write_header<W: Write>(writer: &mut W, value_type: ValueType, n: i64) -> Result<()> {
    write!(writer, "{}{}\r\n", value_type.tag() as char, n)?;
    Ok(())
}

fn write_bulk<W: Write>(writer: &mut W, data: &[u8]) -> Result<()> {
    write_header(writer, ValueType::Bulk, data.len() as i64)?;
    writer.write_all(data)?;
    writer.write_all(CRLF)?;
    Ok(())
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a single value from bytes; trailing bytes are ignored
pub fn decode_value(bytes: &[u8]) -> Result<Value> {
    read_value(&mut Cursor::new(bytes))
}

/// Read one complete value from a stream
///
/// Blocks until the value is complete or the stream fails.
pub fn read_value<R: BufRead>(reader: &mut R) -> Result<Value> {
    read_nested(reader, 0)
}

fn read_nested<R: BufRead>(reader: &mut R, depth: usize) -> Result<Value> {
    let mut tag = [0u8; 1];
    reader.read_exact(&mut tag)?;

    let value_type = ValueType::from_tag(tag[0]).ok_or_else(|| {
        RespError::InvalidData(format!("Unknown value type: 0x{:02x}", tag[0]))
    })?;

    match value_type {
        ValueType::Error => Ok(Value::Error(read_line(reader)?.into())),
        ValueType::Status => Ok(Value::Status(read_line(reader)?.into())),
        ValueType::Integer => Ok(Value::Integer(parse_decimal(&read_line(reader)?)?)),
        ValueType::Bulk => {
            let len = parse_decimal(&read_line(reader)?)?;
            if len < 0 {
                return Ok(Value::Bulk(None));
            }
            if len > MAX_BULK_LEN {
                return Err(RespError::InvalidData(format!(
                    "Bulk payload too large: {} bytes (max {})",
                    len, MAX_BULK_LEN
                )));
            }
            // Grow with the bytes that actually arrive, not the claimed length
            let len = len as usize;
            let mut data = Vec::with_capacity(len.min(MAX_BULK_PREALLOC));
            reader.by_ref().take(len as u64).read_to_end(&mut data)?;
            if data.len() < len {
                return Err(RespError::StreamEnded);
            }
            let mut terminator = [0u8; 2];
            reader.read_exact(&mut terminator)?;
            Ok(Value::Bulk(Some(data.into())))
        }
        ValueType::Array => {
            let count = parse_decimal(&read_line(reader)?)?;
            if count < 0 {
                return Ok(Value::Array(None));
            }
            if depth >= MAX_DEPTH {
                return Err(RespError::InvalidData(format!(
                    "Array nesting deeper than {}",
                    MAX_DEPTH
                )));
            }
            let mut values = Vec::with_capacity((count as usize).min(MAX_PREALLOC));
            for _ in 0..count {
                values.push(read_nested(reader, depth + 1)?);
            }
            Ok(Value::Array(Some(values)))
        }
    }
}

/// Read up to the next LF, dropping CR bytes
fn read_line<R: BufRead>(reader: &mut R) -> Result<Vec<u8>> {
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;
    if line.pop() != Some(b'\n') {
        return Err(RespError::StreamEnded);
    }
    line.retain(|&b| b != b'\r');
    Ok(line)
}
