//! Value definitions
//!
//! Typed wire values exchanged in both directions, plus the explicit
//! conversions between values and native scalars.

use std::fmt;

use bytes::Bytes;

use crate::error::{RespError, Result};

/// Wire type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueType {
    Error = b'-',
    Status = b'+',
    Integer = b':',
    Bulk = b'$',
    Array = b'*',
}

impl ValueType {
    /// Look up the type for a tag byte
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'-' => Some(ValueType::Error),
            b'+' => Some(ValueType::Status),
            b':' => Some(ValueType::Integer),
            b'$' => Some(ValueType::Bulk),
            b'*' => Some(ValueType::Array),
            _ => None,
        }
    }

    /// The tag byte written on the wire
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueType::Error => "error",
            ValueType::Status => "status",
            ValueType::Integer => "integer",
            ValueType::Bulk => "bulk",
            ValueType::Array => "array",
        }
    }
}

/// A single wire value
///
/// `Bulk(None)` and `Array(None)` are the nil states (`$-1` / `*-1`), distinct
/// from an empty string or an empty array.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Server-reported failure: `-ERR message\r\n`
    Error(Bytes),

    /// Acknowledgement line: `+OK\r\n`
    Status(Bytes),

    /// Signed integer: `:1000\r\n`
    Integer(i64),

    /// Length-prefixed bytes: `$6\r\nfoobar\r\n`
    Bulk(Option<Bytes>),

    /// Nested values: `*2\r\n...`
    Array(Option<Vec<Value>>),
}

impl Value {
    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn error(text: impl Into<Bytes>) -> Self {
        Value::Error(text.into())
    }

    pub fn status(text: impl Into<Bytes>) -> Self {
        Value::Status(text.into())
    }

    pub fn integer(value: i64) -> Self {
        Value::Integer(value)
    }

    pub fn bulk(data: impl Into<Bytes>) -> Self {
        Value::Bulk(Some(data.into()))
    }

    pub fn nil_bulk() -> Self {
        Value::Bulk(None)
    }

    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(Some(values))
    }

    pub fn nil_array() -> Self {
        Value::Array(None)
    }

    /// Bulk string holding UTF-8 text
    pub fn from_text(text: &str) -> Self {
        Value::Bulk(Some(Bytes::copy_from_slice(text.as_bytes())))
    }

    /// Bulk string holding the decimal form of a double
    pub fn from_f64(value: f64) -> Self {
        Value::Bulk(Some(format_f64(value)))
    }

    // =========================================================================
    // Inspection (never fails, even on Error values)
    // =========================================================================

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Error(_) => ValueType::Error,
            Value::Status(_) => ValueType::Status,
            Value::Integer(_) => ValueType::Integer,
            Value::Bulk(_) => ValueType::Bulk,
            Value::Array(_) => ValueType::Array,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// True for the nil bulk and nil array states
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Bulk(None) | Value::Array(None))
    }

    /// Read an Error value's text. `None` for every other type.
    pub fn error_text(&self) -> Option<String> {
        match self {
            Value::Error(text) => Some(String::from_utf8_lossy(text).into_owned()),
            _ => None,
        }
    }

    // =========================================================================
    // Data Accessors
    // =========================================================================

    /// Byte payload of a Status or Bulk value; `None` for nil bulk
    pub fn as_bytes(&self) -> Result<Option<&Bytes>> {
        match self {
            Value::Status(data) => Ok(Some(data)),
            Value::Bulk(data) => Ok(data.as_ref()),
            other => Err(other.mismatch("bytes")),
        }
    }

    /// Payload decoded as UTF-8; Integer values render as decimal text
    pub fn as_text(&self) -> Result<Option<String>> {
        if let Value::Integer(i) = self {
            return Ok(Some(i.to_string()));
        }
        match self.as_bytes()? {
            Some(data) => std::str::from_utf8(data)
                .map(|s| Some(s.to_string()))
                .map_err(|e| RespError::InvalidData(format!("payload is not UTF-8: {}", e))),
            None => Ok(None),
        }
    }

    /// Integer value, or the decimal text of a Status/Bulk payload
    pub fn as_integer(&self) -> Result<i64> {
        match self {
            Value::Integer(i) => Ok(*i),
            Value::Status(data) | Value::Bulk(Some(data)) => parse_decimal(data),
            other => Err(other.mismatch("integer")),
        }
    }

    /// Floating-point value parsed from decimal text (`inf`/`-inf` included)
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Value::Integer(i) => Ok(*i as f64),
            Value::Status(data) | Value::Bulk(Some(data)) => parse_f64(data),
            other => Err(other.mismatch("double")),
        }
    }

    /// Child values; `None` for nil array
    pub fn as_array(&self) -> Result<Option<&[Value]>> {
        match self {
            Value::Array(values) => Ok(values.as_deref()),
            other => Err(other.mismatch("array")),
        }
    }

    pub fn into_array(self) -> Result<Option<Vec<Value>>> {
        match self {
            Value::Array(values) => Ok(values),
            other => Err(other.mismatch("array")),
        }
    }

    /// Error values surface as `Server`; everything else as a type mismatch.
    fn mismatch(&self, expected: &'static str) -> RespError {
        match self {
            Value::Error(text) => RespError::Server(String::from_utf8_lossy(text).into_owned()),
            Value::Bulk(None) => RespError::UnexpectedType {
                expected,
                found: "nil",
            },
            other => RespError::UnexpectedType {
                expected,
                found: other.value_type().name(),
            },
        }
    }
}

impl fmt::Display for Value {
    /// Human readable rendering, in the style of redis-cli
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

impl Value {
    fn render(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match self {
            Value::Error(text) => write!(f, "(error) {}", String::from_utf8_lossy(text)),
            Value::Status(text) => write!(f, "{}", String::from_utf8_lossy(text)),
            Value::Integer(i) => write!(f, "(integer) {}", i),
            Value::Bulk(None) | Value::Array(None) => write!(f, "(nil)"),
            Value::Bulk(Some(data)) => write!(f, "{:?}", String::from_utf8_lossy(data)),
            Value::Array(Some(values)) if values.is_empty() => write!(f, "(empty array)"),
            Value::Array(Some(values)) => {
                let width = values.len().to_string().len();
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                        write!(f, "{:indent$}", "", indent = indent)?;
                    }
                    let label = format!("{:>width$}) ", i + 1, width = width);
                    write!(f, "{}", label)?;
                    value.render(f, indent + label.len())?;
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Explicit conversion of a command argument into a Bulk payload
pub trait ToArg {
    fn to_arg(&self) -> Bytes;
}

impl<T: ToArg + ?Sized> ToArg for &T {
    fn to_arg(&self) -> Bytes {
        (**self).to_arg()
    }
}

impl ToArg for str {
    fn to_arg(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }
}

impl ToArg for String {
    fn to_arg(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }
}

impl ToArg for [u8] {
    fn to_arg(&self) -> Bytes {
        Bytes::copy_from_slice(self)
    }
}

impl<const N: usize> ToArg for [u8; N] {
    fn to_arg(&self) -> Bytes {
        Bytes::copy_from_slice(self)
    }
}

impl ToArg for Vec<u8> {
    fn to_arg(&self) -> Bytes {
        Bytes::copy_from_slice(self)
    }
}

impl ToArg for Bytes {
    fn to_arg(&self) -> Bytes {
        self.clone()
    }
}

impl ToArg for f64 {
    fn to_arg(&self) -> Bytes {
        format_f64(*self)
    }
}

macro_rules! int_to_arg {
    ($($t:ty),*) => {
        $(
            impl ToArg for $t {
                fn to_arg(&self) -> Bytes {
                    Bytes::from(self.to_string())
                }
            }
        )*
    };
}

int_to_arg!(i32, i64, u32, u64, usize);

// =============================================================================
// Decimal Helpers
// =============================================================================

/// Decimal text for a double; infinities use the `inf`/`-inf` spelling
pub(crate) fn format_f64(value: f64) -> Bytes {
    if value.is_infinite() {
        return Bytes::from_static(if value > 0.0 { b"inf" } else { b"-inf" });
    }
    Bytes::from(value.to_string())
}

/// Strict decimal parse of an i64: optional leading `-`, then digits only
pub(crate) fn parse_decimal(data: &[u8]) -> Result<i64> {
    let digits = data.strip_prefix(b"-").unwrap_or(data);
    let well_formed = !digits.is_empty() && digits.iter().all(u8::is_ascii_digit);
    well_formed
        .then(|| std::str::from_utf8(data).ok())
        .flatten()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| {
            RespError::InvalidData(format!(
                "invalid integer: {:?}",
                String::from_utf8_lossy(data)
            ))
        })
}

fn parse_f64(data: &[u8]) -> Result<f64> {
    std::str::from_utf8(data)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| {
            RespError::InvalidData(format!(
                "invalid double: {:?}",
                String::from_utf8_lossy(data)
            ))
        })
}
