//! Value Tests
//!
//! Tests for value construction, accessors and error surfacing.

use redpipe::protocol::decode_value;
use redpipe::{RespError, ToArg, Value, ValueType};

// =============================================================================
// Type Tags
// =============================================================================

#[test]
fn test_type_tags() {
    assert_eq!(ValueType::Error.tag(), b'-');
    assert_eq!(ValueType::Status.tag(), b'+');
    assert_eq!(ValueType::Integer.tag(), b':');
    assert_eq!(ValueType::Bulk.tag(), b'$');
    assert_eq!(ValueType::Array.tag(), b'*');

    for tag in [b'-', b'+', b':', b'$', b'*'] {
        assert_eq!(ValueType::from_tag(tag).unwrap().tag(), tag);
    }
    assert_eq!(ValueType::from_tag(b'#'), None);
}

// =============================================================================
// Error Surfacing Tests
// =============================================================================

#[test]
fn test_error_value_can_be_inspected_without_failing() {
    let value = decode_value(b"-ERR bad input\r\n").unwrap();

    assert_eq!(value.value_type(), ValueType::Error);
    assert!(value.is_error());
    assert_eq!(value.error_text().as_deref(), Some("ERR bad input"));
}

#[test]
fn test_error_value_fails_on_data_access() {
    let value = decode_value(b"-ERR bad input\r\n").unwrap();

    let err = value.as_bytes().unwrap_err();
    assert!(matches!(err, RespError::Server(_)));
    assert!(err.to_string().contains("bad input"));

    assert!(matches!(value.as_text(), Err(RespError::Server(_))));
    assert!(matches!(value.as_integer(), Err(RespError::Server(_))));
    assert!(matches!(value.as_f64(), Err(RespError::Server(_))));
    assert!(matches!(value.as_array(), Err(RespError::Server(_))));
    assert!(matches!(value.into_array(), Err(RespError::Server(_))));
}

#[test]
fn test_error_text_is_none_for_data() {
    assert_eq!(Value::status("OK").error_text(), None);
    assert_eq!(Value::bulk("x").error_text(), None);
}

// =============================================================================
// Accessor Tests
// =============================================================================

#[test]
fn test_bulk_accessors() {
    let value = Value::bulk("hello");
    assert_eq!(value.as_bytes().unwrap().map(|b| &b[..]), Some(&b"hello"[..]));
    assert_eq!(value.as_text().unwrap().as_deref(), Some("hello"));
}

#[test]
fn test_nil_bulk_accessors() {
    let value = Value::nil_bulk();
    assert_eq!(value.as_bytes().unwrap(), None);
    assert_eq!(value.as_text().unwrap(), None);
    assert!(matches!(
        value.as_integer(),
        Err(RespError::UnexpectedType { found: "nil", .. })
    ));
}

#[test]
fn test_integer_accessors() {
    let value = Value::integer(42);
    assert_eq!(value.as_integer().unwrap(), 42);
    assert_eq!(value.as_f64().unwrap(), 42.0);
    assert_eq!(value.as_text().unwrap().as_deref(), Some("42"));
    assert!(matches!(
        value.as_bytes(),
        Err(RespError::UnexpectedType { expected: "bytes", found: "integer" })
    ));
}

#[test]
fn test_integer_from_bulk_text() {
    assert_eq!(Value::bulk("-17").as_integer().unwrap(), -17);
    assert!(matches!(
        Value::bulk("1.5").as_integer(),
        Err(RespError::InvalidData(_))
    ));
}

#[test]
fn test_fractional_scores() {
    assert_eq!(Value::bulk("3.25").as_f64().unwrap(), 3.25);
    assert_eq!(Value::bulk("-0.5").as_f64().unwrap(), -0.5);
    assert_eq!(Value::bulk("inf").as_f64().unwrap(), f64::INFINITY);
    assert_eq!(Value::bulk("-inf").as_f64().unwrap(), f64::NEG_INFINITY);
    assert!(Value::bulk("abc").as_f64().is_err());
}

#[test]
fn test_from_f64_roundtrips_through_text() {
    for score in [0.0, 1.5, -2.75, 1e-7, 123456789.125] {
        assert_eq!(Value::from_f64(score).as_f64().unwrap(), score);
    }
    assert_eq!(Value::from_f64(f64::INFINITY), Value::bulk("inf"));
    assert_eq!(Value::from_f64(f64::NEG_INFINITY), Value::bulk("-inf"));
}

#[test]
fn test_array_accessors() {
    let value = Value::array(vec![Value::bulk("a"), Value::integer(1)]);
    let children = value.as_array().unwrap().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[1].as_integer().unwrap(), 1);

    assert_eq!(Value::nil_array().as_array().unwrap(), None);
    assert!(matches!(
        Value::bulk("x").as_array(),
        Err(RespError::UnexpectedType { expected: "array", found: "bulk" })
    ));
}

#[test]
fn test_invalid_utf8_text() {
    let value = Value::bulk(vec![0xffu8, 0xfe]);
    assert!(matches!(value.as_text(), Err(RespError::InvalidData(_))));
    assert!(value.as_bytes().is_ok());
}

// =============================================================================
// Argument Conversion Tests
// =============================================================================

#[test]
fn test_to_arg_conversions() {
    assert_eq!(&"key".to_arg()[..], b"key");
    assert_eq!(&String::from("key").to_arg()[..], b"key");
    assert_eq!(&b"raw"[..].to_arg()[..], b"raw");
    assert_eq!(&vec![1u8, 2].to_arg()[..], &[1u8, 2][..]);
    assert_eq!(&42i64.to_arg()[..], b"42");
    assert_eq!(&(-3i32).to_arg()[..], b"-3");
    assert_eq!(&7usize.to_arg()[..], b"7");
    assert_eq!(&2.5f64.to_arg()[..], b"2.5");
}

// =============================================================================
// Display Tests
// =============================================================================

#[test]
fn test_display_scalars() {
    assert_eq!(Value::status("OK").to_string(), "OK");
    assert_eq!(Value::error("ERR nope").to_string(), "(error) ERR nope");
    assert_eq!(Value::integer(5).to_string(), "(integer) 5");
    assert_eq!(Value::bulk("hi").to_string(), "\"hi\"");
    assert_eq!(Value::nil_bulk().to_string(), "(nil)");
    assert_eq!(Value::nil_array().to_string(), "(nil)");
    assert_eq!(Value::array(vec![]).to_string(), "(empty array)");
}

#[test]
fn test_display_nested_array() {
    let value = Value::array(vec![
        Value::bulk("a"),
        Value::array(vec![Value::integer(1), Value::integer(2)]),
    ]);
    assert_eq!(
        value.to_string(),
        "1) \"a\"\n2) 1) (integer) 1\n   2) (integer) 2"
    );
}
