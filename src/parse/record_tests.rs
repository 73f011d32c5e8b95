//! Tests for parse/record

use super::*;

#[test]
fn test_parse_valid_record() {
    assert_eq!(parse_record(b"Hamburg;12.0"), Some((&b"Hamburg"[..], 12.0)));
    assert_eq!(parse_record(b"Bulawayo;-8.9"), Some((&b"Bulawayo"[..], -8.9)));
}

#[test]
fn test_missing_delimiter_is_dropped() {
    assert_eq!(parse_record(b"NoDelimiterHere"), None);
    assert_eq!(parse_record(b""), None);
}

#[test]
fn test_unparsable_value_is_dropped() {
    assert_eq!(parse_record(b"City;abc"), None);
    assert_eq!(parse_record(b"City;"), None);
    assert_eq!(parse_record(b"City;1.2.3"), None);
}

#[test]
fn test_second_delimiter_poisons_value() {
    assert_eq!(parse_record(b"A;1.0;2.0"), None);
}

#[test]
fn test_empty_key_is_accepted() {
    assert_eq!(parse_record(b";4.5"), Some((&b""[..], 4.5)));
}

#[test]
fn test_key_keeps_raw_bytes() {
    let line = "São Paulo;21.3".as_bytes();
    let (key, value) = parse_record(line).unwrap();
    assert_eq!(key, "São Paulo".as_bytes());
    assert_eq!(value, 21.3);
}

#[test]
fn test_key_is_borrowed_from_line() {
    let line = b"Oslo;1.0".to_vec();
    let (key, _) = parse_record(&line).unwrap();
    assert_eq!(key.as_ptr(), line.as_ptr());
}
