//! Record parser: splits one logical line into key and value

use memchr::memchr;

use super::decimal::parse_decimal;

/// Byte separating the key from the value
pub const DELIMITER: u8 = b';';

/// Split a line on its first `;` and parse the value.
///
/// Returns `None` for malformed lines: no delimiter, or a value the decimal
/// parser rejects. An empty key is accepted and aggregated like any other.
pub fn parse_record(line: &[u8]) -> Option<(&[u8], f64)> {
    let pos = memchr(DELIMITER, line)?;
    let (key, rest) = line.split_at(pos);
    let value = parse_decimal(&rest[1..]).ok()?;
    Some((key, value))
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;
