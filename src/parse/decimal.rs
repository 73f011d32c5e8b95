//! Decimal value parser
//!
//! Parses the value field of a record with one decision per byte. Only the
//! shape produced by the measurement generator is accepted: an optional
//! leading `-`, digits and at most one `.`. No exponents, no `+`, no
//! thousands separators.

use thiserror::Error;

/// Reasons a value field is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecimalError {
    #[error("empty value field")]
    EmptyInput,

    #[error("'-' is only allowed as the first byte")]
    MisplacedSign,

    #[error("more than one decimal point")]
    MultipleDecimalPoints,

    #[error("invalid character {0:#04x}")]
    InvalidCharacter(u8),
}

/// Parse a value field into an `f64`.
///
/// The integer part accumulates as `result * 10 + digit`; each fractional
/// digit adds `digit / places`, where `places` starts at 10 and grows by a
/// factor of ten per digit. The sign is applied once at the end.
///
/// A field holding no digits at all (`"-"`, `"."`, `"-."`) is reported as
/// [`DecimalError::EmptyInput`].
pub fn parse_decimal(field: &[u8]) -> Result<f64, DecimalError> {
    if field.is_empty() {
        return Err(DecimalError::EmptyInput);
    }

    let mut result = 0.0_f64;
    let mut negative = false;
    let mut seen_point = false;
    let mut seen_digit = false;
    let mut places = 10.0_f64;

    for (i, &byte) in field.iter().enumerate() {
        match byte {
            b'0'..=b'9' => {
                let digit = f64::from(byte - b'0');
                if seen_point {
                    result += digit / places;
                    places *= 10.0;
                } else {
                    result = result * 10.0 + digit;
                }
                seen_digit = true;
            }
            b'.' => {
                if seen_point {
                    return Err(DecimalError::MultipleDecimalPoints);
                }
                seen_point = true;
            }
            b'-' => {
                if i != 0 {
                    return Err(DecimalError::MisplacedSign);
                }
                negative = true;
            }
            other => return Err(DecimalError::InvalidCharacter(other)),
        }
    }

    if !seen_digit {
        return Err(DecimalError::EmptyInput);
    }

    Ok(if negative { -result } else { result })
}

#[cfg(test)]
#[path = "decimal_tests.rs"]
mod decimal_tests;
