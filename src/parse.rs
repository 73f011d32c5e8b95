//! Allocation-free parsing of `<key>;<value>` records
//!
//! Both parsers work on borrowed byte slices straight out of the read window
//! and never allocate.

mod decimal;
mod record;

pub use decimal::{DecimalError, parse_decimal};
pub use record::{DELIMITER, parse_record};
