//! Strict `dd/MM/yyyy` parsing and the month grouping key.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::errors::ValidationError;

/// chrono pattern matching `dd/MM/yyyy`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses an expense date, accepting only two-digit day and month, a four-digit
/// year and `/` separators. chrono alone would accept `1/2/2023`.
pub fn parse_expense_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let bytes = input.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, byte)| match idx {
            2 | 5 => *byte == b'/',
            _ => byte.is_ascii_digit(),
        });
    if !well_formed {
        return Err(ValidationError::InvalidDate(input.to_string()));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

/// Calendar month used to bucket expenses, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
