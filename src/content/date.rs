//! Strict `DD-MM-YYYY` date parsing for post frontmatter.
//!
//! Dates are kept as plain calendar fields. The blog never needs timezone
//! arithmetic, only validation, ordering and two output formats, so the
//! parser works directly on the input bytes instead of pulling in a date
//! library.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("invalid date format: expected DD-MM-YYYY, got \"{0}\"")]
    Pattern(String),
    #[error("invalid date format: {0} out of range in \"{1}\"")]
    OutOfRange(&'static str, String),
}

/// A calendar date. Field order gives derived `Ord` chronological meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Date {
    pub fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Parse a `DD-MM-YYYY` string. The pattern is strict: exactly ten
    /// characters, `-` separators, no surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, DateError> {
        let bytes = input.as_bytes();
        if bytes.len() != 10 || bytes[2] != b'-' || bytes[5] != b'-' {
            return Err(DateError::Pattern(input.to_owned()));
        }

        let day = parse_u8(&bytes[0..2]).ok_or_else(|| DateError::Pattern(input.to_owned()))?;
        let month = parse_u8(&bytes[3..5]).ok_or_else(|| DateError::Pattern(input.to_owned()))?;
        let year = parse_u16(&bytes[6..10]).ok_or_else(|| DateError::Pattern(input.to_owned()))?;

        if month < 1 || month > 12 {
            return Err(DateError::OutOfRange("month", input.to_owned()));
        }
        if day < 1 || day > days_in_month(year, month) {
            return Err(DateError::OutOfRange("day", input.to_owned()));
        }

        Ok(Self { year, month, day })
    }

    /// Parse an optional date field. Absent or whitespace-only input means
    /// the field was not set, which is not an error.
    pub fn parse_optional(input: Option<&str>) -> Result<Option<Self>, DateError> {
        match input {
            None => Ok(None),
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => Self::parse(text).map(Some),
        }
    }

    /// `YYYY-MM-DD`, the form sitemaps and `<time datetime>` want.
    pub fn to_ymd(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:04}", self.day, self.month, self.year)
    }
}

fn parse_u8(bytes: &[u8]) -> Option<u8> {
    let mut value: u8 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value.checked_mul(10)?.checked_add(b - b'0')?;
    }
    Some(value)
}

fn parse_u16(bytes: &[u8]) -> Option<u16> {
    let mut value: u16 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value.checked_mul(10)?.checked_add(u16::from(b - b'0'))?;
    }
    Some(value)
}

fn is_leap_year(year: u16) -> bool {
    year.is_multiple_of(4) && (!year.is_multiple_of(100) || year.is_multiple_of(400))
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}
