//! Calendar date ranges used to scope temperature aggregation.
//!
//! Dates arrive as raw `YYYY-MM-DD` path segments and are treated as naive
//! calendar days; no timezone handling takes place.

use time::{Date, Month, OffsetDateTime};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("malformed date '{input}', expected YYYY-MM-DD: {reason}")]
    MalformedDate { input: String, reason: String },
}

impl DateError {
    fn malformed(input: &str, reason: impl Into<String>) -> Self {
        DateError::MalformedDate {
            input: input.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Source of "today" for open-ended ranges.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// Wall-clock date of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_local()
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
            .date()
    }
}

/// Inclusive `[start, end]` interval of calendar days.
///
/// `start <= end` is not enforced; an inverted range simply matches no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    /// Parse a start date and optional end date, defaulting the end to `clock.today()`.
    pub fn parse(start: &str, end: Option<&str>, clock: &dyn Clock) -> Result<Self, DateError> {
        let start = parse_date(start)?;
        let end = match end {
            Some(end) => parse_date(end)?,
            None => clock.today(),
        };
        Ok(Self { start, end })
    }
}

/// Parse a `YYYY-MM-DD` string into a calendar date.
pub fn parse_date(input: &str) -> Result<Date, DateError> {
    let pieces: Vec<&str> = input.split('-').collect();
    let [year, month, day] = pieces.as_slice() else {
        return Err(DateError::malformed(
            input,
            "expected year, month and day separated by '-'",
        ));
    };

    let year: i32 = numeric_component(input, year, "year")?;
    let month: u8 = numeric_component(input, month, "month")?;
    let day: u8 = numeric_component(input, day, "day")?;

    let month = Month::try_from(month)
        .map_err(|_| DateError::malformed(input, format!("month {} out of range", month)))?;

    Date::from_calendar_date(year, month, day)
        .map_err(|e| DateError::malformed(input, e.to_string()))
}

fn numeric_component<T: std::str::FromStr>(
    input: &str,
    piece: &str,
    name: &str,
) -> Result<T, DateError> {
    if piece.is_empty() || !piece.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateError::malformed(
            input,
            format!("{} '{}' is not numeric", name, piece),
        ));
    }
    piece
        .parse()
        .map_err(|_| DateError::malformed(input, format!("{} '{}' is out of range", name, piece)))
}
