use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::prelude::*;

/// Absolute point in time stored in an interval.
pub type Instant = DateTime<Utc>;

/// Date-time formats with an explicit offset, besides RFC 3339.
///
/// The first one is what PostgreSQL prints for `timestamptz`.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Date-time formats without an offset, taken as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Loosely-typed interval endpoint as supplied by a caller.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Endpoint {
    Instant(Instant),

    /// Calendar timestamp to be parsed.
    Text(String),
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Endpoint {
    fn from(timestamp: DateTime<Tz>) -> Self {
        Self::Instant(timestamp.with_timezone(&Utc))
    }
}

/// Taken as UTC, like naive text.
impl From<NaiveDateTime> for Endpoint {
    fn from(timestamp: NaiveDateTime) -> Self {
        Self::Instant(timestamp.and_utc())
    }
}

/// Midnight UTC, like a bare date in text.
impl From<NaiveDate> for Endpoint {
    fn from(date: NaiveDate) -> Self {
        date.and_time(NaiveTime::MIN).into()
    }
}

impl From<String> for Endpoint {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Endpoint {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl Endpoint {
    pub fn into_instant(self) -> Result<Instant> {
        match self {
            Self::Instant(instant) => Ok(instant),
            Self::Text(text) => parse_instant(&text),
        }
    }
}

/// Convert an optional endpoint into an optional instant, parsing text if needed.
pub fn to_instant(endpoint: Option<impl Into<Endpoint>>) -> Result<Option<Instant>> {
    endpoint.map(|endpoint| endpoint.into().into_instant()).transpose()
}

/// Parse a calendar timestamp.
///
/// Accepts RFC 3339, the PostgreSQL `timestamptz` output, naive date-times and bare dates.
/// Naive forms are taken as UTC.
pub fn parse_instant(text: &str) -> Result<Instant> {
    let trimmed = text.trim();
    let rfc3339_error = match DateTime::parse_from_rfc3339(trimmed) {
        Ok(timestamp) => return Ok(timestamp.with_timezone(&Utc)),
        Err(error) => error,
    };
    parse_with_offset(trimmed)
        .or_else(|| parse_naive(trimmed))
        .ok_or_else(|| Error::Conversion { input: text.to_owned(), source: rfc3339_error })
        .inspect(|instant| trace!(text, %instant, "parsed"))
}

fn parse_with_offset(text: &str) -> Option<Instant> {
    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::<FixedOffset>::parse_from_str(text, format).ok())
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

fn parse_naive(text: &str) -> Option<Instant> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            let date = NaiveDate::parse_from_str(text, DATE_FORMAT).ok()?;
            Some(date.and_time(NaiveTime::MIN))
        })
        .map(|timestamp| timestamp.and_utc())
}
