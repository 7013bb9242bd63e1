//! Business calendar and date handling
//!
//! Every expiration computation in the CRM works on calendar dates, not
//! instants. This module provides:
//! - [`Timezone`]: the brokerage's jurisdiction, used to decide what "today" is
//! - [`BusinessCalendar`]: timezone-aware "today" and lenient date parsing
//! - [`DateRange`] and [`YearMonth`]: inclusive ranges and calendar months
//!
//! Domain functions never read the clock themselves; callers obtain `today`
//! from a [`BusinessCalendar`] and pass it down.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Timezone wrapper for the brokerage jurisdiction
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Parses an IANA timezone name such as `Europe/Madrid`
    pub fn from_name(name: &str) -> Result<Self, TemporalError> {
        Tz::from_str(name)
            .map(Timezone)
            .map_err(|_| TemporalError::UnknownTimezone(name.to_string()))
    }

    /// Converts a UTC datetime to the local timezone
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// Returns the calendar date a UTC instant falls on in this timezone
    pub fn local_date(&self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_local(utc).date_naive()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::Europe::Madrid)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Source of "today" for business rules
///
/// Holds the jurisdiction timezone. Handlers ask it for `today()` once per
/// request and hand the date to pure domain functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCalendar {
    timezone: Timezone,
}

impl BusinessCalendar {
    pub fn new(timezone: Timezone) -> Self {
        Self { timezone }
    }

    /// Builds a calendar from an IANA timezone name
    pub fn from_timezone_name(name: &str) -> Result<Self, TemporalError> {
        Timezone::from_name(name).map(Self::new)
    }

    pub fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// The current calendar date in the business timezone
    pub fn today(&self) -> NaiveDate {
        self.timezone.local_date(Utc::now())
    }

    /// Parses a date supplied by a client
    ///
    /// Accepts a plain `YYYY-MM-DD` date, an RFC 3339 timestamp (converted to
    /// the date it falls on in the business timezone), or a naive
    /// `YYYY-MM-DDTHH:MM:SS` timestamp (date part taken as-is).
    pub fn parse_date(&self, input: &str) -> Result<NaiveDate, TemporalError> {
        let s = input.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(date);
        }
        if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
            return Ok(self.timezone.local_date(instant.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(naive.date());
        }
        Err(TemporalError::InvalidDate(input.to_string()))
    }
}

/// Calendar-day difference from `today` to `date`
///
/// Negative when `date` is already past.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// The `days`-long window starting at `today`, both ends inclusive
    pub fn next_days(today: NaiveDate, days: u32) -> Self {
        let end = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        Self { start: today, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// A calendar month of a specific year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// Creates a month, rejecting month numbers outside 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self, TemporalError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or(TemporalError::InvalidMonth(month))
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Month number, 1-12
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.succ().first - Days::new(1)
    }

    /// The following month, rolling over the year boundary
    pub fn succ(&self) -> Self {
        Self {
            first: self.first + Months::new(1),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.first_day(),
            end: self.last_day(),
        }
    }

    /// `count` consecutive months starting with this one
    pub fn window(&self, count: usize) -> Vec<YearMonth> {
        std::iter::successors(Some(*self), |m| Some(m.succ()))
            .take(count)
            .collect()
    }
}
