//! Day-granularity dates used by task scheduling.

use super::{TaskDomainError, TaskField};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar date with the time of day normalized away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDate(NaiveDate);

impl TaskDate {
    const FORMAT: &'static str = "%Y-%m-%d";

    /// Wraps a calendar date.
    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the current UTC day according to `clock`.
    #[must_use]
    pub fn today(clock: &impl Clock) -> Self {
        Self::from_utc(clock.utc())
    }

    /// Truncates a UTC timestamp to its day.
    #[must_use]
    pub fn from_utc(timestamp: DateTime<Utc>) -> Self {
        Self(timestamp.date_naive())
    }

    /// Parses a client-supplied date for `field`.
    ///
    /// Accepts `YYYY-MM-DD` and RFC 3339 timestamps; timestamps are
    /// truncated to their UTC day.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDate`] when `value` matches neither
    /// format.
    pub fn parse(field: TaskField, value: &str) -> Result<Self, TaskDomainError> {
        let trimmed = value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, Self::FORMAT) {
            return Ok(Self(date));
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|timestamp| Self::from_utc(timestamp.with_timezone(&Utc)))
            .map_err(|_| TaskDomainError::InvalidDate {
                field,
                value: value.to_owned(),
            })
    }

    /// Returns the wrapped calendar date.
    #[must_use]
    pub const fn into_inner(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for TaskDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}
