//! Calendar month representation
//!
//! A `YearMonth` identifies one calendar month independent of day. It is the
//! second half of the natural key for every per-category status record, so it
//! needs exact rollover behavior at year boundaries and deterministic
//! extraction from transaction timestamps.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (year, month) pair, e.g. "2025-01"
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct YearMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl YearMonth {
    /// Create a new YearMonth. `month` must be in 1..=12.
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month a calendar date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month an instant falls in, observed from an explicit time zone.
    ///
    /// The zone is a parameter rather than an ambient `Local` call so that
    /// month bucketing of transactions stays deterministic and testable.
    pub fn from_timestamp(timestamp: DateTime<Utc>, tz: FixedOffset) -> Self {
        Self::of(timestamp.with_timezone(&tz).date_naive())
    }

    /// The following month (December rolls into January of the next year)
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month (January rolls back into December of the previous year)
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// First day of this month
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(self.year, 1, 1).unwrap())
    }

    /// Last day of this month (inclusive)
    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Inclusive count of calendar months from this month through `target`.
    ///
    /// Same year: `target.month - self.month + 1`, clamped to at least 1.
    /// Later year: the months left in this year, plus twelve per full
    /// intervening year, plus the target's month number. A target in an
    /// earlier year counts as 0 months.
    pub fn months_until(&self, target: YearMonth) -> i64 {
        if target.year == self.year {
            (target.month as i64 - self.month as i64 + 1).max(1)
        } else if target.year > self.year {
            let intervening_years = (target.year - self.year - 1) as i64;
            (12 - self.month as i64) + intervening_years * 12 + target.month as i64
        } else {
            0
        }
    }

    /// Parse from "YYYY-MM"
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 2 {
            return Err(MonthParseError::InvalidFormat(s.to_string()));
        }

        let year: i32 = parts[0]
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = parts[1]
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }

        Ok(Self { year, month })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}
