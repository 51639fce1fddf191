//! The temporal selector: a (year, month) pair inside the published range.

use oba_utils::dates::{parse_month, zero_pad};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// First month with published rasters.
pub const FIRST_PERIOD: YearMonth = YearMonth {
    year: 2001,
    month: 1,
};

/// Latest published month.
pub const LATEST_PERIOD: YearMonth = YearMonth {
    year: 2020,
    month: 12,
};

/// Month every scope page opens on.
pub const DEFAULT_PERIOD: YearMonth = YearMonth {
    year: 2019,
    month: 11,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    #[error("Period {0} is outside the published range")]
    OutOfRange(YearMonth),

    #[error("Failed to parse period: {0}")]
    Parse(String),
}

/// A validated year-month. Ordering is chronological.
///
/// Serialized as `"YYYY-MM"`; deserializing goes through the same checks as
/// [`YearMonth::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Build a period, rejecting invalid months and anything outside
    /// [`FIRST_PERIOD`]..=[`LATEST_PERIOD`].
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        let period = YearMonth { year, month };
        if period < FIRST_PERIOD || period > LATEST_PERIOD {
            return Err(PeriodError::OutOfRange(period));
        }
        Ok(period)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Two-digit month as mapserver expects it (`"03"`).
    pub fn month_padded(&self) -> String {
        zero_pad(self.month, 2)
    }
}

impl Default for YearMonth {
    fn default() -> Self {
        DEFAULT_PERIOD
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month_padded())
    }
}

impl FromStr for YearMonth {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = parse_month(s).map_err(|e| PeriodError::Parse(e.to_string()))?;
        YearMonth::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = PeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(period: YearMonth) -> Self {
        period.to_string()
    }
}
