//! Calendar month keys used to address ledger buckets.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Identifies one calendar month. Orders by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Earliest month `chrono` can represent.
    pub fn earliest() -> Self {
        Self::from_date(NaiveDate::MIN)
    }

    /// Latest month `chrono` can represent.
    pub fn latest() -> Self {
        Self::from_date(NaiveDate::MAX)
    }

    /// Builds a key from a year and a 1-based month.
    ///
    /// The year must be one `chrono` can represent as a date.
    pub fn new(year: i32, month: u32) -> Result<Self, MonthKeyError> {
        if !(1..=12).contains(&month) {
            return Err(MonthKeyError::MonthOutOfRange(month));
        }
        if !(NaiveDate::MIN.year()..=NaiveDate::MAX.year()).contains(&year) {
            return Err(MonthKeyError::YearOutOfRange(year));
        }
        Ok(Self { year, month })
    }

    /// Returns the key of the month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following month. Stays on [`MonthKey::latest`].
    pub fn next(&self) -> Self {
        if *self >= Self::latest() {
            *self
        } else if self.month == 12 {
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

    /// The preceding month. Stays on [`MonthKey::earliest`].
    pub fn previous(&self) -> Self {
        if *self <= Self::earliest() {
            *self
        } else if self.month == 1 {
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

    /// First calendar day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        // A leading '-' belongs to a negative year, so split on the last separator.
        let (year_part, month_part) = trimmed
            .rsplit_once('-')
            .filter(|(year, _)| !year.is_empty())
            .ok_or_else(|| MonthKeyError::Format(value.to_string()))?;
        let year = year_part
            .parse::<i32>()
            .map_err(|_| MonthKeyError::Format(value.to_string()))?;
        let month = month_part
            .parse::<u32>()
            .map_err(|_| MonthKeyError::Format(value.to_string()))?;
        Self::new(year, month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors raised while building or parsing a [`MonthKey`].
pub enum MonthKeyError {
    Format(String),
    MonthOutOfRange(u32),
    YearOutOfRange(i32),
}

impl fmt::Display for MonthKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthKeyError::Format(raw) => {
                write!(f, "`{raw}` is not a month key (expected YEAR-MONTH)")
            }
            MonthKeyError::MonthOutOfRange(month) => {
                write!(f, "month {month} is outside 1..=12")
            }
            MonthKeyError::YearOutOfRange(year) => write!(
                f,
                "year {year} is outside {}..={}",
                NaiveDate::MIN.year(),
                NaiveDate::MAX.year()
            ),
        }
    }
}

impl std::error::Error for MonthKeyError {}
