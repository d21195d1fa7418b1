#![allow(dead_code)]

use chrono::NaiveDate;
use tally::tally_core::FixedClock;
use tally::tally_domain::MonthKey;

pub fn key(raw: &str) -> MonthKey {
    raw.parse().expect("valid month key")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Clock fixed in the middle of the given month.
pub fn clock_in(year: i32, month: u32) -> FixedClock {
    FixedClock::on(date(year, month, 15))
}
