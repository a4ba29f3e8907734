//! Date-boundary arithmetic for discounting schedules
//!
//! Years and months are calendar-aware; minutes, hours, days and weeks are
//! fixed-size intervals rounded up. The asymmetry is deliberate and feeds
//! directly into the XNPV discount exponent.

use chrono::{Datelike, NaiveDateTime};

use crate::error::{CreditError, CreditResult};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_WEEK: i64 = 604_800;

/// Unit of difference for [`date_diff`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateUnit {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
}

impl DateUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateUnit::Year => "year",
            DateUnit::Quarter => "quarter",
            DateUnit::Month => "month",
            DateUnit::Week => "week",
            DateUnit::Day => "day",
            DateUnit::Hour => "hour",
            DateUnit::Minute => "minute",
        }
    }
}

/// Count the unit boundaries crossed between two timestamps.
///
/// Year differences ignore month and day; month differences are
/// `(end_year - start_year) * 12 + (end_month - start_month)`. The
/// fixed-interval units divide the elapsed seconds by the unit size and
/// round up. Quarter is not implemented and fails with
/// [`CreditError::UnsupportedDateUnit`].
pub fn date_diff(unit: DateUnit, start: NaiveDateTime, end: NaiveDateTime) -> CreditResult<i64> {
    match unit {
        DateUnit::Year => Ok(i64::from(end.year() - start.year())),
        DateUnit::Month => Ok(
            i64::from(end.year() - start.year()) * 12
                + (i64::from(end.month()) - i64::from(start.month())),
        ),
        DateUnit::Minute => Ok(ceil_intervals(start, end, SECONDS_PER_MINUTE)),
        DateUnit::Hour => Ok(ceil_intervals(start, end, SECONDS_PER_HOUR)),
        DateUnit::Day => Ok(ceil_intervals(start, end, SECONDS_PER_DAY)),
        DateUnit::Week => Ok(ceil_intervals(start, end, SECONDS_PER_WEEK)),
        DateUnit::Quarter => Err(CreditError::UnsupportedDateUnit {
            unit: unit.as_str(),
        }),
    }
}

/// Elapsed fixed-size intervals between two timestamps, rounded up.
fn ceil_intervals(start: NaiveDateTime, end: NaiveDateTime, unit_seconds: i64) -> i64 {
    let elapsed = (end - start).num_seconds();
    (elapsed as f64 / unit_seconds as f64).ceil() as i64
}
