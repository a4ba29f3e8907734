//! Regulatory payment calendar for installment schedules
//!
//! Lender convention: the first installment falls on one of three canonical
//! days of the month, picked from the request date. Requests late in the
//! month defer the first installment by an extra calendar month.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Day-of-month snapping rules for the first installment.
///
/// The canonical days partition the month into three bands; a request on
/// day `d` snaps to the band's payment day:
///
/// - `d <= early_day`            -> `early_day`
/// - `early_day < d <= mid_day`  -> `mid_day`
/// - `mid_day < d <= late_day`   -> `late_day`
/// - `d > late_day`              -> `early_day`, deferred one extra month
///
/// The defaults encode the 5/15/25 convention; deployments with a different
/// lender calendar substitute their own days. Days must exist in every
/// calendar month (1..=28).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDayPolicy {
    pub early_day: u32,
    pub mid_day: u32,
    pub late_day: u32,
}

impl Default for PaymentDayPolicy {
    fn default() -> Self {
        Self {
            early_day: 5,
            mid_day: 15,
            late_day: 25,
        }
    }
}

impl PaymentDayPolicy {
    /// Payment day of month for a request made on `day_of_month`.
    pub fn first_payment_day(&self, day_of_month: u32) -> u32 {
        if day_of_month <= self.early_day {
            self.early_day
        } else if day_of_month <= self.mid_day {
            self.mid_day
        } else if day_of_month <= self.late_day {
            self.late_day
        } else {
            self.early_day
        }
    }

    /// Calendar months between the request and the first installment.
    pub fn deferral_months(&self, day_of_month: u32) -> u32 {
        if day_of_month > self.late_day {
            2
        } else {
            1
        }
    }

    /// Full payment calendar for a term of `months` installments.
    ///
    /// The first entry is the request date itself (the schedule anchor);
    /// the remaining `months` entries are the installment due dates, one
    /// calendar month apart on the snapped payment day.
    pub fn payment_dates(&self, today: NaiveDate, months: u32) -> Vec<NaiveDate> {
        let day = self.first_payment_day(today.day());
        let snapped = today.with_day(day).unwrap_or(today);
        let deferral = self.deferral_months(today.day());

        let mut dates = Vec::with_capacity(months as usize + 1);
        dates.push(today);
        for i in 0..months {
            dates.push(snapped + Months::new(deferral + i));
        }
        dates
    }
}
