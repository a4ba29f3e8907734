//! XNPV / XIRR valuation for irregularly dated cash-flow schedules
//!
//! Adapted from the classic Numerical Recipes bracket-then-bisect routine.
//! Both functions report failure as `None` rather than an error: a schedule
//! with no determinable rate is an expected outcome for the callers here.

use chrono::NaiveDateTime;

use crate::finance::dates::{date_diff, DateUnit};

/// Convergence tolerance shared by the bracketing and bisection phases.
pub const FINANCIAL_ACCURACY: f64 = 1.0e-6;

/// Iteration cap for each phase of the root search.
pub const FINANCIAL_MAX_ITERATIONS: usize = 100;

/// Default starting guess for [`xirr`].
const DEFAULT_GUESS: f64 = 0.1;

/// Net present value of an irregularly dated cash-flow schedule.
///
/// Each amount is discounted by `(1 + rate)^(days / 365)` where `days` is
/// the day-boundary count from the first date in the schedule. Returns
/// `None` when the slices are empty or of different length, or when the
/// sum is not finite (a rate at or below -100% raises a negative base to a
/// fractional power).
pub fn xnpv(rate: f64, amounts: &[f64], dates: &[NaiveDateTime]) -> Option<f64> {
    if amounts.is_empty() || amounts.len() != dates.len() {
        return None;
    }

    let anchor = dates[0];
    let mut total = 0.0;
    for (amount, date) in amounts.iter().zip(dates) {
        let days = date_diff(DateUnit::Day, anchor, *date).ok()? as f64;
        total += amount / (1.0 + rate).powf(days / 365.0);
    }

    total.is_finite().then_some(total)
}

/// Internal rate of return of an irregularly dated cash-flow schedule,
/// starting the bracket search from the default 10% guess.
pub fn xirr(amounts: &[f64], dates: &[NaiveDateTime]) -> Option<f64> {
    xirr_with_guess(amounts, dates, DEFAULT_GUESS)
}

/// Internal rate of return with an explicit starting guess.
///
/// Two phases, each capped at [`FINANCIAL_MAX_ITERATIONS`]:
/// 1. expand the bracket `[0, guess]` by a factor of 1.6 until the XNPV
///    endpoints straddle zero;
/// 2. bisect the bracket, converging when the midpoint value or the step
///    drops below [`FINANCIAL_ACCURACY`].
///
/// Returns `None` when no bracket is found, when bisection fails to
/// converge, or when any XNPV evaluation along the way is undefined.
pub fn xirr_with_guess(amounts: &[f64], dates: &[NaiveDateTime], guess: f64) -> Option<f64> {
    if amounts.is_empty() || amounts.len() != dates.len() {
        return None;
    }

    let mut x1 = 0.0_f64;
    let mut x2 = guess;
    let mut f1 = xnpv(x1, amounts, dates)?;
    let mut f2 = xnpv(x2, amounts, dates)?;

    for _ in 0..FINANCIAL_MAX_ITERATIONS {
        if f1 * f2 < 0.0 {
            break;
        }
        // Push out the endpoint with the smaller residual
        if f1.abs() < f2.abs() {
            x1 += 1.6 * (x1 - x2);
            f1 = xnpv(x1, amounts, dates)?;
        } else {
            x2 += 1.6 * (x2 - x1);
            f2 = xnpv(x2, amounts, dates)?;
        }
    }
    if f1 * f2 > 0.0 {
        return None;
    }

    let f = xnpv(x1, amounts, dates)?;
    let (mut rtb, mut dx) = if f < 0.0 { (x1, x2 - x1) } else { (x2, x1 - x2) };

    for _ in 0..FINANCIAL_MAX_ITERATIONS {
        dx *= 0.5;
        let x_mid = rtb + dx;
        let f_mid = xnpv(x_mid, amounts, dates)?;
        if f_mid <= 0.0 {
            rtb = x_mid;
        }
        if f_mid.abs() < FINANCIAL_ACCURACY || dx.abs() < FINANCIAL_ACCURACY {
            return Some(x_mid);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_xnpv_zero_rate_is_plain_sum() {
        let amounts = [-1000.0, 300.0, 300.0, 500.0];
        let dates = [
            day(2024, 1, 1),
            day(2024, 4, 1),
            day(2024, 7, 1),
            day(2024, 10, 1),
        ];

        let value = xnpv(0.0, &amounts, &dates).unwrap();
        assert_abs_diff_eq!(value, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_xnpv_rejects_mismatched_lengths() {
        let amounts = [-1000.0, 500.0];
        let dates = [day(2024, 1, 1)];
        assert!(xnpv(0.05, &amounts, &dates).is_none());
        assert!(xnpv(0.05, &[], &[]).is_none());
    }

    #[test]
    fn test_xnpv_discounts_one_year_out() {
        let amounts = [-100.0, 110.0];
        let dates = [day(2023, 1, 1), day(2024, 1, 1)];

        // 110 / 1.1 - 100 = 0 at exactly the 10% rate
        let value = xnpv(0.10, &amounts, &dates).unwrap();
        assert_abs_diff_eq!(value, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_xnpv_non_finite_is_none() {
        let amounts = [-100.0, 110.0];
        let dates = [day(2023, 1, 1), day(2024, 1, 1)];
        // (1 + rate) negative with a fractional exponent is not a real number
        assert!(xnpv(-1.5, &amounts, &dates).is_none());
    }

    #[test]
    fn test_xirr_two_point_ten_percent() {
        let amounts = [-100.0, 110.0];
        let dates = [day(2023, 1, 1), day(2024, 1, 1)];

        let rate = xirr(&amounts, &dates).unwrap();
        assert_abs_diff_eq!(rate, 0.10, epsilon = 1e-6);
    }

    #[test]
    fn test_xirr_monthly_installments() {
        // 1200 financed, 12 monthly payments of 110
        let mut amounts = vec![-1200.0];
        amounts.extend(std::iter::repeat(110.0).take(12));
        let mut dates = vec![day(2024, 1, 15)];
        for i in 1..=12u32 {
            let (year, month) = if i <= 11 { (2024, i + 1) } else { (2025, 1) };
            dates.push(day(year, month, 15));
        }

        let rate = xirr(&amounts, &dates).unwrap();
        assert!(rate > 0.0, "installments above principal imply a positive rate");

        let residual = xnpv(rate, &amounts, &dates).unwrap();
        assert_abs_diff_eq!(residual, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_xirr_no_sign_change_is_none() {
        let amounts = [100.0, 110.0];
        let dates = [day(2023, 1, 1), day(2024, 1, 1)];
        assert!(xirr(&amounts, &dates).is_none());
    }

    #[test]
    fn test_xirr_mismatched_lengths_is_none() {
        let amounts = [-100.0, 110.0];
        let dates = [day(2023, 1, 1)];
        assert!(xirr(&amounts, &dates).is_none());
    }

    #[test]
    fn test_xirr_negative_return() {
        let amounts = [-1000.0, 900.0];
        let dates = [day(2023, 1, 1), day(2024, 1, 1)];

        let rate = xirr(&amounts, &dates).unwrap();
        assert_abs_diff_eq!(rate, -0.10, epsilon = 1e-6);
    }
}
