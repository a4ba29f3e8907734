//! Periodic-rate solver for fixed-payment amortizing loans

use crate::error::{CreditError, CreditResult};

/// Residual tolerance for accepting a candidate rate.
pub const ANNUITY_ACCURACY: f64 = 1.0e-7;

/// Iteration cap for the bisection search.
pub const ANNUITY_MAX_ITERATIONS: usize = 200;

/// Solve the per-period interest rate of an equal-installment loan.
///
/// Given the financed `principal`, the number of monthly payments and the
/// payment amount, finds the monthly rate satisfying the annuity payment
/// equation `rate * (1+rate)^n / ((1+rate)^n - 1) = payment / principal`.
/// The search starts from the closed-form approximation
/// `2 * (n * payment - principal) / (principal * n)` and bisects within
/// `[0, 1]` per-period.
///
/// Returns the rate as a percentage (multiply by 12 for an annual figure).
/// Fails with [`CreditError::RateNotDeterminable`] on non-positive inputs
/// or when no rate satisfies the equation within the iteration cap, e.g.
/// when total payments fall short of the principal.
pub fn solve_annuity_rate(principal: f64, term_months: u32, payment: f64) -> CreditResult<f64> {
    if principal <= 0.0 || term_months == 0 || payment <= 0.0 {
        return Err(CreditError::rate_not_determinable(
            "principal, term and payment must all be positive",
        ));
    }

    let term = f64::from(term_months);
    let mut high = 1.0_f64;
    let mut low = 0.0_f64;
    let mut rate = 2.0 * (term * payment - principal) / (principal * term);

    for _ in 0..ANNUITY_MAX_ITERATIONS {
        let compounded = (1.0 + rate).powf(term);
        let residual = rate * compounded / (compounded - 1.0) - payment / principal;

        if residual > ANNUITY_ACCURACY {
            // guess too high, lower it
            high = rate;
            rate = (high + low) / 2.0;
        } else if residual < -ANNUITY_ACCURACY {
            // guess too low, raise it
            low = rate;
            rate = (high + low) / 2.0;
        } else {
            return Ok(rate * 100.0);
        }
    }

    Err(CreditError::rate_not_determinable(
        "bisection did not converge within the iteration cap",
    ))
}
