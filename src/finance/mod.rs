//! Financial mathematics: date arithmetic, cash-flow valuation, rate solvers

mod annuity;
mod dates;
mod irr;

pub use annuity::{solve_annuity_rate, ANNUITY_ACCURACY, ANNUITY_MAX_ITERATIONS};
pub use dates::{date_diff, DateUnit};
pub use irr::{xirr, xirr_with_guess, xnpv, FINANCIAL_ACCURACY, FINANCIAL_MAX_ITERATIONS};
