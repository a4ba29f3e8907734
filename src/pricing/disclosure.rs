//! Disclosure-rate (APR) calculation over the regulatory payment calendar

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::finance::xirr;
use crate::pricing::schedule::PaymentDayPolicy;

/// Governs how a variant's NIR/APR pair is derived.
///
/// Two policies shipped in different revisions of the upstream pricing
/// flow; they produce different output contracts and must be selected
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatePolicy {
    /// NIR is the provider-supplied interest percent. A zero or absent
    /// value means the plan carries no rate (NIR and APR both absent and
    /// the buyer repays the financed amount). When nonzero, APR is the
    /// disclosure rate over the payment calendar.
    ProviderInterest,
    /// NIR is solved from the annuity payment equation (monthly rate x 12);
    /// APR is the greater of the disclosure rate and NIR.
    DisclosureMax,
}

/// Annualized percentage rate of an installment plan per the disclosure
/// payment calendar.
///
/// Values the schedule `[-principal, installment, ..., installment]`
/// against the dates produced by `policy` and returns the internal rate of
/// return as a percentage. `today` anchors the calendar explicitly so the
/// calculation stays deterministic. `None` when the term is zero or the
/// rate search does not converge.
pub fn disclosure_rate(
    principal: f64,
    months: u32,
    installment: f64,
    today: NaiveDate,
    policy: &PaymentDayPolicy,
) -> Option<f64> {
    if months == 0 {
        return None;
    }

    let dates: Vec<_> = policy
        .payment_dates(today, months)
        .into_iter()
        .map(|d| d.and_time(NaiveTime::MIN))
        .collect();

    let mut amounts = Vec::with_capacity(months as usize + 1);
    amounts.push(-principal);
    amounts.extend(std::iter::repeat(installment).take(months as usize));

    xirr(&amounts, &dates).map(|rate| rate * 100.0)
}
