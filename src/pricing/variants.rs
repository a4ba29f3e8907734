//! Pricing-variant assembly from provider coefficient sheets

use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::client::PricingCoefficient;
use crate::finance::solve_annuity_rate;
use crate::pricing::disclosure::{disclosure_rate, RatePolicy};
use crate::pricing::schedule::PaymentDayPolicy;

/// Default half-width of the target-installment band, as a fraction.
pub const INSTALLMENT_TOLERANCE: f64 = 0.20;

/// Configuration for variant construction.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Payment-day convention for the disclosure calendar.
    pub payment_days: PaymentDayPolicy,

    /// How NIR and APR are derived for each variant.
    pub rate_policy: RatePolicy,

    /// Fractional tolerance around a requested target installment.
    pub installment_tolerance: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            payment_days: PaymentDayPolicy::default(),
            rate_policy: RatePolicy::ProviderInterest,
            installment_tolerance: INSTALLMENT_TOLERANCE,
        }
    }
}

/// A single financing plan offered for a purchase.
///
/// Built per provider coefficient and immutable once assembled; lives only
/// for the duration of one pricing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingVariant {
    /// Provider product code when supplied, else the request's scheme id.
    pub scheme_id: String,

    /// Human-readable plan label, derived from the installment count.
    pub plan_label: String,

    /// Number of monthly installments; doubles as the variant id.
    pub installment_count: u32,

    /// Monthly installment, rounded to cents.
    pub installment_amount: f64,

    /// Down payment echoed from the request.
    pub down_payment: f64,

    /// Nominal annual interest rate, percent. Absent when no rate is
    /// determinable for the plan.
    pub nir: Option<f64>,

    /// Annual percentage rate per the disclosure calendar, percent.
    pub apr: Option<f64>,

    /// Total amount repaid over the life of the plan, down payment included.
    pub total_repayment: f64,
}

/// Build one variant per coefficient.
///
/// The provider's coefficients apply to the financed amount
/// (`price - down_payment`). Rate metrics follow the configured
/// [`RatePolicy`]; rates that cannot be determined are absorbed as absent
/// fields, never errors. Deterministic for a fixed `today`.
pub fn build_variants(
    coefficients: &[PricingCoefficient],
    price: f64,
    down_payment: f64,
    scheme_id: Option<&str>,
    today: NaiveDate,
    config: &PricingConfig,
) -> Vec<PricingVariant> {
    let financed = price - down_payment;

    coefficients
        .iter()
        .map(|coefficient| {
            let months = coefficient.installment_count;
            let installment = round_cents(financed * coefficient.coeff);

            let (nir, apr) = rate_metrics(financed, months, installment, coefficient, today, config);

            // Zero-interest plans repay exactly the financed amount; priced
            // plans repay the installment schedule.
            let total_repayment = if nir.is_some() {
                down_payment + installment * f64::from(months)
            } else {
                down_payment + financed
            };

            debug!(
                "variant {months}m: installment {installment:.2}, nir {nir:?}, apr {apr:?}"
            );

            PricingVariant {
                scheme_id: coefficient
                    .product_code
                    .clone()
                    .or_else(|| scheme_id.map(str::to_string))
                    .unwrap_or_default(),
                plan_label: format!("{months} months"),
                installment_count: months,
                installment_amount: installment,
                down_payment,
                nir,
                apr,
                total_repayment,
            }
        })
        .collect()
}

/// NIR/APR pair for one plan under the configured policy.
fn rate_metrics(
    financed: f64,
    months: u32,
    installment: f64,
    coefficient: &PricingCoefficient,
    today: NaiveDate,
    config: &PricingConfig,
) -> (Option<f64>, Option<f64>) {
    match config.rate_policy {
        RatePolicy::ProviderInterest => {
            let nir = coefficient.interest_percent.filter(|pct| *pct != 0.0);
            let apr = nir.and_then(|_| {
                disclosure_rate(financed, months, installment, today, &config.payment_days)
            });
            (nir, apr)
        }
        RatePolicy::DisclosureMax => {
            let nir = match solve_annuity_rate(financed, months, installment) {
                Ok(monthly_pct) => Some(monthly_pct * 12.0),
                Err(err) => {
                    warn!("no solvable rate for {months}-month plan: {err}");
                    None
                }
            };
            let gpr = disclosure_rate(financed, months, installment, today, &config.payment_days);
            // Disclosure rules require reporting the higher of the two
            let apr = match (gpr, nir) {
                (Some(g), Some(n)) => Some(g.max(n)),
                (g, n) => g.or(n),
            };
            (nir, apr)
        }
    }
}

/// Drop variants whose installment falls outside the target band.
///
/// A non-positive target disables filtering. Bounds are inclusive: a
/// variant exactly on the edge of the band survives.
pub fn filter_by_target_installment(
    variants: Vec<PricingVariant>,
    target: f64,
    tolerance: f64,
) -> Vec<PricingVariant> {
    if target <= 0.0 {
        return variants;
    }

    let min = target * (1.0 - tolerance);
    let max = target * (1.0 + tolerance);

    variants
        .into_iter()
        .filter(|variant| min <= variant.installment_amount && variant.installment_amount <= max)
        .collect()
}

/// Round a monetary amount to two decimal places.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn coefficient(months: u32, coeff: f64, interest: Option<f64>) -> PricingCoefficient {
        PricingCoefficient {
            installment_count: months,
            coeff,
            interest_percent: interest,
            product_code: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn test_installment_amount_rounds_to_cents() {
        let coefficients = [coefficient(12, 0.0917, Some(14.5))];
        let variants = build_variants(
            &coefficients,
            1000.0,
            0.0,
            None,
            today(),
            &PricingConfig::default(),
        );

        // 1000 * 0.0917 = 91.7 exactly; 999 * 0.0917 = 91.6083 -> 91.61
        assert_abs_diff_eq!(variants[0].installment_amount, 91.7, epsilon = 1e-9);

        let variants = build_variants(
            &coefficients,
            999.0,
            0.0,
            None,
            today(),
            &PricingConfig::default(),
        );
        assert_abs_diff_eq!(variants[0].installment_amount, 91.61, epsilon = 1e-9);
    }

    #[test]
    fn test_coefficients_apply_to_financed_amount() {
        let coefficients = [coefficient(12, 0.1, Some(14.5))];
        let variants = build_variants(
            &coefficients,
            1000.0,
            200.0,
            None,
            today(),
            &PricingConfig::default(),
        );

        assert_abs_diff_eq!(variants[0].installment_amount, 80.0, epsilon = 1e-9);
        assert_abs_diff_eq!(variants[0].down_payment, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_provider_interest_policy_passes_rate_through() {
        let coefficients = [coefficient(12, 0.0955, Some(14.5))];
        let variants = build_variants(
            &coefficients,
            1200.0,
            0.0,
            None,
            today(),
            &PricingConfig::default(),
        );

        let variant = &variants[0];
        assert_eq!(variant.nir, Some(14.5));
        assert!(variant.apr.is_some(), "priced plan must carry an APR");
        assert_abs_diff_eq!(
            variant.total_repayment,
            variant.installment_amount * 12.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_zero_interest_roundtrip() {
        // interestPercent == 0 means the buyer repays exactly the financed
        // amount: total outlay equals the shelf price.
        let coefficients = [coefficient(12, 1.0 / 12.0, Some(0.0))];
        let variants = build_variants(
            &coefficients,
            1000.0,
            200.0,
            None,
            today(),
            &PricingConfig::default(),
        );

        let variant = &variants[0];
        assert_eq!(variant.nir, None);
        assert_eq!(variant.apr, None);
        assert_abs_diff_eq!(variant.total_repayment, 1000.0, epsilon = 1e-12);
    }

    #[test]
    fn test_absent_interest_matches_zero_interest() {
        let coefficients = [coefficient(6, 1.0 / 6.0, None)];
        let variants = build_variants(
            &coefficients,
            900.0,
            0.0,
            None,
            today(),
            &PricingConfig::default(),
        );

        assert_eq!(variants[0].nir, None);
        assert_abs_diff_eq!(variants[0].total_repayment, 900.0, epsilon = 1e-12);
    }

    #[test]
    fn test_disclosure_max_policy_takes_greater_rate() {
        let config = PricingConfig {
            rate_policy: RatePolicy::DisclosureMax,
            ..PricingConfig::default()
        };
        let coefficients = [coefficient(12, 0.0955, None)];
        let variants = build_variants(&coefficients, 1200.0, 0.0, None, today(), &config);

        let variant = &variants[0];
        let nir = variant.nir.expect("solver should converge");
        let apr = variant.apr.expect("apr derived from nir and gpr");
        assert!(nir > 0.0);
        assert!(apr >= nir, "apr {apr} must be at least nir {nir}");
    }

    #[test]
    fn test_disclosure_max_absorbs_solver_failure() {
        let config = PricingConfig {
            rate_policy: RatePolicy::DisclosureMax,
            ..PricingConfig::default()
        };
        // Payments sum below the principal: no solvable rate
        let coefficients = [coefficient(12, 0.05, None)];
        let variants = build_variants(&coefficients, 1200.0, 0.0, None, today(), &config);

        assert_eq!(variants[0].nir, None);
        assert_eq!(variants.len(), 1, "soft failure must not drop the variant");
    }

    #[test]
    fn test_scheme_id_prefers_product_code() {
        let mut with_code = coefficient(12, 0.09, Some(10.0));
        with_code.product_code = Some("PROMO12".into());
        let coefficients = [with_code, coefficient(24, 0.05, Some(10.0))];

        let variants = build_variants(
            &coefficients,
            1000.0,
            0.0,
            Some("42"),
            today(),
            &PricingConfig::default(),
        );

        assert_eq!(variants[0].scheme_id, "PROMO12");
        assert_eq!(variants[1].scheme_id, "42");
    }

    #[test]
    fn test_plan_label_from_installment_count() {
        let coefficients = [coefficient(36, 0.035, Some(12.0))];
        let variants = build_variants(
            &coefficients,
            1000.0,
            0.0,
            None,
            today(),
            &PricingConfig::default(),
        );
        assert_eq!(variants[0].plan_label, "36 months");
    }

    #[test]
    fn test_target_filter_keeps_inclusive_band() {
        let variants: Vec<_> = [80.0, 100.0, 125.0]
            .iter()
            .map(|&amount| PricingVariant {
                scheme_id: String::new(),
                plan_label: String::new(),
                installment_count: 12,
                installment_amount: amount,
                down_payment: 0.0,
                nir: None,
                apr: None,
                total_repayment: 0.0,
            })
            .collect();

        let kept = filter_by_target_installment(variants, 100.0, INSTALLMENT_TOLERANCE);
        let amounts: Vec<_> = kept.iter().map(|v| v.installment_amount).collect();

        // 80 sits exactly on the lower bound and survives; 125 exceeds 120
        assert_eq!(amounts, vec![80.0, 100.0]);
    }

    #[test]
    fn test_zero_target_disables_filter() {
        let variants = build_variants(
            &[coefficient(12, 0.09, Some(10.0)), coefficient(24, 0.05, Some(10.0))],
            1000.0,
            0.0,
            None,
            today(),
            &PricingConfig::default(),
        );
        let kept = filter_by_target_installment(variants.clone(), 0.0, INSTALLMENT_TOLERANCE);
        assert_eq!(kept.len(), variants.len());
    }

    #[test]
    fn test_builder_is_idempotent() {
        let coefficients = [
            coefficient(12, 0.0955, Some(14.5)),
            coefficient(24, 0.0511, Some(13.0)),
        ];
        let config = PricingConfig::default();

        let first = build_variants(&coefficients, 1500.0, 100.0, Some("1"), today(), &config);
        let second = build_variants(&coefficients, 1500.0, 100.0, Some("1"), today(), &config);
        assert_eq!(first, second);
    }
}
