//! Pricing-variant construction and disclosure-rate calculations

mod disclosure;
mod schedule;
mod variants;

pub use disclosure::{disclosure_rate, RatePolicy};
pub use schedule::PaymentDayPolicy;
pub use variants::{
    build_variants, filter_by_target_installment, PricingConfig, PricingVariant,
    INSTALLMENT_TOLERANCE,
};
