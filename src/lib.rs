//! Credit Pricing - installment-credit pricing engine for consumer financing
//!
//! This library provides:
//! - XNPV/XIRR valuation for irregularly dated cash-flow schedules
//! - Annuity rate solving for equal-installment amortizing loans
//! - Disclosure-rate (APR) calculation over a regulatory payment calendar
//! - Pricing-variant assembly from provider coefficient sheets
//! - A typed client interface to the external pricing-coefficient provider

pub mod client;
pub mod error;
pub mod finance;
pub mod pricing;

// Re-export commonly used types
pub use client::{
    CoefficientSheet, PricingClient, PricingCoefficient, PricingProvider, PricingRequest,
};
pub use error::{CreditError, CreditResult};
pub use pricing::{PaymentDayPolicy, PricingConfig, PricingVariant, RatePolicy};
