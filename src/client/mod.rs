//! Typed interface to the external pricing-coefficient provider

mod provider;
mod service;
mod types;

pub use provider::{decode_response, PricingProvider};
pub use service::{PricingClient, PricingData, PricingRequest, PricingScheme};
pub use types::{
    CoefficientQuery, CoefficientSheet, InvoiceParams, OrderInfo, OrderStatus,
    PricingCoefficient, SessionStartParams,
};
