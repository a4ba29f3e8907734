//! Public pricing API
//!
//! Thin orchestration over the provider capability and the variant
//! builder. The current date enters here and nowhere else: every method
//! has an `_on` twin taking `today` explicitly, and the convenience form
//! consults the local clock once at the boundary.

use chrono::{Local, NaiveDate};
use log::debug;

use crate::client::provider::PricingProvider;
use crate::client::types::CoefficientQuery;
use crate::error::CreditResult;
use crate::pricing::{build_variants, filter_by_target_installment, PricingConfig, PricingVariant};

/// Scheme id used when the provider supplies no product code.
const DEFAULT_SCHEME_ID: i64 = 1;

/// One pricing request: a purchase to quote financing plans for.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRequest {
    /// Shelf price of the goods.
    pub price: f64,

    /// Product identifiers; the first one filters the coefficient sheet.
    pub product_ids: Vec<String>,

    /// Scheme id for variants without a provider product code.
    pub scheme_id: Option<String>,

    /// Amount paid upfront; the remainder is financed.
    pub down_payment: f64,

    /// Desired monthly installment; positive values filter the variants
    /// to the tolerance band around this amount.
    pub target_installment: f64,
}

impl PricingRequest {
    pub fn new(price: f64, product_ids: Vec<String>) -> Self {
        Self {
            price,
            product_ids,
            scheme_id: None,
            down_payment: 0.0,
            target_installment: 0.0,
        }
    }
}

/// A pricing scheme grouping the variants offered for a request.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingScheme {
    pub scheme_id: i64,
    pub scheme_name: String,
    pub variants: Vec<PricingVariant>,
}

/// Complete answer to a pricing-data request.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingData {
    pub schemes: Vec<PricingScheme>,
    /// The request's down payment; zero surfaces as `None`.
    pub down_payment: Option<f64>,
}

/// Client-facing pricing service.
pub struct PricingClient<P> {
    provider: P,
    config: PricingConfig,
}

impl<P: PricingProvider> PricingClient<P> {
    /// Client with the default pricing configuration.
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, PricingConfig::default())
    }

    /// Client with an explicit pricing configuration.
    pub fn with_config(provider: P, config: PricingConfig) -> Self {
        Self { provider, config }
    }

    /// Access the underlying provider, e.g. for session operations.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Pricing schemes available for a purchase.
    ///
    /// The provider exposes a single flat scheme; variants are attached by
    /// [`PricingClient::get_pricing_data`].
    pub fn get_pricing_schemes(&self) -> Vec<PricingScheme> {
        vec![PricingScheme {
            scheme_id: DEFAULT_SCHEME_ID,
            scheme_name: String::new(),
            variants: Vec::new(),
        }]
    }

    /// Financing variants for a purchase, dated today.
    pub fn get_pricing_variants(&self, request: &PricingRequest) -> CreditResult<Vec<PricingVariant>> {
        self.get_pricing_variants_on(request, Local::now().date_naive())
    }

    /// Financing variants for a purchase with an explicit calculation date.
    pub fn get_pricing_variants_on(
        &self,
        request: &PricingRequest,
        today: NaiveDate,
    ) -> CreditResult<Vec<PricingVariant>> {
        let query = match request.product_ids.iter().find(|id| !id.is_empty()) {
            Some(code) => CoefficientQuery::for_product(code.clone()),
            None => CoefficientQuery::default(),
        };

        let sheet = self.provider.get_coeff(&query)?;
        debug!(
            "pricing {} coefficient rows against price {:.2}",
            sheet.coeff_list.len(),
            request.price
        );

        let variants = build_variants(
            &sheet.coeff_list,
            request.price,
            request.down_payment,
            request.scheme_id.as_deref(),
            today,
            &self.config,
        );

        Ok(filter_by_target_installment(
            variants,
            request.target_installment,
            self.config.installment_tolerance,
        ))
    }

    /// Schemes with their variants plus the echoed down payment, dated today.
    pub fn get_pricing_data(&self, request: &PricingRequest) -> CreditResult<PricingData> {
        self.get_pricing_data_on(request, Local::now().date_naive())
    }

    /// Schemes with their variants with an explicit calculation date.
    pub fn get_pricing_data_on(
        &self,
        request: &PricingRequest,
        today: NaiveDate,
    ) -> CreditResult<PricingData> {
        let mut schemes = self.get_pricing_schemes();
        for scheme in &mut schemes {
            let scoped = PricingRequest {
                scheme_id: Some(scheme.scheme_id.to_string()),
                ..request.clone()
            };
            scheme.variants = self.get_pricing_variants_on(&scoped, today)?;
        }

        Ok(PricingData {
            schemes,
            down_payment: (request.down_payment != 0.0).then_some(request.down_payment),
        })
    }

    /// Locate one variant by id (its installment count) across the pricing
    /// data, with an explicit calculation date.
    pub fn find_variant_on(
        &self,
        variant_id: u32,
        request: &PricingRequest,
        today: NaiveDate,
    ) -> CreditResult<Option<PricingVariant>> {
        let data = self.get_pricing_data_on(request, today)?;
        Ok(data
            .schemes
            .into_iter()
            .flat_map(|scheme| scheme.variants)
            .find(|variant| variant.installment_count == variant_id))
    }

    /// Locate one variant by id, dated today.
    pub fn find_variant(
        &self,
        variant_id: u32,
        request: &PricingRequest,
    ) -> CreditResult<Option<PricingVariant>> {
        self.find_variant_on(variant_id, request, Local::now().date_naive())
    }
}
