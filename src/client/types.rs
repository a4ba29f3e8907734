//! Request and response types matching the provider's wire format

use serde::{Deserialize, Serialize};

use crate::error::{CreditError, CreditResult};

/// One term/coefficient row from the provider's pricing sheet.
///
/// The coefficient converts the financed amount into a monthly installment
/// for the given term. The interest percent is the nominal annual rate the
/// provider prices the plan at; zero or absent marks an interest-free
/// promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingCoefficient {
    /// Number of monthly payments.
    pub installment_count: u32,

    /// Multiplier of the financed amount giving the monthly payment.
    pub coeff: f64,

    /// Nominal annual interest percent, when the plan carries one.
    #[serde(default)]
    pub interest_percent: Option<f64>,

    /// Provider product code identifying a promotional scheme.
    #[serde(default, rename = "onlineProductCode")]
    pub product_code: Option<String>,
}

/// The provider's coefficient sheet for a product filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoefficientSheet {
    /// Available term/coefficient rows; empty is a valid answer.
    pub coeff_list: Vec<PricingCoefficient>,
}

/// Product filter for a coefficient request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoefficientQuery {
    /// Restrict the sheet to one online product, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_product_code: Option<String>,
}

impl CoefficientQuery {
    /// Query filtered to a single product code.
    pub fn for_product(code: impl Into<String>) -> Self {
        Self {
            online_product_code: Some(code.into()),
        }
    }
}

/// Parameters opening a financing session for a confirmed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStartParams {
    pub order_no: String,
    pub online_product_code: String,
    pub total_price: f64,
    pub installment_count: u32,
    pub monthly_payment: f64,
}

impl SessionStartParams {
    /// Check required fields before dispatching to the provider.
    pub fn validate(&self) -> CreditResult<()> {
        require_text("orderNo", &self.order_no)?;
        require_text("onlineProductCode", &self.online_product_code)?;
        require_positive("totalPrice", self.total_price)?;
        if self.installment_count == 0 {
            return Err(CreditError::missing_parameter("installmentCount"));
        }
        require_positive("monthlyPayment", self.monthly_payment)
    }
}

/// Parameters attaching an invoice document to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceParams {
    pub order_no: String,
    pub invoice_no: String,
    /// Base64-encoded invoice document.
    pub invoice_file: String,
}

impl InvoiceParams {
    /// Check required fields before dispatching to the provider.
    pub fn validate(&self) -> CreditResult<()> {
        require_text("orderNo", &self.order_no)?;
        require_text("invoiceNo", &self.invoice_no)?;
        require_text("invoiceFile", &self.invoice_file)
    }
}

/// Decoded order-status lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatus {
    pub order_no: String,
    pub status: String,
}

/// Decoded order-detail lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInfo {
    pub order_no: String,
    pub total_price: f64,
    pub installment_count: u32,
    pub monthly_payment: f64,
    #[serde(default)]
    pub status: Option<String>,
}

fn require_text(name: &str, value: &str) -> CreditResult<()> {
    if value.trim().is_empty() {
        return Err(CreditError::missing_parameter(name));
    }
    Ok(())
}

fn require_positive(name: &str, value: f64) -> CreditResult<()> {
    if value <= 0.0 {
        return Err(CreditError::missing_parameter(name));
    }
    Ok(())
}
