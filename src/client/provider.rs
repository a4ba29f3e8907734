//! Provider capability boundary
//!
//! Every operation delegated to the external service is listed explicitly
//! here; there is no catch-all dispatch. Transport implementations (HTTP,
//! fixtures, retries, timeouts) live outside this crate and only need to
//! satisfy this trait.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::types::{
    CoefficientQuery, CoefficientSheet, InvoiceParams, OrderInfo, OrderStatus, SessionStartParams,
};
use crate::error::{CreditError, CreditResult};

/// The pricing service as seen by this library.
///
/// Synchronous by design: the pricing core never suspends, and a
/// caller-level timeout around the transport is sufficient. Implementations
/// are expected to call [`decode_response`] on raw payloads so that
/// error-flagged envelopes surface uniformly.
pub trait PricingProvider {
    /// Open a financing session for a confirmed order; returns the session id.
    fn session_start(&self, params: &SessionStartParams) -> CreditResult<String>;

    /// Current status of an order.
    fn get_status(&self, order_no: &str) -> CreditResult<OrderStatus>;

    /// Full detail of an order.
    fn get_info(&self, order_no: &str) -> CreditResult<OrderInfo>;

    /// Coefficient sheet for the given product filter.
    fn get_coeff(&self, query: &CoefficientQuery) -> CreditResult<CoefficientSheet>;

    /// Attach an invoice document to an order; returns the provider's ack.
    fn send_invoice(&self, params: &InvoiceParams) -> CreditResult<Value>;

    /// Redirect document handing the customer over to the hosted flow.
    fn redirect(&self, session_id: &str) -> CreditResult<String>;
}

/// Decode a provider response envelope.
///
/// A non-empty `errorCode` field fails with
/// [`CreditError::UpstreamService`] carrying the code, the `errorText`
/// message and the raw payload. Otherwise the payload is decoded into `T`;
/// a payload that does not fit fails with
/// [`CreditError::MalformedResponse`]. An empty coefficient list is data,
/// not an error.
pub fn decode_response<T: DeserializeOwned>(payload: Value) -> CreditResult<T> {
    if let Some(code) = error_code(&payload) {
        let message = payload
            .get("errorText")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(CreditError::upstream(code, message, payload));
    }

    serde_json::from_value(payload.clone()).map_err(|err| CreditError::MalformedResponse {
        reason: err.to_string(),
        payload,
    })
}

/// Non-empty error code from an envelope, normalized to a string.
fn error_code(payload: &Value) -> Option<String> {
    match payload.get("errorCode") {
        Some(Value::String(code)) if !code.is_empty() => Some(code.clone()),
        Some(Value::Number(code)) if code.as_i64() != Some(0) => Some(code.to_string()),
        _ => None,
    }
}
