//! Error types for pricing requests and rate calculations
//!
//! Provider-signaled errors and pre-dispatch validation failures are fatal
//! to the current request; numerical non-convergence in the valuation
//! routines is soft and surfaces as absent rate fields instead.

use serde_json::Value;
use thiserror::Error;

/// A specialized Result type for pricing operations.
pub type CreditResult<T> = Result<T, CreditError>;

/// The error type for pricing operations.
#[derive(Error, Debug)]
pub enum CreditError {
    /// The provider flagged the response with an error code.
    #[error("pricing service error {code}: {message}")]
    UpstreamService {
        /// Upstream error code (string or numeric on the wire).
        code: String,
        /// Upstream error text.
        message: String,
        /// Raw response payload, kept for diagnostics.
        payload: Value,
    },

    /// The provider returned a payload that does not decode.
    #[error("malformed pricing service response: {reason}")]
    MalformedResponse {
        /// Decoder message describing the mismatch.
        reason: String,
        /// Raw response payload, kept for diagnostics.
        payload: Value,
    },

    /// A required request parameter is empty or missing before dispatch.
    #[error("invalid value for parameter '{name}'")]
    MissingParameter {
        /// Name of the offending parameter.
        name: String,
    },

    /// A date unit the arithmetic does not implement was requested.
    #[error("unsupported date unit '{unit}'")]
    UnsupportedDateUnit {
        /// Display name of the unit.
        unit: &'static str,
    },

    /// The annuity solver could not produce a rate.
    #[error("could not determine rate: {reason}")]
    RateNotDeterminable {
        /// What prevented convergence.
        reason: String,
    },
}

impl CreditError {
    /// Creates an upstream service error from an error-flagged payload.
    #[must_use]
    pub fn upstream(code: impl Into<String>, message: impl Into<String>, payload: Value) -> Self {
        Self::UpstreamService {
            code: code.into(),
            message: message.into(),
            payload,
        }
    }

    /// Creates a missing-parameter validation error.
    #[must_use]
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Creates a rate-not-determinable error.
    #[must_use]
    pub fn rate_not_determinable(reason: impl Into<String>) -> Self {
        Self::RateNotDeterminable {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upstream_display_includes_code_and_message() {
        let err = CreditError::upstream("301", "invalid product", json!({"errorCode": "301"}));
        let text = err.to_string();
        assert!(text.contains("301"));
        assert!(text.contains("invalid product"));
    }

    #[test]
    fn test_missing_parameter_display() {
        let err = CreditError::missing_parameter("orderNo");
        assert!(err.to_string().contains("orderNo"));
    }
}
