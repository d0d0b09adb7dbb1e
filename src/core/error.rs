//! Error types for currency conversion and sales aggregation

use crate::core::exact::Inexact;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TradeError {
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid number '{value}': {reason}")]
    InvalidNumber { value: String, reason: String },

    #[error("Conversion rate from {from} to {to} must be positive, got {rate}")]
    NonPositiveRate {
        from: String,
        to: String,
        rate: Decimal,
    },

    #[error("No conversion path from {from} to {to}")]
    NoConversionPath { from: String, to: String },

    #[error("Conversion from {from} to {to} does not converge within {max_hops} hops")]
    CycleOrUnreachablePath {
        from: String,
        to: String,
        max_hops: usize,
    },

    #[error("Decimal overflow converting from {from} to {to}")]
    RateOverflow { from: String, to: String },

    #[error("Converting from {from} to {to} needs more than 28 decimal places")]
    PrecisionLoss { from: String, to: String },

    #[error("Total sales of {sku} in {currency} cannot be represented exactly")]
    TotalOutOfRange { sku: String, currency: String },
}

pub type Result<T> = std::result::Result<T, TradeError>;

impl TradeError {
    pub(crate) fn invalid_number(value: &str, err: rust_decimal::Error) -> Self {
        TradeError::InvalidNumber {
            value: value.to_string(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn inexact_conversion(kind: Inexact, from: &str, to: &str) -> Self {
        let (from, to) = (from.to_string(), to.to_string());
        match kind {
            Inexact::Overflow => TradeError::RateOverflow { from, to },
            Inexact::Rounded => TradeError::PrecisionLoss { from, to },
        }
    }
}
