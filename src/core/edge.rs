//! Directed exchange rates between two currencies

use crate::core::currency::CurrencyCode;
use crate::core::error::{Result, TradeError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A directed rate: one unit of `from` is worth `rate` units of `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionEdge {
    from: CurrencyCode,
    to: CurrencyCode,
    rate: Decimal,
}

impl ConversionEdge {
    pub fn new(from: impl Into<CurrencyCode>, to: impl Into<CurrencyCode>, rate: Decimal) -> Self {
        ConversionEdge {
            from: from.into(),
            to: to.into(),
            rate,
        }
    }

    pub fn from(&self) -> &CurrencyCode {
        &self.from
    }

    pub fn to(&self) -> &CurrencyCode {
        &self.to
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

/// A rate as it arrives from a document or config file, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawRate {
    pub from: Option<String>,
    pub to: Option<String>,
    pub conversion: Option<String>,
}

impl TryFrom<RawRate> for ConversionEdge {
    type Error = TradeError;

    fn try_from(raw: RawRate) -> Result<Self> {
        let from = raw
            .from
            .ok_or_else(|| TradeError::MissingField("from".to_string()))?;
        let to = raw
            .to
            .ok_or_else(|| TradeError::MissingField("to".to_string()))?;
        let conversion = raw
            .conversion
            .ok_or_else(|| TradeError::MissingField("conversion".to_string()))?;

        let rate = parse_decimal(&conversion)?;
        if rate <= Decimal::ZERO {
            return Err(TradeError::NonPositiveRate { from, to, rate });
        }

        Ok(ConversionEdge::new(from, to, rate))
    }
}

/// Parses a plain or scientific decimal literal without going through floats.
pub fn parse_decimal(value: &str) -> Result<Decimal> {
    let value = value.trim();
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|e| TradeError::invalid_number(value, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn raw(from: Option<&str>, to: Option<&str>, conversion: Option<&str>) -> RawRate {
        RawRate {
            from: from.map(str::to_string),
            to: to.map(str::to_string),
            conversion: conversion.map(str::to_string),
        }
    }

    #[test]
    fn test_edge_from_raw_rate() {
        let edge = ConversionEdge::try_from(raw(Some("AUD"), Some("CAD"), Some(" 1.0079 ")))
            .expect("valid rate");

        assert_eq!(edge.from(), "AUD");
        assert_eq!(edge.to(), "CAD");
        assert_eq!(edge.rate(), d("1.0079"));
    }

    #[test]
    fn test_missing_fields() {
        let cases = [
            (raw(None, Some("CAD"), Some("1.0")), "from"),
            (raw(Some("AUD"), None, Some("1.0")), "to"),
            (raw(Some("AUD"), Some("CAD"), None), "conversion"),
        ];
        for (input, field) in cases {
            assert_eq!(
                ConversionEdge::try_from(input),
                Err(TradeError::MissingField(field.to_string()))
            );
        }
    }

    #[test]
    fn test_invalid_rates() {
        let err = ConversionEdge::try_from(raw(Some("AUD"), Some("CAD"), Some("abc"))).unwrap_err();
        assert!(matches!(err, TradeError::InvalidNumber { ref value, .. } if value == "abc"));

        let err = ConversionEdge::try_from(raw(Some("AUD"), Some("CAD"), Some("0"))).unwrap_err();
        assert!(matches!(err, TradeError::NonPositiveRate { .. }));

        let err = ConversionEdge::try_from(raw(Some("AUD"), Some("CAD"), Some("-1.5"))).unwrap_err();
        assert!(matches!(err, TradeError::NonPositiveRate { .. }));
    }

    #[test]
    fn test_parse_decimal_keeps_precision() {
        assert_eq!(parse_decimal("0.1").unwrap(), d("0.1"));
        assert_eq!(parse_decimal("1.2e-2").unwrap(), d("0.012"));
        assert_eq!(parse_decimal("12.50").unwrap().to_string(), "12.50");
    }
}
