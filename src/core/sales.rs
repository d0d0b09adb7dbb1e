//! Sums sales of a single SKU in one reporting currency.
use crate::core::currency::CurrencyCode;
use crate::core::edge::parse_decimal;
use crate::core::error::{Result, TradeError};
use crate::core::exact::exact_add;
use crate::core::graph::ConversionGraph;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Fractional digits in a reported total.
pub const TOTAL_SCALE: u32 = 2;

/// One sale. `amount` keeps the `"<decimal> <currency>"` encoding of the
/// source data, e.g. `"12.50 USD"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub store: String,
    pub sku: String,
    pub amount: String,
}

impl TransactionRecord {
    pub fn new(store: &str, sku: &str, amount: &str) -> Self {
        TransactionRecord {
            store: store.to_string(),
            sku: sku.to_string(),
            amount: amount.to_string(),
        }
    }

    pub fn money(&self) -> Result<Money> {
        self.amount.parse()
    }
}

/// The parsed form of a transaction amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    pub magnitude: Decimal,
    pub currency: CurrencyCode,
}

impl FromStr for Money {
    type Err = TradeError;

    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = s.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(magnitude), Some(currency), None) => Ok(Money {
                magnitude: parse_decimal(magnitude)?,
                currency: CurrencyCode::from(currency),
            }),
            _ => Err(TradeError::MissingField(format!(
                "amount '{s}' is not '<decimal> <currency>'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SalesQuery {
    pub sku: String,
    pub currency: CurrencyCode,
}

impl SalesQuery {
    pub fn new(sku: &str, currency: &str) -> Self {
        SalesQuery {
            sku: sku.to_string(),
            currency: CurrencyCode::from(currency),
        }
    }
}

pub fn matching_records<'a>(
    transactions: &'a [TransactionRecord],
    sku: &'a str,
) -> impl Iterator<Item = &'a TransactionRecord> {
    transactions.iter().filter(move |t| t.sku == sku)
}

/// Rounds half-to-even to two places and renders fixed-point, e.g. `1234.50`.
pub fn format_total(total: Decimal) -> String {
    let mut rounded =
        total.round_dp_with_strategy(TOTAL_SCALE, RoundingStrategy::MidpointNearestEven);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(TOTAL_SCALE);
    rounded.to_string()
}

pub(crate) fn add_to_total(total: Decimal, value: Decimal, query: &SalesQuery) -> Result<Decimal> {
    exact_add(total, value).map_err(|_| TradeError::TotalOutOfRange {
        sku: query.sku.clone(),
        currency: query.currency.to_string(),
    })
}

/// Owns a session's transactions and the conversion graph they are
/// totalled against. Rates inferred for one query stay memoized for the next.
pub struct SalesAggregator {
    transactions: Vec<TransactionRecord>,
    graph: ConversionGraph,
}

impl SalesAggregator {
    pub fn new(transactions: Vec<TransactionRecord>, graph: ConversionGraph) -> Self {
        SalesAggregator {
            transactions,
            graph,
        }
    }

    pub fn graph(&self) -> &ConversionGraph {
        &self.graph
    }

    pub fn sum_sales_for(&mut self, query: &SalesQuery) -> Result<String> {
        self.total_for(query).map(format_total)
    }

    /// The exact, unrounded total for `query`.
    pub fn total_for(&mut self, query: &SalesQuery) -> Result<Decimal> {
        let target = query.currency.as_str();
        let mut total = Decimal::ZERO;
        let mut matched = 0usize;

        for record in matching_records(&self.transactions, &query.sku) {
            let money = record.money()?;
            let value = self
                .graph
                .convert(money.currency.as_str(), target, money.magnitude)?;
            total = add_to_total(total, value, query)?;
            matched += 1;
        }

        debug!(
            "Summed {matched} transactions for {} in {target}: {total}",
            query.sku
        );
        Ok(total)
    }
}
