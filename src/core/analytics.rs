//! Provides functions for totalling sales over an async rate provider.
use crate::core::currency::CurrencyRateProvider;
use crate::core::error::{Result, TradeError};
use crate::core::exact::exact_mul;
use crate::core::sales::{
    SalesQuery, TransactionRecord, add_to_total, format_total, matching_records,
};
use futures::future::join_all;
use rust_decimal::Decimal;
use tracing::debug;

/// The outcome of totalling one SKU in a target currency.
#[derive(Debug, Clone)]
pub struct SkuSales {
    pub sku: String,
    pub transactions: usize,
    pub total: Option<Decimal>,
    pub error: Option<String>,
}

impl SkuSales {
    /// The rounded total, or `None` if the query failed.
    pub fn formatted_total(&self) -> Option<String> {
        self.total.map(format_total)
    }
}

/// Sums sales for `query`, converting every amount through `provider`.
///
/// Same semantics as [`crate::core::sales::SalesAggregator::total_for`]:
/// the first bad amount or failed conversion fails the whole query.
pub async fn total_sales(
    transactions: &[TransactionRecord],
    provider: &(dyn CurrencyRateProvider + Send + Sync),
    query: &SalesQuery,
) -> Result<Decimal> {
    let mut total = Decimal::ZERO;

    for record in matching_records(transactions, &query.sku) {
        let money = record.money()?;
        let value = convert_currency(
            provider,
            &record.store,
            money.magnitude,
            money.currency.as_str(),
            query.currency.as_str(),
        )
        .await?;
        total = add_to_total(total, value, query)?;
    }

    Ok(total)
}

/// Totals every query concurrently. One failing SKU does not stop the others.
pub async fn calculate_sales_report(
    transactions: &[TransactionRecord],
    provider: &(dyn CurrencyRateProvider + Send + Sync),
    queries: &[SalesQuery],
    update_callback: &(dyn Fn() + Sync),
) -> Vec<SkuSales> {
    let futures = queries.iter().map(|query| async move {
        let result = total_sales(transactions, provider, query).await;
        update_callback();

        let mut sales = SkuSales {
            sku: query.sku.clone(),
            transactions: matching_records(transactions, &query.sku).count(),
            total: None,
            error: None,
        };
        match result {
            Ok(total) => sales.total = Some(total),
            Err(e) => {
                debug!("Sales total error for {}: {}", query.sku, e);
                sales.error = Some(e.to_string());
            }
        }
        sales
    });

    join_all(futures).await
}

/// Private helper to perform currency conversion for a single value.
async fn convert_currency(
    provider: &(dyn CurrencyRateProvider + Send + Sync),
    store: &str,
    value: Decimal,
    current_currency: &str,
    target_currency: &str,
) -> Result<Decimal> {
    if current_currency == target_currency {
        debug!("No currency conversion needed for sale at {store} ({current_currency})");
        return Ok(value);
    }

    let rate = provider.get_rate(current_currency, target_currency).await?;
    let converted_value = exact_mul(value, rate).map_err(|kind| {
        TradeError::inexact_conversion(kind, current_currency, target_currency)
    })?;
    debug!(
        "Converted {value} from {current_currency} to {target_currency} at rate {rate}: {converted_value}",
    );
    Ok(converted_value)
}
