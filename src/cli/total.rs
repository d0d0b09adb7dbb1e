use crate::core::{ConversionGraph, SalesAggregator, SalesQuery, TransactionRecord};
use anyhow::Result;
use tracing::info;

/// Totals one SKU and returns the formatted amount, e.g. `134.23`.
pub fn run(
    transactions: Vec<TransactionRecord>,
    graph: ConversionGraph,
    query: &SalesQuery,
) -> Result<String> {
    info!(
        "Totalling sales for {} in {} over {} transactions",
        query.sku,
        query.currency,
        transactions.len()
    );
    let mut aggregator = SalesAggregator::new(transactions, graph);
    Ok(aggregator.sum_sales_for(query)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConversionEdge, TradeError};

    #[test]
    fn test_total_command() {
        let transactions = vec![
            TransactionRecord::new("Yonkers", "DM1182", "19.68 AUD"),
            TransactionRecord::new("Camden", "DM1182", "54.64 USD"),
        ];
        let graph = ConversionGraph::new([
            ConversionEdge::new("AUD", "CAD", "1.0079".parse().unwrap()),
            ConversionEdge::new("CAD", "USD", "1.0090".parse().unwrap()),
        ]);

        let output = run(transactions, graph, &SalesQuery::new("DM1182", "USD")).unwrap();
        // 20.013991248 + 54.64
        assert_eq!(output, "74.65");
    }

    #[test]
    fn test_total_command_surfaces_core_errors() {
        let transactions = vec![TransactionRecord::new("Yonkers", "DM1182", "19.68 AUD")];
        let err = run(
            transactions,
            ConversionGraph::default(),
            &SalesQuery::new("DM1182", "USD"),
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TradeError>(),
            Some(TradeError::NoConversionPath { .. })
        ));
    }
}
