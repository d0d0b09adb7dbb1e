use crate::core::edge::parse_decimal;
use crate::core::ConversionGraph;
use anyhow::{Context, Result};
use tracing::debug;

/// Converts a single amount, e.g. `1.00 AUD = 1.0169711 USD`.
pub fn run(mut graph: ConversionGraph, amount: &str, from: &str, to: &str) -> Result<String> {
    let amount = parse_decimal(amount).context("Invalid amount")?;
    let edges_before = graph.len();

    let converted = graph.convert(from, to, amount)?;
    debug!(
        "Conversion {from} -> {to} added {} inferred rates",
        graph.len() - edges_before
    );

    Ok(format!("{amount} {from} = {} {to}", converted.normalize()))
}
