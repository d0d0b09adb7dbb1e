//! Loads sales transactions from a `store,sku,amount` CSV file.

use crate::core::sales::TransactionRecord;
use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub fn load_transactions(path: &Path) -> Result<Vec<TransactionRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open transactions file: {}", path.display()))?;
    let transactions = parse_transactions(file)
        .with_context(|| format!("Failed to parse transactions file: {}", path.display()))?;
    debug!(
        "Loaded {} transactions from {}",
        transactions.len(),
        path.display()
    );
    Ok(transactions)
}

/// Parses CSV with a header row. Every data row must have exactly
/// `store`, `sku` and `amount` fields; the amount is kept as written.
pub fn parse_transactions<R: Read>(reader: R) -> Result<Vec<TransactionRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        // Header is line 1
        let line = row_idx + 2;
        let record = result.with_context(|| format!("CSV parse error at line {line}"))?;
        if record.len() != 3 {
            bail!(
                "Expected 3 fields (store, sku, amount) at line {line}, found {}",
                record.len()
            );
        }
        transactions.push(TransactionRecord::new(&record[0], &record[1], &record[2]));
    }
    Ok(transactions)
}
