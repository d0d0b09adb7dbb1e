pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{ConversionGraph, SalesQuery};
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Total {
        sku: String,
        currency: Option<String>,
    },
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    Report {
        currency: Option<String>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("tradesum starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let output = execute(command, &config).await?;
    println!("{output}");
    Ok(())
}

/// Runs `command` against the data files named in `config` and returns what
/// would be printed.
pub async fn execute(command: AppCommand, config: &AppConfig) -> Result<String> {
    let edges = providers::rates_xml::load_rates(&config.rates)?;
    let graph = ConversionGraph::with_options(edges, config.inference);

    match command {
        AppCommand::Total { sku, currency } => {
            let transactions = providers::transactions_csv::load_transactions(&config.transactions)?;
            let currency = currency.as_deref().unwrap_or(&config.currency);
            cli::total::run(transactions, graph, &SalesQuery::new(&sku, currency))
        }
        AppCommand::Convert { amount, from, to } => cli::convert::run(graph, &amount, &from, &to),
        AppCommand::Report { currency } => {
            let transactions = providers::transactions_csv::load_transactions(&config.transactions)?;
            let currency = currency.as_deref().unwrap_or(&config.currency);
            cli::report::run(&transactions, graph, &config.skus, currency).await
        }
    }
}
