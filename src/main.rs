use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tradesum::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for tradesum::AppCommand {
    fn from(cmd: Commands) -> tradesum::AppCommand {
        match cmd {
            Commands::Total { sku, currency } => tradesum::AppCommand::Total { sku, currency },
            Commands::Convert { amount, from, to } => {
                tradesum::AppCommand::Convert { amount, from, to }
            }
            Commands::Report { currency } => tradesum::AppCommand::Report { currency },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration and sample data
    Setup,
    /// Print the total sales of a SKU in the reporting currency
    Total {
        /// Product identifier to total
        sku: String,
        /// Reporting currency, overrides the configured one
        #[arg(long)]
        currency: Option<String>,
    },
    /// Convert an amount between two currencies
    Convert {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        from: String,
        to: String,
    },
    /// Total every configured SKU and list the rates inferred on the way
    Report {
        /// Reporting currency, overrides the configured one
        #[arg(long)]
        currency: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => tradesum::cli::setup::setup(),
        Some(cmd) => tradesum::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
