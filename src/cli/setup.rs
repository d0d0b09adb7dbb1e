use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../docs/example_config.yaml");
const SAMPLE_TRANSACTIONS: &str = include_str!("../../docs/sample/TRANS.csv");
const SAMPLE_RATES: &str = include_str!("../../docs/sample/RATES.xml");

/// Creates a default configuration file with sample data at the default location
pub fn setup() -> Result<()> {
    let path = AppConfig::default_config_path()?;
    setup_at_path(path)
}

/// Creates a default configuration file at `path`, plus sample transaction
/// and rate files next to it unless they already exist.
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    for (name, contents) in [("TRANS.csv", SAMPLE_TRANSACTIONS), ("RATES.xml", SAMPLE_RATES)] {
        let sample = parent.join(name);
        if !sample.exists() {
            std::fs::write(&sample, contents)
                .with_context(|| format!("Failed to write sample file to {}", sample.display()))?;
        }
    }

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
