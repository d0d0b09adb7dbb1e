use crate::core::graph::GraphOptions;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Transactions CSV. Relative paths resolve against the config file.
    pub transactions: PathBuf,
    /// Rates XML. Relative paths resolve against the config file.
    pub rates: PathBuf,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// SKUs listed by the `report` command.
    #[serde(default)]
    pub skus: Vec<String>,
    #[serde(default)]
    pub inference: GraphOptions,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "tradesum")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.transactions = resolve_path(base, &config.transactions);
            config.rates = resolve_path(base, &config.rates);
        }
        debug!("Successfully loaded config");
        Ok(config)
    }
}

fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::{DEFAULT_MAX_HOPS, InferenceStrategy};

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
transactions: "TRANS.csv"
rates: "/data/RATES.xml"
currency: "EUR"
skus: ["DM1182", "DM1210"]
inference:
  strategy: shortest_path
  max_hops: 4
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.transactions, PathBuf::from("TRANS.csv"));
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.skus, vec!["DM1182", "DM1210"]);
        assert_eq!(config.inference.strategy, InferenceStrategy::ShortestPath);
        assert_eq!(config.inference.max_hops, 4);
    }

    #[test]
    fn test_config_defaults() {
        let yaml_str = r#"
transactions: "TRANS.csv"
rates: "RATES.xml"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.currency, "USD");
        assert!(config.skus.is_empty());
        assert_eq!(config.inference.strategy, InferenceStrategy::FirstEdge);
        assert_eq!(config.inference.max_hops, DEFAULT_MAX_HOPS);

        let yaml_str = r#"
transactions: "TRANS.csv"
rates: "RATES.xml"
inference:
  max_hops: 3
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.inference.strategy, InferenceStrategy::FirstEdge);
        assert_eq!(config.inference.max_hops, 3);
    }

    #[test]
    fn test_load_resolves_relative_paths() -> Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(
            &config_path,
            "transactions: data/TRANS.csv\nrates: /abs/RATES.xml\n",
        )?;

        let config = AppConfig::load_from_path(&config_path)?;
        assert_eq!(config.transactions, temp_dir.path().join("data/TRANS.csv"));
        assert_eq!(config.rates, PathBuf::from("/abs/RATES.xml"));
        Ok(())
    }

    #[test]
    fn test_missing_config_file() {
        let err = AppConfig::load_from_path("/nonexistent/tradesum/config.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
