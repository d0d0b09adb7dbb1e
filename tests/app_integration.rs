use std::fs;
use std::path::Path;
use tracing::info;
use tradesum::core::config::AppConfig;
use tradesum::{AppCommand, execute, run_command};

const TRANSACTIONS: &str = "store,sku,amount
Yonkers,DM1210,70.00 USD
Yonkers,DM1182,19.68 AUD
Nashua,DM1182,58.58 AUD
Scranton,DM1210,68.76 USD
Camden,DM1182,54.64 USD
";

const RATES: &str = r#"<?xml version="1.0"?>
<rates>
  <rate><from>AUD</from><to>CAD</to><conversion>1.0079</conversion></rate>
  <rate><from>CAD</from><to>USD</to><conversion>1.0090</conversion></rate>
  <rate><from>USD</from><to>CAD</to><conversion>0.9911</conversion></rate>
</rates>
"#;

// Writes config, transactions and rates into `dir`, returning the config path.
fn write_fixture(dir: &Path, extra_config: &str) -> std::path::PathBuf {
    fs::write(dir.join("TRANS.csv"), TRANSACTIONS).expect("Failed to write transactions");
    fs::write(dir.join("RATES.xml"), RATES).expect("Failed to write rates");

    let config_path = dir.join("config.yaml");
    let config_content = format!(
        r#"
transactions: "TRANS.csv"
rates: "RATES.xml"
currency: "USD"
skus: ["DM1182", "DM1210", "XX0000"]
{extra_config}
"#
    );
    fs::write(&config_path, config_content).expect("Failed to write config file");
    config_path
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_total() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_fixture(temp_dir.path(), "");
    let config = AppConfig::load_from_path(&config_path).expect("Failed to load config");

    let output = execute(
        AppCommand::Total {
            sku: "DM1182".to_string(),
            currency: None,
        },
        &config,
    )
    .await
    .expect("Total command failed");
    info!(?output, "Total for DM1182");

    // (19.68 + 58.58) AUD at 1.0079 * 1.0090 plus 54.64 USD
    assert_eq!(output, "134.23");

    let output = execute(
        AppCommand::Total {
            sku: "DM1210".to_string(),
            currency: Some("CAD".to_string()),
        },
        &config,
    )
    .await
    .expect("Total command failed");
    // 138.76 USD at 0.9911 is 137.525036
    assert_eq!(output, "137.53");
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_convert() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_fixture(temp_dir.path(), "");
    let config = AppConfig::load_from_path(&config_path).expect("Failed to load config");

    let output = execute(
        AppCommand::Convert {
            amount: "10".to_string(),
            from: "AUD".to_string(),
            to: "USD".to_string(),
        },
        &config,
    )
    .await
    .expect("Convert command failed");
    assert_eq!(output, "10 AUD = 10.169711 USD");

    let result = execute(
        AppCommand::Convert {
            amount: "10".to_string(),
            from: "CAD".to_string(),
            to: "AUD".to_string(),
        },
        &config,
    )
    .await;
    let err = result.expect_err("CAD -> AUD has no path");
    assert!(
        err.to_string().contains("No conversion path from CAD to AUD"),
        "{err}"
    );
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_report() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_fixture(
        temp_dir.path(),
        "inference:\n  strategy: shortest_path\n  max_hops: 4\n",
    );

    let config = AppConfig::load_from_path(&config_path).expect("Failed to load config");
    let output = execute(AppCommand::Report { currency: None }, &config)
        .await
        .expect("Report command failed");
    assert!(output.contains("134.23"), "{output}");
    assert!(output.contains("138.76"), "{output}");
    assert!(output.contains("1.0169711"), "{output}");

    // Printing path
    let result = run_command(
        AppCommand::Report { currency: None },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Main function failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_bad_amount_in_transactions() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_fixture(temp_dir.path(), "");
    fs::write(
        temp_dir.path().join("TRANS.csv"),
        "store,sku,amount\nYonkers,DM1182,19.68\n",
    )
    .unwrap();

    let config = AppConfig::load_from_path(&config_path).expect("Failed to load config");
    let err = execute(
        AppCommand::Total {
            sku: "DM1182".to_string(),
            currency: None,
        },
        &config,
    )
    .await
    .expect_err("Amount without currency must fail");
    assert!(err.to_string().contains("Missing field"), "{err}");
}

#[test_log::test(tokio::test)]
async fn test_missing_rates_file() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_fixture(temp_dir.path(), "");
    fs::remove_file(temp_dir.path().join("RATES.xml")).unwrap();

    let result = run_command(
        AppCommand::Total {
            sku: "DM1182".to_string(),
            currency: None,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    let err = result.expect_err("Missing rates file must fail");
    assert!(err.to_string().contains("Failed to read rates file"), "{err}");
}
