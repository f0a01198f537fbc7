use std::fs;
use tracing::info;

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const ESTIMATION: &str = r#"{
        "price": {
            "cost": {"currencyCode": "USD", "currencySymbol": "$", "decimals": 2, "value": "7.00"},
            "msrp": {"currencyCode": "USD", "currencySymbol": "$", "decimals": 2, "value": "7.00"},
            "taxRate": "0",
            "relCommission": "0.05"
        },
        "recommendOffer": {"currencyCode": "USD", "currencySymbol": "$", "decimals": 2, "value": "0.10"},
        "createOffer": {"currencyCode": "USD", "currencySymbol": "$", "decimals": 2, "value": "0.20"},
        "inviteBuyer": {"currencyCode": "USD", "currencySymbol": "$", "decimals": 2, "value": "0.30"},
        "inviteSeller": {"currencyCode": "USD", "currencySymbol": "$", "decimals": 2, "value": "0.40"},
        "bonus": {"currencyCode": "USD", "currencySymbol": "$", "decimals": 2, "value": "0.50"}
    }"#;

    pub async fn create_oracle_server(status_code: u16, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/estimate"))
            .respond_with(ResponseTemplate::new(status_code).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(dir: &std::path::Path, base_url: &str) -> std::path::PathBuf {
        let config_path = dir.join("config.yaml");
        let config_content = format!(
            r#"
            oracle:
              kind: remote
              base_url: {base_url}
              retries: 0
              retry_delay_ms: 0
            cache: true
        "#
        );
        std::fs::write(&config_path, config_content).expect("Failed to write config file");
        config_path
    }
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_remote_oracle() {
    let mock_server = test_utils::create_oracle_server(200, test_utils::ESTIMATION).await;
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(temp_dir.path(), &mock_server.uri());

    let report_path = temp_dir.path().join("report.json");
    fs::write(
        &report_path,
        r#"{"quick": {"haveWebsite": "yes", "numInvites": 100, "numHours": 10}}"#,
    )
    .expect("Failed to write report file");

    let result = impact::run_command(
        impact::AppCommand::Report {
            path: report_path.to_str().unwrap().to_string(),
            json: true,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Report command failed with: {:?}",
        result.err()
    );

    let requests = mock_server.received_requests().await.unwrap();
    info!(requests = requests.len(), "Oracle requests received");
    // At most one request per activity, concurrent misses may overlap
    assert!((2..=5).contains(&requests.len()));

    // The same configuration and report produce the expected projection
    let config = impact::core::config::AppConfig::load_from_path(&config_path)
        .expect("Failed to load config");
    let estimator = impact::build_estimator(config);
    let report = impact::core::ImpactReport::load_from_path(&report_path)
        .expect("Failed to load report");
    let summary = impact::cli::estimate::summarize(&estimator, &report)
        .await
        .expect("Failed to summarize report");
    assert_eq!(summary.total.to_string(), "$25117.40");
    assert_eq!(summary.breakdown.len(), 5);
}

#[test_log::test(tokio::test)]
async fn test_estimator_total_against_remote_oracle() {
    use impact::core::config::RemoteOracleConfig;
    use impact::core::{Estimator, ImpactReport, ReportAdapter};
    use impact::providers::remote::RemoteOracle;
    use rust_decimal_macros::dec;

    let mock_server = test_utils::create_oracle_server(200, test_utils::ESTIMATION).await;
    let oracle = RemoteOracle::new(RemoteOracleConfig {
        base_url: mock_server.uri(),
        retries: 0,
        retry_delay_ms: 0,
    });
    let estimator = Estimator::new(oracle, ReportAdapter::default());

    let total = estimator
        .total(&ImpactReport::quick(100, dec!(10), true))
        .await
        .unwrap();
    info!(%total, "Projected return");
    assert_eq!(total.to_string(), "$25117.40");

    // Nothing to estimate, nothing asked
    let zero = estimator
        .total(&ImpactReport::quick(0, dec!(0), false))
        .await
        .unwrap();
    assert_eq!(zero.to_string(), "$0.00");
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 5);
}

#[test_log::test(tokio::test)]
async fn test_quick_command_fails_when_oracle_fails() {
    let mock_server = test_utils::create_oracle_server(500, "boom").await;
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(temp_dir.path(), &mock_server.uri());

    let result = impact::run_command(
        impact::AppCommand::Quick {
            num_invites: 50,
            daily_hours: rust_decimal::Decimal::from(2),
            have_website: false,
            json: false,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;

    let message = result.expect_err("oracle failure should fail the command").to_string();
    assert!(message.contains("500"), "unexpected error: {message}");
}

#[test_log::test(tokio::test)]
async fn test_report_without_quick_section() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    // Oracle is never reached, any address will do
    let config_path = test_utils::write_config(temp_dir.path(), "http://127.0.0.1:1");

    let report_path = temp_dir.path().join("report.json");
    fs::write(&report_path, r#"{"stateParams": {"page": "intro"}}"#)
        .expect("Failed to write report file");

    let result = impact::run_command(
        impact::AppCommand::Report {
            path: report_path.to_str().unwrap().to_string(),
            json: false,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Report command failed with: {:?}", result.err());
}
