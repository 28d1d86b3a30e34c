//! Sends a test notification through a receiver of a remote Alertmanager tenant.
//!
//! To run this example:
//! ```bash
//! export REMOTE_ALERTMANAGER_URL="http://localhost:9009/alertmanager"
//! export REMOTE_ALERTMANAGER_TENANT_ID="tenant-1"
//! export REMOTE_ALERTMANAGER_PASSWORD="s3cret"   # Optional
//! cargo run --example test_receivers
//! ```

use std::collections::BTreeMap;

use remote_alertmanager_client::{
    AlertmanagerClientV1, ApiReceiver, GrafanaIntegrationConfig, RemoteAlertmanagerClient,
    RemoteAlertmanagerConfig, TestReceiversConfigAlertParams, TestReceiversConfigBodyParams,
};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = RemoteAlertmanagerConfig::from_env()?;
    let client = RemoteAlertmanagerClient::from_config(config)?;

    println!("=== Receivers ===\n");
    for receiver in client.get_receivers().await? {
        println!("{} (active: {})", receiver.name, receiver.active);
    }

    println!("\n=== Test webhook receiver ===\n");
    let params = TestReceiversConfigBodyParams {
        alert: Some(TestReceiversConfigAlertParams {
            annotations: BTreeMap::from([("summary".to_owned(), "Test notification".to_owned())]),
            labels: BTreeMap::from([("alertname".to_owned(), "TestAlert".to_owned())]),
        }),
        receivers: vec![ApiReceiver {
            name: "webhook".to_owned(),
            grafana_managed_receiver_configs: vec![GrafanaIntegrationConfig {
                uid: String::new(),
                name: "webhook".to_owned(),
                integration_type: "webhook".to_owned(),
                disable_resolve_message: false,
                settings: json!({"url": "http://localhost:8080/hook"}),
                secure_settings: BTreeMap::new(),
            }],
        }],
    };

    let (result, status) = client.test_receivers(&params).await?;
    println!("Status: {status}");
    for receiver in &result.receivers {
        for integration in &receiver.configs {
            println!(
                "{}/{}: {} {}",
                receiver.name, integration.name, integration.status, integration.error
            );
        }
    }

    Ok(())
}
