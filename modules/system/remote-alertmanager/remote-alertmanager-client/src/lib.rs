//! Remote Alertmanager Client
//!
//! Lets an alerting subsystem use a remotely hosted, multi-tenant
//! Alertmanager-compatible service as the system of record for its configuration and
//! its in-memory state (silences, notification log).
//!
//! Every call performs exactly one HTTP request and reports failures by kind:
//!
//! - transport failures ([`RemoteAlertmanagerError::Request`]),
//! - protocol violations such as a non-JSON body or an undecodable envelope,
//! - application errors reported by the remote API ([`RemoteAlertmanagerError::Api`]).
//!
//! Retries are left to the caller.
//!
//! # Example
//!
//! ```no_run
//! use remote_alertmanager_client::{
//!     AlertmanagerClientV1, RemoteAlertmanagerClient, RemoteAlertmanagerConfig,
//!     TestTemplatesConfigBodyParams,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RemoteAlertmanagerConfig::new("http://mimir:8080/alertmanager", "tenant-1")?
//!     .with_password("s3cret");
//! let client = RemoteAlertmanagerClient::from_config(config)?;
//!
//! let results = client
//!     .test_template(&TestTemplatesConfigBodyParams {
//!         alerts: vec![],
//!         template: r#"{{ define "slack.title" }}Firing{{ end }}"#.to_owned(),
//!         name: "slack.title".to_owned(),
//!     })
//!     .await?;
//! println!("{} rendered, {} errors", results.results.len(), results.errors.len());
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod config;
mod envelope;
mod error;
mod metrics;
mod models;
mod operations;
pub mod transport;

// Re-export public API
pub use api::AlertmanagerClientV1;
pub use client::RemoteAlertmanagerClient;
pub use config::RemoteAlertmanagerConfig;
pub use envelope::{ErrorEnvelope, SuccessEnvelope};
pub use error::{RemoteAlertmanagerError, Result};
pub use metrics::RemoteAlertmanagerMetrics;
pub use models::{
    ApiReceiver, GrafanaAlertmanagerConfig, GrafanaIntegrationConfig, Integration, LabelSet,
    PostableAlert, Receiver, SmtpConfig, TestIntegrationResult, TestReceiverResult,
    TestReceiversConfigAlertParams, TestReceiversConfigBodyParams, TestReceiversResult,
    TestTemplatesConfigBodyParams, TestTemplatesErrorResult, TestTemplatesResult,
    TestTemplatesResults, UserGrafanaConfig, UserState,
};
pub use operations::{
    FULL_STATE_PATH, GRAFANA_CONFIG_PATH, GRAFANA_STATE_PATH, RECEIVERS_PATH,
    TEST_RECEIVERS_PATH, TEST_TEMPLATES_PATH,
};

// Re-export commonly used types from dependencies
pub use reqwest::{Method, StatusCode};
