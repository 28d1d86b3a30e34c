//! Typed request and response payloads exchanged with the remote Alertmanager.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type LabelSet = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Opaque, base64-encoded Alertmanager state (silences, notification log).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    pub state: String,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Alertmanager configuration as authored in the alerting subsystem.
///
/// The routing tree and receivers are forwarded verbatim; the remote service owns
/// their validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrafanaAlertmanagerConfig {
    #[serde(default)]
    pub template_files: BTreeMap<String, String>,
    pub alertmanager_config: serde_json::Value,
}

/// SMTP settings the remote Alertmanager uses for email integrations.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub ehlo_identity: String,
    pub from_address: String,
    pub from_name: String,
    pub host: String,
    pub password: String,
    pub skip_verify: bool,
    pub start_tls_policy: String,
    pub static_headers: BTreeMap<String, String>,
    pub user: String,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("ehlo_identity", &self.ehlo_identity)
            .field("from_address", &self.from_address)
            .field("from_name", &self.from_name)
            .field("host", &self.host)
            .field("password", &"[REDACTED]")
            .field("skip_verify", &self.skip_verify)
            .field("start_tls_policy", &self.start_tls_policy)
            .field("static_headers", &self.static_headers)
            .field("user", &self.user)
            .finish()
    }
}

/// Configuration wrapper stored per tenant by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserGrafanaConfig {
    #[serde(rename = "configuration")]
    pub grafana_alertmanager_config: GrafanaAlertmanagerConfig,
    #[serde(rename = "configuration_hash")]
    pub hash: String,
    #[serde(rename = "created")]
    pub created_at: i64,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub promoted: bool,
    #[serde(default)]
    pub external_url: String,
    #[serde(default)]
    pub smtp_config: SmtpConfig,
    #[serde(default)]
    pub static_headers: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Receivers
// ---------------------------------------------------------------------------

/// Receiver status as reported by the remote Alertmanager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    pub active: bool,
    #[serde(default)]
    pub integrations: Vec<Integration>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    #[serde(default)]
    pub last_notify_attempt: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_notify_attempt_duration: Option<String>,
    #[serde(default)]
    pub last_notify_attempt_error: Option<String>,
    pub name: String,
    #[serde(default)]
    pub send_resolved: bool,
}

/// A single integration of a receiver under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaIntegrationConfig {
    #[serde(default)]
    pub uid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub integration_type: String,
    #[serde(default)]
    pub disable_resolve_message: bool,
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub secure_settings: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiReceiver {
    pub name: String,
    #[serde(default)]
    pub grafana_managed_receiver_configs: Vec<GrafanaIntegrationConfig>,
}

// ---------------------------------------------------------------------------
// Receiver testing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReceiversConfigAlertParams {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: LabelSet,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: LabelSet,
}

/// Body of a receiver test request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestReceiversConfigBodyParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<TestReceiversConfigAlertParams>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub receivers: Vec<ApiReceiver>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestIntegrationResult {
    pub name: String,
    #[serde(default)]
    pub uid: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReceiverResult {
    pub name: String,
    #[serde(default, rename = "grafana_managed_receiver_configs")]
    pub configs: Vec<TestIntegrationResult>,
}

/// Outcome of a receiver test, one entry per receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReceiversResult {
    #[serde(default)]
    pub alert: TestReceiversConfigAlertParams,
    #[serde(default)]
    pub receivers: Vec<TestReceiverResult>,
    pub notified_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Template testing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostableAlert {
    #[serde(default)]
    pub labels: LabelSet,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: LabelSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        rename = "generatorURL",
        skip_serializing_if = "String::is_empty"
    )]
    pub generator_url: String,
}

/// Body of a template test request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestTemplatesConfigBodyParams {
    #[serde(default)]
    pub alerts: Vec<PostableAlert>,
    pub template: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestTemplatesResult {
    pub name: String,
    pub text: String,
    #[serde(default)]
    pub scope: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestTemplatesErrorResult {
    #[serde(default)]
    pub name: String,
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestTemplatesResults {
    #[serde(default)]
    pub results: Vec<TestTemplatesResult>,
    #[serde(default)]
    pub errors: Vec<TestTemplatesErrorResult>,
}
