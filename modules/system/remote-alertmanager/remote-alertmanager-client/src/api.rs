use reqwest::StatusCode;

use crate::error::Result;
use crate::models::{
    GrafanaAlertmanagerConfig, Receiver, TestReceiversConfigBodyParams, TestReceiversResult,
    TestTemplatesConfigBodyParams, TestTemplatesResults, UserGrafanaConfig, UserState,
};

/// Operations offered by a remote Alertmanager for a single tenant (Version 1).
///
/// Implemented by [`RemoteAlertmanagerClient`](crate::RemoteAlertmanagerClient); callers
/// that reconcile local and remote state should depend on this trait so they can be
/// tested without a server.
#[async_trait::async_trait]
pub trait AlertmanagerClientV1: Send + Sync {
    // -- State --

    /// Full Alertmanager state (silences and notification log) as one blob.
    async fn get_full_state(&self) -> Result<UserState>;

    async fn get_grafana_alertmanager_state(&self) -> Result<UserState>;

    async fn create_grafana_alertmanager_state(&self, state: &str) -> Result<()>;

    async fn delete_grafana_alertmanager_state(&self) -> Result<()>;

    // -- Configuration --

    async fn get_grafana_alertmanager_config(&self) -> Result<UserGrafanaConfig>;

    /// Upload a configuration. The client's promotion flag, external URL, SMTP
    /// settings and static headers are attached to it.
    async fn create_grafana_alertmanager_config(
        &self,
        config: GrafanaAlertmanagerConfig,
        hash: &str,
        created_at: i64,
        is_default: bool,
    ) -> Result<()>;

    async fn delete_grafana_alertmanager_config(&self) -> Result<()>;

    // -- Receivers --

    async fn get_receivers(&self) -> Result<Vec<Receiver>>;

    /// Send a test notification through the given receivers.
    ///
    /// The returned status code is always `200 OK`: any other response is an error.
    async fn test_receivers(
        &self,
        params: &TestReceiversConfigBodyParams,
    ) -> Result<(TestReceiversResult, StatusCode)>;

    async fn test_template(&self, params: &TestTemplatesConfigBodyParams)
    -> Result<TestTemplatesResults>;
}
