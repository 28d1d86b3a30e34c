use reqwest::{Method, StatusCode};

use crate::api::AlertmanagerClientV1;
use crate::client::{RemoteAlertmanagerClient, encode};
use crate::error::Result;
use crate::models::{
    GrafanaAlertmanagerConfig, Receiver, TestReceiversConfigBodyParams, TestReceiversResult,
    TestTemplatesConfigBodyParams, TestTemplatesResults, UserGrafanaConfig, UserState,
};

pub const FULL_STATE_PATH: &str = "api/v1/grafana/full_state";
pub const GRAFANA_STATE_PATH: &str = "api/v1/grafana/state";
pub const GRAFANA_CONFIG_PATH: &str = "api/v1/grafana/config";
pub const RECEIVERS_PATH: &str = "api/v1/grafana/receivers";
pub const TEST_RECEIVERS_PATH: &str = "api/v1/grafana/receivers/test";
pub const TEST_TEMPLATES_PATH: &str = "api/v1/grafana/templates/test";

#[async_trait::async_trait]
impl AlertmanagerClientV1 for RemoteAlertmanagerClient {
    async fn get_full_state(&self) -> Result<UserState> {
        self.do_envelope(&Method::GET, FULL_STATE_PATH, None).await
    }

    async fn get_grafana_alertmanager_state(&self) -> Result<UserState> {
        self.do_envelope(&Method::GET, GRAFANA_STATE_PATH, None).await
    }

    async fn create_grafana_alertmanager_state(&self, state: &str) -> Result<()> {
        let payload = encode(&UserState {
            state: state.to_owned(),
        })?;
        self.do_ok(&Method::POST, GRAFANA_STATE_PATH, Some(payload)).await
    }

    async fn delete_grafana_alertmanager_state(&self) -> Result<()> {
        self.do_ok(&Method::DELETE, GRAFANA_STATE_PATH, None).await
    }

    async fn get_grafana_alertmanager_config(&self) -> Result<UserGrafanaConfig> {
        self.do_envelope(&Method::GET, GRAFANA_CONFIG_PATH, None).await
    }

    async fn create_grafana_alertmanager_config(
        &self,
        config: GrafanaAlertmanagerConfig,
        hash: &str,
        created_at: i64,
        is_default: bool,
    ) -> Result<()> {
        let payload = encode(&UserGrafanaConfig {
            grafana_alertmanager_config: config,
            hash: hash.to_owned(),
            created_at,
            default: is_default,
            promoted: self.uploads.promote_config,
            external_url: self.uploads.external_url.clone(),
            smtp_config: self.uploads.smtp.clone(),
            static_headers: self.uploads.static_headers.clone(),
        })?;
        self.do_ok(&Method::POST, GRAFANA_CONFIG_PATH, Some(payload)).await
    }

    async fn delete_grafana_alertmanager_config(&self) -> Result<()> {
        self.do_ok(&Method::DELETE, GRAFANA_CONFIG_PATH, None).await
    }

    async fn get_receivers(&self) -> Result<Vec<Receiver>> {
        self.do_json(&Method::GET, RECEIVERS_PATH, None).await
    }

    async fn test_receivers(
        &self,
        params: &TestReceiversConfigBodyParams,
    ) -> Result<(TestReceiversResult, StatusCode)> {
        let payload = encode(params)?;
        let result: TestReceiversResult = self
            .do_json(&Method::POST, TEST_RECEIVERS_PATH, Some(payload))
            .await?;
        // `do_json` rejects every non-2xx response.
        Ok((result, StatusCode::OK))
    }

    async fn test_template(
        &self,
        params: &TestTemplatesConfigBodyParams,
    ) -> Result<TestTemplatesResults> {
        let payload = encode(params)?;
        self.do_json(&Method::POST, TEST_TEMPLATES_PATH, Some(payload))
            .await
    }
}
