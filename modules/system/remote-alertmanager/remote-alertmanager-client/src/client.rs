use std::collections::BTreeMap;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::{Method, StatusCode};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, error};
use url::Url;

use crate::config::RemoteAlertmanagerConfig;
use crate::envelope::{ErrorEnvelope, SuccessEnvelope, check_status};
use crate::error::{RemoteAlertmanagerError, Result};
use crate::metrics::RemoteAlertmanagerMetrics;
use crate::models::SmtpConfig;
use crate::transport::{Requester, TenantAuthRequester, TimedRequester, TracedRequester};

const APPLICATION_JSON: &str = "application/json";
const TRACE_OPERATION: &str = "remote.alertmanager.client";

/// Client for a single tenant of a remote Alertmanager-compatible API.
///
/// Immutable after construction and cheap to share; every call performs exactly one
/// HTTP request.
pub struct RemoteAlertmanagerClient {
    requester: Arc<dyn Requester>,
    endpoint: Url,
    metrics: RemoteAlertmanagerMetrics,
    pub(crate) uploads: UploadSettings,
}

/// Settings stamped onto every configuration this client uploads.
#[derive(Debug, Clone, Default)]
pub(crate) struct UploadSettings {
    pub promote_config: bool,
    pub external_url: String,
    pub smtp: SmtpConfig,
    pub static_headers: BTreeMap<String, String>,
}

impl std::fmt::Debug for RemoteAlertmanagerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteAlertmanagerClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("uploads", &self.uploads)
            .finish_non_exhaustive()
    }
}

impl RemoteAlertmanagerClient {
    /// Create a client with the default transport stack and the global meter.
    ///
    /// # Errors
    /// Returns `Config` for an invalid configuration and `Build` if the HTTP client
    /// cannot be created.
    pub fn from_config(config: RemoteAlertmanagerConfig) -> Result<Self> {
        Self::from_config_with_metrics(config, RemoteAlertmanagerMetrics::global())
    }

    /// Same as [`Self::from_config`], recording into the given instruments.
    ///
    /// # Errors
    /// See [`Self::from_config`].
    pub fn from_config_with_metrics(
        config: RemoteAlertmanagerConfig,
        metrics: RemoteAlertmanagerMetrics,
    ) -> Result<Self> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteAlertmanagerError::Build(e.to_string()))?;

        let RemoteAlertmanagerConfig {
            url,
            tenant_id,
            password,
            promote_config,
            external_url,
            smtp,
            static_headers,
            ..
        } = config;

        let requester = TracedRequester::new(
            TRACE_OPERATION,
            TimedRequester::new(
                metrics.clone(),
                TenantAuthRequester::new(&tenant_id, &password, http_client)?,
            ),
        );

        Ok(Self {
            requester: Arc::new(requester),
            endpoint: url,
            metrics,
            uploads: UploadSettings {
                promote_config,
                external_url,
                smtp,
                static_headers,
            },
        })
    }

    /// Create a client on top of a caller-assembled requester.
    ///
    /// The requester is used as-is: tenant credentials, timing and tracing are its
    /// responsibility. `config.password` and `config.timeout` are ignored.
    ///
    /// # Errors
    /// Returns `Config` for an invalid configuration.
    pub fn with_requester(
        config: RemoteAlertmanagerConfig,
        requester: Arc<dyn Requester>,
        metrics: RemoteAlertmanagerMetrics,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            requester,
            endpoint: config.url,
            metrics,
            uploads: UploadSettings {
                promote_config: config.promote_config,
                external_url: config.external_url,
                smtp: config.smtp,
                static_headers: config.static_headers,
            },
        })
    }

    /// The base endpoint every operation path is joined onto.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Join `path` onto the endpoint path segment by segment.
    pub(crate) fn url_for(&self, path: &str) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RemoteAlertmanagerError::Config(format!(
                    "endpoint URL cannot be a base: {}",
                    self.endpoint
                ))
            })?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    fn failed(&self, err: RemoteAlertmanagerError) -> RemoteAlertmanagerError {
        self.metrics.record_failure(err.kind());
        err
    }

    /// Perform one request and return the raw response.
    ///
    /// Fails on transport errors and on any response that does not declare a JSON
    /// body. The caller owns the returned response and must consume or drop it.
    pub(crate) async fn send(
        &self,
        method: &Method,
        path: &str,
        body: Option<Bytes>,
    ) -> Result<reqwest::Response> {
        let url = self.url_for(path)?;

        let mut request = reqwest::Request::new(method.clone(), url.clone());
        let headers = request.headers_mut();
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }

        let resp = match self.requester.execute(request).await {
            Ok(resp) => resp,
            Err(e) => {
                error!(
                    url = %url,
                    method = %method,
                    error = %e,
                    "Unable to fulfill request to the remote Alertmanager API"
                );
                return Err(self.failed(RemoteAlertmanagerError::Request(e)));
            }
        };

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        if !content_type
            .to_ascii_lowercase()
            .starts_with(APPLICATION_JSON)
        {
            let body = match resp.bytes().await {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => format!("<failed to read body: {e}>"),
            };
            error!(
                url = %url,
                method = %method,
                status = status.as_u16(),
                content_type = %content_type,
                body = %body,
                "Response content-type is not application/json"
            );
            return Err(self.failed(RemoteAlertmanagerError::NonJsonResponse {
                status,
                content_type,
            }));
        }

        Ok(resp)
    }

    /// Perform one request and decode a 2xx body into `T`.
    ///
    /// Non-2xx bodies are decoded as an [`ErrorEnvelope`]; its message becomes an
    /// `Api` error. A 2xx body is never decoded as an error envelope.
    pub(crate) async fn do_json<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        body: Option<Bytes>,
    ) -> Result<T> {
        self.fetch_json(method, path, body).await.map(|(out, _, _)| out)
    }

    /// Same as [`Self::do_json`], also returning the resolved URL and response status.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        body: Option<Bytes>,
    ) -> Result<(T, Url, StatusCode)> {
        let resp = self.send(method, path, body).await?;
        let url = resp.url().clone();
        let status = resp.status();

        let body = match resp.bytes().await {
            Ok(body) => body,
            Err(e) => {
                error!(
                    url = %url,
                    method = %method,
                    status = status.as_u16(),
                    error = %e,
                    "Failed to read the response body"
                );
                return Err(self.failed(RemoteAlertmanagerError::ReadBody(e)));
            }
        };

        if !status.is_success() {
            let err = match serde_json::from_slice::<ErrorEnvelope>(&body) {
                Ok(envelope) if !envelope.message().is_empty() => {
                    error!(
                        url = %url,
                        method = %method,
                        status = status.as_u16(),
                        error = envelope.message(),
                        "Error response from the remote Alertmanager API"
                    );
                    RemoteAlertmanagerError::Api {
                        status,
                        message: envelope.message().to_owned(),
                    }
                }
                decoded => {
                    let detail = match decoded {
                        Ok(_) => "error envelope has no message".to_owned(),
                        Err(e) => e.to_string(),
                    };
                    error!(
                        url = %url,
                        method = %method,
                        status = status.as_u16(),
                        error = %detail,
                        "Failed to decode non-2xx JSON response"
                    );
                    RemoteAlertmanagerError::DecodeErrorBody { status, detail }
                }
            };
            return Err(self.failed(err));
        }

        match serde_json::from_slice::<T>(&body) {
            Ok(out) => {
                debug!(
                    url = %url,
                    method = %method,
                    status = status.as_u16(),
                    "remote Alertmanager request succeeded"
                );
                Ok((out, url, status))
            }
            Err(e) => {
                error!(
                    url = %url,
                    method = %method,
                    status = status.as_u16(),
                    error = %e,
                    "Failed to decode 2xx JSON response"
                );
                Err(self.failed(RemoteAlertmanagerError::DecodeSuccessBody(e)))
            }
        }
    }

    /// Decode a `{status, data}` envelope and return `data` if `status == "success"`.
    pub(crate) async fn do_envelope<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        body: Option<Bytes>,
    ) -> Result<T> {
        let (envelope, url, status): (SuccessEnvelope<T>, _, _) =
            self.fetch_json(method, path, body).await?;
        envelope.into_data().map_err(|e| self.unexpected_envelope(method, &url, status, e))
    }

    /// For operations whose outcome is binary: succeed iff the envelope says `success`.
    pub(crate) async fn do_ok(
        &self,
        method: &Method,
        path: &str,
        body: Option<Bytes>,
    ) -> Result<()> {
        let (envelope, url, status): (SuccessEnvelope<IgnoredAny>, _, _) =
            self.fetch_json(method, path, body).await?;
        check_status(&envelope.status)
            .map_err(|e| self.unexpected_envelope(method, &url, status, e))
    }

    fn unexpected_envelope(
        &self,
        method: &Method,
        url: &Url,
        status: StatusCode,
        err: RemoteAlertmanagerError,
    ) -> RemoteAlertmanagerError {
        error!(
            url = %url,
            method = %method,
            status = status.as_u16(),
            error = %err,
            "Unexpected response envelope"
        );
        self.failed(err)
    }
}

/// Serialize a request payload.
pub(crate) fn encode<T: Serialize>(payload: &T) -> Result<Bytes> {
    serde_json::to_vec(payload)
        .map(Bytes::from)
        .map_err(RemoteAlertmanagerError::Encode)
}
