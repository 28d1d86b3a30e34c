use std::collections::BTreeMap;
use std::time::Duration;

use figment::Figment;
use figment::providers::Env;
use reqwest::header::HeaderValue;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::error::{RemoteAlertmanagerError, Result};
use crate::models::SmtpConfig;

const ENV_PREFIX: &str = "REMOTE_ALERTMANAGER_";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a remote Alertmanager tenant.
///
/// Loaded once and consumed by
/// [`RemoteAlertmanagerClient::from_config`](crate::RemoteAlertmanagerClient::from_config).
#[derive(Debug, Deserialize)]
pub struct RemoteAlertmanagerConfig {
    /// Base endpoint; operation paths are joined onto its path.
    pub url: Url,
    pub tenant_id: String,
    /// Basic-auth password for the tenant. Empty means no basic auth.
    #[serde(default = "empty_secret", deserialize_with = "deserialize_secret")]
    pub password: SecretString,
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    /// Mark uploaded configurations as promoted (used by the remote side).
    #[serde(default)]
    pub promote_config: bool,
    #[serde(default)]
    pub external_url: String,
    #[serde(default)]
    pub smtp: SmtpConfig,
    /// Headers the remote Alertmanager adds to outgoing notifications.
    #[serde(default)]
    pub static_headers: BTreeMap<String, String>,
}

impl RemoteAlertmanagerConfig {
    /// Create a configuration for the given endpoint and tenant.
    ///
    /// # Errors
    /// Returns `InvalidUrl` if `url` does not parse.
    pub fn new(url: &str, tenant_id: impl Into<String>) -> Result<Self> {
        Ok(Self {
            url: Url::parse(url)?,
            tenant_id: tenant_id.into(),
            password: empty_secret(),
            timeout: DEFAULT_TIMEOUT,
            promote_config: false,
            external_url: String::new(),
            smtp: SmtpConfig::default(),
            static_headers: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = SecretString::from(password.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_promote_config(mut self, promote: bool) -> Self {
        self.promote_config = promote;
        self
    }

    #[must_use]
    pub fn with_external_url(mut self, external_url: impl Into<String>) -> Self {
        self.external_url = external_url.into();
        self
    }

    #[must_use]
    pub fn with_smtp(mut self, smtp: SmtpConfig) -> Self {
        self.smtp = smtp;
        self
    }

    #[must_use]
    pub fn with_static_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.static_headers.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn should_promote_config(&self) -> bool {
        self.promote_config
    }

    /// Create configuration from environment variables
    ///
    /// Reads `REMOTE_ALERTMANAGER_*`; nested keys use `__`, e.g.
    /// `REMOTE_ALERTMANAGER_SMTP__HOST`. `URL` and `TENANT_ID` are required.
    ///
    /// # Errors
    /// Returns `Config` if a required variable is missing or a value is invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_figment(&Figment::new().merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extract configuration from an already-layered figment (YAML file, env, ...).
    ///
    /// # Errors
    /// Returns `Config` if extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| RemoteAlertmanagerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !matches!(self.url.scheme(), "http" | "https") {
            return Err(RemoteAlertmanagerError::Config(format!(
                "unsupported URL scheme: {}",
                self.url.scheme()
            )));
        }
        if self.tenant_id.trim().is_empty() {
            return Err(RemoteAlertmanagerError::Config(
                "tenant_id must not be empty".into(),
            ));
        }
        if HeaderValue::from_str(&self.tenant_id).is_err() {
            return Err(RemoteAlertmanagerError::Config(
                "tenant_id is not a valid header value".into(),
            ));
        }
        Ok(())
    }
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn deserialize_secret<'de, D>(deserializer: D) -> std::result::Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

/// Accepts humantime strings (`"30s"`, `"1m 30s"`) or a bare number of seconds.
fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Seconds(secs) => Ok(Duration::from_secs(secs)),
        Raw::Text(text) => humantime::parse_duration(&text).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_config_defaults() {
        let config = RemoteAlertmanagerConfig::new("http://localhost:9009", "tenant-1").unwrap();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.password.expose_secret().is_empty());
        assert!(!config.should_promote_config());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builders() {
        let config = RemoteAlertmanagerConfig::new("http://localhost:9009", "tenant-1")
            .unwrap()
            .with_password("s3cret")
            .with_timeout(Duration::from_secs(5))
            .with_promote_config(true)
            .with_external_url("https://grafana.example")
            .with_static_header("X-Team", "alerting");

        assert_eq!(config.password.expose_secret(), "s3cret");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.should_promote_config());
        assert_eq!(config.static_headers["X-Team"], "alerting");
    }

    #[test]
    fn test_debug_hides_password() {
        let config = RemoteAlertmanagerConfig::new("http://localhost:9009", "tenant-1")
            .unwrap()
            .with_password("s3cret");
        assert!(!format!("{config:?}").contains("s3cret"));
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            RemoteAlertmanagerConfig::new("not a url", "tenant-1"),
            Err(RemoteAlertmanagerError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = RemoteAlertmanagerConfig::new("ftp://localhost", "tenant-1").unwrap();
        assert!(matches!(
            config.validate(),
            Err(RemoteAlertmanagerError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_empty_tenant() {
        let config = RemoteAlertmanagerConfig::new("http://localhost", " ").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_tenant_with_newline() {
        let config = RemoteAlertmanagerConfig::new("http://localhost", "tenant\n1").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                ("REMOTE_ALERTMANAGER_URL", Some("http://mimir:8080/alertmanager")),
                ("REMOTE_ALERTMANAGER_TENANT_ID", Some("tenant-1")),
                ("REMOTE_ALERTMANAGER_PASSWORD", Some("s3cret")),
                ("REMOTE_ALERTMANAGER_TIMEOUT", Some("1m 30s")),
                ("REMOTE_ALERTMANAGER_PROMOTE_CONFIG", Some("true")),
                ("REMOTE_ALERTMANAGER_SMTP__HOST", Some("smtp.example:25")),
            ],
            || {
                let config = RemoteAlertmanagerConfig::from_env().unwrap();
                assert_eq!(config.url.path(), "/alertmanager");
                assert_eq!(config.tenant_id, "tenant-1");
                assert_eq!(config.password.expose_secret(), "s3cret");
                assert_eq!(config.timeout, Duration::from_secs(90));
                assert!(config.promote_config);
                assert_eq!(config.smtp.host, "smtp.example:25");
            },
        );
    }

    #[test]
    fn test_from_env_missing_url() {
        temp_env::with_vars(
            [
                ("REMOTE_ALERTMANAGER_URL", None::<&str>),
                ("REMOTE_ALERTMANAGER_TENANT_ID", Some("tenant-1")),
            ],
            || {
                assert!(matches!(
                    RemoteAlertmanagerConfig::from_env(),
                    Err(RemoteAlertmanagerError::Config(_))
                ));
            },
        );
    }
}
