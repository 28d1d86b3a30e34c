use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use super::Requester;
use crate::error::{RemoteAlertmanagerError, Result};

/// Header carrying the tenant identity on every request.
pub const SCOPE_ORG_ID_HEADER: HeaderName = HeaderName::from_static("x-scope-orgid");

/// Injects the tenant id and, when a password is set, basic-auth credentials.
pub struct TenantAuthRequester<R> {
    tenant: HeaderValue,
    authorization: Option<HeaderValue>,
    inner: R,
}

impl<R> TenantAuthRequester<R> {
    /// Both header values are built up front.
    ///
    /// # Errors
    /// Returns `Config` if the tenant id is empty or not a valid header value.
    pub fn new(tenant_id: &str, password: &SecretString, inner: R) -> Result<Self> {
        if tenant_id.trim().is_empty() {
            return Err(RemoteAlertmanagerError::Config(
                "tenant_id must not be empty".into(),
            ));
        }
        let tenant = HeaderValue::from_str(tenant_id).map_err(|_| {
            RemoteAlertmanagerError::Config("tenant_id is not a valid header value".into())
        })?;
        Ok(Self {
            tenant,
            authorization: basic_auth(tenant_id, password.expose_secret()),
            inner,
        })
    }
}

fn basic_auth(user: &str, password: &str) -> Option<HeaderValue> {
    if password.is_empty() {
        return None;
    }
    let encoded = STANDARD.encode(format!("{user}:{password}"));
    // Base64 output is always a valid header value.
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}")).ok()?;
    value.set_sensitive(true);
    Some(value)
}

#[async_trait::async_trait]
impl<R: Requester> Requester for TenantAuthRequester<R> {
    async fn execute(
        &self,
        mut request: reqwest::Request,
    ) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let headers = request.headers_mut();
        headers.insert(SCOPE_ORG_ID_HEADER, self.tenant.clone());
        if let Some(auth) = &self.authorization {
            headers.insert(AUTHORIZATION, auth.clone());
        }
        self.inner.execute(request).await
    }
}
