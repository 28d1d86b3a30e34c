//! Response envelopes used by the remote Alertmanager API.
//!
//! Successful responses look like `{"status":"success","data":...}`. Error responses
//! look like `{"status":"error","error":"..."}`, but the remote service is known to
//! also emit the message under a capitalised `Error` key.

use serde::Deserialize;

use crate::error::{RemoteAlertmanagerError, Result};

pub(crate) const STATUS_SUCCESS: &str = "success";
pub(crate) const STATUS_ERROR: &str = "error";

/// `{status, data}` wrapper. `data` is only meaningful when `status == "success"`.
#[derive(Debug, Deserialize)]
pub struct SuccessEnvelope<T> {
    pub status: String,
    pub data: Option<T>,
}

impl<T> SuccessEnvelope<T> {
    /// Classify the envelope status and hand back the payload.
    ///
    /// # Errors
    /// `ErrorStatus` / `UnknownStatus` for a non-success status, `MissingData` when a
    /// successful envelope carries no payload.
    pub fn into_data(self) -> Result<T> {
        check_status(&self.status)?;
        self.data.ok_or(RemoteAlertmanagerError::MissingData)
    }
}

/// `{status, error, Error}` wrapper returned alongside non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "error")]
    error: Option<String>,
    #[serde(default, rename = "Error")]
    error_capitalised: Option<String>,
}

impl ErrorEnvelope {
    /// The effective message: lowercase `error` if non-empty, else `Error`.
    #[must_use]
    pub fn message(&self) -> &str {
        [&self.error, &self.error_capitalised]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|m| !m.is_empty())
            .unwrap_or_default()
    }
}

/// Maps an envelope `status` onto the client's error taxonomy.
pub(crate) fn check_status(status: &str) -> Result<()> {
    match status {
        STATUS_SUCCESS => Ok(()),
        STATUS_ERROR => Err(RemoteAlertmanagerError::ErrorStatus),
        other => Err(RemoteAlertmanagerError::UnknownStatus(other.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error(body: &str) -> ErrorEnvelope {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn lowercase_error_field() {
        let env = decode_error(r#"{"status":"error","error":"boom"}"#);
        assert_eq!(env.status, "error");
        assert_eq!(env.message(), "boom");
    }

    #[test]
    fn capitalised_error_field() {
        let env = decode_error(r#"{"status":"error","Error":"alt-case"}"#);
        assert_eq!(env.message(), "alt-case");
    }

    #[test]
    fn lowercase_wins_when_both_present() {
        let env = decode_error(r#"{"status":"error","error":"lower","Error":"upper"}"#);
        assert_eq!(env.message(), "lower");
    }

    #[test]
    fn empty_lowercase_falls_back() {
        let env = decode_error(r#"{"status":"error","error":"","Error":"upper"}"#);
        assert_eq!(env.message(), "upper");
    }

    #[test]
    fn missing_message_is_empty() {
        let env = decode_error(r#"{"status":"error"}"#);
        assert_eq!(env.message(), "");
    }

    #[test]
    fn success_envelope_yields_data() {
        let env: SuccessEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"status":"success","data":{"state":"abc"}}"#).unwrap();
        assert_eq!(env.into_data().unwrap()["state"], "abc");
    }

    #[test]
    fn success_envelope_without_data() {
        let env: SuccessEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert!(matches!(
            env.into_data(),
            Err(RemoteAlertmanagerError::MissingData)
        ));
    }

    #[test]
    fn check_status_classification() {
        assert!(check_status("success").is_ok());
        assert!(matches!(
            check_status("error"),
            Err(RemoteAlertmanagerError::ErrorStatus)
        ));
        assert!(matches!(
            check_status("pending"),
            Err(RemoteAlertmanagerError::UnknownStatus(s)) if s == "pending"
        ));
        assert!(matches!(
            check_status("Success"),
            Err(RemoteAlertmanagerError::UnknownStatus(_))
        ));
    }
}
