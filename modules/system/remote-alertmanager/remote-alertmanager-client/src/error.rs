use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the remote Alertmanager client.
///
/// Transport failures, protocol violations and application-level errors reported by
/// the remote API are kept apart so callers can react to each differently.
#[derive(Debug, Error)]
pub enum RemoteAlertmanagerError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Client build error: {0}")]
    Build(String),

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The request never produced a response (DNS, connect, timeout, cancellation).
    #[error("Unable to fulfill request to the remote Alertmanager API: {0}")]
    Request(#[source] reqwest::Error),

    /// The response did not declare a JSON body, whatever its status code.
    #[error("Response content-type is not application/json: {content_type:?} (status={status})")]
    NonJsonResponse {
        status: StatusCode,
        content_type: String,
    },

    #[error("Failed to read the response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// A well-formed error envelope with a non-empty message.
    #[error("Error response from the remote Alertmanager API (status={status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("Failed to decode non-2xx JSON response (status={status}): {detail}")]
    DecodeErrorBody { status: StatusCode, detail: String },

    #[error("Failed to decode 2xx JSON response: {0}")]
    DecodeSuccessBody(#[source] serde_json::Error),

    #[error("Response envelope reported success without a `data` field")]
    MissingData,

    #[error("The remote Alertmanager API reported an error despite a 2xx status")]
    ErrorStatus,

    #[error("Unknown status in response envelope: {0:?}")]
    UnknownStatus(String),
}

impl RemoteAlertmanagerError {
    /// Stable label for logs and failure metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::InvalidUrl(_) | Self::Build(_) => "config",
            Self::Encode(_) => "encode",
            Self::Request(_) => "request",
            Self::NonJsonResponse { .. } => "non_json_response",
            Self::ReadBody(_) => "read_body",
            Self::Api { .. } => "api",
            Self::DecodeErrorBody { .. } => "decode_error_body",
            Self::DecodeSuccessBody(_) | Self::MissingData => "decode_success_body",
            Self::ErrorStatus => "error_status",
            Self::UnknownStatus(_) => "unknown_status",
        }
    }

    /// Returns true if the request failed before any response was received.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_))
    }

    /// HTTP status of the response that produced this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::NonJsonResponse { status, .. }
            | Self::Api { status, .. }
            | Self::DecodeErrorBody { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for remote Alertmanager operations.
pub type Result<T> = std::result::Result<T, RemoteAlertmanagerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_contains_message() {
        let err = RemoteAlertmanagerError::Api {
            status: StatusCode::BAD_REQUEST,
            message: "boom".to_owned(),
        };
        assert!(err.to_string().contains("boom"));
        assert_eq!(err.kind(), "api");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn unknown_status_carries_literal_value() {
        let err = RemoteAlertmanagerError::UnknownStatus("pending".to_owned());
        assert!(err.to_string().contains("pending"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn status_kinds_are_distinct() {
        assert_ne!(
            RemoteAlertmanagerError::ErrorStatus.kind(),
            RemoteAlertmanagerError::UnknownStatus("pending".to_owned()).kind()
        );
    }

    #[test]
    fn encode_error_from_serde() {
        let json_err = serde_json::from_str::<String>("invalid json").unwrap_err();
        let err = RemoteAlertmanagerError::Encode(json_err);
        assert_eq!(err.kind(), "encode");
        assert!(!err.is_transport());
    }
}
