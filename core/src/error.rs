//! Error types for the e-signature API client.
//!
//! # Design
//! Two kinds cover every failure the service can produce: a
//! `ClientValidationError` raised before any I/O when a required parameter is
//! absent, and an `ApiError` for a non-success status or a transport failure.
//! A transport failure carries status `0` so callers can tell "the server said
//! no" apart from "no response was obtained". When the status line arrived but
//! the body could not be read, that status is kept and `body` stays `None`. The crate-level `Error` wraps
//! both together with the local codec and configuration failures.

use thiserror::Error;

use crate::models::ErrorResponse;
use crate::transport::TransportError;

/// A required parameter was absent. Raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required parameter '{parameter}' when calling {operation}")]
pub struct ClientValidationError {
    pub operation: &'static str,
    pub parameter: &'static str,
}

/// The remote call completed with a non-success status, or no complete
/// response could be obtained (`body == None`; `status == 0` when not even a
/// status line arrived).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    /// Raw response body. `None` for transport failures.
    pub body: Option<String>,
}

impl ApiError {
    pub fn from_status(operation: &str, status: u16, body: String) -> Self {
        Self {
            status,
            message: format!("Error calling {operation}: {body}"),
            body: Some(body),
        }
    }

    pub fn transport(operation: &str, error: &TransportError) -> Self {
        Self {
            status: error.status().unwrap_or(0),
            message: format!("Error calling {operation}: {error}"),
            body: None,
        }
    }

    /// True when the exchange itself failed rather than the service
    /// answering with an error status.
    pub fn is_transport_failure(&self) -> bool {
        self.body.is_none()
    }

    /// The service's `{code, message}` error envelope, when the body is one.
    pub fn error_response(&self) -> Option<ErrorResponse> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}

/// Every failure returned by `SignClient` and the resource wrappers.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ClientValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request body could not be encoded as JSON.
    #[error("failed to serialize request body for {operation}: {source}")]
    Serialization {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A success response did not match the declared result type.
    #[error("failed to deserialize response of {operation}: {source}")]
    Deserialization {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status of an `Api` error; `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.status),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_parameter_and_operation() {
        let err = ClientValidationError {
            operation: "create_widget",
            parameter: "widgetInfo",
        };
        assert_eq!(
            err.to_string(),
            "Missing required parameter 'widgetInfo' when calling create_widget"
        );
    }

    #[test]
    fn status_error_message_contains_body() {
        let err = ApiError::from_status("get_widget_info", 404, "no such widget".to_string());
        assert_eq!(err.status, 404);
        assert_eq!(err.message, "Error calling get_widget_info: no such widget");
        assert_eq!(err.body.as_deref(), Some("no such widget"));
        assert!(!err.is_transport_failure());
    }

    #[test]
    fn transport_error_uses_sentinel_status() {
        let err = ApiError::transport("get_widgets", &TransportError::new("connection refused"));
        assert_eq!(err.status, 0);
        assert!(err.is_transport_failure());
        assert!(err.message.contains("connection refused"));
        assert!(err.body.is_none());
    }

    #[test]
    fn unreadable_body_keeps_the_received_status() {
        let err = ApiError::transport(
            "get_widget_document",
            &TransportError::after_status(200, "connection reset"),
        );
        assert_eq!(err.status, 200);
        assert!(err.is_transport_failure());
        assert_eq!(err.message, "Error calling get_widget_document: connection reset");
        assert!(err.error_response().is_none());
    }

    #[test]
    fn error_response_parses_service_envelope() {
        let err = ApiError::from_status(
            "get_widget_info",
            404,
            r#"{"code":"INVALID_WIDGET_ID","message":"The Widget ID specified is invalid."}"#
                .to_string(),
        );
        let envelope = err.error_response().unwrap();
        assert_eq!(envelope.code.as_deref(), Some("INVALID_WIDGET_ID"));
    }

    #[test]
    fn error_response_is_none_for_plain_text() {
        let err = ApiError::from_status("get_widgets", 502, "bad gateway".to_string());
        assert!(err.error_response().is_none());
    }

    #[test]
    fn crate_error_exposes_api_status() {
        let err: Error = ApiError::from_status("x", 409, String::new()).into();
        assert_eq!(err.status(), Some(409));
        let err: Error = ClientValidationError {
            operation: "x",
            parameter: "y",
        }
        .into();
        assert_eq!(err.status(), None);
    }
}
