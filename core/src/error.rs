//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` and `Validation` get dedicated variants because callers
//! distinguish "the todo does not exist" and "the server rejected the
//! payload" from other failures. Every other non-2xx response lands in
//! `HttpError` with the raw status and body. Whatever the variant, UI code
//! only ever sees `ApiError::message()`.

use serde_json::Value;
use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and `Transport`s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound { body: String },

    /// The server returned 400 for the submitted payload.
    #[error("validation failed: {body}")]
    Validation { body: String },

    /// The server returned a non-2xx status other than 400 and 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// No response arrived (connection refused, DNS, timeout...).
    #[error("network failure: {0}")]
    Network(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Coarse failure taxonomy used for logging and display decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    NetworkFailure,
    ClientError,
    ServerError,
    Protocol,
}

impl ApiError {
    pub fn network(err: impl ToString) -> Self {
        ApiError::Network(err.to_string())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Validation { .. } => Some(400),
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            ApiError::Network(_) => ErrorClass::NetworkFailure,
            ApiError::NotFound { .. } | ApiError::Validation { .. } => ErrorClass::ClientError,
            ApiError::HttpError { status, .. } if *status >= 500 => ErrorClass::ServerError,
            ApiError::HttpError { .. } => ErrorClass::ClientError,
            ApiError::DeserializationError(_) | ApiError::SerializationError(_) => {
                ErrorClass::Protocol
            }
        }
    }

    /// Human-readable message for UI state.
    ///
    /// Prefers a structured server payload, then the HTTP status
    /// description, then the raw transport message.
    pub fn message(&self) -> String {
        match self {
            ApiError::NotFound { body } | ApiError::Validation { body } => {
                let status = self.status().unwrap_or_default();
                server_message(body).unwrap_or_else(|| status_description(status))
            }
            ApiError::HttpError { status, body } => {
                server_message(body).unwrap_or_else(|| status_description(*status))
            }
            ApiError::Network(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Pull a message out of a DRF-style error body.
///
/// Recognizes `{"detail": ".."}`, `{"message": ".."}`, `{"error": ".."}`,
/// `{"non_field_errors": [..]}`, per-field lists such as
/// `{"title": ["This field may not be blank."]}` and bare JSON strings.
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let msg = match value {
        Value::String(s) => s,
        Value::Object(map) => {
            let direct = ["detail", "message", "error"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_string);
            match direct {
                Some(msg) => msg,
                None => {
                    if let Some(errors) = map.get("non_field_errors").and_then(joined) {
                        errors
                    } else {
                        map.iter()
                            .filter_map(|(field, v)| joined(v).map(|m| format!("{field}: {m}")))
                            .collect::<Vec<_>>()
                            .join("; ")
                    }
                }
            }
        }
        _ => return None,
    };
    let msg = msg.trim().to_string();
    (!msg.is_empty()).then_some(msg)
}

fn joined(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        _ => None,
    }
}

fn status_description(status: u16) -> String {
    let reason = http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason());
    match reason {
        Some(reason) => format!("Request failed with status {status} ({reason})"),
        None => format!("Request failed with status {status}"),
    }
}
