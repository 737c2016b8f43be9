//! Response failure classification.
//!
//! Turns a failed HTTP response into an [`AppError`], in a fixed
//! precedence: 401, then 422 validation payloads, then generic
//! `{error: {message}}` payloads, then a bare status line. Network
//! failures (no response at all) are mapped by the client before this
//! module is reached.

use reqwest::StatusCode;
use serde::Deserialize;

use timegrid_core::AppError;

/// Fixed message substituted when a request produces no response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Check your internet connection.";

/// Validation payload: `{"detail": [{"msg": …}, …]}`.
#[derive(Debug, Deserialize)]
struct ValidationBody {
    detail: Vec<FieldError>,
}

/// One entry of a validation payload.
#[derive(Debug, Deserialize)]
struct FieldError {
    msg: String,
}

/// Single-message payload: `{"detail": "…"}`.
#[derive(Debug, Deserialize)]
struct DetailBody {
    detail: String,
}

/// Generic error payload: `{"error": {"message": "…"}}`.
#[derive(Debug, Deserialize)]
struct GenericBody {
    error: GenericMessage,
}

/// Message wrapper of a generic error payload.
#[derive(Debug, Deserialize)]
struct GenericMessage {
    message: String,
}

/// Classify a completed non-success response into an [`AppError`].
pub fn classify_failure(status: StatusCode, body: &[u8]) -> AppError {
    if status == StatusCode::UNAUTHORIZED {
        return AppError::authentication(unauthorized_message(body));
    }

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        if let Ok(parsed) = serde_json::from_slice::<ValidationBody>(body) {
            return AppError::validation(flatten_messages(&parsed.detail));
        }
        if let Ok(parsed) = serde_json::from_slice::<DetailBody>(body) {
            return AppError::validation(parsed.detail);
        }
    }

    if let Some(message) = generic_message(body) {
        return AppError::api(message);
    }

    AppError::api(format!("HTTP {status}"))
}

/// Join the field messages of a validation payload into one line.
fn flatten_messages(detail: &[FieldError]) -> String {
    detail
        .iter()
        .map(|e| e.msg.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Best message available for a 401 body.
fn unauthorized_message(body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<DetailBody>(body) {
        return parsed.detail;
    }
    generic_message(body).unwrap_or_else(|| "Unauthorized".to_string())
}

/// Extract the message of a `{"error": {"message": …}}` payload.
fn generic_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<GenericBody>(body)
        .ok()
        .map(|b| b.error.message)
}
