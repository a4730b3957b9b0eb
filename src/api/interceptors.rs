//! The two interception points wrapped around every API call. Outbound,
//! [`attach_credentials`] adds the bearer header from the token store. Inbound,
//! [`classify`] strips the transport layer and hands back only the body, or an
//! error; a `401` additionally triggers [`recover_from_auth_failure`] in the
//! client before the error is returned.

use super::ApiError;
use crate::{
    navigation::{Navigator, LOGIN_PATH},
    session::TokenStore,
};
use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    RequestBuilder, StatusCode,
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{error, warn};

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Adds `Authorization: Bearer <token>` when a token is present; otherwise the
/// request goes out unmodified.
#[must_use]
pub fn attach_credentials(builder: RequestBuilder, token: Option<&SecretString>) -> RequestBuilder {
    let Some(token) = token else {
        return builder;
    };

    match bearer_header(token) {
        Some(value) => builder.header(AUTHORIZATION, value),
        None => {
            warn!("stored credential is not a valid header value, sending request without it");
            builder
        }
    }
}

/// Builds the header value, marked sensitive so it never shows up in debug output.
#[must_use]
pub fn bearer_header(token: &SecretString) -> Option<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret())).ok()?;
    value.set_sensitive(true);
    Some(value)
}

/// Turns a received response into the caller's outcome.
///
/// # Errors
/// `Unauthorized` for 401, `Http` for any other non-2xx status and `Parse` for a
/// 2xx body that is not JSON.
pub fn classify(status: StatusCode, body: &[u8]) -> Result<Value, ApiError> {
    if status.is_success() {
        return decode_payload(body);
    }

    let message = error_message(body);
    if status == StatusCode::UNAUTHORIZED {
        Err(ApiError::Unauthorized { message })
    } else {
        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

/// Maps failures where no response arrived. A timeout is never an auth failure.
#[must_use]
pub fn map_transport_error(err: &reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        ApiError::Serialization(format!("Failed to build request: {err}"))
    } else {
        ApiError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Signs the console out after the server rejected the credential: erase the
/// token, go to the login view, then rebuild in-memory state from storage.
pub fn recover_from_auth_failure(tokens: &TokenStore, navigator: &dyn Navigator) {
    warn!("credential rejected by the server, signing out");

    if let Err(err) = tokens.remove() {
        error!("failed to erase rejected credential: {err}");
    }

    navigator.navigate(LOGIN_PATH);
    navigator.reload();
}

fn decode_payload(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(body)
        .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))
}

/// Prefers the API's own `message` field, falling back to the raw body.
fn error_message(body: &[u8]) -> String {
    let from_json = serde_json::from_slice::<Value>(body).ok().and_then(|json| {
        json.get("message")
            .and_then(Value::as_str)
            .map(ToString::to_string)
    });

    sanitize_body(&from_json.unwrap_or_else(|| String::from_utf8_lossy(body).into_owned()))
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
