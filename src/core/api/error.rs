//! API error taxonomy
//!
//! Every failed call ends up as an [`ApiError`]. Pages turn these into
//! inline messages; authentication failures (401/403) are distinguishable so
//! callers can decide whether to refresh the session.

use serde_json::Value;

use crate::core::session::{HttpResponse, TransportError};

pub const NETWORK_FAILURE: &str = "Network request failed";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// No response at all (offline, DNS, CORS, aborted)
    #[error("{0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// Success response whose body did not match the expected shape
    #[error("Invalid response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status, `0` when no response was received
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Http { status, .. } => *status,
            ApiError::Network(_) | ApiError::Decode(_) => 0,
        }
    }

    /// True for 401 and 403 responses
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), 401 | 403)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == 401
    }

    /// Backend error code, if the error body carried one
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Http { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Build the error for a non-success response.
    ///
    /// JSON bodies contribute their `detail` or `message` field and `code`;
    /// other bodies are surfaced as raw text.
    pub fn from_response(resp: &HttpResponse) -> Self {
        let fallback = || format!("Request failed with status {}", resp.status);

        if resp.is_json()
            && let Ok(body) = serde_json::from_str::<Value>(&resp.body)
        {
            let message = string_field(&body, "detail")
                .or_else(|| string_field(&body, "message"))
                .unwrap_or_else(fallback);
            return ApiError::Http {
                status: resp.status,
                message,
                code: string_field(&body, "code"),
            };
        }

        let text = resp.body.trim();
        ApiError::Http {
            status: resp.status,
            message: if text.is_empty() {
                fallback()
            } else {
                text.to_string()
            },
            code: None,
        }
    }

    /// Message suitable for an inline error banner
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNEXPECTED_ERROR.to_string()
        } else {
            message
        }
    }
}

/// The one error to report out of calls made in parallel.
///
/// An expired session (401) wins, so it is handled once instead of once per
/// failed call. Otherwise the first error in call order is reported.
pub fn primary_error<'a>(
    errors: impl IntoIterator<Item = &'a ApiError>,
) -> Option<&'a ApiError> {
    let mut first = None;
    for err in errors {
        if err.is_unauthorized() {
            return Some(err);
        }
        first = first.or(Some(err));
    }
    first
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(message) if message.trim().is_empty() => {
                ApiError::Network(NETWORK_FAILURE.to_string())
            }
            TransportError::Network(message) => ApiError::Network(message),
            TransportError::Unavailable => ApiError::Network(NETWORK_FAILURE.to_string()),
            TransportError::Encode(message) => ApiError::Network(message),
        }
    }
}

fn string_field(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
