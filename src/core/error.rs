use serde_json::Value;
use thiserror::Error;

/// Generic message shown when the server did not supply one.
pub const GENERIC_ERROR_MESSAGE: &str = "Terjadi kesalahan. Silakan coba lagi.";

/// Generic message for network-level failures.
pub const NETWORK_ERROR_MESSAGE: &str = "Tidak dapat terhubung ke server";

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
        payload: Option<Value>,
    },

    #[error("Forbidden: {message}")]
    Forbidden {
        message: String,
        payload: Option<Value>,
    },

    #[error("Not found: {message}")]
    NotFound {
        message: String,
        payload: Option<Value>,
    },

    #[error("{message}")]
    Client {
        status: u16,
        message: String,
        payload: Option<Value>,
    },

    #[error("Server error: {message}")]
    Server {
        status: u16,
        message: String,
        payload: Option<Value>,
    },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Build the uniform error for a non-2xx response.
    ///
    /// The server-supplied message wins over the generic transport text.
    pub fn from_status(status: u16, payload: Option<Value>) -> Self {
        let message = payload
            .as_ref()
            .and_then(server_message)
            .unwrap_or_else(|| default_status_message(status).to_string());

        match status {
            401 => AppError::Unauthorized { message, payload },
            403 => AppError::Forbidden { message, payload },
            404 => AppError::NotFound { message, payload },
            500..=599 => AppError::Server {
                status,
                message,
                payload,
            },
            _ => AppError::Client {
                status,
                message,
                payload,
            },
        }
    }

    /// Human readable message, suitable for showing to the user verbatim.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized { message, .. }
            | AppError::Forbidden { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Client { message, .. }
            | AppError::Server { message, .. } => message.clone(),
            AppError::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
            AppError::Timeout(_) => "Permintaan melebihi batas waktu".to_string(),
            AppError::Decode(_) => GENERIC_ERROR_MESSAGE.to_string(),
            AppError::Validation(msg) | AppError::Storage(msg) | AppError::Config(msg) => {
                msg.clone()
            }
        }
    }

    /// HTTP status, absent for transport and local failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Unauthorized { .. } => Some(401),
            AppError::Forbidden { .. } => Some(403),
            AppError::NotFound { .. } => Some(404),
            AppError::Client { status, .. } | AppError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw server payload, if the failure came with a body.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            AppError::Unauthorized { payload, .. }
            | AppError::Forbidden { payload, .. }
            | AppError::NotFound { payload, .. }
            | AppError::Client { payload, .. }
            | AppError::Server { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// Transport failures, timeouts and 5xx may be retried on reads.
    /// Everything else, 401 in particular, is final.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Transport(_) | AppError::Timeout(_) | AppError::Server { .. }
        )
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::Timeout(e.to_string())
        } else if e.is_decode() {
            AppError::Decode(e.to_string())
        } else {
            AppError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Decode(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Pull a display message out of an error body.
///
/// Backends answer with `message`, `error`, or a list under `errors`.
fn server_message(payload: &Value) -> Option<String> {
    let obj = payload.as_object()?;

    if let Some(msg) = obj.get("message") {
        match msg {
            Value::String(s) if !s.trim().is_empty() => return Some(s.clone()),
            // class-validator style: message is an array of strings
            Value::Array(items) => {
                let joined = items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                if !joined.is_empty() {
                    return Some(joined);
                }
            }
            _ => {}
        }
    }

    if let Some(Value::String(s)) = obj.get("error") {
        if !s.trim().is_empty() {
            return Some(s.clone());
        }
    }

    match obj.get("errors") {
        Some(Value::Array(items)) => items.iter().find_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Object(o) => o.get("message").and_then(Value::as_str).map(String::from),
            _ => None,
        }),
        _ => None,
    }
}

fn default_status_message(status: u16) -> &'static str {
    match status {
        400 => "Permintaan tidak valid",
        401 => "Sesi Anda telah berakhir. Silakan login kembali.",
        403 => "Anda tidak memiliki akses",
        404 => "Data tidak ditemukan",
        409 => "Data sudah ada",
        422 => "Data tidak valid",
        429 => "Terlalu banyak permintaan",
        500..=599 => "Terjadi kesalahan pada server",
        _ => GENERIC_ERROR_MESSAGE,
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_message_preferred_over_generic() {
        let err = AppError::from_status(400, Some(json!({"message": "Judul wajib diisi"})));
        assert_eq!(err.message(), "Judul wajib diisi");
        assert_eq!(err.status(), Some(400));
        assert!(err.payload().is_some());
    }

    #[test]
    fn test_message_array_is_joined() {
        let err = AppError::from_status(
            422,
            Some(json!({"message": ["title must not be empty", "slug is invalid"]})),
        );
        assert_eq!(err.message(), "title must not be empty, slug is invalid");
    }

    #[test]
    fn test_errors_list_fallback() {
        let err = AppError::from_status(409, Some(json!({"errors": [{"message": "Slug sudah dipakai"}]})));
        assert_eq!(err.message(), "Slug sudah dipakai");
    }

    #[test]
    fn test_generic_message_without_payload() {
        let err = AppError::from_status(503, None);
        assert!(matches!(err, AppError::Server { status: 503, .. }));
        assert_eq!(err.message(), "Terjadi kesalahan pada server");
    }

    #[test]
    fn test_status_classification() {
        assert!(AppError::from_status(401, None).is_unauthorized());
        assert!(matches!(AppError::from_status(403, None), AppError::Forbidden { .. }));
        assert!(matches!(AppError::from_status(404, None), AppError::NotFound { .. }));
        assert!(matches!(
            AppError::from_status(422, None),
            AppError::Client { status: 422, .. }
        ));
    }

    #[test]
    fn test_retry_eligibility() {
        assert!(AppError::Transport("refused".into()).is_retryable());
        assert!(AppError::Timeout("30s".into()).is_retryable());
        assert!(AppError::from_status(502, None).is_retryable());
        assert!(!AppError::from_status(401, None).is_retryable());
        assert!(!AppError::from_status(400, None).is_retryable());
        assert!(!AppError::Validation("x".into()).is_retryable());
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err = AppError::Transport("connection refused".into());
        assert_eq!(err.status(), None);
        assert_eq!(err.message(), NETWORK_ERROR_MESSAGE);
    }
}
