use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Timeout: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("Backend returned {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(e)
        } else {
            ApiError::Network(e)
        }
    }
}

impl ApiError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "Netzwerkfehler. Bitte prüfen Sie die Verbindung zum Server.",
            ApiError::Timeout(_) => "Zeitüberschreitung bei der Anfrage. Bitte versuchen Sie es erneut.",
            ApiError::Status { .. } => "Der Server hat die Anfrage abgelehnt.",
            ApiError::InvalidResponse(_) => "Ungültige Antwort vom Server.",
            ApiError::Validation(_) => "Ungültige Eingabe.",
        }
    }

    /// Message the backend put into its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Timeout(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_only_for_status_errors() {
        let err = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: Some("parse failed".to_string()),
        };
        assert_eq!(err.server_message(), Some("parse failed"));
        assert!(!err.is_connectivity());

        let err = ApiError::InvalidResponse("missing analyzed_data".to_string());
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn status_display_includes_code_and_message() {
        let err = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            message: None,
        };
        assert_eq!(err.to_string(), "Backend returned 400 Bad Request: no message");
    }
}
