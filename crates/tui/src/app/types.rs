use lebenslauf_licht_backend::ApiError;
use std::path::PathBuf;

/// Text the backend returned, with the name of the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedResult {
    pub text: String,
    pub source_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    FileSelected,
    Analyzing,
    Analyzed,
    CreatingPdf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailedRequest {
    /// Shown to the user.
    pub message: String,
    /// Full error chain for the details popup and the log.
    pub details: String,
}

impl FailedRequest {
    pub fn new(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: details.into(),
        }
    }

    /// Prefers the message from the backend's error body over `fallback`.
    pub fn from_api_error(error: &ApiError, fallback: &str) -> Self {
        Self::new(
            error.server_message().unwrap_or(fallback),
            format!("{} ({})", error_chain(error), error.user_message()),
        )
    }
}

pub(crate) fn error_chain(error: &dyn std::error::Error) -> String {
    let mut out = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        out.push_str(": ");
        out.push_str(&inner.to_string());
        source = inner.source();
    }
    out
}

pub enum AppAsyncEvent {
    AnalysisFinished {
        source_name: String,
        analyzed: Option<String>,
        error: Option<FailedRequest>,
    },
    PdfFinished {
        saved_to: Option<PathBuf>,
        error: Option<FailedRequest>,
    },
}
