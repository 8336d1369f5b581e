use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const OCTET_STREAM_MEDIA_TYPE: &str = "application/octet-stream";

/// A file picked by the user, held in memory until it is uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub content: Vec<u8>,
}

impl SelectedFile {
    /// Declares the media type from the file extension, the way a browser
    /// fills in `File.type`.
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = media_type_for(&name).to_string();
        Self {
            name,
            media_type,
            content,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, content))
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn size_kb(&self) -> String {
        format!("{:.2} KB", self.size() as f64 / 1024.0)
    }
}

fn media_type_for(name: &str) -> &'static str {
    match Path::new(name).extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MEDIA_TYPE,
        _ => OCTET_STREAM_MEDIA_TYPE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityStatus {
    Checking,
    Connected,
    Error,
    Disconnected,
}

impl ConnectivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectivityStatus::Checking => "checking",
            ConnectivityStatus::Connected => "connected",
            ConnectivityStatus::Error => "error",
            ConnectivityStatus::Disconnected => "disconnected",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectivityStatus::Connected)
    }
}

impl std::fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthReport {
    pub status: ConnectivityStatus,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    pub analyzed_data: String,
}

/// Error body shared with the backend. Each field is read on its own, so a
/// wrongly typed or missing field never hides the others. Covers plain
/// `{"error": ...}` bodies as well as FastAPI's `{"detail": ...}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBody {
    pub version: Option<Value>,
    pub error: Option<String>,
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// `None` unless the body is a JSON object.
    pub fn parse(body: &[u8]) -> Option<Self> {
        let value: Value = serde_json::from_slice(body).ok()?;
        let fields = value.as_object()?;
        Some(Self {
            version: fields.get("version").cloned(),
            error: fields
                .get("error")
                .and_then(Value::as_str)
                .map(String::from),
            detail: fields.get("detail").cloned(),
        })
    }

    pub fn message(&self) -> Option<String> {
        self.error
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(String::from)
            .or_else(|| {
                self.detail
                    .as_ref()
                    .and_then(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
                    .map(String::from)
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatePdfRequest {
    pub text: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfDocument {
    pub filename: String,
    pub content: Vec<u8>,
}
