use crate::error::{ApiError, ApiResult};
use crate::types::{
    AnalyzeResponse, ConnectivityStatus, CreatePdfRequest, ErrorBody, PdfDocument, SelectedFile,
};
use percent_encoding::percent_decode_str;
use regex::Regex;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";
pub const DEFAULT_PDF_FILENAME: &str = "anonymisierter-lebenslauf.pdf";

const HEALTH_PATH: &str = "/api/health";
const ANALYZE_PATH: &str = "/api/analyze-cv";
const CREATE_PDF_PATH: &str = "/api/create-pdf";

static FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|;)\s*filename\s*=\s*(?:"([^"]*)"|([^;]+))"#)
        .expect("filename pattern is valid")
});
static FILENAME_EXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|;)\s*filename\*\s*=\s*([^;]+)"#).expect("filename* pattern is valid")
});

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub health_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            request_timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(5),
            health_timeout: Duration::from_secs(3),
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: &str) -> ApiResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::default()
        })
    }
}

pub fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ApiError::Validation(format!("invalid backend url '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::Validation(format!(
            "unsupported scheme '{other}' in backend url"
        ))),
    }
}

#[derive(Clone)]
pub struct BackendApi {
    client: Client,
    base_url: Url,
    health_timeout: Duration,
}

impl Default for BackendApi {
    fn default() -> Self {
        Self::new(&ClientSettings::default())
    }
}

impl BackendApi {
    pub fn new(settings: &ClientSettings) -> Self {
        let client = Client::builder()
            .user_agent(concat!("lebenslauf-licht/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: settings.base_url.clone(),
            health_timeout: settings.health_timeout,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Never fails: every outcome maps onto a connectivity status.
    pub async fn health(&self) -> ConnectivityStatus {
        let request = self
            .client
            .get(self.endpoint(HEALTH_PATH))
            .timeout(self.health_timeout);

        match request.send().await {
            Ok(response) if response.status().is_success() => ConnectivityStatus::Connected,
            Ok(response) => {
                debug!(status = %response.status(), "Health check returned error status");
                ConnectivityStatus::Error
            }
            Err(e) => {
                debug!("Health check failed: {}", e);
                ConnectivityStatus::Disconnected
            }
        }
    }

    pub async fn analyze_cv(&self, file: &SelectedFile) -> ApiResult<String> {
        let part = Part::bytes(file.content.clone())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)?;
        let form = Form::new().part("file", part);

        debug!(file = %file.name, bytes = file.size(), "Uploading CV for analysis");
        let response = self
            .client
            .post(self.endpoint(ANALYZE_PATH))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let data: AnalyzeResponse = serde_json::from_slice(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("analyze-cv body: {e}")))?;
        info!(chars = data.analyzed_data.len(), "Received analyzed CV data");
        Ok(data.analyzed_data)
    }

    pub async fn create_pdf(&self, text: &str, filename: &str) -> ApiResult<PdfDocument> {
        let payload = CreatePdfRequest {
            text: text.to_string(),
            filename: filename.to_string(),
        };

        let response = self
            .client
            .post(self.endpoint(CREATE_PDF_PATH))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let filename = download_filename(response.headers())
            .unwrap_or_else(|| DEFAULT_PDF_FILENAME.to_string());
        let content = response.bytes().await?.to_vec();
        info!(%filename, bytes = content.len(), "Received generated PDF");

        Ok(PdfDocument { filename, content })
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = ErrorBody::parse(body).and_then(|b| b.message());
    if message.is_none() {
        debug!(%status, "Error response without a usable message");
    }
    ApiError::Status { status, message }
}

fn download_filename(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    filename_from_content_disposition(value)
}

/// Extracts the file name from a `content-disposition` value. The RFC 5987
/// `filename*` form wins over plain `filename`. Path components are dropped.
pub fn filename_from_content_disposition(value: &str) -> Option<String> {
    let extended = FILENAME_EXT_RE.captures(value).and_then(|caps| {
        let raw = caps.get(1)?.as_str().trim();
        let encoded = raw.split_once("''").map(|(_, v)| v).unwrap_or(raw);
        let decoded = percent_decode_str(encoded.trim_matches('"')).decode_utf8_lossy();
        sanitize_filename(&decoded)
    });
    if extended.is_some() {
        return extended;
    }

    let caps = FILENAME_RE.captures(value)?;
    let raw = caps.get(1).or_else(|| caps.get(2))?.as_str();
    sanitize_filename(raw)
}

fn sanitize_filename(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next()?.trim();
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name.to_string())
}
