use super::types::error_chain;
use super::*;
use crate::download;
use directories::UserDirs;
use lebenslauf_licht_backend::ApiError;
use tracing::{debug, info};

impl App {
    /// Reads the file behind a typed or pasted path and selects it.
    pub fn select_path(&mut self, raw: &str) -> bool {
        if self.is_busy() {
            debug!("Ignoring file selection while a request is in flight");
            return false;
        }

        let path = normalize_path(raw);
        match SelectedFile::from_path(&path) {
            Ok(candidate) => self.select_file(candidate),
            Err(e) => {
                self.selected_file = None;
                self.status.clear();
                self.report_error(messages::FILE_READ_FAILED, format!("{e:#}"));
                false
            }
        }
    }

    pub fn select_file(&mut self, candidate: SelectedFile) -> bool {
        if self.is_busy() {
            debug!("Ignoring file selection while a request is in flight");
            return false;
        }

        if !candidate.is_pdf() {
            self.selected_file = None;
            self.status.clear();
            self.report_error(
                messages::INVALID_FILE,
                format!("{} is declared as {}", candidate.name, candidate.media_type),
            );
            return false;
        }

        info!(file = %candidate.name, bytes = candidate.size(), "File selected");
        self.status = messages::file_selected(&candidate.name, &candidate.size_kb());
        self.clear_error();
        self.analyzed = None;
        self.result_scroll = 0;
        self.last_download = None;
        self.selected_file = Some(candidate);
        true
    }

    /// Returns whether a request was started.
    pub fn submit_analysis(&mut self) -> bool {
        if self.analyzing {
            debug!("Analysis already in flight, ignoring submit");
            return false;
        }

        let Some(file) = self.selected_file.clone() else {
            self.report_error(messages::NO_FILE_SELECTED, "no file selected");
            return false;
        };

        if !self.connectivity.is_connected() {
            self.report_error(
                messages::BACKEND_NOT_CONNECTED,
                format!("backend status is {}", self.connectivity),
            );
            return false;
        }

        self.analyzing = true;
        self.clear_error();
        self.status = messages::ANALYZING.to_string();

        let api = self.api.clone();
        let source_name = file.name.clone();
        let fallback = AppAsyncEvent::AnalysisFinished {
            source_name: source_name.clone(),
            analyzed: None,
            error: Some(FailedRequest::new(
                messages::ANALYSIS_FAILED,
                "analysis task aborted",
            )),
        };

        info!(file = %source_name, "Starting CV analysis");
        self.spawn_app_task(
            async move {
                match api.analyze_cv(&file).await {
                    Ok(text) => AppAsyncEvent::AnalysisFinished {
                        source_name,
                        analyzed: Some(text),
                        error: None,
                    },
                    Err(e) => AppAsyncEvent::AnalysisFinished {
                        source_name,
                        analyzed: None,
                        error: Some(FailedRequest::from_api_error(&e, messages::ANALYSIS_FAILED)),
                    },
                }
            },
            fallback,
        );
        true
    }

    /// Returns whether a request was started.
    pub fn request_pdf(&mut self) -> bool {
        let Some(result) = self.analyzed.clone() else {
            debug!("No analyzed text, nothing to convert");
            return false;
        };
        if self.creating_pdf {
            debug!("PDF creation already in flight, ignoring");
            return false;
        }

        self.creating_pdf = true;
        self.clear_error();
        self.status = messages::CREATING_PDF.to_string();

        let api = self.api.clone();
        let download_dir = self.config.download_dir();
        let filename = result
            .source_name
            .unwrap_or_else(|| messages::DEFAULT_REQUEST_FILENAME.to_string());
        let text = result.text;
        let fallback = AppAsyncEvent::PdfFinished {
            saved_to: None,
            error: Some(FailedRequest::new(messages::PDF_FAILED, "pdf task aborted")),
        };

        info!(%filename, "Requesting PDF");
        self.spawn_app_task(
            async move {
                let pdf = match api.create_pdf(&text, &filename).await {
                    Ok(pdf) => pdf,
                    Err(e) => {
                        return AppAsyncEvent::PdfFinished {
                            saved_to: None,
                            error: Some(pdf_failure(&e)),
                        }
                    }
                };

                match download::save_pdf(&download_dir, &pdf.filename, &pdf.content).await {
                    Ok(path) => AppAsyncEvent::PdfFinished {
                        saved_to: Some(path),
                        error: None,
                    },
                    Err(e) => AppAsyncEvent::PdfFinished {
                        saved_to: None,
                        error: Some(FailedRequest::new(messages::PDF_FAILED, format!("{e:#}"))),
                    },
                }
            },
            fallback,
        );
        true
    }

    pub(super) fn scroll_result(&mut self, delta: i32) {
        let next = (self.result_scroll as i32 + delta).clamp(0, self.max_result_scroll() as i32);
        self.result_scroll = next as u16;
    }

    fn max_result_scroll(&self) -> u16 {
        let lines = self
            .analyzed
            .as_ref()
            .map(|r| r.text.lines().count())
            .unwrap_or(0);
        lines.min(u16::MAX as usize) as u16
    }
}

/// The backend's error body is not shown for PDF failures; the message is fixed.
fn pdf_failure(error: &ApiError) -> FailedRequest {
    FailedRequest::new(messages::PDF_FAILED, error_chain(error))
}

fn normalize_path(raw: &str) -> PathBuf {
    let mut trimmed = raw.trim();
    for quote in ['\'', '"'] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            trimmed = &trimmed[1..trimmed.len() - 1];
        }
    }
    let trimmed = trimmed.strip_prefix("file://").unwrap_or(trimmed);

    if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(home) = UserDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(rest);
        }
    }
    PathBuf::from(trimmed)
}
