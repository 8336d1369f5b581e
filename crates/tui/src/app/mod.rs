use crate::config::Config;
use crate::input::InputState;
use crate::keybinds::Keybinds;
use crate::messages;
use crate::ui::layout::LayoutState;
use crate::ui::panel::PanelType;
use anyhow::Result;
use chrono::{DateTime, Utc};
use lebenslauf_licht_backend::{
    BackendApi, ConnectivityStatus, HealthMonitor, HealthReport, SelectedFile,
};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::Frame;
use std::future::Future;
use std::path::PathBuf;
use tokio::sync::mpsc;

mod actions;
mod effects;
mod input;
mod render;
mod state;
mod types;

pub use state::App;
pub use types::{AnalyzedResult, AppAsyncEvent, FailedRequest, WorkflowState};

impl App {
    pub(super) fn report_error(&mut self, message: &str, details: impl std::fmt::Display) {
        let details = details.to_string();
        tracing::warn!("{message}: {details}");
        self.last_error = Some(message.to_string());
        self.error_details = Some(details);
    }

    pub(super) fn clear_error(&mut self) {
        self.last_error = None;
        self.error_details = None;
        self.show_error_details = false;
    }

    /// Runs `future` on the runtime and delivers its event to the UI loop.
    /// If the task panics, `fallback` is delivered instead so the busy flag
    /// it guards is still cleared.
    pub(super) fn spawn_app_task<F>(&self, future: F, fallback: AppAsyncEvent)
    where
        F: Future<Output = AppAsyncEvent> + Send + 'static,
    {
        let tx = self.app_async_tx.clone();
        tokio::spawn(async move {
            let event = match tokio::spawn(future).await {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!("Background request task aborted: {e}");
                    fallback
                }
            };
            let _ = tx.send(event);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    fn connected_app() -> App {
        let mut app = App::default();
        app.connectivity = ConnectivityStatus::Connected;
        app
    }

    fn pdf(name: &str, size: usize) -> SelectedFile {
        SelectedFile::new(name, vec![b'x'; size])
    }

    fn analyzed(text: &str) -> AnalyzedResult {
        AnalyzedResult {
            text: text.to_string(),
            source_name: Some("cv.pdf".to_string()),
        }
    }

    fn app_should_panic() -> bool {
        true
    }

    async fn settle(app: &mut App) {
        let event = timeout(Duration::from_secs(10), app.app_async_rx.recv())
            .await
            .expect("request settles")
            .expect("channel open");
        app.apply_async_event(event);
    }

    #[test]
    fn accepts_pdf_and_reports_name_and_size() {
        let mut app = App::default();
        app.last_error = Some("old".to_string());

        assert!(app.select_file(pdf("cv.pdf", 12_595)));

        assert!(app.status.contains("cv.pdf"));
        assert!(app.status.contains("12.30 KB"));
        assert_eq!(app.last_error, None);
        assert_eq!(app.workflow_state(), WorkflowState::FileSelected);
    }

    #[test]
    fn rejects_non_pdf_and_clears_selection() {
        let mut app = App::default();
        app.select_file(pdf("cv.pdf", 10));

        assert!(!app.select_file(pdf("cv.docx", 10)));

        assert_eq!(app.selected_file, None);
        assert_eq!(app.last_error.as_deref(), Some(messages::INVALID_FILE));
        assert!(app.status.is_empty());
        assert_eq!(app.workflow_state(), WorkflowState::Idle);
    }

    #[test]
    fn new_selection_discards_previous_result() {
        let mut app = App::default();
        app.analyzed = Some(analyzed("REDACTED"));
        app.result_scroll = 12;

        app.select_file(pdf("neu.pdf", 100));

        assert_eq!(app.analyzed, None);
        assert_eq!(app.result_scroll, 0);
    }

    #[test]
    fn selection_is_ignored_while_a_request_is_in_flight() {
        let mut app = App::default();
        app.analyzed = Some(analyzed("REDACTED"));
        app.creating_pdf = true;

        assert!(!app.select_file(pdf("neu.pdf", 100)));

        assert_eq!(app.selected_file, None);
        assert!(app.analyzed.is_some());
    }

    #[test]
    fn unreadable_path_reports_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = App::default();
        app.select_file(pdf("cv.pdf", 10));

        let missing = dir.path().join("fehlt.pdf");
        assert!(!app.select_path(&missing.display().to_string()));

        assert_eq!(app.selected_file, None);
        assert_eq!(app.last_error.as_deref(), Some(messages::FILE_READ_FAILED));
        assert!(app.error_details.is_some());
    }

    #[test]
    fn select_path_strips_quotes_from_dropped_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cv.pdf");
        std::fs::write(&path, b"%PDF-1.4").expect("write");
        let mut app = App::default();

        assert!(app.select_path(&format!("'{}'", path.display())));

        assert_eq!(
            app.selected_file.as_ref().map(|f| f.name.as_str()),
            Some("cv.pdf")
        );
    }

    // Plain #[test]: spawning a request here would panic without a runtime.
    #[test]
    fn submit_without_file_fails_without_request() {
        let mut app = connected_app();

        assert!(!app.submit_analysis());

        assert_eq!(app.last_error.as_deref(), Some(messages::NO_FILE_SELECTED));
        assert!(!app.analyzing);
    }

    #[test]
    fn submit_while_not_connected_fails_without_request() {
        for status in [
            ConnectivityStatus::Checking,
            ConnectivityStatus::Error,
            ConnectivityStatus::Disconnected,
        ] {
            let mut app = App::default();
            app.connectivity = status;
            app.select_file(pdf("cv.pdf", 10));

            assert!(!app.submit_analysis());

            assert_eq!(
                app.last_error.as_deref(),
                Some(messages::BACKEND_NOT_CONNECTED)
            );
            assert!(!app.analyzing);
            assert!(app.selected_file.is_some());
        }
    }

    #[test]
    fn submit_is_rejected_while_analysis_in_flight() {
        let mut app = connected_app();
        app.select_file(pdf("cv.pdf", 10));
        app.analyzing = true;

        assert!(!app.submit_analysis());
        assert_eq!(app.last_error, None);
    }

    #[test]
    fn successful_analysis_stores_result_and_resets_form() {
        let mut app = connected_app();
        app.select_file(pdf("cv.pdf", 10));
        app.analyzing = true;

        app.apply_async_event(AppAsyncEvent::AnalysisFinished {
            source_name: "cv.pdf".to_string(),
            analyzed: Some("REDACTED NAME ...".to_string()),
            error: None,
        });

        assert_eq!(
            app.analyzed.as_ref().map(|r| r.text.as_str()),
            Some("REDACTED NAME ...")
        );
        assert_eq!(app.selected_file, None);
        assert!(!app.analyzing);
        assert_eq!(app.status, messages::ANALYSIS_SUCCEEDED);
        assert_eq!(app.workflow_state(), WorkflowState::Analyzed);
    }

    #[test]
    fn failed_analysis_keeps_previous_result() {
        let mut app = connected_app();
        app.analyzed = Some(analyzed("EARLIER"));
        app.analyzing = true;
        app.status = messages::ANALYZING.to_string();

        app.apply_async_event(AppAsyncEvent::AnalysisFinished {
            source_name: "cv.pdf".to_string(),
            analyzed: None,
            error: Some(FailedRequest::new("parse failed", "status 500")),
        });

        assert_eq!(app.analyzed, Some(analyzed("EARLIER")));
        assert_eq!(app.last_error.as_deref(), Some("parse failed"));
        assert!(app.status.is_empty());
        assert!(!app.analyzing);
    }

    #[test]
    fn request_pdf_without_result_is_a_noop() {
        let mut app = connected_app();

        assert!(!app.request_pdf());

        assert!(!app.creating_pdf);
        assert!(app.status.is_empty());
        assert_eq!(app.last_error, None);
    }

    #[test]
    fn request_pdf_is_rejected_while_pdf_in_flight() {
        let mut app = connected_app();
        app.analyzed = Some(analyzed("REDACTED"));
        app.creating_pdf = true;

        assert!(!app.request_pdf());
    }

    #[test]
    fn failed_pdf_keeps_result_for_retry() {
        let mut app = connected_app();
        app.analyzed = Some(analyzed("REDACTED"));
        app.creating_pdf = true;

        app.apply_async_event(AppAsyncEvent::PdfFinished {
            saved_to: None,
            error: Some(FailedRequest::new(messages::PDF_FAILED, "status 500")),
        });

        assert!(!app.creating_pdf);
        assert_eq!(app.last_error.as_deref(), Some(messages::PDF_FAILED));
        assert_eq!(app.analyzed, Some(analyzed("REDACTED")));
        assert_eq!(app.workflow_state(), WorkflowState::Analyzed);
    }

    #[test]
    fn saved_pdf_sets_status_and_path() {
        let mut app = connected_app();
        app.analyzed = Some(analyzed("REDACTED"));
        app.creating_pdf = true;

        app.apply_async_event(AppAsyncEvent::PdfFinished {
            saved_to: Some(PathBuf::from("/tmp/result.pdf")),
            error: None,
        });

        assert!(!app.creating_pdf);
        assert_eq!(app.status, messages::PDF_SAVED);
        assert_eq!(app.last_download, Some(PathBuf::from("/tmp/result.pdf")));
    }

    #[test]
    fn health_reports_update_connectivity() {
        let mut app = App::default();
        let checked_at = Utc::now();
        app.health_tx
            .send(HealthReport {
                status: ConnectivityStatus::Connected,
                checked_at,
            })
            .expect("send report");

        app.process_async_events();

        assert_eq!(app.connectivity, ConnectivityStatus::Connected);
        assert_eq!(app.last_health_check, Some(checked_at));
        assert_eq!(app.last_error, None);
    }

    #[tokio::test]
    async fn transport_failure_clears_busy_flag_with_generic_message() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        let settings = lebenslauf_licht_backend::ClientSettings::with_base_url(&format!(
            "http://{addr}"
        ))
        .expect("valid url");
        let mut app = App::new(Config::default(), BackendApi::new(&settings));
        app.connectivity = ConnectivityStatus::Connected;
        app.select_file(pdf("cv.pdf", 10));

        assert!(app.submit_analysis());
        assert!(app.analyzing);
        assert_eq!(app.status, messages::ANALYZING);
        assert!(!app.submit_analysis());

        settle(&mut app).await;

        assert!(!app.analyzing);
        assert_eq!(app.last_error.as_deref(), Some(messages::ANALYSIS_FAILED));
        assert!(app.status.is_empty());
        assert_eq!(app.analyzed, None);
        assert!(app.selected_file.is_some());
    }

    #[tokio::test]
    async fn panicking_request_task_still_settles() {
        let mut app = connected_app();
        app.analyzing = true;

        app.spawn_app_task(
            async {
                if app_should_panic() {
                    panic!("request task blew up");
                }
                AppAsyncEvent::PdfFinished {
                    saved_to: None,
                    error: None,
                }
            },
            AppAsyncEvent::AnalysisFinished {
                source_name: "cv.pdf".to_string(),
                analyzed: None,
                error: Some(FailedRequest::new(messages::ANALYSIS_FAILED, "aborted")),
            },
        );
        settle(&mut app).await;

        assert!(!app.analyzing);
        assert_eq!(app.last_error.as_deref(), Some(messages::ANALYSIS_FAILED));
    }

    #[tokio::test]
    async fn shutdown_stops_health_monitor_once() {
        let mut app = App::default();
        app.start_health_monitor();
        assert!(app.health_monitor.is_some());

        app.shutdown().await;
        assert!(app.health_monitor.is_none());

        app.shutdown().await;
    }
}
