use super::*;

impl App {
    pub fn start_health_monitor(&mut self) {
        if self.health_monitor.is_some() {
            return;
        }
        self.connectivity = ConnectivityStatus::Checking;
        self.health_monitor = Some(HealthMonitor::spawn(
            self.api.clone(),
            self.config.health_interval(),
            self.health_tx.clone(),
        ));
    }

    /// Cancels the health monitor. Safe to call more than once.
    pub async fn shutdown(&mut self) {
        if let Some(monitor) = self.health_monitor.take() {
            monitor.shutdown().await;
        }
    }

    pub fn process_async_events(&mut self) {
        while let Ok(report) = self.health_rx.try_recv() {
            self.apply_health_report(report);
        }

        let mut async_events = Vec::new();
        while let Ok(event) = self.app_async_rx.try_recv() {
            async_events.push(event);
        }

        for event in async_events {
            self.apply_async_event(event);
        }
    }

    pub fn apply_health_report(&mut self, report: HealthReport) {
        self.connectivity = report.status;
        self.last_health_check = Some(report.checked_at);
    }

    pub fn apply_async_event(&mut self, event: AppAsyncEvent) {
        match event {
            AppAsyncEvent::AnalysisFinished {
                source_name,
                analyzed,
                error,
            } => {
                self.analyzing = false;
                match (analyzed, error) {
                    (Some(text), None) => {
                        tracing::info!(file = %source_name, "CV analysis finished");
                        self.analyzed = Some(AnalyzedResult {
                            text,
                            source_name: Some(source_name),
                        });
                        self.status = messages::ANALYSIS_SUCCEEDED.to_string();
                        self.selected_file = None;
                        self.result_scroll = 0;
                    }
                    (_, error) => {
                        let failure = error.unwrap_or_else(|| {
                            FailedRequest::new(messages::ANALYSIS_FAILED, "no analyzed text")
                        });
                        self.status.clear();
                        self.report_error(&failure.message, failure.details);
                    }
                }
            }
            AppAsyncEvent::PdfFinished { saved_to, error } => {
                self.creating_pdf = false;
                match (saved_to, error) {
                    (Some(path), None) => {
                        self.status = messages::PDF_SAVED.to_string();
                        self.last_download = Some(path);
                    }
                    (_, error) => {
                        let failure = error.unwrap_or_else(|| {
                            FailedRequest::new(messages::PDF_FAILED, "no file saved")
                        });
                        self.status.clear();
                        self.report_error(&failure.message, failure.details);
                    }
                }
            }
        }
    }
}
