use super::*;

/// All state of the upload/analysis workflow. Owned by the UI loop; request
/// tasks report back through `app_async_tx`.
pub struct App {
    pub should_quit: bool,
    pub config: Config,
    pub api: BackendApi,
    pub layout: LayoutState,
    pub input: InputState,
    pub keybinds: Keybinds,
    pub connectivity: ConnectivityStatus,
    pub last_health_check: Option<DateTime<Utc>>,
    pub selected_file: Option<SelectedFile>,
    pub status: String,
    pub last_error: Option<String>,
    pub error_details: Option<String>,
    pub analyzed: Option<AnalyzedResult>,
    pub analyzing: bool,
    pub creating_pdf: bool,
    pub last_download: Option<PathBuf>,
    pub result_scroll: u16,
    pub show_help: bool,
    pub show_error_details: bool,
    pub health_monitor: Option<HealthMonitor>,
    pub health_tx: mpsc::UnboundedSender<HealthReport>,
    pub health_rx: mpsc::UnboundedReceiver<HealthReport>,
    pub app_async_tx: mpsc::UnboundedSender<AppAsyncEvent>,
    pub app_async_rx: mpsc::UnboundedReceiver<AppAsyncEvent>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default(), BackendApi::default())
    }
}

impl App {
    pub fn new(config: Config, api: BackendApi) -> Self {
        let (health_tx, health_rx) = mpsc::unbounded_channel();
        let (app_async_tx, app_async_rx) = mpsc::unbounded_channel();

        Self {
            should_quit: false,
            config,
            api,
            layout: LayoutState::default(),
            input: InputState::new(),
            keybinds: Keybinds,
            connectivity: ConnectivityStatus::Checking,
            last_health_check: None,
            selected_file: None,
            status: String::new(),
            last_error: None,
            error_details: None,
            analyzed: None,
            analyzing: false,
            creating_pdf: false,
            last_download: None,
            result_scroll: 0,
            show_help: false,
            show_error_details: false,
            health_monitor: None,
            health_tx,
            health_rx,
            app_async_tx,
            app_async_rx,
        }
    }

    pub fn workflow_state(&self) -> WorkflowState {
        if self.creating_pdf {
            WorkflowState::CreatingPdf
        } else if self.analyzing {
            WorkflowState::Analyzing
        } else if self.analyzed.is_some() {
            WorkflowState::Analyzed
        } else if self.selected_file.is_some() {
            WorkflowState::FileSelected
        } else {
            WorkflowState::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.analyzing || self.creating_pdf
    }
}
