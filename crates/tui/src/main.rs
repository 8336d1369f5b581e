use anyhow::{Context, Result};
use directories::ProjectDirs;
use lebenslauf_licht::app::App;
use lebenslauf_licht::Config;
use lebenslauf_licht_backend::BackendApi;
use ratatui::crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "lebenslauf-licht", "lebenslauf-licht")
}

fn get_config_path() -> PathBuf {
    if let Some(proj_dirs) = project_dirs() {
        proj_dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config/default.toml")
    }
}

fn get_log_path() -> PathBuf {
    if let Some(proj_dirs) = project_dirs() {
        proj_dirs.data_dir().join("lebenslauf-licht.log")
    } else {
        PathBuf::from("lebenslauf-licht.log")
    }
}

/// The terminal is owned by the UI, so logs go to a file.
fn init_logging() -> Result<PathBuf> {
    let path = get_log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(path)
}

fn main() -> Result<()> {
    let log_path = init_logging()?;

    let config_path = get_config_path();
    let mut config = Config::load_or_default(&config_path);
    config.apply_env_overrides();
    let settings = config.client_settings()?;
    tracing::info!(
        backend = %settings.base_url,
        config = %config_path.display(),
        log = %log_path.display(),
        "Starting LebenslaufLicht"
    );

    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();
    let mut app = App::new(config, BackendApi::new(&settings));

    terminal::enable_raw_mode()?;
    let mut terminal = ratatui::init();
    ratatui::crossterm::execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)?;

    let result = run(&mut terminal, &mut app);

    rt.block_on(app.shutdown());

    let _ = ratatui::crossterm::execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    ratatui::restore();

    if let Err(ref e) = result {
        tracing::error!("Exited with error: {e:#}");
    }
    result
}

fn run(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<()> {
    app.start_health_monitor();

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            match app.handle_event(event) {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => tracing::warn!("Failed to handle terminal event: {e:#}"),
            }
        }

        app.process_async_events();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
