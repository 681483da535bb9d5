use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use tfscope_client::{ClientConfig, HttpBackend, LocalBackend, LogBackend};
use tfscope_logs::TimeZoneMode;
use tfscope_types::{LogDetails, UploadResponse};
use tfscope_tui::{
    Action, AppState, Event, EventHandler, InputMode, KeyBindings, KeyContext, LogViewerScreen,
    Osc52Clipboard, Settings, SystemClipboard, Tui,
};

/// tfscope - A terminal UI for browsing parsed Terraform logs
#[derive(Parser, Debug)]
#[command(name = "tfscope")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Terraform log file to upload on start
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Base URL of the log-parsing service
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Parse files in-process instead of uploading them
    #[arg(long, conflicts_with = "api_url")]
    local: bool,

    /// Config file (defaults to <config dir>/tfscope/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show timestamps in local time
    #[arg(long)]
    local_time: bool,

    /// Display budget for the message column
    #[arg(long, value_name = "N")]
    truncate: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let result = async {
        let settings = load_settings(&args)?;
        init_tracing(&settings)?;
        run_app(args, settings).await
    }
    .await;

    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = Settings::load(args.config.as_deref())?;

    if let Some(url) = &args.api_url {
        settings.api_base_url = url.clone();
    }
    if args.local_time {
        settings.local_time = true;
    }
    if let Some(n) = args.truncate {
        settings.message_max_len = n;
    }

    Ok(settings)
}

fn init_tracing(settings: &Settings) -> Result<()> {
    let writer = match &settings.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(writer)
        .with_ansi(settings.log_file.is_none())
        .init();

    Ok(())
}

fn build_backend(args: &Args, settings: &Settings) -> Result<Arc<dyn LogBackend>> {
    if args.local {
        return Ok(Arc::new(LocalBackend::new()));
    }

    let backend = HttpBackend::with_config(ClientConfig {
        base_url: settings.api_base_url.clone(),
        timeout: settings.request_timeout(),
        ..ClientConfig::default()
    })
    .context("failed to build HTTP client")?;

    Ok(Arc::new(backend))
}

/// Results of background requests
enum InternalAction {
    UploadFinished(Result<UploadResponse, String>),
    DetailsFetched(Result<LogDetails, String>),
    HealthChecked(Result<String, String>),
}

/// Clipboard sinks tried in order by the copy action
struct Clipboards {
    system: SystemClipboard,
    terminal: Osc52Clipboard,
}

async fn run_app(args: Args, settings: Settings) -> Result<()> {
    let backend = build_backend(&args, &settings)?;
    tracing::info!(backend = backend.name(), "starting tfscope");

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (internal_tx, mut internal_rx) = mpsc::unbounded_channel::<InternalAction>();

    let mut state = AppState::new(backend.name());
    state.ui_state.message_max_len = settings.message_max_len;
    if settings.local_time {
        state.ui_state.zone = TimeZoneMode::Local;
    }

    let mut clipboards = Clipboards {
        system: SystemClipboard::new(),
        terminal: Osc52Clipboard::stdout(),
    };

    let mut tui = Tui::new()?;
    let mut events = EventHandler::new(settings.tick_rate());
    let keybindings = KeyBindings::new();

    {
        let backend = Arc::clone(&backend);
        let tx = internal_tx.clone();
        tokio::spawn(async move {
            let result = backend.health().await.map_err(|e| e.to_string());
            let _ = tx.send(InternalAction::HealthChecked(result));
        });
    }

    if let Some(file) = args.file.clone() {
        let _ = action_tx.send(Action::Upload(file));
    }

    render(&mut tui, &mut state)?;

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                match event {
                    Event::Key(key) => {
                        let action = if state.ui_state.help_visible {
                            keybindings.get_help_action(&key)
                        } else {
                            match state.ui_state.input_mode {
                                InputMode::Search => {
                                    keybindings.get_input_action(KeyContext::SearchInput, &key)
                                }
                                InputMode::Upload => {
                                    keybindings.get_input_action(KeyContext::UploadInput, &key)
                                }
                                InputMode::Normal if state.overlay.is_open() => {
                                    keybindings.get_action(KeyContext::Overlay, &key)
                                }
                                InputMode::Normal => {
                                    keybindings.get_action(KeyContext::LogViewer, &key)
                                }
                            }
                        };
                        if let Some(action) = action {
                            let _ = action_tx.send(action);
                        }
                    }
                    Event::Click(x, y) => {
                        if let Some(action) = state.click_action(x, y) {
                            let _ = action_tx.send(action);
                        }
                    }
                    Event::ScrollUp => {
                        let action = if state.overlay.is_open() {
                            Action::OverlayScrollUp(3)
                        } else {
                            Action::ScrollUp(3)
                        };
                        let _ = action_tx.send(action);
                    }
                    Event::ScrollDown => {
                        let action = if state.overlay.is_open() {
                            Action::OverlayScrollDown(3)
                        } else {
                            Action::ScrollDown(3)
                        };
                        let _ = action_tx.send(action);
                    }
                    Event::Tick => {
                        let _ = action_tx.send(Action::Tick);
                    }
                    Event::Resize(_, _) => {
                        let _ = action_tx.send(Action::Render);
                    }
                    Event::Error(e) => {
                        state.show_error(e);
                    }
                }
            }

            Some(action) = action_rx.recv() => {
                handle_action(&mut state, &backend, &internal_tx, &mut clipboards, action);
            }

            Some(internal) = internal_rx.recv() => {
                match internal {
                    InternalAction::UploadFinished(result) => state.finish_upload(result),
                    InternalAction::DetailsFetched(result) => state.finish_details(result),
                    InternalAction::HealthChecked(result) => state.finish_health(result),
                }
            }
        }

        if state.should_quit {
            break;
        }

        render(&mut tui, &mut state)?;
    }

    events.shutdown();
    tui.restore()?;

    Ok(())
}

fn render(tui: &mut Tui, state: &mut AppState) -> Result<()> {
    let now = Instant::now();
    tui.draw(|frame| LogViewerScreen::render(frame, state, now))?;
    Ok(())
}

fn handle_action(
    state: &mut AppState,
    backend: &Arc<dyn LogBackend>,
    internal_tx: &mpsc::UnboundedSender<InternalAction>,
    clipboards: &mut Clipboards,
    action: Action,
) {
    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::ToggleHelp => {
            state.ui_state.help_visible = !state.ui_state.help_visible;
        }
        Action::ToggleStats => {
            state.ui_state.stats_visible = !state.ui_state.stats_visible;
        }
        Action::ToggleLocalTime => {
            state.toggle_local_time();
            let zone = state.ui_state.zone.label();
            state.show_info(format!("Timestamps shown in {zone} time"));
        }

        Action::ScrollUp(n) => state.scroll_up(n),
        Action::ScrollDown(n) => state.scroll_down(n),
        Action::PageUp => state.page_up(),
        Action::PageDown => state.page_down(),
        Action::ScrollToTop => state.scroll_to_top(),
        Action::ScrollToBottom => state.scroll_to_bottom(),

        Action::SetFilter(filter) => state.set_filter(filter),

        Action::OpenSearch => state.start_search(),
        Action::CloseSearch => state.cancel_search(),
        Action::ApplySearch => state.apply_search(),
        Action::SearchInput(c) => state.search_input_char(c),
        Action::SearchBackspace => state.search_input_backspace(),
        Action::SearchClear => state.search_clear(),

        Action::OpenUploadPrompt => state.open_upload_prompt(),
        Action::CloseUploadPrompt => state.close_upload_prompt(),
        Action::UploadInput(c) => state.upload_input_char(c),
        Action::UploadBackspace => state.upload_input_backspace(),
        Action::UploadClear => state.upload_clear(),
        Action::SubmitUpload => {
            if let Some(path) = state.submit_upload() {
                spawn_upload(backend, internal_tx, path);
            }
        }
        Action::Upload(path) => {
            if let Some(path) = state.begin_upload(path) {
                spawn_upload(backend, internal_tx, path);
            }
        }

        Action::FetchDetails => {
            if let Some(log_id) = state.begin_details() {
                let backend = Arc::clone(backend);
                let tx = internal_tx.clone();
                tokio::spawn(async move {
                    let result = backend
                        .fetch_details(&log_id)
                        .await
                        .map_err(|e| e.to_string());
                    let _ = tx.send(InternalAction::DetailsFetched(result));
                });
            }
        }

        Action::OpenCell(column) => state.open_cell(column),
        Action::OpenCellAt { row, column } => state.open_cell_at(row, column),
        Action::CloseOverlay => state.close_overlay(),
        Action::CopyOverlay => {
            let Clipboards { system, terminal } = clipboards;
            state.copy_overlay(system, terminal, Instant::now());
        }
        Action::OverlayScrollUp(n) => state.overlay.scroll_up(n),
        Action::OverlayScrollDown(n) => state.overlay.scroll_down(n),

        Action::ExportReport => {
            if state.store.is_empty() {
                state.show_error("No logs to export".to_string());
                return;
            }
            let now = chrono::Local::now();
            let filename = state.export_filename(&now.format("%Y%m%d_%H%M%S").to_string());
            let html = state.report_html(&now.format("%Y-%m-%d %H:%M:%S").to_string());
            match fs::write(&filename, html) {
                Ok(()) => {
                    tracing::info!(file = %filename, "report exported");
                    state.show_info(format!("Exported report to {}", filename));
                }
                Err(e) => {
                    tracing::warn!(file = %filename, error = %e, "export failed");
                    state.show_error(format!("Export failed: {}", e));
                }
            }
        }

        Action::DismissMessage => state.dismiss_message(),
        Action::Tick => state.tick(Instant::now()),
        Action::Render => {}
    }
}

fn spawn_upload(
    backend: &Arc<dyn LogBackend>,
    internal_tx: &mpsc::UnboundedSender<InternalAction>,
    path: PathBuf,
) {
    let backend = Arc::clone(backend);
    let tx = internal_tx.clone();
    tokio::spawn(async move {
        let result = backend.upload(&path).await.map_err(|e| e.to_string());
        let _ = tx.send(InternalAction::UploadFinished(result));
    });
}
