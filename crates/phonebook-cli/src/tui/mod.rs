//! Phonebook TUI
//!
//! Terminal user interface for Phonebook.
//!
//! ## Layout
//!
//! Stacked sections:
//! - Add Contact: name and number inputs
//! - Filter by Name: live filter input
//! - Contacts List: the filtered contacts
//! - Status bar: latest notification
//!
//! ## Keys
//!
//! - Tab / Shift-Tab: Move between sections
//! - Enter: Next field / submit contact
//! - Esc: Reset filter (in filter) / go to list (in editor)
//! - j/k or ↑/↓: Move selection
//! - d: Delete selected contact
//! - Ctrl-R: Randomise data
//! - q (in list) or Ctrl-C: Quit

mod app;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use phonebook_core::{
    Config, ContactSource, FileStorage, KeyValueStorage, Phonebook, RandomUserSource,
    RecordingNotifier,
};
use ratatui::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use app::{Action, App};

/// Run the TUI application
pub async fn run(config: Config) -> Result<()> {
    // Initialize TUI logging (file-based, only if PHONEBOOK_LOG is set)
    init_tui_logging(&config);

    let phonebook = Phonebook::open(
        FileStorage::new(config.storage_dir()),
        RecordingNotifier::new(),
    );
    let source = RandomUserSource::new(&config.source_url, config.sample_size);
    let mut app = App::new(phonebook);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_app(&mut terminal, &mut app, &source).await;

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_app<B: Backend, S: KeyValueStorage>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
    source: &dyn ContactSource,
) -> Result<()> {
    loop {
        app.check_status_timeout();
        terminal.draw(|frame| ui::draw(frame, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };

        // Only handle key press events (not release)
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key.code, key.modifiers) {
            Action::None => {}
            Action::Quit => return Ok(()),
            Action::Randomize => {
                app.is_loading = true;
                terminal.draw(|frame| ui::draw(frame, app))?;

                match app.phonebook.randomize(source).await {
                    Ok(summary) => {
                        info!(
                            "Randomize finished: {} added, {} rejected",
                            summary.added, summary.rejected
                        );
                        app.collect_notifications();
                    }
                    Err(e) => {
                        warn!("Randomize failed: {:#}", e);
                        app.notify_failure(&format!("{:#}", e));
                    }
                }

                app.clamp_selection();
                app.is_loading = false;
            }
        }
    }
}

/// Initialize logging for TUI mode
///
/// Only initializes if PHONEBOOK_LOG environment variable is set.
/// Logs to file (config.log_file or default {data_dir}/debug.log).
fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var("PHONEBOOK_LOG") else {
        return;
    };

    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "phonebook_core={},phonebook={}",
        log_level, log_level
    ));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
