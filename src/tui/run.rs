//! TUI entry point and terminal setup.

use std::{io, path::Path};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::info;

use crate::db::CsvStore;
use crate::error::Result;
use crate::tui::app::App;

/// Initialise and run the dashboard against the task file at `path`.
pub fn run_tui(path: &Path) -> Result<()> {
    // Load before touching the terminal so a bad file reports cleanly.
    let store = CsvStore::new(path);
    info!(path = %store.path().display(), "starting dashboard");
    let mut app = App::new(store)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result?;
    Ok(())
}
