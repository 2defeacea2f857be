//! Terminal surface for the picker
//!
//! Renders the headless `SelectState` as an input bar with a dropdown
//! result panel, and feeds it keyboard, mouse, and fetch-completion events.

pub mod app;
pub mod colors;
pub mod list;
pub mod ui;

pub use app::App;
pub use colors::Theme;

use std::io;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

/// Entry point: set up the terminal, run the widget loop, restore
pub fn run(mut app: App) -> crate::Result<()> {
    let mut terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;

    let result = app.run(&mut terminal);

    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}
