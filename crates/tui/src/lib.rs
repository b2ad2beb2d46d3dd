// tracediff - EVM execution trace diff viewer
// Copyright (C) 2025 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Terminal User Interface for tracediff
//!
//! Renders the opcode, transaction, and state comparison views in the
//! terminal. All work runs on the input-event callbacks in a
//! run-to-completion fashion; there is no background data source, so the
//! event loop is fully synchronous.

mod app;
mod widgets;

pub use app::App;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use eyre::Result;
use ratatui::prelude::*;
use std::{io, time::Duration};
use tracediff_engine::DiffContext;
use tracing::info;

/// Run the TUI over a loaded diff context until the user quits.
pub fn run(ctx: DiffContext) -> Result<()> {
    info!("Starting terminal UI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(ctx);
    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Terminal UI ended");
    result
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    loop {
        // Render current state; each draw rebuilds the display from scratch
        terminal.draw(|f| app.render(f))?;

        // Block until input (or tick) and handle it
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key_event(key);
            }
        }

        if app.should_exit() {
            break;
        }
    }

    Ok(())
}
