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

//! TUI application state and event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tracediff_engine::{menu_state, DiffContext, MenuState, ViewKind, ViewState};
use tracing::debug;

/// Application state: the immutable diff context plus the navigation state
/// and the few scroll offsets the terminal needs.
pub struct App {
    /// The diff context, built once at startup.
    pub ctx: DiffContext,
    /// Active view / selected transaction / selected step.
    pub state: ViewState,
    /// Transaction menu, derived from the payload once.
    pub menu: MenuState,
    /// Whether the help overlay is shown.
    pub show_help: bool,
    /// Vertical scroll of the table pane.
    pub table_scroll: u16,
    should_exit: bool,
}

impl App {
    /// Create the app around a loaded context.
    pub fn new(ctx: DiffContext) -> Self {
        let menu = menu_state(ctx.transaction_count());
        debug!(?menu, "TUI app created");
        Self {
            ctx,
            state: ViewState::default(),
            menu,
            show_help: false,
            table_scroll: 0,
            should_exit: false,
        }
    }

    /// Whether the event loop should terminate.
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Number of steps the reference trace records for the selected
    /// transaction; zero when the selection cannot be resolved.
    pub fn step_count(&self) -> usize {
        self.ctx
            .trace_pair(self.state.transaction)
            .map(|(reference, _)| reference.struct_logs.len())
            .unwrap_or(0)
    }

    /// Handle one key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_exit = true,
            KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_exit = true;
                }
            }
            KeyCode::Char('h') => self.show_help = !self.show_help,
            KeyCode::Tab => self.next_view(),
            KeyCode::BackTab => self.previous_view(),
            KeyCode::Left => self.previous_transaction(),
            KeyCode::Right => self.next_transaction(),
            KeyCode::Up => self.up(),
            KeyCode::Down => self.down(),
            KeyCode::PageUp => self.table_scroll = self.table_scroll.saturating_sub(10),
            KeyCode::PageDown => self.table_scroll = self.table_scroll.saturating_add(10),
            _ => {}
        }
    }

    fn next_view(&mut self) {
        let current = ViewKind::ALL.iter().position(|v| *v == self.state.view).unwrap_or(0);
        self.state.select_view(ViewKind::ALL[(current + 1) % ViewKind::ALL.len()]);
        self.table_scroll = 0;
    }

    fn previous_view(&mut self) {
        let current = ViewKind::ALL.iter().position(|v| *v == self.state.view).unwrap_or(0);
        let previous = (current + ViewKind::ALL.len() - 1) % ViewKind::ALL.len();
        self.state.select_view(ViewKind::ALL[previous]);
        self.table_scroll = 0;
    }

    fn next_transaction(&mut self) {
        if !self.menu.is_enabled() {
            return;
        }
        let count = self.ctx.transaction_count();
        if self.state.transaction + 1 < count {
            self.state.select_transaction(self.state.transaction + 1);
            self.table_scroll = 0;
        }
    }

    fn previous_transaction(&mut self) {
        if !self.menu.is_enabled() {
            return;
        }
        if self.state.transaction > 0 {
            self.state.select_transaction(self.state.transaction - 1);
            self.table_scroll = 0;
        }
    }

    fn up(&mut self) {
        match self.state.view {
            ViewKind::Opcodes => {
                if self.menu.is_enabled() && self.state.step > 0 {
                    self.state.select_step(self.state.step - 1);
                    self.table_scroll = 0;
                }
            }
            _ => self.table_scroll = self.table_scroll.saturating_sub(1),
        }
    }

    fn down(&mut self) {
        match self.state.view {
            ViewKind::Opcodes => {
                let count = self.step_count();
                if self.menu.is_enabled() && self.state.step + 1 < count {
                    self.state.select_step(self.state.step + 1);
                    self.table_scroll = 0;
                }
            }
            _ => self.table_scroll = self.table_scroll.saturating_add(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tracediff_common::TracePayload;

    fn app(transactions: usize) -> App {
        let traces: Vec<serde_json::Value> = (0..transactions)
            .map(|_| serde_json::json!({ "structLogs": [{ "op": "STOP", "pc": 0 }] }))
            .collect();
        let side = serde_json::json!({
            "block": { "transactions": vec![serde_json::json!({}); transactions] },
            "txTraces": traces
        });
        let payload: TracePayload =
            serde_json::from_value(serde_json::json!({ "reference": side, "comparison": side }))
                .unwrap();
        App::new(DiffContext::new(payload, "a", "b"))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(1);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit());
    }

    #[test]
    fn test_escape_closes_help_before_quitting() {
        let mut app = app(1);
        press(&mut app, KeyCode::Char('h'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(!app.should_exit());
        press(&mut app, KeyCode::Esc);
        assert!(app.should_exit());
    }

    #[test]
    fn test_transaction_navigation_clamps() {
        let mut app = app(2);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.state.transaction, 1);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.state.transaction, 1);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.state.transaction, 0);
    }

    #[test]
    fn test_disabled_menu_ignores_navigation() {
        let mut app = app(0);
        assert_eq!(app.menu, MenuState::Disabled);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.state.transaction, 0);
        assert_eq!(app.state.step, 0);
    }

    #[test]
    fn test_tab_cycles_views() {
        let mut app = app(1);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.state.view, ViewKind::Transactions);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.state.view, ViewKind::State);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.state.view, ViewKind::Opcodes);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.state.view, ViewKind::State);
    }
}
