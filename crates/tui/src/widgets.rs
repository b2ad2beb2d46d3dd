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

//! Widget rendering for the TUI interface.

use super::app::App;
use ratatui::{prelude::*, widgets::*};
use tracediff_engine::{
    split32, state_view, step_entries, step_view, transaction_label, transaction_view,
    CompareTable, RenderError, StepEntry, ViewKind,
};

/// Column width: one 32-character cell segment plus padding.
const COLUMN_WIDTH: usize = 34;

impl App {
    /// Render the whole frame.
    pub fn render(&mut self, f: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)])
            .split(f.area());

        self.render_tabs(f, chunks[0]);
        match self.state.view {
            ViewKind::Opcodes => self.render_opcodes(f, chunks[1]),
            ViewKind::Transactions => self.render_transactions(f, chunks[1]),
            ViewKind::State => self.render_state(f, chunks[1]),
        }
        self.render_footer(f, chunks[2]);

        if self.show_help {
            self.render_help(f);
        }
    }

    fn render_tabs(&self, f: &mut Frame<'_>, area: Rect) {
        let titles: Vec<Line<'_>> = ViewKind::ALL.iter().map(|v| Line::from(v.title())).collect();
        let selected = ViewKind::ALL.iter().position(|v| *v == self.state.view).unwrap_or(0);

        let title = if self.menu.is_enabled() {
            format!(
                "tracediff: {} vs {} | {} of {}",
                self.ctx.label_a,
                self.ctx.label_b,
                transaction_label(self.state.transaction),
                self.ctx.transaction_count()
            )
        } else {
            format!("tracediff: {} vs {} | no transactions", self.ctx.label_a, self.ctx.label_b)
        };

        let tabs = Tabs::new(titles)
            .select(selected)
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(tabs, area);
    }

    fn render_opcodes(&mut self, f: &mut Frame<'_>, area: Rect) {
        if !self.menu.is_enabled() {
            self.render_disabled(f, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(40)])
            .split(area);

        match step_entries(&self.ctx, self.state.transaction) {
            Ok(entries) => self.render_step_list(f, chunks[0], &entries),
            Err(e) => render_error(f, chunks[0], &e),
        }

        match step_view(&self.ctx, self.state.transaction, self.state.step) {
            Ok(view) => {
                let mut lines = table_lines(&view.fields, &self.ctx.label_a, &self.ctx.label_b);
                for extra in &view.extras {
                    lines.push(Line::from(""));
                    lines.extend(table_lines(extra, &self.ctx.label_a, &self.ctx.label_b));
                }
                let paragraph = Paragraph::new(Text::from(lines))
                    .scroll((self.table_scroll, 0))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(format!("Step #{}", self.state.step)),
                    );
                f.render_widget(paragraph, chunks[1]);
            }
            Err(e) => render_error(f, chunks[1], &e),
        }
    }

    fn render_step_list(&self, f: &mut Frame<'_>, area: Rect, entries: &[StepEntry]) {
        let items: Vec<ListItem<'_>> = entries
            .iter()
            .map(|entry| {
                let style = if entry.diverged {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default()
                };
                ListItem::new(Line::styled(entry.label(), style))
            })
            .collect();

        let mut list_state = ListState::default();
        list_state.select(Some(self.state.step));

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Steps"))
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_transactions(&self, f: &mut Frame<'_>, area: Rect) {
        if !self.menu.is_enabled() {
            self.render_disabled(f, area);
            return;
        }

        match transaction_view(&self.ctx, self.state.transaction) {
            Ok(table) => {
                let lines = table_lines(&table, &self.ctx.label_a, &self.ctx.label_b);
                let paragraph = Paragraph::new(Text::from(lines))
                    .scroll((self.table_scroll, 0))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(transaction_label(self.state.transaction)),
                    );
                f.render_widget(paragraph, area);
            }
            Err(e) => render_error(f, area, &e),
        }
    }

    fn render_state(&self, f: &mut Frame<'_>, area: Rect) {
        let view = state_view(&self.ctx);
        let mut lines: Vec<Line<'_>> = Vec::new();

        if view.entries.is_empty() {
            lines.push(Line::from("No post-state accounts in payload"));
        }

        for entry in &view.entries {
            let (status, style) = if entry.in_comparison {
                (format!("known to {}", self.ctx.label_b), Style::default())
            } else {
                (format!("missing from {}", self.ctx.label_b), Style::default().fg(Color::Red))
            };
            lines.push(Line::styled(
                format!("{} ({status})", entry.address),
                style.add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::from(format!("  balance: {}", entry.balance)));
            for (i, chunk) in split32(&entry.code).into_iter().enumerate() {
                let prefix = if i == 0 { "  code:    " } else { "           " };
                lines.push(Line::from(format!("{prefix}{chunk}")));
            }
            lines.push(Line::from(""));
        }

        let paragraph = Paragraph::new(Text::from(lines))
            .scroll((self.table_scroll, 0))
            .block(Block::default().borders(Borders::ALL).title("Post-execution state"));
        f.render_widget(paragraph, area);
    }

    fn render_disabled(&self, f: &mut Frame<'_>, area: Rect) {
        let paragraph = Paragraph::new("Menu disabled: the payload contains no transactions")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let hints = "q quit | h help | tab view | left/right tx | up/down step | pgup/pgdn scroll";
        let footer = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
        f.render_widget(footer, area);
    }

    fn render_help(&self, f: &mut Frame<'_>) {
        let area = centered_rect(50, 50, f.area());
        let lines = vec![
            Line::from("Keys"),
            Line::from(""),
            Line::from("  Tab / Shift-Tab   switch view"),
            Line::from("  Left / Right      previous / next transaction"),
            Line::from("  Up / Down         previous / next step"),
            Line::from("  PgUp / PgDn       scroll tables"),
            Line::from("  h                 toggle this help"),
            Line::from("  q / Esc           quit"),
            Line::from(""),
            Line::from("Rows in red diverge between the two clients."),
        ];
        f.render_widget(Clear, area);
        let help = Paragraph::new(Text::from(lines))
            .block(Block::default().borders(Borders::ALL).title("Help"));
        f.render_widget(help, area);
    }
}

/// Render a fail-closed message in place of a view that could not be built.
fn render_error(f: &mut Frame<'_>, area: Rect, error: &RenderError) {
    let paragraph = Paragraph::new(format!("Unable to render: {error}"))
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

/// Turn a comparison table into terminal lines: a header plus one line per
/// 32-character cell segment, diverged rows in red.
fn table_lines(table: &CompareTable, label_a: &str, label_b: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(title) = &table.title {
        lines.push(Line::styled(
            title.clone(),
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ));
    }

    lines.push(Line::styled(
        format!("{:<w$} {:<w$} {:<w$}", "Field", label_a, label_b, w = COLUMN_WIDTH),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    for row in &table.rows {
        let style =
            if row.diverged { Style::default().fg(Color::Red) } else { Style::default() };
        let field = split32(&row.field);
        let lhs = split32(&row.lhs);
        let rhs = split32(&row.rhs);
        let height = field.len().max(lhs.len()).max(rhs.len());

        for i in 0..height {
            let cell = |chunks: &[String]| chunks.get(i).cloned().unwrap_or_default();
            lines.push(Line::styled(
                format!(
                    "{:<w$} {:<w$} {:<w$}",
                    cell(&field),
                    cell(&lhs),
                    cell(&rhs),
                    w = COLUMN_WIDTH
                ),
                style,
            ));
        }
    }

    lines
}

/// A centered sub-rectangle of `r`, sized by percentage.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
