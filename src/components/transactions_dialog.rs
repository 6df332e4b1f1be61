//! All transactions dialog component
//!
//! Full-screen overlay with every transaction in a sortable, paginated table.

use crate::action::{Action, TableTarget};
use crate::component::Component;
use crate::components::DataTable;
use crate::model::{domain, DomainState, TableEngine, TableOptions, Theme};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// All transactions dialog
pub struct TransactionsDialog {
    pub table: DataTable,
}

impl TransactionsDialog {
    pub fn new(domain: &DomainState, options: TableOptions) -> Self {
        Self {
            table: DataTable::new(
                "All Transactions",
                TableTarget::AllTransactions,
                TableEngine::new(
                    domain.transaction_rows(),
                    domain::transaction_columns(),
                    options,
                ),
            ),
        }
    }

    /// Push the current transaction rows into the table
    pub fn refresh(&mut self, domain: &DomainState) {
        self.table.engine.set_rows(domain.transaction_rows());
    }
}

impl Component for TransactionsDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Ok(Some(Action::CloseModal)),
            KeyCode::Char('n') => Ok(Some(Action::OpenNewTransaction)),
            _ => self.table.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        self.table.update(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) -> Result<()> {
        let margin = 2;
        let overlay_area = Rect::new(
            area.x + margin,
            area.y + margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );
        frame.render_widget(Clear, overlay_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.background)),
            overlay_area,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(overlay_area);

        self.table.draw(frame, chunks[0], theme)?;

        let key_style = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(theme.text);
        let help = Line::from(vec![
            Span::styled(" 1-9 ", key_style),
            Span::styled("Sort  ", label_style),
            Span::styled(" h/l ", key_style),
            Span::styled("Page  ", label_style),
            Span::styled(" g/G ", key_style),
            Span::styled("First/Last  ", label_style),
            Span::styled(" x ", key_style),
            Span::styled("Export  ", label_style),
            Span::styled(" n ", key_style),
            Span::styled("New  ", label_style),
            Span::styled(" q/Esc ", key_style),
            Span::styled("Close", label_style),
        ]);
        frame.render_widget(
            Paragraph::new(help).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border)),
            ),
            chunks[1],
        );

        Ok(())
    }
}
