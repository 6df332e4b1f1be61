//! New transaction form dialog
//!
//! Text input for name, email and amount plus a terms checkbox. Validation
//! messages appear under each field after a submit attempt.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::form::FormErrors;
use crate::model::sample_data::Transaction;
use crate::model::{FormField, Theme, TransactionForm};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// New transaction form dialog
#[derive(Default)]
pub struct FormDialog {
    pub form: TransactionForm,
    pub focus: FormField,
    /// Messages from the last failed submit
    pub errors: FormErrors,
}

impl FormDialog {
    /// Clear input for a new invocation
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate and build the transaction.
    ///
    /// On failure the messages are kept for display and focus moves to the
    /// first invalid field.
    pub fn try_submit(&mut self, id: String, today: NaiveDate) -> Option<Transaction> {
        match self.form.submit(id, today) {
            Ok(transaction) => {
                self.reset();
                Some(transaction)
            }
            Err(errors) => {
                log::debug!("form rejected: {} invalid field(s)", errors.len());
                if let Some(field) = errors.keys().next() {
                    self.focus = *field;
                }
                self.errors = errors;
                None
            }
        }
    }

    fn field_value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.form.name.clone(),
            FormField::Email => self.form.email.clone(),
            FormField::Amount => self.form.amount.clone(),
            FormField::Agree => {
                let mark = if self.form.agree { "x" } else { " " };
                format!("[{}] I accept the terms", mark)
            }
        }
    }
}

impl Component for FormDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SubmitTransaction),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Backspace => {
                self.form.backspace(self.focus);
                self.errors.remove(&self.focus);
                None
            }
            KeyCode::Char(c) => {
                self.form.input(self.focus, c);
                self.errors.remove(&self.focus);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) -> Result<()> {
        let popup_area = centered_popup(area, 56, 20);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![Line::from("")];
        for field in FormField::all() {
            let focused = field == self.focus;
            let label_style = if focused {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };
            lines.push(Line::from(Span::styled(
                format!("  {}", field.label()),
                label_style,
            )));

            let cursor = if focused && field != FormField::Agree { "█" } else { "" };
            let value_style = if focused {
                Style::default().fg(theme.text).bg(theme.highlight_bg)
            } else {
                Style::default().fg(theme.text)
            };
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{}{}", self.field_value(field), cursor), value_style),
            ]));

            match self.errors.get(&field) {
                Some(message) => lines.push(Line::from(Span::styled(
                    format!("  {}", message),
                    Style::default().fg(theme.danger),
                ))),
                None => lines.push(Line::from("")),
            }
        }

        lines.push(Line::from(vec![
            Span::styled(" Tab ", Style::default().fg(theme.accent)),
            Span::styled("Next  ", Style::default().fg(theme.muted)),
            Span::styled(" Space ", Style::default().fg(theme.accent)),
            Span::styled("Toggle  ", Style::default().fg(theme.muted)),
            Span::styled(" Enter ", Style::default().fg(theme.accent)),
            Span::styled("Submit  ", Style::default().fg(theme.muted)),
            Span::styled(" Esc ", Style::default().fg(theme.accent)),
            Span::styled("Cancel", Style::default().fg(theme.muted)),
        ]));

        let paragraph = Paragraph::new(lines)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" New Transaction ")
                    .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(theme.accent)),
            );
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
