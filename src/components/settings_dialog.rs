//! Settings dialog component
//!
//! Toggles the theme and table behaviour; changes apply immediately and are
//! saved by the App.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::config::Config;
use crate::model::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// A row of the settings dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    DarkMode,
    ResetOnDataChange,
    PageSize,
}

impl SettingsItem {
    pub fn all() -> [SettingsItem; 3] {
        [
            SettingsItem::DarkMode,
            SettingsItem::ResetOnDataChange,
            SettingsItem::PageSize,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsItem::DarkMode => "Dark mode",
            SettingsItem::ResetOnDataChange => "Jump to page 1 when data changes",
            SettingsItem::PageSize => "Rows per page",
        }
    }

    /// Action that changes this setting
    pub fn action(&self) -> Action {
        match self {
            SettingsItem::DarkMode => Action::ToggleDarkMode,
            SettingsItem::ResetOnDataChange => Action::ToggleResetOnDataChange,
            SettingsItem::PageSize => Action::CyclePageSize,
        }
    }

    fn value(&self, config: &Config) -> String {
        let on_off = |b: bool| if b { "on" } else { "off" }.to_string();
        match self {
            SettingsItem::DarkMode => on_off(config.dark_mode),
            SettingsItem::ResetOnDataChange => on_off(config.reset_page_on_data_change),
            SettingsItem::PageSize => config.page_size.to_string(),
        }
    }
}

/// Settings dialog
#[derive(Default)]
pub struct SettingsDialog {
    pub selected_index: usize,
}

impl SettingsDialog {
    pub fn selected(&self) -> SettingsItem {
        let items = SettingsItem::all();
        items[self.selected_index.min(items.len() - 1)]
    }

    pub fn draw_with_config(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        config: &Config,
    ) -> Result<()> {
        let popup_area = centered_popup(area, 52, 10);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![Line::from("")];
        for (i, item) in SettingsItem::all().iter().enumerate() {
            let is_selected = i == self.selected_index;
            let prefix = if is_selected { "▶ " } else { "  " };
            let label_style = if is_selected {
                Style::default()
                    .fg(theme.text)
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{}{:<34}", prefix, item.label()), label_style),
                Span::styled(
                    format!(" {} ", item.value(config)),
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" j/k ", Style::default().fg(theme.accent)),
            Span::styled("Move  ", Style::default().fg(theme.muted)),
            Span::styled(" Enter ", Style::default().fg(theme.accent)),
            Span::styled("Change  ", Style::default().fg(theme.muted)),
            Span::styled(" Esc ", Style::default().fg(theme.accent)),
            Span::styled("Close", Style::default().fg(theme.muted)),
        ]));

        let paragraph = Paragraph::new(lines)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Settings ")
                    .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(theme.accent)),
            );
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

impl Component for SettingsDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('s') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ModalDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ModalUp),
            KeyCode::Enter | KeyCode::Char(' ') => Some(self.selected().action()),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ModalUp => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            Action::ModalDown => {
                let max = SettingsItem::all().len() - 1;
                self.selected_index = (self.selected_index + 1).min(max);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect, _theme: &Theme) -> Result<()> {
        // Needs the live config, so the App calls draw_with_config
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_navigation_is_clamped() {
        let mut dialog = SettingsDialog::default();
        dialog.update(Action::ModalUp).unwrap();
        assert_eq!(dialog.selected_index, 0);
        for _ in 0..5 {
            dialog.update(Action::ModalDown).unwrap();
        }
        assert_eq!(dialog.selected(), SettingsItem::PageSize);
    }

    #[test]
    fn test_enter_emits_selected_setting() {
        let mut dialog = SettingsDialog {
            selected_index: 1,
        };
        let action = dialog
            .handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();
        assert_eq!(action, Some(Action::ToggleResetOnDataChange));
    }

    #[test]
    fn test_values_reflect_config() {
        let config = Config {
            dark_mode: false,
            page_size: 25,
            ..Config::default()
        };
        assert_eq!(SettingsItem::DarkMode.value(&config), "off");
        assert_eq!(SettingsItem::PageSize.value(&config), "25");
    }
}
