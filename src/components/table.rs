//! Data table component
//!
//! Wraps a `TableEngine` and renders its visible page with a sortable header
//! and pagination controls.

use crate::action::{Action, TableTarget};
use crate::component::Component;
use crate::model::{Cell, TableEngine, Theme};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a column may get before its cells are truncated
const MAX_COLUMN_WIDTH: usize = 32;

/// Table component for sorted, paginated data
pub struct DataTable {
    pub title: String,
    pub target: TableTarget,
    pub engine: TableEngine,
}

impl DataTable {
    pub fn new(title: impl Into<String>, target: TableTarget, engine: TableEngine) -> Self {
        Self {
            title: title.into(),
            target,
            engine,
        }
    }

    /// Apply a table action addressed to this table; others are ignored
    pub fn apply(&mut self, action: &Action) {
        match *action {
            Action::SortColumn(target, index) if target == self.target => {
                let key = self.engine.columns().get(index).map(|c| c.key.clone());
                if let Some(key) = key {
                    self.engine.set_sort(&key);
                }
            }
            Action::NextPage(target) if target == self.target => self.engine.next_page(),
            Action::PrevPage(target) if target == self.target => self.engine.prev_page(),
            Action::FirstPage(target) if target == self.target => self.engine.first_page(),
            Action::LastPage(target) if target == self.target => self.engine.last_page(),
            _ => {}
        }
    }

    /// Render header, visible rows and the pagination footer as lines
    pub fn build_table_lines(engine: &TableEngine, theme: &Theme) -> Vec<Line<'static>> {
        let columns = engine.columns();
        if columns.is_empty() {
            return vec![Line::from(Span::styled(
                "No columns",
                Style::default().fg(theme.muted),
            ))];
        }

        let cells = engine.materialize();
        let headers: Vec<String> = columns
            .iter()
            .map(|col| match engine.sort_indicator(&col.key) {
                Some(arrow) => format!("{} {}", col.label, arrow),
                None => col.label.clone(),
            })
            .collect();

        let mut col_widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = col_widths.get_mut(i) {
                    *width = (*width).max(cell.text.width());
                }
            }
        }
        for width in &mut col_widths {
            *width = (*width).min(MAX_COLUMN_WIDTH);
        }

        let mut lines = Vec::new();

        // Header, numbered so the sort keys are discoverable
        let header_spans: Vec<Span> = headers
            .iter()
            .enumerate()
            .flat_map(|(i, h)| {
                let style = if engine.sort_indicator(&columns[i].key).is_some() {
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
                };
                vec![
                    Span::styled(format!("{}", i + 1), Style::default().fg(theme.muted)),
                    Span::raw(" "),
                    Span::styled(pad(h, col_widths[i]), style),
                    Span::raw(" │ "),
                ]
            })
            .collect();
        lines.push(Line::from(header_spans));

        let separator: String = col_widths
            .iter()
            .map(|w| "─".repeat(*w + 2))
            .collect::<Vec<_>>()
            .join("─┼─");
        lines.push(Line::from(Span::styled(
            separator,
            Style::default().fg(theme.border),
        )));

        if cells.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No rows",
                Style::default().fg(theme.muted),
            )));
        }

        for row in &cells {
            let row_spans: Vec<Span> = row
                .iter()
                .enumerate()
                .flat_map(|(i, cell)| {
                    let width = col_widths.get(i).copied().unwrap_or(10);
                    vec![
                        Span::raw("  "),
                        Span::styled(pad(&cell.text, width), cell_style(cell, theme)),
                        Span::raw(" │ "),
                    ]
                })
                .collect();
            lines.push(Line::from(row_spans));
        }

        lines.push(Line::from(""));
        lines.push(Self::footer_line(engine, theme));
        lines
    }

    fn footer_line(engine: &TableEngine, theme: &Theme) -> Line<'static> {
        let showing = match engine.showing_range() {
            Some((start, end)) => format!("Showing {}-{} of {}", start, end, engine.row_count()),
            None => "Showing 0 of 0".to_string(),
        };
        let control = |label: &'static str, enabled: bool| {
            if enabled {
                Span::styled(
                    label,
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(label, Style::default().fg(theme.muted))
            }
        };

        Line::from(vec![
            Span::styled(showing, Style::default().fg(theme.muted)),
            Span::raw("   "),
            control("◀ Prev", engine.can_prev()),
            Span::styled(
                format!(
                    "  Page {} / {}  ",
                    engine.view_state().current_page + 1,
                    engine.page_count()
                ),
                Style::default().fg(theme.warning),
            ),
            control("Next ▶", engine.can_next()),
        ])
    }
}

fn cell_style(cell: &Cell, theme: &Theme) -> Style {
    Style::default().fg(theme.tone(cell.tone))
}

/// Pad or truncate `text` to exactly `width` display columns
fn pad(text: &str, width: usize) -> String {
    if text.width() <= width {
        return format!("{}{}", text, " ".repeat(width - text.width()));
    }

    let budget = width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

impl Component for DataTable {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let target = self.target;
        let action = match key.code {
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                (index < self.engine.columns().len()).then_some(Action::SortColumn(target, index))
            }
            KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => {
                Some(Action::NextPage(target))
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => Some(Action::PrevPage(target)),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstPage(target)),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastPage(target)),
            KeyCode::Char('x') => Some(Action::ExportTable(target)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        self.apply(&action);
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) -> Result<()> {
        let lines = Self::build_table_lines(&self.engine, theme);
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", self.title))
                .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
                .border_style(Style::default().fg(theme.border)),
        );
        frame.render_widget(paragraph, area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::{Column, Row};
    use crate::model::TableOptions;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use std::rc::Rc;

    fn table(count: usize, page_size: usize) -> DataTable {
        let rows: Rc<[Row]> = (0..count)
            .map(|i| {
                Row::new(format!("r{}", i))
                    .with("name", format!("row {}", i))
                    .with("score", (count - i) as i64)
            })
            .collect();
        let engine = TableEngine::new(
            rows,
            vec![Column::new("name", "Name"), Column::new("score", "Score")],
            TableOptions {
                page_size,
                reset_page_on_data_change: true,
            },
        );
        DataTable::new("Test", TableTarget::Users, engine)
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_pad_truncates_by_display_width() {
        assert_eq!(pad("abc", 5), "abc  ");
        assert_eq!(pad("abcdef", 4), "abc…");
        assert_eq!(pad("₹1,000", 6), "₹1,000");
    }

    #[test]
    fn test_lines_show_sort_arrow_and_footer() {
        let mut table = table(12, 5);
        table.apply(&Action::SortColumn(TableTarget::Users, 1));
        let lines = DataTable::build_table_lines(&table.engine, &Theme::dark());

        assert!(text(&lines[0]).contains("Score ▲"));
        assert!(text(&lines[2]).contains("row 11"));
        let footer = text(lines.last().unwrap());
        assert!(footer.contains("Showing 1-5 of 12"));
        assert!(footer.contains("Page 1 / 3"));
    }

    #[test]
    fn test_empty_table_footer() {
        let table = table(0, 5);
        let lines = DataTable::build_table_lines(&table.engine, &Theme::dark());
        assert!(text(&lines[2]).contains("No rows"));
        let footer = text(lines.last().unwrap());
        assert!(footer.contains("Showing 0 of 0"));
        assert!(footer.contains("Page 1 / 1"));
    }

    #[test]
    fn test_actions_for_other_tables_are_ignored() {
        let mut table = table(12, 5);
        table.apply(&Action::NextPage(TableTarget::Recent));
        assert_eq!(table.engine.view_state().current_page, 0);
        table.apply(&Action::NextPage(TableTarget::Users));
        assert_eq!(table.engine.view_state().current_page, 1);
        table.apply(&Action::LastPage(TableTarget::Users));
        assert_eq!(table.engine.view_state().current_page, 2);
    }

    #[test]
    fn test_key_mapping() {
        let mut table = table(3, 5);
        assert_eq!(
            table.handle_key_event(key(KeyCode::Char('2'))).unwrap(),
            Some(Action::SortColumn(TableTarget::Users, 1))
        );
        // Only two columns
        assert_eq!(table.handle_key_event(key(KeyCode::Char('3'))).unwrap(), None);
        assert_eq!(
            table.handle_key_event(key(KeyCode::Right)).unwrap(),
            Some(Action::NextPage(TableTarget::Users))
        );
    }

    #[test]
    fn test_draw_renders_into_buffer() {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut table = table(4, 10);
        terminal
            .draw(|frame| {
                table.draw(frame, frame.area(), &Theme::dark()).unwrap();
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let rendered: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(rendered.contains("Test"));
        assert!(rendered.contains("row 0"));
    }
}
