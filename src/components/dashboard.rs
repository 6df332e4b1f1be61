//! Dashboard component - Main application screen
//!
//! Displays the sidebar, KPI cards, recent transactions and the activity
//! feed, plus the Users and Reports sections. Owns navigation state and the
//! tables shown on the main screen.

use crate::action::{Action, TableTarget};
use crate::component::Component;
use crate::components::layout::{calculate_dashboard_layout, calculate_main_layout};
use crate::components::DataTable;
use crate::config::Config;
use crate::model::domain::{self, format_currency, Kpis, ACTIVE_DAYS};
use crate::model::{DomainState, TableEngine, TableOptions, Tab, Theme};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Number of users listed in the activity feed
pub const FEED_LIMIT: usize = 8;

// ═══════════════════════════════════════════════════════════════════════════════
// Dashboard Component
// ═══════════════════════════════════════════════════════════════════════════════

/// Dashboard component for the main application view
pub struct DashboardComponent {
    pub active_tab: Tab,
    pub show_sidebar: bool,
    /// First few transactions, one compact page
    pub recent: DataTable,
    pub users: DataTable,
    /// Revenue series
    pub reports: DataTable,
}

impl DashboardComponent {
    pub fn new(domain: &DomainState, config: &Config) -> Self {
        let options = TableOptions {
            page_size: config.page_size,
            reset_page_on_data_change: config.reset_page_on_data_change,
        };
        let compact = TableOptions {
            page_size: config.compact_page_size,
            ..options
        };

        Self {
            active_tab: Tab::Dashboard,
            show_sidebar: true,
            recent: DataTable::new(
                "Recent Transactions",
                TableTarget::Recent,
                TableEngine::new(
                    domain.recent_transaction_rows(config.compact_page_size),
                    domain::transaction_columns(),
                    compact,
                ),
            ),
            users: DataTable::new(
                "Users",
                TableTarget::Users,
                TableEngine::new(domain.user_rows(), domain::user_columns(), options),
            ),
            reports: DataTable::new(
                "Daily Revenue",
                TableTarget::Reports,
                TableEngine::new(domain.series_rows(), domain::series_columns(), options),
            ),
        }
    }

    /// The table that receives table keys on the active tab
    fn focused_table_mut(&mut self) -> &mut DataTable {
        match self.active_tab {
            Tab::Dashboard => &mut self.recent,
            Tab::Users => &mut self.users,
            Tab::Reports => &mut self.reports,
        }
    }

    pub fn table(&self, target: TableTarget) -> Option<&DataTable> {
        match target {
            TableTarget::Recent => Some(&self.recent),
            TableTarget::Users => Some(&self.users),
            TableTarget::Reports => Some(&self.reports),
            TableTarget::AllTransactions => None,
        }
    }

    /// All tables owned by the dashboard
    pub fn tables_mut(&mut self) -> [&mut DataTable; 3] {
        [&mut self.recent, &mut self.users, &mut self.reports]
    }

    /// Push fresh transaction rows into the recent panel
    pub fn refresh_transactions(&mut self, domain: &DomainState) {
        let count = self.recent.engine.view_state().page_size;
        self.recent
            .engine
            .set_rows(domain.recent_transaction_rows(count));
    }

    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
    }

    pub fn previous_tab(&mut self) {
        self.active_tab = self.active_tab.prev();
    }

    pub fn toggle_sidebar(&mut self) {
        self.show_sidebar = !self.show_sidebar;
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for DashboardComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            // Navigation
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::BackTab => Some(Action::PrevTab),
            KeyCode::Char('b') => Some(Action::ToggleSidebar),

            // Modals
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            KeyCode::Char('v') => Some(Action::OpenAllTransactions),
            KeyCode::Char('n') => Some(Action::OpenNewTransaction),
            KeyCode::Char('s') => Some(Action::OpenSettings),
            KeyCode::Char('?') => Some(Action::OpenHelp),

            // Sorting, paging and export go to the focused table
            _ => return self.focused_table_mut().handle_key_event(key),
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextTab => self.next_tab(),
            Action::PrevTab => self.previous_tab(),
            Action::ToggleSidebar => self.toggle_sidebar(),
            _ => {
                for table in self.tables_mut() {
                    table.apply(&action);
                }
            }
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect, _theme: &Theme) -> Result<()> {
        // Drawing is done through draw_dashboard_screen which takes the domain
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the dashboard screen
pub struct DashboardRenderContext<'a> {
    pub domain: &'a DomainState,
    pub theme: &'a Theme,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

pub fn draw_dashboard_screen(
    frame: &mut Frame,
    area: Rect,
    dashboard: &mut DashboardComponent,
    ctx: &DashboardRenderContext,
) -> Result<()> {
    let theme = ctx.theme;
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let has_status = ctx.error.is_some() || ctx.status_message.is_some();
    let layout = calculate_main_layout(area, dashboard.show_sidebar, has_status);

    if let Some(sidebar) = layout.sidebar {
        render_sidebar(frame, sidebar, dashboard.active_tab, theme);
    }

    match dashboard.active_tab {
        Tab::Dashboard => {
            let areas = calculate_dashboard_layout(layout.content);
            render_kpis(frame, &areas.kpis, &ctx.domain.kpis(), theme);
            dashboard.recent.draw(frame, areas.recent, theme)?;
            render_activity_feed(frame, areas.feed, ctx.domain, theme);
        }
        Tab::Users => dashboard.users.draw(frame, layout.content, theme)?,
        Tab::Reports => dashboard.reports.draw(frame, layout.content, theme)?,
    }

    if let Some(status_area) = layout.status {
        render_status_bar(frame, status_area, ctx);
    }
    render_help_bar(frame, layout.help, dashboard.active_tab, theme);

    Ok(())
}

fn render_sidebar(frame: &mut Frame, area: Rect, active: Tab, theme: &Theme) {
    let mut lines = vec![
        Line::from(Span::styled(
            " Pulse",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for tab in Tab::all() {
        let style = if tab == active {
            Style::default()
                .fg(theme.text)
                .bg(theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        let marker = if tab == active { "▶" } else { " " };
        lines.push(Line::from(Span::styled(
            format!("{} {} {}", marker, tab.icon(), tab.name()),
            style,
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_kpis(frame: &mut Frame, areas: &[Rect; 4], kpis: &Kpis, theme: &Theme) {
    let delta_style = if kpis.revenue_delta >= 0.0 {
        Style::default().fg(theme.success)
    } else {
        Style::default().fg(theme.danger)
    };
    let delta_arrow = if kpis.revenue_delta >= 0.0 { "▲" } else { "▼" };

    let cards = [
        (
            "Revenue",
            format_currency(kpis.revenue),
            Span::styled(
                format!("{} {:.1}% vs last week", delta_arrow, kpis.revenue_delta.abs()),
                delta_style,
            ),
        ),
        (
            "Transactions",
            kpis.transactions.to_string(),
            Span::styled("all time", Style::default().fg(theme.muted)),
        ),
        (
            "Active Users",
            kpis.active_users.to_string(),
            Span::styled(
                format!("last {} days", ACTIVE_DAYS),
                Style::default().fg(theme.muted),
            ),
        ),
        (
            "Failure Rate",
            format!("{:.1}%", kpis.failure_rate),
            Span::styled("of all transactions", Style::default().fg(theme.muted)),
        ),
    ];

    for ((title, value, note), area) in cards.into_iter().zip(areas.iter()) {
        let lines = vec![
            Line::from(Span::styled(
                value,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(note),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(theme.muted))
            .border_style(Style::default().fg(theme.border));
        frame.render_widget(Paragraph::new(lines).block(block), *area);
    }
}

fn render_activity_feed(frame: &mut Frame, area: Rect, domain: &DomainState, theme: &Theme) {
    let lines: Vec<Line> = domain
        .activity_feed(FEED_LIMIT)
        .into_iter()
        .map(|user| {
            let tone = if user.last_active_days < ACTIVE_DAYS {
                theme.success
            } else {
                theme.muted
            };
            let when = match user.last_active_days {
                0 => "today".to_string(),
                1 => "yesterday".to_string(),
                n => format!("{} days ago", n),
            };
            Line::from(vec![
                Span::styled("● ", Style::default().fg(tone)),
                Span::styled(
                    format!("{:<3}", user.initials()),
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{} ", user.name), Style::default().fg(theme.text)),
                Span::styled(
                    format!("({}) {}", user.role, when),
                    Style::default().fg(theme.muted),
                ),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Activity ")
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &DashboardRenderContext) {
    let theme = ctx.theme;
    let line = if let Some(error) = ctx.error {
        Line::from(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(theme.danger),
        ))
    } else {
        Line::from(Span::styled(
            format!(" {} ", ctx.status_message.unwrap_or_default()),
            Style::default().fg(theme.warning),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, tab: Tab, theme: &Theme) {
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )
    };
    let label = |l: &'static str| Span::styled(l, Style::default().fg(theme.text));

    let mut spans = vec![
        key(" q "),
        label("Quit "),
        key(" Tab "),
        label("Section "),
        key(" 1-9 "),
        label("Sort "),
        key(" h/l "),
        label("Page "),
        key(" x "),
        label("Export "),
    ];
    if tab == Tab::Dashboard {
        spans.extend([key(" v "), label("View all ")]);
    }
    spans.extend([
        key(" n "),
        label("New "),
        key(" s "),
        label("Settings "),
        key(" ? "),
        label("Help"),
    ]);

    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(paragraph, area);
}
