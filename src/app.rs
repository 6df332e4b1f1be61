//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! App coordinates between components and owns the shared state: mock data,
//! config, theme and the modal stack.

use crate::action::{Action, TableTarget};
use crate::component::Component;
use crate::components::{
    draw_dashboard_screen, DashboardComponent, DashboardRenderContext, DataTable, FormDialog,
    HelpDialog, QuitDialog, SettingsDialog, TransactionsDialog,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::sample_data::{self, generate_series, generate_transactions, generate_users};
use crate::model::{DomainState, TableOptions, Theme};
use crate::services;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::KeyEvent;
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{layout::Rect, Frame};

/// Days in the mock revenue series
const SERIES_POINTS: usize = 30;
const SERIES_BASE: f64 = 12_000.0;
const SERIES_VARIANCE: f64 = 0.25;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Domain state (business data)
    pub domain: DomainState,

    /// Modal overlay stack
    pub modals: ModalStack,

    pub config: Config,
    pub theme: Theme,

    /// Date new transactions are stamped with
    pub today: NaiveDate,

    /// Source of ids for new transactions
    rng: StdRng,

    /// Whether settings changes are written to disk
    persist_config: bool,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub dashboard: DashboardComponent,
    pub transactions_dialog: TransactionsDialog,
    pub settings_dialog: SettingsDialog,
    pub form_dialog: FormDialog,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create the App from the saved config with freshly generated data
    pub fn new() -> App {
        let config = Config::load();
        let rng = match config.seed {
            Some(seed) => {
                log::info!("generating mock data with seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        let mut app = Self::with_config(config, rng, Local::now().date_naive());
        app.persist_config = true;
        app
    }

    /// Create the App without touching the filesystem
    pub fn with_config(config: Config, mut rng: StdRng, today: NaiveDate) -> App {
        let domain = mock_domain(&mut rng, &config, today);
        let options = TableOptions {
            page_size: config.page_size,
            reset_page_on_data_change: config.reset_page_on_data_change,
        };

        App {
            dashboard: DashboardComponent::new(&domain, &config),
            transactions_dialog: TransactionsDialog::new(&domain, options),
            settings_dialog: SettingsDialog::default(),
            form_dialog: FormDialog::default(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
            domain,
            modals: ModalStack::new(),
            theme: Theme::from_dark_mode(config.dark_mode),
            config,
            today,
            rng,
            persist_config: false,
            should_quit: false,
            error: None,
            status_message: None,
        }
    }

    /// Table addressed by `target`
    pub fn table(&self, target: TableTarget) -> &DataTable {
        match self.dashboard.table(target) {
            Some(table) => table,
            None => &self.transactions_dialog.table,
        }
    }

    fn tables_mut(&mut self) -> [&mut DataTable; 4] {
        let [recent, users, reports] = self.dashboard.tables_mut();
        [recent, users, reports, &mut self.transactions_dialog.table]
    }

    fn export(&mut self, target: TableTarget) {
        let table = self.table(target);
        let count = table.engine.row_count();
        match services::export_table(&table.engine) {
            Ok(path) => {
                self.status_message =
                    Some(format!("Exported {} rows to {}", count, path.display()));
            }
            Err(e) => {
                log::error!("export failed: {:#}", e);
                self.error = Some(format!("Export failed: {:#}", e));
            }
        }
    }

    fn submit_transaction(&mut self) {
        let id = sample_data::uid(&mut self.rng, "txn");
        let Some(transaction) = self.form_dialog.try_submit(id, self.today) else {
            return;
        };

        self.status_message = Some(format!(
            "Added {} for {}",
            transaction.id, transaction.user
        ));
        self.domain.prepend_transaction(transaction);
        self.dashboard.refresh_transactions(&self.domain);
        self.transactions_dialog.refresh(&self.domain);
        self.modals.pop();
    }

    fn save_config(&mut self) {
        if !self.persist_config {
            return;
        }
        if let Err(e) = self.config.save() {
            log::warn!("could not save config: {:#}", e);
            self.error = Some(format!("Could not save settings: {:#}", e));
        }
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::AllTransactions => self.transactions_dialog.handle_key_event(key),
            Modal::Settings { .. } => self.settings_dialog.handle_key_event(key),
            Modal::NewTransaction => self.form_dialog.handle_key_event(key),
            Modal::Help { .. } => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        modal: &Modal,
    ) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area, theme)?,
            Modal::AllTransactions => self.transactions_dialog.draw(frame, area, theme)?,
            Modal::Settings { .. } => {
                self.settings_dialog
                    .draw_with_config(frame, area, theme, &self.config)?;
            }
            Modal::NewTransaction => self.form_dialog.draw(frame, area, theme)?,
            Modal::Help { .. } => self.help_dialog.draw(frame, area, theme)?,
        }
        Ok(())
    }
}

/// Generate users, transactions and the revenue series
fn mock_domain(rng: &mut StdRng, config: &Config, today: NaiveDate) -> DomainState {
    let users = generate_users(rng, config.user_count);
    let transactions = generate_transactions(rng, &users, config.transaction_count, today);
    let series = generate_series(rng, SERIES_POINTS, SERIES_BASE, SERIES_VARIANCE, today);
    log::info!(
        "generated {} users, {} transactions, {} series points",
        users.len(),
        transactions.len(),
        series.len()
    );
    DomainState::new(users, transactions, series)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // A key press dismisses the last message
        self.status_message = None;
        self.error = None;

        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else {
            self.dashboard.handle_key_event(key)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            log::trace!("action: {}", action);
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Navigation (delegate to DashboardComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextTab | Action::PrevTab | Action::ToggleSidebar => {
                self.dashboard.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Tables
            // ─────────────────────────────────────────────────────────────────
            Action::SortColumn(..)
            | Action::NextPage(_)
            | Action::PrevPage(_)
            | Action::FirstPage(_)
            | Action::LastPage(_) => {
                for table in self.tables_mut() {
                    table.apply(&action);
                }
            }
            Action::ExportTable(target) => self.export(target),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenAllTransactions => {
                if self.modals.top() != Some(&Modal::AllTransactions) {
                    self.modals.push(Modal::AllTransactions);
                }
            }
            Action::OpenSettings => {
                self.settings_dialog.selected_index = 0;
                self.modals.push(Modal::Settings { selected_index: 0 });
            }
            Action::OpenNewTransaction => {
                self.form_dialog.reset();
                self.modals.push(Modal::NewTransaction);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.toggle(Modal::Help { scroll_offset: 0 });
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => {
                if self.modals.top() == Some(&Modal::QuitConfirm) {
                    self.should_quit = true;
                }
            }
            Action::ModalUp | Action::ModalDown => {
                if matches!(self.modals.top(), Some(Modal::Settings { .. })) {
                    self.settings_dialog.update(action)?;
                    if let Some(Modal::Settings { selected_index }) = self.modals.top_mut() {
                        *selected_index = self.settings_dialog.selected_index;
                    }
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Settings
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleDarkMode => {
                self.config.dark_mode = !self.config.dark_mode;
                self.theme = Theme::from_dark_mode(self.config.dark_mode);
                self.save_config();
            }
            Action::ToggleResetOnDataChange => {
                self.config.reset_page_on_data_change = !self.config.reset_page_on_data_change;
                let reset = self.config.reset_page_on_data_change;
                for table in self.tables_mut() {
                    table.engine.set_reset_page_on_data_change(reset);
                }
                self.save_config();
            }
            Action::CyclePageSize => {
                self.config.page_size = self.config.next_page_size();
                let size = self.config.page_size;
                let [_, users, reports] = self.dashboard.tables_mut();
                users.engine.set_page_size(size);
                reports.engine.set_page_size(size);
                self.transactions_dialog.table.engine.set_page_size(size);
                self.save_config();
            }

            // ─────────────────────────────────────────────────────────────────
            // Form
            // ─────────────────────────────────────────────────────────────────
            Action::SubmitTransaction => self.submit_transaction(),
        }

        Ok(None)
    }

    /// The caller passes the App's own `theme`
    fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) -> Result<()> {
        let ctx = DashboardRenderContext {
            domain: &self.domain,
            theme,
            error: self.error.as_deref(),
            status_message: self.status_message.as_deref(),
        };
        draw_dashboard_screen(frame, area, &mut self.dashboard, &ctx)?;

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, theme, &modal)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let config = Config {
            seed: Some(11),
            ..Config::default()
        };
        App::with_config(
            config,
            StdRng::seed_from_u64(11),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        let mut action = app
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
        while let Some(a) = action {
            action = app.update(a).unwrap();
        }
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_mock_data_follows_config() {
        let app = app();
        assert_eq!(app.domain.users.len(), 24);
        assert_eq!(app.domain.transactions.len(), 60);
        assert_eq!(app.domain.series.len(), SERIES_POINTS);
        assert_eq!(app.table(TableTarget::AllTransactions).engine.page_count(), 4);
    }

    #[test]
    fn test_quit_flow() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
        press(&mut app, KeyCode::Char('n'));
        assert!(app.modals.is_empty());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_all_transactions_modal_paging() {
        let mut app = app();
        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.modals.top(), Some(&Modal::AllTransactions));

        press(&mut app, KeyCode::Char('G'));
        let engine = &app.table(TableTarget::AllTransactions).engine;
        assert_eq!(engine.view_state().current_page, 3);
        assert_eq!(engine.showing_range(), Some((46, 60)));

        // Dashboard tables are untouched
        assert_eq!(app.table(TableTarget::Recent).engine.view_state().current_page, 0);
    }

    #[test]
    fn test_sort_toggles_direction_on_second_press() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('3'));
        let state = app.table(TableTarget::Users).engine.view_state().clone();
        assert_eq!(state.sort_key.as_deref(), Some("lastActiveDays"));
        assert_eq!(state.sort_direction, crate::model::sort::SortDirection::Ascending);

        press(&mut app, KeyCode::Char('3'));
        let state = app.table(TableTarget::Users).engine.view_state();
        assert_eq!(state.sort_direction, crate::model::sort::SortDirection::Descending);
    }

    #[test]
    fn test_submit_transaction_updates_tables() {
        let mut app = app();
        press(&mut app, KeyCode::Char('v'));
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(
            app.table(TableTarget::AllTransactions)
                .engine
                .view_state()
                .current_page,
            1
        );

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.modals.top(), Some(&Modal::NewTransaction));
        type_str(&mut app, "Meera");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "meera@example.in");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "999");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, " ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.modals.top(), Some(&Modal::AllTransactions));
        assert_eq!(app.domain.transactions.len(), 61);
        assert_eq!(app.domain.transactions[0].user, "Meera");
        assert_eq!(app.domain.transactions[0].date, app.today);

        let all = &app.table(TableTarget::AllTransactions).engine;
        assert_eq!(all.row_count(), 61);
        assert_eq!(all.view_state().current_page, 0);
        let recent = &app.table(TableTarget::Recent).engine;
        assert_eq!(recent.sorted_rows().next().unwrap().id, app.domain.transactions[0].id);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_invalid_submit_keeps_form_open() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.modals.top(), Some(&Modal::NewTransaction));
        assert_eq!(app.domain.transactions.len(), 60);
        assert_eq!(app.form_dialog.errors.len(), 4);
    }

    #[test]
    fn test_settings_apply_to_live_tables() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));

        // Dark mode
        press(&mut app, KeyCode::Enter);
        assert!(!app.config.dark_mode);
        assert!(!app.theme.dark);

        // Reset on data change
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(
            app.modals.top(),
            Some(&Modal::Settings { selected_index: 1 })
        );
        press(&mut app, KeyCode::Enter);
        assert!(!app.config.reset_page_on_data_change);

        // Page size 15 -> 25
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.config.page_size, 25);
        assert_eq!(
            app.table(TableTarget::AllTransactions)
                .engine
                .view_state()
                .page_size,
            25
        );
        assert_eq!(app.table(TableTarget::Users).engine.view_state().page_size, 25);
        assert_eq!(app.table(TableTarget::Recent).engine.view_state().page_size, 5);
    }

    #[test]
    fn test_help_toggles() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(matches!(app.modals.top(), Some(Modal::Help { .. })));
        press(&mut app, KeyCode::Char('?'));
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_draw_with_modal() {
        let mut app = app();
        press(&mut app, KeyCode::Char('v'));
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|frame| {
                let theme = app.theme;
                app.draw(frame, frame.area(), &theme).unwrap();
            })
            .unwrap();
        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(rendered.contains("All Transactions"));
        assert!(rendered.contains("Showing 1-15 of 60"));
    }
}
