//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod dashboard;
pub mod form_dialog;
pub mod help_dialog;
pub mod layout;
pub mod quit_dialog;
pub mod settings_dialog;
pub mod table;
pub mod transactions_dialog;

pub use dashboard::{draw_dashboard_screen, DashboardComponent, DashboardRenderContext};
pub use form_dialog::FormDialog;
pub use help_dialog::HelpDialog;
pub use layout::centered_popup;
pub use quit_dialog::QuitDialog;
pub use settings_dialog::SettingsDialog;
pub use table::DataTable;
pub use transactions_dialog::TransactionsDialog;
