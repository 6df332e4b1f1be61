//! Action enum - All possible application actions
//!
//! Components emit Actions in response to key events, and the App applies
//! them to state.

use std::fmt;

/// Which table an action targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableTarget {
    /// Recent transactions panel on the dashboard
    Recent,
    /// Full transaction list modal
    AllTransactions,
    Users,
    Reports,
}

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextTab,
    PrevTab,
    ToggleSidebar,

    // ─────────────────────────────────────────────────────────────────────────
    // Tables
    // ─────────────────────────────────────────────────────────────────────────
    /// Sort by the column at this index (toggles direction if already sorted)
    SortColumn(TableTarget, usize),
    NextPage(TableTarget),
    PrevPage(TableTarget),
    FirstPage(TableTarget),
    LastPage(TableTarget),
    /// Write the table's sorted rows to a CSV file
    ExportTable(TableTarget),

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenAllTransactions,
    OpenSettings,
    OpenNewTransaction,
    OpenHelp,
    CloseModal,
    ConfirmModal,
    ModalUp,
    ModalDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────────
    ToggleDarkMode,
    ToggleResetOnDataChange,
    CyclePageSize,

    // ─────────────────────────────────────────────────────────────────────────
    // Form
    // ─────────────────────────────────────────────────────────────────────────
    SubmitTransaction,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::NextTab => write!(f, "NextTab"),
            Action::PrevTab => write!(f, "PrevTab"),
            Action::ToggleSidebar => write!(f, "ToggleSidebar"),
            Action::SortColumn(t, i) => write!(f, "SortColumn({:?}, {})", t, i),
            Action::NextPage(t) => write!(f, "NextPage({:?})", t),
            Action::PrevPage(t) => write!(f, "PrevPage({:?})", t),
            Action::FirstPage(t) => write!(f, "FirstPage({:?})", t),
            Action::LastPage(t) => write!(f, "LastPage({:?})", t),
            Action::ExportTable(t) => write!(f, "ExportTable({:?})", t),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenAllTransactions => write!(f, "OpenAllTransactions"),
            Action::OpenSettings => write!(f, "OpenSettings"),
            Action::OpenNewTransaction => write!(f, "OpenNewTransaction"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::ToggleDarkMode => write!(f, "ToggleDarkMode"),
            Action::ToggleResetOnDataChange => write!(f, "ToggleResetOnDataChange"),
            Action::CyclePageSize => write!(f, "CyclePageSize"),
            Action::SubmitTransaction => write!(f, "SubmitTransaction"),
        }
    }
}
