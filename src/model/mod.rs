//! Model layer - state and pure logic
//!
//! - `TableEngine` - sortable, paginated view over rows
//! - `DomainState` - dashboard data (users, transactions, revenue series)
//! - `ModalStack` - modal overlay management

pub mod domain;
pub mod form;
pub mod modal;
pub mod sample_data;
pub mod sort;
pub mod table;
pub mod ui;

// Re-export commonly used types
pub use domain::DomainState;
pub use form::{FormField, TransactionForm};
pub use table::{Cell, TableEngine, TableOptions};
pub use ui::{Tab, Theme};
