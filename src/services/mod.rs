//! Side-effecting services
//!
//! - CSV export of table contents

pub mod export;

pub use export::export_table;
