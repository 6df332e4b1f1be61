//! Table engine - sortable, paginated view over a row sequence
//!
//! The engine owns the view state of one table (sort key, direction, page,
//! page size) and derives the visible slice from it. Rows are shared through
//! `Rc<[Row]>`; the pointer doubles as the row sequence identity used by
//! the page-reset policy.

use super::sort::{self, SortDirection};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

// ═══════════════════════════════════════════════════════════════════════════════
// Values, Rows, Cells
// ═══════════════════════════════════════════════════════════════════════════════

/// A single field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// One record of tabular data
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: String,
    fields: BTreeMap<String, Value>,
}

impl Row {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Colour hint for a rendered cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Success,
    Warning,
    Danger,
}

/// Displayable representation of one cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Neutral,
        }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Columns
// ═══════════════════════════════════════════════════════════════════════════════

/// Per-column formatting strategy
pub type CellFormatter = Rc<dyn Fn(&Value, &Row) -> Cell>;

/// Column definition
///
/// Keys must be unique within a table.
#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub label: String,
    formatter: Option<CellFormatter>,
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            formatter: None,
        }
    }

    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&Value, &Row) -> Cell + 'static,
    {
        self.formatter = Some(Rc::new(formatter));
        self
    }

    /// Render this column's cell for `row`
    pub fn render(&self, row: &Row) -> Cell {
        match (row.get(&self.key), &self.formatter) {
            (Some(value), Some(formatter)) => formatter(value, row),
            (Some(value), None) => Cell::plain(value.to_string()),
            (None, _) => Cell::default(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// View State
// ═══════════════════════════════════════════════════════════════════════════════

/// Mutable sort/pagination state of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub sort_key: Option<String>,
    pub sort_direction: SortDirection,
    pub current_page: usize,
    pub page_size: usize,
}

/// Construction options for a `TableEngine`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub page_size: usize,
    /// Reset to the first page when the row sequence is replaced
    pub reset_page_on_data_change: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            page_size: 10,
            reset_page_on_data_change: true,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Table Engine
// ═══════════════════════════════════════════════════════════════════════════════

/// Sorted, paginated view over a shared row sequence
pub struct TableEngine {
    rows: Rc<[Row]>,
    columns: Vec<Column>,
    state: ViewState,
    reset_page_on_data_change: bool,
    /// Row indices in display order for the current sort
    order: Vec<usize>,
}

impl TableEngine {
    /// Create an engine with default view state.
    ///
    /// A page size of zero is clamped to one.
    pub fn new(rows: Rc<[Row]>, columns: Vec<Column>, options: TableOptions) -> Self {
        let order = (0..rows.len()).collect();
        Self {
            rows,
            columns,
            state: ViewState {
                sort_key: None,
                sort_direction: SortDirection::Ascending,
                current_page: 0,
                page_size: options.page_size.max(1),
            },
            reset_page_on_data_change: options.reset_page_on_data_change,
            order,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Sort by `key`, toggling the direction if it is already the sort key
    pub fn set_sort(&mut self, key: &str) {
        if self.state.sort_key.as_deref() == Some(key) {
            self.state.sort_direction = self.state.sort_direction.toggle();
        } else {
            self.state.sort_key = Some(key.to_string());
            self.state.sort_direction = SortDirection::Ascending;
        }
        self.state.current_page = 0;
        self.resort();
        log::debug!(
            "table sort: key={} direction={:?}",
            key,
            self.state.sort_direction
        );
    }

    /// Jump to page `page`, clamped into the valid range
    pub fn set_page(&mut self, page: i64) {
        let last = self.last_page_index() as i64;
        self.state.current_page = page.clamp(0, last) as usize;
    }

    /// Replace the page size (zero clamps to one) and go back to the first page
    pub fn set_page_size(&mut self, size: usize) {
        if size == 0 {
            log::warn!("table page size 0 requested, using 1");
        }
        self.state.page_size = size.max(1);
        self.state.current_page = 0;
    }

    /// Replace the row sequence.
    ///
    /// Passing the same `Rc` is a no-op. A new sequence either resets to the
    /// first page or keeps the current page clamped into the new range,
    /// depending on `reset_page_on_data_change`.
    pub fn set_rows(&mut self, rows: Rc<[Row]>) {
        if Rc::ptr_eq(&self.rows, &rows) {
            return;
        }
        self.rows = rows;
        self.resort();
        if self.reset_page_on_data_change {
            self.state.current_page = 0;
        } else {
            self.state.current_page = self.state.current_page.min(self.last_page_index());
        }
        log::debug!(
            "table rows replaced: count={} page={}",
            self.rows.len(),
            self.state.current_page
        );
    }

    pub fn set_reset_page_on_data_change(&mut self, reset: bool) {
        self.reset_page_on_data_change = reset;
    }

    pub fn next_page(&mut self) {
        self.set_page(self.state.current_page as i64 + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.state.current_page as i64 - 1);
    }

    pub fn first_page(&mut self) {
        self.state.current_page = 0;
    }

    pub fn last_page(&mut self) {
        self.state.current_page = self.last_page_index();
    }

    fn resort(&mut self) {
        self.order = match &self.state.sort_key {
            Some(key) => sort::sorted_order(&self.rows, key, self.state.sort_direction),
            None => (0..self.rows.len()).collect(),
        };
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived View
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of pages; an empty table still has one (empty) page
    pub fn page_count(&self) -> usize {
        if self.rows.is_empty() {
            1
        } else {
            self.rows.len().div_ceil(self.state.page_size)
        }
    }

    fn last_page_index(&self) -> usize {
        self.page_count() - 1
    }

    /// All rows in sorted order
    pub fn sorted_rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.order.iter().map(move |&i| &self.rows[i])
    }

    /// Rows on the current page, in sorted order
    pub fn visible_rows(&self) -> Vec<&Row> {
        let start = (self.state.current_page * self.state.page_size).min(self.order.len());
        let end = (start + self.state.page_size).min(self.order.len());
        self.order[start..end].iter().map(|&i| &self.rows[i]).collect()
    }

    /// Formatted cells of the visible rows, one `Vec` per row in column order
    pub fn materialize(&self) -> Vec<Vec<Cell>> {
        self.visible_rows()
            .into_iter()
            .map(|row| self.columns.iter().map(|col| col.render(row)).collect())
            .collect()
    }

    /// 1-based inclusive range of rows on the current page, `None` when empty
    pub fn showing_range(&self) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        let start = self.state.current_page * self.state.page_size;
        let end = (start + self.state.page_size).min(self.rows.len());
        Some((start + 1, end))
    }

    pub fn can_prev(&self) -> bool {
        self.state.current_page > 0
    }

    pub fn can_next(&self) -> bool {
        self.state.current_page < self.last_page_index()
    }

    /// Arrow to show next to a column header, if it is the sort column
    pub fn sort_indicator(&self, key: &str) -> Option<&'static str> {
        match &self.state.sort_key {
            Some(sort_key) if sort_key == key => Some(self.state.sort_direction.arrow()),
            _ => None,
        }
    }

    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v_rows(values: &[f64]) -> Rc<[Row]> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Row::new((i + 1).to_string()).with("v", *v))
            .collect()
    }

    fn engine(rows: Rc<[Row]>, page_size: usize) -> TableEngine {
        TableEngine::new(
            rows,
            vec![Column::new("id", "ID"), Column::new("v", "Value")],
            TableOptions {
                page_size,
                ..TableOptions::default()
            },
        )
    }

    fn visible_ids(engine: &TableEngine) -> Vec<String> {
        engine.visible_rows().iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_default_view_state() {
        let engine = engine(v_rows(&[1.0, 2.0]), 10);
        let state = engine.view_state();
        assert_eq!(state.sort_key, None);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
        assert_eq!(state.current_page, 0);
        assert_eq!(state.page_size, 10);
    }

    #[test]
    fn test_sort_ties_keep_input_order_across_pages() {
        let mut engine = engine(v_rows(&[5.0, 3.0, 3.0]), 2);
        engine.set_sort("v");
        assert_eq!(visible_ids(&engine), vec!["2", "3"]);
        engine.set_page(1);
        assert_eq!(visible_ids(&engine), vec!["1"]);
    }

    #[test]
    fn test_set_sort_toggles_and_resets_page() {
        let mut engine = engine(v_rows(&[1.0, 2.0, 3.0, 4.0]), 2);
        engine.set_sort("v");
        engine.set_page(1);
        engine.set_sort("v");
        assert_eq!(engine.view_state().sort_direction, SortDirection::Descending);
        assert_eq!(engine.view_state().current_page, 0);
        assert_eq!(visible_ids(&engine), vec!["4", "3"]);

        engine.set_sort("id");
        assert_eq!(engine.view_state().sort_key.as_deref(), Some("id"));
        assert_eq!(engine.view_state().sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_unknown_sort_key_is_inert() {
        let mut engine = engine(v_rows(&[3.0, 1.0, 2.0]), 10);
        engine.set_sort("nope");
        assert_eq!(visible_ids(&engine), vec!["1", "2", "3"]);
        assert_eq!(engine.sort_indicator("nope"), Some("▲"));
        assert_eq!(engine.sort_indicator("v"), None);
    }

    #[test]
    fn test_empty_table_has_one_page() {
        let mut engine = engine(v_rows(&[]), 5);
        assert_eq!(engine.page_count(), 1);
        assert!(engine.visible_rows().is_empty());
        assert!(!engine.can_prev());
        assert!(!engine.can_next());
        assert_eq!(engine.showing_range(), None);
        engine.set_page(3);
        assert_eq!(engine.view_state().current_page, 0);
    }

    #[test]
    fn test_set_page_clamps() {
        let values: Vec<f64> = (0..23).map(f64::from).collect();
        let mut engine = engine(v_rows(&values), 10);
        assert_eq!(engine.page_count(), 3);
        engine.set_page(5);
        assert_eq!(engine.view_state().current_page, 2);
        assert_eq!(engine.visible_rows().len(), 3);
        assert_eq!(engine.showing_range(), Some((21, 23)));
        assert!(!engine.can_next());
        engine.set_page(-4);
        assert_eq!(engine.view_state().current_page, 0);
        assert!(!engine.can_prev());
        assert!(engine.can_next());
    }

    #[test]
    fn test_page_navigation() {
        let values: Vec<f64> = (0..7).map(f64::from).collect();
        let mut engine = engine(v_rows(&values), 3);
        engine.next_page();
        engine.next_page();
        engine.next_page();
        assert_eq!(engine.view_state().current_page, 2);
        engine.prev_page();
        assert_eq!(engine.view_state().current_page, 1);
        engine.first_page();
        assert_eq!(engine.view_state().current_page, 0);
        engine.prev_page();
        assert_eq!(engine.view_state().current_page, 0);
        engine.last_page();
        assert_eq!(engine.view_state().current_page, 2);
    }

    #[test]
    fn test_set_page_size_resets_page_and_clamps_zero() {
        let values: Vec<f64> = (0..10).map(f64::from).collect();
        let mut engine = engine(v_rows(&values), 3);
        engine.set_page(2);
        engine.set_page_size(4);
        assert_eq!(engine.view_state().current_page, 0);
        assert_eq!(engine.page_count(), 3);
        engine.set_page_size(0);
        assert_eq!(engine.view_state().page_size, 1);
        assert_eq!(engine.page_count(), 10);
    }

    #[test]
    fn test_set_rows_resets_page_when_enabled() {
        let values: Vec<f64> = (0..10).map(f64::from).collect();
        let mut engine = engine(v_rows(&values), 3);
        engine.set_page(2);
        engine.set_rows(v_rows(&values));
        assert_eq!(engine.view_state().current_page, 0);
    }

    #[test]
    fn test_set_rows_keeps_clamped_page_when_disabled() {
        let values: Vec<f64> = (0..10).map(f64::from).collect();
        let mut engine = engine(v_rows(&values), 3);
        engine.set_reset_page_on_data_change(false);
        engine.set_page(3);
        engine.set_rows(v_rows(&values));
        assert_eq!(engine.view_state().current_page, 3);
        engine.set_rows(v_rows(&values[..4]));
        assert_eq!(engine.view_state().current_page, 1);
    }

    #[test]
    fn test_set_rows_same_identity_is_noop() {
        let values: Vec<f64> = (0..10).map(f64::from).collect();
        let rows = v_rows(&values);
        let mut engine = engine(rows.clone(), 3);
        engine.set_page(2);
        engine.set_rows(rows);
        assert_eq!(engine.view_state().current_page, 2);
    }

    #[test]
    fn test_set_rows_keeps_sort() {
        let mut engine = engine(v_rows(&[2.0, 1.0]), 10);
        engine.set_sort("v");
        engine.set_sort("v");
        engine.set_rows(v_rows(&[1.0, 3.0, 2.0]));
        assert_eq!(visible_ids(&engine), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_input_rows_untouched_by_sort() {
        let rows = v_rows(&[3.0, 1.0, 2.0]);
        let mut engine = engine(rows.clone(), 10);
        engine.set_sort("v");
        let input_ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(input_ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_materialize_uses_formatter_with_identity_fallback() {
        let rows: Rc<[Row]> = vec![
            Row::new("a").with("amount", 1200.0).with("status", "failed"),
            Row::new("b").with("amount", 50.0),
        ]
        .into();
        let columns = vec![
            Column::new("amount", "Amount"),
            Column::new("status", "Status").with_formatter(|value, _row| {
                Cell::toned(value.to_string().to_uppercase(), Tone::Danger)
            }),
        ];
        let engine = TableEngine::new(rows, columns, TableOptions::default());
        let cells = engine.materialize();
        assert_eq!(cells[0][0], Cell::plain("1200"));
        assert_eq!(cells[0][1], Cell::toned("FAILED", Tone::Danger));
        assert_eq!(cells[1][1], Cell::default());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Number(5.0).to_string(), "5");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::from("x").to_string(), "x");
    }

    fn any_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            (-50i64..50).prop_map(Value::from),
            "[a-cA-C]{0,3}".prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
        ]
    }

    fn any_rows() -> impl Strategy<Value = Vec<Row>> {
        prop::collection::vec(any_value(), 0..40).prop_map(|values| {
            values
                .into_iter()
                .enumerate()
                .map(|(i, v)| Row::new(i.to_string()).with("v", v))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_pages_cover_all_rows(rows in any_rows(), page_size in 1usize..12) {
            let mut engine = engine(rows.into(), page_size);
            engine.set_sort("v");
            let mut total = 0;
            for page in 0..engine.page_count() {
                engine.set_page(page as i64);
                total += engine.visible_rows().len();
            }
            prop_assert_eq!(total, engine.row_count());
        }

        #[test]
        fn prop_set_page_stays_in_range(rows in any_rows(), page_size in 1usize..12, page in any::<i64>()) {
            let mut engine = engine(rows.into(), page_size);
            engine.set_page(page);
            prop_assert!(engine.view_state().current_page < engine.page_count());
        }

        #[test]
        fn prop_ties_keep_input_order(values in prop::collection::vec(0i64..4, 0..40), descending in any::<bool>()) {
            let rows: Vec<Row> = values
                .iter()
                .enumerate()
                .map(|(i, v)| Row::new(i.to_string()).with("v", *v))
                .collect();
            let mut engine = engine(rows.into(), 100);
            engine.set_sort("v");
            if descending {
                engine.set_sort("v");
            }
            let sorted: Vec<(i64, usize)> = engine
                .sorted_rows()
                .map(|r| {
                    let v = r.get("v").and_then(Value::as_number).unwrap_or_default() as i64;
                    (v, r.id.parse().unwrap_or_default())
                })
                .collect();
            for pair in sorted.windows(2) {
                if pair[0].0 == pair[1].0 {
                    prop_assert!(pair[0].1 < pair[1].1);
                }
            }
        }

        #[test]
        fn prop_double_toggle_restores_order(rows in any_rows()) {
            let mut engine = engine(rows.into(), 100);
            engine.set_sort("v");
            let once: Vec<String> = engine.sorted_rows().map(|r| r.id.clone()).collect();
            engine.set_sort("v");
            engine.set_sort("v");
            let again: Vec<String> = engine.sorted_rows().map(|r| r.id.clone()).collect();
            prop_assert_eq!(once, again);
        }

        #[test]
        fn prop_sorting_sorted_input_is_idempotent(values in prop::collection::vec(-100i64..100, 0..40)) {
            let mut sorted = values.clone();
            sorted.sort();
            let rows: Vec<Row> = sorted
                .iter()
                .enumerate()
                .map(|(i, v)| Row::new(i.to_string()).with("v", *v))
                .collect();
            let mut engine = engine(rows.clone().into(), 100);
            engine.set_sort("v");
            let ids: Vec<String> = engine.sorted_rows().map(|r| r.id.clone()).collect();
            let expected: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
            prop_assert_eq!(ids, expected);
        }
    }
}
