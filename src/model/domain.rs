//! Domain state - dashboard data separate from UI concerns

use super::sample_data::{SeriesPoint, Transaction, TransactionStatus, User};
use super::table::{Cell, Column, Row, Tone};
use std::rc::Rc;

/// Users active within this many days count as active
pub const ACTIVE_DAYS: u32 = 7;

/// Headline numbers for the KPI cards
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    pub revenue: f64,
    pub transactions: usize,
    pub active_users: usize,
    pub failure_rate: f64,
    /// Percent change of the last 7 series points against the 7 before
    pub revenue_delta: f64,
}

/// Domain state containing all dashboard data
#[derive(Debug)]
pub struct DomainState {
    pub users: Vec<User>,
    pub transactions: Vec<Transaction>,
    pub series: Vec<SeriesPoint>,

    user_rows: Rc<[Row]>,
    transaction_rows: Rc<[Row]>,
    series_rows: Rc<[Row]>,
}

impl DomainState {
    pub fn new(users: Vec<User>, transactions: Vec<Transaction>, series: Vec<SeriesPoint>) -> Self {
        let user_rows = users.iter().map(User::to_row).collect();
        let transaction_rows = transactions.iter().map(Transaction::to_row).collect();
        let series_rows = series.iter().map(SeriesPoint::to_row).collect();
        Self {
            users,
            transactions,
            series,
            user_rows,
            transaction_rows,
            series_rows,
        }
    }

    /// Add a transaction at the head of the list.
    ///
    /// The transaction rows are rebuilt, so tables holding the old rows see a
    /// new row sequence.
    pub fn prepend_transaction(&mut self, transaction: Transaction) {
        log::info!(
            "new transaction {} for {} ({})",
            transaction.id,
            transaction.user,
            transaction.amount
        );
        self.transactions.insert(0, transaction);
        self.rebuild_transaction_rows();
    }

    fn rebuild_transaction_rows(&mut self) {
        self.transaction_rows = self.transactions.iter().map(Transaction::to_row).collect();
    }

    pub fn user_rows(&self) -> Rc<[Row]> {
        Rc::clone(&self.user_rows)
    }

    pub fn transaction_rows(&self) -> Rc<[Row]> {
        Rc::clone(&self.transaction_rows)
    }

    /// The first `count` transactions, as shown in the recent panel
    pub fn recent_transaction_rows(&self, count: usize) -> Rc<[Row]> {
        let end = count.min(self.transaction_rows.len());
        self.transaction_rows[..end].into()
    }

    pub fn series_rows(&self) -> Rc<[Row]> {
        Rc::clone(&self.series_rows)
    }

    /// Users ordered by most recent activity, at most `limit`
    pub fn activity_feed(&self, limit: usize) -> Vec<&User> {
        let mut users: Vec<&User> = self.users.iter().collect();
        users.sort_by_key(|u| u.last_active_days);
        users.truncate(limit);
        users
    }

    pub fn kpis(&self) -> Kpis {
        let revenue = self
            .transactions
            .iter()
            .filter(|t| t.status == TransactionStatus::Completed)
            .map(|t| t.amount)
            .sum();
        let failed = self
            .transactions
            .iter()
            .filter(|t| t.status == TransactionStatus::Failed)
            .count();
        let failure_rate = if self.transactions.is_empty() {
            0.0
        } else {
            failed as f64 / self.transactions.len() as f64 * 100.0
        };

        Kpis {
            revenue,
            transactions: self.transactions.len(),
            active_users: self
                .users
                .iter()
                .filter(|u| u.last_active_days < ACTIVE_DAYS)
                .count(),
            failure_rate,
            revenue_delta: series_delta(&self.series, 7),
        }
    }
}

/// Percent change between the sums of the last `window` points and the
/// `window` points before them. Zero when there is not enough data.
pub fn series_delta(series: &[SeriesPoint], window: usize) -> f64 {
    if window == 0 || series.len() < window * 2 {
        return 0.0;
    }
    let split = series.len() - window;
    let current: f64 = series[split..].iter().map(|p| p.value).sum();
    let previous: f64 = series[split - window..split].iter().map(|p| p.value).sum();
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

/// Format an amount as INR with Indian digit grouping, e.g. `₹12,34,567.00`
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let paise = (amount.abs() * 100.0).round() as u64;
    let rupees = (paise / 100).to_string();
    let fraction = paise % 100;

    let grouped = if rupees.len() <= 3 {
        rupees
    } else {
        let (head, tail) = rupees.split_at(rupees.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    format!("{}₹{}.{:02}", sign, grouped, fraction)
}

impl Default for DomainState {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Column Definitions
// ═══════════════════════════════════════════════════════════════════════════════

fn status_tone(status: &str) -> Tone {
    match status {
        "completed" => Tone::Success,
        "pending" => Tone::Warning,
        _ => Tone::Danger,
    }
}

pub fn transaction_columns() -> Vec<Column> {
    vec![
        Column::new("date", "Date"),
        Column::new("user", "User"),
        Column::new("amount", "Amount").with_formatter(|value, _| match value.as_number() {
            Some(amount) => Cell::plain(format_currency(amount)),
            None => Cell::plain(value.to_string()),
        }),
        Column::new("status", "Status").with_formatter(|value, _| {
            let status = value.to_string();
            let tone = status_tone(&status);
            Cell::toned(status, tone)
        }),
    ]
}

pub fn user_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name"),
        Column::new("role", "Role"),
        Column::new("lastActiveDays", "Last Active").with_formatter(|value, _| {
            match value.as_number() {
                Some(days) if days < f64::from(ACTIVE_DAYS) => {
                    Cell::toned(format!("{} days ago", days), Tone::Success)
                }
                Some(days) => Cell::plain(format!("{} days ago", days)),
                None => Cell::plain(value.to_string()),
            }
        }),
    ]
}

pub fn series_columns() -> Vec<Column> {
    vec![
        Column::new("date", "Date"),
        Column::new("value", "Revenue").with_formatter(|value, _| match value.as_number() {
            Some(amount) => Cell::plain(format_currency(amount)),
            None => Cell::plain(value.to_string()),
        }),
    ]
}
