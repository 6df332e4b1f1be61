//! Mock data for the dashboard
//!
//! Users, transactions and a daily revenue series. Every generator takes the
//! RNG explicitly so tests can seed it.

use super::table::{Row, Value};
use chrono::{Days, NaiveDate};
use rand::Rng;

const USER_NAMES: [&str; 12] = [
    "Aarav", "Vihaan", "Arjun", "Ayaan", "Vivaan", "Aditya", "Sai", "Ishaan", "Karan", "Rohan",
    "Siddharth", "Nikhil",
];

const ROLES: [&str; 5] = ["Admin", "Manager", "Developer", "Designer", "QA"];

const ID_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random id of the form `prefix_xxxxxxx`
pub fn uid<R: Rng>(rng: &mut R, prefix: &str) -> String {
    let suffix: String = (0..7)
        .map(|_| ID_CHARSET[rng.random_range(0..ID_CHARSET.len())] as char)
        .collect();
    format!("{}_{}", prefix, suffix)
}

/// Status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
        }
    }

    fn cycle(index: usize) -> Self {
        match index % 3 {
            0 => TransactionStatus::Completed,
            1 => TransactionStatus::Pending,
            _ => TransactionStatus::Failed,
        }
    }
}

/// A dashboard user
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: String,
    pub last_active_days: u32,
}

impl User {
    pub fn to_row(&self) -> Row {
        Row::new(&self.id)
            .with("name", self.name.as_str())
            .with("role", self.role.as_str())
            .with("lastActiveDays", self.last_active_days)
    }

    /// Two-letter initials used in the activity feed
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

/// A payment transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub user: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn to_row(&self) -> Row {
        Row::new(&self.id)
            .with("date", self.date.format("%Y-%m-%d").to_string())
            .with("user", self.user.as_str())
            .with("amount", self.amount)
            .with("status", self.status.as_str())
    }
}

/// One point of the daily revenue series
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl SeriesPoint {
    pub fn to_row(&self) -> Row {
        let date = self.date.format("%Y-%m-%d").to_string();
        Row::new(&date)
            .with("date", date.as_str())
            .with("value", Value::Number(self.value))
    }
}

pub fn generate_users<R: Rng>(rng: &mut R, count: usize) -> Vec<User> {
    (0..count)
        .map(|i| User {
            id: uid(rng, "user"),
            name: USER_NAMES[i % USER_NAMES.len()].to_string(),
            role: ROLES[i % ROLES.len()].to_string(),
            last_active_days: rng.random_range(0..=30),
        })
        .collect()
}

/// Transactions dated one per day going back from `today`
pub fn generate_transactions<R: Rng>(
    rng: &mut R,
    users: &[User],
    count: usize,
    today: NaiveDate,
) -> Vec<Transaction> {
    (0..count)
        .map(|i| Transaction {
            id: uid(rng, "txn"),
            user: if users.is_empty() {
                "unknown".to_string()
            } else {
                users[i % users.len()].name.clone()
            },
            amount: f64::from(rng.random_range(500u32..=15500)),
            date: today
                .checked_sub_days(Days::new(i as u64))
                .unwrap_or(today),
            status: TransactionStatus::cycle(i),
        })
        .collect()
}

/// Daily series of `points` values ending the day before `today`
pub fn generate_series<R: Rng>(
    rng: &mut R,
    points: usize,
    base: f64,
    variance: f64,
    today: NaiveDate,
) -> Vec<SeriesPoint> {
    (0..points)
        .map(|i| {
            let jitter = 1.0 + (rng.random::<f64>() - 0.5) * variance * 2.0;
            let value = (base * jitter + rng.random::<f64>() * base * variance).round();
            SeriesPoint {
                date: today
                    .checked_sub_days(Days::new((points - i) as u64))
                    .unwrap_or(today),
                value,
            }
        })
        .collect()
}
