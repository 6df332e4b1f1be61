//! New transaction form state and validation

use super::sample_data::{Transaction, TransactionStatus};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());

/// Form fields in tab order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    #[default]
    Name,
    Email,
    Amount,
    Agree,
}

impl FormField {
    pub fn all() -> [FormField; 4] {
        [
            FormField::Name,
            FormField::Email,
            FormField::Amount,
            FormField::Agree,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Amount => "Amount",
            FormField::Agree => "Accept terms",
        }
    }

    pub fn next(self) -> FormField {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Amount,
            FormField::Amount => FormField::Agree,
            FormField::Agree => FormField::Name,
        }
    }

    pub fn prev(self) -> FormField {
        match self {
            FormField::Name => FormField::Agree,
            FormField::Email => FormField::Name,
            FormField::Amount => FormField::Email,
            FormField::Agree => FormField::Amount,
        }
    }
}

pub type FormErrors = BTreeMap<FormField, &'static str>;

/// Raw form input, as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionForm {
    pub name: String,
    pub email: String,
    pub amount: String,
    pub agree: bool,
}

impl TransactionForm {
    /// Per-field validation messages; empty when the form is valid
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        if self.name.trim().is_empty() {
            errors.insert(FormField::Name, "Name is required");
        }
        if self.email.is_empty() || !EMAIL_REGEX.is_match(&self.email) {
            errors.insert(FormField::Email, "Valid email required");
        }
        match self.parsed_amount() {
            Some(amount) if amount > 0.0 => {}
            _ => {
                errors.insert(FormField::Amount, "Amount should be greater than 0");
            }
        }
        if !self.agree {
            errors.insert(FormField::Agree, "You must accept the terms");
        }
        errors
    }

    fn parsed_amount(&self) -> Option<f64> {
        self.amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
    }

    /// Build a pending transaction dated `today` if the form is valid
    pub fn submit(&self, id: String, today: NaiveDate) -> Result<Transaction, FormErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Transaction {
            id,
            user: self.name.trim().to_string(),
            amount: self.parsed_amount().unwrap_or_default(),
            date: today,
            status: TransactionStatus::Pending,
        })
    }

    /// Append a typed character to a text field
    pub fn input(&mut self, field: FormField, c: char) {
        match field {
            FormField::Name => self.name.push(c),
            FormField::Email => self.email.push(c),
            FormField::Amount if c.is_ascii_digit() || c == '.' => self.amount.push(c),
            FormField::Amount => {}
            FormField::Agree if c == ' ' => self.agree = !self.agree,
            FormField::Agree => {}
        }
    }

    pub fn backspace(&mut self, field: FormField) {
        match field {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Email => {
                self.email.pop();
            }
            FormField::Amount => {
                self.amount.pop();
            }
            FormField::Agree => {}
        }
    }
}
