//! Canonical transaction records consumed by the KPI engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A normalized bank transaction, as produced by ingestion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Booking date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Positive = income, negative = expense, zero = neither
    pub amount: f64,
    /// Free-text description / merchant line
    pub description: String,
    /// Currency code, "N/A" when the source file has none
    pub currency: String,
    /// Account label, "N/A" when the source file has none
    pub account: String,
    /// Source identifier (file name)
    pub source: String,
}

impl Transaction {
    /// Create a transaction with "N/A" currency and account
    pub fn new(
        date: NaiveDate,
        amount: f64,
        description: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            description: description.into(),
            currency: "N/A".to_string(),
            account: "N/A".to_string(),
            source: source.into(),
        }
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

/// A transaction with the category assigned by the rule table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorizedTransaction {
    #[serde(flatten)]
    pub txn: Transaction,
    pub category: String,
}

impl CategorizedTransaction {
    pub fn new(txn: Transaction, category: impl Into<String>) -> Self {
        Self {
            txn,
            category: category.into(),
        }
    }
}
