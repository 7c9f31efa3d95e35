//! Recurring-charge heuristic: merchants billed in several distinct closed months.

use chrono::NaiveDate;
use guardrail_core::{month_start, CategorizedTransaction};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

/// Distinct charged months needed to count as recurring
pub const RECURRING_MIN_MONTHS: usize = 3;
/// Maximum merchants reported
pub const RECURRING_TOP_N: usize = 12;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringMerchant {
    pub merchant: String,
    pub category: String,
    pub months_charged: usize,
    /// Mean of the per-month charge totals
    pub avg_monthly_charge: f64,
}

/// Uppercase and collapse whitespace runs to a single space
pub fn normalize_merchant(description: &str) -> String {
    WHITESPACE
        .replace_all(&description.to_uppercase(), " ")
        .into_owned()
}

/// Scan closed-month expenses. Results are sorted by months charged (descending),
/// ties by merchant then category.
pub fn detect_recurring(closed: &[&CategorizedTransaction]) -> Vec<RecurringMerchant> {
    // (merchant, category) -> month -> |amount| summed within the month
    let mut charges: BTreeMap<(String, String), BTreeMap<NaiveDate, f64>> = BTreeMap::new();

    for t in closed.iter().filter(|t| t.txn.is_expense()) {
        let key = (normalize_merchant(&t.txn.description), t.category.clone());
        *charges
            .entry(key)
            .or_default()
            .entry(month_start(t.txn.date))
            .or_insert(0.0) += t.txn.abs_amount();
    }

    let mut recurring: Vec<RecurringMerchant> = charges
        .into_iter()
        .filter(|(_, months)| months.len() >= RECURRING_MIN_MONTHS)
        .map(|((merchant, category), months)| {
            let total: f64 = months.values().sum();
            RecurringMerchant {
                merchant,
                category,
                months_charged: months.len(),
                avg_monthly_charge: total / months.len() as f64,
            }
        })
        .collect();

    recurring.sort_by(|a, b| b.months_charged.cmp(&a.months_charged));
    recurring.truncate(RECURRING_TOP_N);

    debug!(found = recurring.len(), "recurring merchants detected");
    recurring
}
