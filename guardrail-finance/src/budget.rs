//! Current-month spend against per-category budget ceilings.

use guardrail_core::{BudgetSettings, CategorizedTransaction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::alerts::Alert;

/// Guards the used ratio against zero budgets
pub const BUDGET_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "ALERT")]
    Alert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub category: String,
    pub budget: f64,
    pub spent: f64,
    pub used_pct: f64,
    pub status: BudgetStatus,
}

/// Expense category with current-month spend but no configured budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnbudgetedSpend {
    pub category: String,
    pub spent: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetReport {
    pub entries: Vec<BudgetEntry>,
    pub alerts: Vec<Alert>,
    pub unbudgeted: Vec<UnbudgetedSpend>,
}

pub struct BudgetTracker<'s> {
    settings: &'s BudgetSettings,
}

impl<'s> BudgetTracker<'s> {
    pub fn new(settings: &'s BudgetSettings) -> Self {
        Self { settings }
    }

    /// Evaluate every budgeted category in configured order
    pub fn track(&self, current: &[&CategorizedTransaction]) -> BudgetReport {
        let spend = spend_by_category(current);
        let threshold = self.settings.guardrails.overspend_threshold;

        let mut report = BudgetReport::default();
        for (category, budget) in &self.settings.monthly_budgets {
            let spent = spend.get(category.as_str()).copied().unwrap_or(0.0);
            let used = spent / budget.max(BUDGET_EPSILON);

            let status = if used >= threshold {
                report.alerts.push(Alert::Overspend {
                    category: category.clone(),
                    spent,
                    budget: *budget,
                    ratio: used,
                });
                BudgetStatus::Alert
            } else {
                BudgetStatus::Ok
            };

            report.entries.push(BudgetEntry {
                category: category.clone(),
                budget: *budget,
                spent,
                used_pct: 100.0 * used,
                status,
            });
        }

        let mut unbudgeted: Vec<UnbudgetedSpend> = spend
            .into_iter()
            .filter(|(category, _)| !self.settings.is_budgeted(category))
            .map(|(category, spent)| UnbudgetedSpend {
                category: category.to_string(),
                spent,
            })
            .collect();
        // BTreeMap order already breaks ties by name; the sort is stable
        unbudgeted.sort_by(|a, b| b.spent.total_cmp(&a.spent));
        report.unbudgeted = unbudgeted;

        debug!(
            budgets = report.entries.len(),
            overspent = report.alerts.len(),
            unbudgeted = report.unbudgeted.len(),
            "budget tracking done"
        );
        report
    }
}

/// Absolute expense totals per category
fn spend_by_category<'t>(txns: &[&'t CategorizedTransaction]) -> BTreeMap<&'t str, f64> {
    let mut spend: BTreeMap<&str, f64> = BTreeMap::new();
    for &t in txns {
        if t.txn.is_expense() {
            *spend.entry(t.category.as_str()).or_insert(0.0) += t.txn.abs_amount();
        }
    }
    spend
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use guardrail_core::{Guardrails, Transaction};

    fn txn(amount: f64, category: &str) -> CategorizedTransaction {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        CategorizedTransaction::new(Transaction::new(date, amount, "X", "t.csv"), category)
    }

    fn settings(budgets: &[(&str, f64)]) -> BudgetSettings {
        BudgetSettings {
            monthly_budgets: budgets.iter().map(|(c, b)| (c.to_string(), *b)).collect(),
            monthly_income_target: None,
            guardrails: Guardrails::default(),
        }
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let txns = vec![txn(-200.0, "Groceries"), txn(-130.0, "Groceries")];
        let refs: Vec<_> = txns.iter().collect();
        let s = settings(&[("Groceries", 300.0)]);
        let report = BudgetTracker::new(&s).track(&refs);

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].spent, 330.0);
        assert_eq!(report.entries[0].status, BudgetStatus::Alert);
        assert_eq!(report.alerts.len(), 1);
        match &report.alerts[0] {
            Alert::Overspend { category, ratio, .. } => {
                assert_eq!(category, "Groceries");
                assert!((ratio - 1.10).abs() < 1e-12);
            }
            other => panic!("unexpected alert {:?}", other),
        }
    }

    #[test]
    fn test_under_threshold_is_ok() {
        let txns = vec![txn(-320.0, "Groceries")];
        let refs: Vec<_> = txns.iter().collect();
        let s = settings(&[("Groceries", 300.0)]);
        let report = BudgetTracker::new(&s).track(&refs);
        assert_eq!(report.entries[0].status, BudgetStatus::Ok);
        assert!(report.alerts.is_empty());
    }

    #[test]
    fn test_income_and_zero_not_counted_as_spend() {
        let txns = vec![txn(-50.0, "Dining"), txn(25.0, "Dining"), txn(0.0, "Dining")];
        let refs: Vec<_> = txns.iter().collect();
        let s = settings(&[("Dining", 100.0)]);
        let report = BudgetTracker::new(&s).track(&refs);
        assert_eq!(report.entries[0].spent, 50.0);
        assert!((report.entries[0].used_pct - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_budget_uses_epsilon() {
        let txns = vec![txn(-1.0, "Gifts")];
        let refs: Vec<_> = txns.iter().collect();
        let s = settings(&[("Gifts", 0.0), ("Travel", 0.0)]);
        let report = BudgetTracker::new(&s).track(&refs);
        assert!(report.entries[0].used_pct.is_finite());
        assert_eq!(report.entries[0].status, BudgetStatus::Alert);
        // 0 / epsilon = 0 stays OK
        assert_eq!(report.entries[1].status, BudgetStatus::Ok);
    }

    #[test]
    fn test_alerts_follow_budget_order() {
        let txns = vec![txn(-500.0, "Dining"), txn(-500.0, "Groceries")];
        let refs: Vec<_> = txns.iter().collect();
        let s = settings(&[("Groceries", 100.0), ("Dining", 100.0)]);
        let report = BudgetTracker::new(&s).track(&refs);
        let cats: Vec<_> = report
            .alerts
            .iter()
            .map(|a| match a {
                Alert::Overspend { category, .. } => category.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(cats, vec!["Groceries", "Dining"]);
    }

    #[test]
    fn test_unbudgeted_sorted_descending() {
        let txns = vec![
            txn(-40.0, "Groceries"),
            txn(-15.0, "Gifts"),
            txn(-90.0, "Travel"),
            txn(-15.0, "Books"),
            txn(300.0, "Salary"),
        ];
        let refs: Vec<_> = txns.iter().collect();
        let s = settings(&[("Groceries", 300.0)]);
        let report = BudgetTracker::new(&s).track(&refs);
        let got: Vec<_> = report
            .unbudgeted
            .iter()
            .map(|u| (u.category.as_str(), u.spent))
            .collect();
        assert_eq!(got, vec![("Travel", 90.0), ("Books", 15.0), ("Gifts", 15.0)]);
        // Informational only
        assert!(report.alerts.is_empty());
    }
}
