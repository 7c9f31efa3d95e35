//! Typed budget and guardrail settings

use serde::{Deserialize, Serialize};

/// Thresholds whose violation produces an alert
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guardrails {
    /// spent / budget ratio at or above which a category is flagged
    pub overspend_threshold: f64,
    /// Minimum acceptable savings rate (0.20 = 20%)
    pub min_savings_rate: f64,
    /// Minimum acceptable cash runway in months
    pub min_runway_months: f64,
}

impl Default for Guardrails {
    fn default() -> Self {
        Self {
            overspend_threshold: 1.10,
            min_savings_rate: 0.20,
            min_runway_months: 6.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSettings {
    /// Category ceilings, in configured order
    pub monthly_budgets: Vec<(String, f64)>,
    /// Used as average income when there are no closed months
    pub monthly_income_target: Option<f64>,
    pub guardrails: Guardrails,
}

impl BudgetSettings {
    pub fn budget_for(&self, category: &str) -> Option<f64> {
        self.monthly_budgets
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, b)| *b)
    }

    pub fn is_budgeted(&self, category: &str) -> bool {
        self.budget_for(category).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guardrail_defaults() {
        let g = Guardrails::default();
        assert_eq!(g.overspend_threshold, 1.10);
        assert_eq!(g.min_savings_rate, 0.20);
        assert_eq!(g.min_runway_months, 6.0);
    }

    #[test]
    fn test_budget_lookup() {
        let s = BudgetSettings {
            monthly_budgets: vec![("Groceries".into(), 300.0), ("Dining".into(), 150.0)],
            ..Default::default()
        };
        assert_eq!(s.budget_for("Dining"), Some(150.0));
        assert!(s.is_budgeted("Groceries"));
        assert!(!s.is_budgeted("Travel"));
    }
}
