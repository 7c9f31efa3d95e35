//! Ordered pattern rules mapping transaction descriptions to categories.
//!
//! Plain table scan, first match wins across categories and patterns.

use serde::{Deserialize, Serialize};

use crate::transaction::{CategorizedTransaction, Transaction};

pub const DEFAULT_FALLBACK_CATEGORY: &str = "Other";

/// One category and its patterns, in configured order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    /// Uppercased, never empty
    pub patterns: Vec<String>,
}

/// The full rule table plus the fallback label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
    fallback: String,
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            fallback: DEFAULT_FALLBACK_CATEGORY.to_string(),
        }
    }
}

impl CategoryRules {
    /// Build the table. Empty patterns are dropped; the rest are uppercased
    /// so matching is case-insensitive.
    pub fn new<C, P>(entries: impl IntoIterator<Item = (C, Vec<P>)>, fallback: impl Into<String>) -> Self
    where
        C: Into<String>,
        P: AsRef<str>,
    {
        let rules = entries
            .into_iter()
            .map(|(category, patterns)| CategoryRule {
                category: category.into(),
                patterns: patterns
                    .iter()
                    .map(|p| p.as_ref().to_uppercase())
                    .filter(|p| !p.is_empty())
                    .collect(),
            })
            .collect();

        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Return the matching rule's category, or the fallback
    pub fn categorize(&self, description: &str) -> &str {
        self.matching(description).unwrap_or(&self.fallback)
    }

    /// Return the matching rule's category, `None` when nothing matches
    pub fn matching(&self, description: &str) -> Option<&str> {
        let desc = description.to_uppercase();
        self.rules
            .iter()
            .find(|rule| rule.patterns.iter().any(|p| desc.contains(p.as_str())))
            .map(|rule| rule.category.as_str())
    }

    /// Categorize a whole transaction stream, preserving order
    pub fn apply(&self, txns: Vec<Transaction>) -> Vec<CategorizedTransaction> {
        txns.into_iter()
            .map(|txn| {
                let category = self.categorize(&txn.description).to_string();
                CategorizedTransaction::new(txn, category)
            })
            .collect()
    }
}
