//! YAML rule file: categorization patterns, budgets, and guardrail thresholds.
//!
//! ```yaml
//! fallback_category: Other
//! categorization:
//!   Groceries: [ALDI, DELHAIZE]
//! monthly_budgets:
//!   Groceries: 300
//! monthly_income_target: 3000
//! guardrails:
//!   overspend_threshold: 1.10
//! ```
//!
//! Mapping order is significant: it is the rule evaluation order and the
//! overspend alert order.

use guardrail_core::{BudgetSettings, CategoryRules, Guardrails, DEFAULT_FALLBACK_CATEGORY};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Typed view of the rule file
#[derive(Debug, Clone, PartialEq)]
pub struct GuardrailConfig {
    pub rules: CategoryRules,
    pub settings: BudgetSettings,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    categorization: Option<Mapping>,
    #[serde(default)]
    fallback_category: Option<String>,
    #[serde(default)]
    monthly_budgets: Option<Mapping>,
    #[serde(default)]
    monthly_income_target: Option<f64>,
    #[serde(default)]
    guardrails: Option<RawGuardrails>,
}

#[derive(Debug, Default, Deserialize)]
struct RawGuardrails {
    overspend_threshold: Option<f64>,
    min_savings_rate: Option<f64>,
    min_runway_months: Option<f64>,
}

/// Read and parse the rule file at `path`
pub fn load_config(path: impl AsRef<Path>) -> Result<GuardrailConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IngestError::ConfigNotFound(path.to_path_buf()));
    }
    let s = fs::read_to_string(path)?;
    parse_config(&s)
}

/// Parse rule-file YAML. An empty document yields the defaults.
pub fn parse_config(yaml: &str) -> Result<GuardrailConfig> {
    let raw: RawConfig = if yaml.trim().is_empty() {
        RawConfig::default()
    } else {
        serde_yaml::from_str::<Option<RawConfig>>(yaml)?.unwrap_or_default()
    };

    let mut entries = Vec::new();
    for (key, value) in raw.categorization.unwrap_or_default() {
        entries.push((scalar_key(&key)?, patterns(&value)?));
    }
    let fallback = raw
        .fallback_category
        .unwrap_or_else(|| DEFAULT_FALLBACK_CATEGORY.to_string());
    let rules = CategoryRules::new(entries, fallback);

    let mut monthly_budgets = Vec::new();
    for (key, value) in raw.monthly_budgets.unwrap_or_default() {
        let category = scalar_key(&key)?;
        let budget = value.as_f64().ok_or_else(|| {
            IngestError::InvalidConfig(format!("budget for '{category}' is not a number"))
        })?;
        monthly_budgets.push((category, budget));
    }

    let defaults = Guardrails::default();
    let guard = raw.guardrails.unwrap_or_default();
    let guardrails = Guardrails {
        overspend_threshold: guard.overspend_threshold.unwrap_or(defaults.overspend_threshold),
        min_savings_rate: guard.min_savings_rate.unwrap_or(defaults.min_savings_rate),
        min_runway_months: guard.min_runway_months.unwrap_or(defaults.min_runway_months),
    };

    debug!(
        categories = rules.rules().len(),
        budgets = monthly_budgets.len(),
        "config parsed"
    );

    Ok(GuardrailConfig {
        rules,
        settings: BudgetSettings {
            monthly_budgets,
            monthly_income_target: raw.monthly_income_target,
            guardrails,
        },
    })
}

fn scalar_key(key: &Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(IngestError::InvalidConfig(format!(
            "category name must be a scalar, got {:?}",
            other
        ))),
    }
}

/// Pattern list for one category. Null entries are skipped, a bare string is one pattern.
fn patterns(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Sequence(items) => {
            let mut out = Vec::new();
            for item in items {
                match item {
                    Value::Null => {}
                    Value::String(s) => out.push(s.clone()),
                    Value::Number(n) => out.push(n.to_string()),
                    other => {
                        return Err(IngestError::InvalidConfig(format!(
                            "pattern must be a string, got {:?}",
                            other
                        )))
                    }
                }
            }
            Ok(out)
        }
        other => Err(IngestError::InvalidConfig(format!(
            "patterns must be a list, got {:?}",
            other
        ))),
    }
}
