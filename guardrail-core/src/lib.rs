//! guardrail-core: transaction model, category rules, settings, and time helpers

pub mod rules;
pub mod settings;
pub mod time;
pub mod transaction;

pub use rules::{CategoryRule, CategoryRules, DEFAULT_FALLBACK_CATEGORY};
pub use settings::{BudgetSettings, Guardrails};
pub use time::{local_today, month_start, parse_reference_date, parse_timezone, DEFAULT_TIMEZONE};
pub use transaction::{CategorizedTransaction, Transaction};
