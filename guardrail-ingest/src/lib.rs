//! guardrail-ingest: bank CSV ingestion, balance snapshots, and rule-file loading.

pub mod config;
pub mod error;
pub mod parsers;

pub use config::{load_config, parse_config, GuardrailConfig};
pub use error::{IngestError, Result};
pub use parsers::balances::load_balance_total;
pub use parsers::bank_csv::{load_transactions, parse_bank_csv, ColumnMap};
