pub mod balances;
pub mod bank_csv;
