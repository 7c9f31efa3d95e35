//! guardrail-finance: month bucketing, budget tracking, trend/runway estimation,
//! recurring-charge detection, alert collection, and report rendering

pub mod alerts;
pub mod budget;
pub mod kpi;
pub mod period;
pub mod recurring;
pub mod report;
pub mod trend;

pub use alerts::{collect_alerts, Alert};
pub use budget::{BudgetEntry, BudgetReport, BudgetStatus, BudgetTracker, UnbudgetedSpend};
pub use kpi::{compute_kpis, evaluate, KpiResult};
pub use period::PeriodView;
pub use recurring::{detect_recurring, normalize_merchant, RecurringMerchant};
pub use trend::{Runway, Trend, TrendEstimator};

/// Round to `digits` decimal places on the exact binary value; exact ties go to even
pub fn round_to(value: f64, digits: usize) -> f64 {
    format!("{:.*}", digits, value).parse().unwrap_or(value)
}
