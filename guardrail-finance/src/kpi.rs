//! KPI engine: one stateless pass from a categorized snapshot to a `KpiResult`.

use chrono::NaiveDate;
use guardrail_core::{BudgetSettings, CategorizedTransaction, CategoryRules, Transaction};
use serde::Serialize;
use tracing::{debug, info};

use crate::alerts::{collect_alerts, Alert};
use crate::budget::{BudgetEntry, BudgetTracker, UnbudgetedSpend};
use crate::period::PeriodView;
use crate::recurring::{detect_recurring, RecurringMerchant};
use crate::round_to;
use crate::trend::{Runway, TrendEstimator};

/// Everything the report sink needs. Values are rounded for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiResult {
    /// First day of the current month, `YYYY-MM-DD`
    pub month: String,
    pub budgets: Vec<BudgetEntry>,
    pub avg_income: f64,
    pub avg_burn: f64,
    pub net_month: f64,
    pub savings_rate_pct: f64,
    pub runway_months: Runway,
    pub top_recurring_merchants: Vec<RecurringMerchant>,
    pub alerts: Vec<Alert>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unbudgeted_spend: Vec<UnbudgetedSpend>,
}

/// Compute KPIs for the month containing `today`.
///
/// `balance` is the summed external balance snapshot, if any. Without it the
/// runway falls back to the running total of all transaction amounts.
pub fn compute_kpis(
    txns: &[CategorizedTransaction],
    settings: &BudgetSettings,
    balance: Option<f64>,
    today: NaiveDate,
) -> KpiResult {
    let period = PeriodView::new(txns, today);
    debug!(
        month = %period.current_month(),
        current = period.current().len(),
        closed = period.closed().len(),
        "snapshot bucketed"
    );

    let budget = BudgetTracker::new(settings).track(period.current());
    let trend = TrendEstimator::new(settings).estimate(&period, txns, balance);
    let recurring = detect_recurring(period.closed());

    let alerts = collect_alerts(budget.alerts, trend.low_savings, trend.short_runway);
    info!(alerts = alerts.len(), "guardrails evaluated");

    KpiResult {
        month: period.current_month().format("%Y-%m-%d").to_string(),
        budgets: budget
            .entries
            .into_iter()
            .map(|e| BudgetEntry {
                spent: round_to(e.spent, 2),
                used_pct: round_to(e.used_pct, 1),
                ..e
            })
            .collect(),
        avg_income: round_to(trend.avg_income, 2),
        avg_burn: round_to(trend.avg_burn, 2),
        net_month: round_to(trend.net_month, 2),
        savings_rate_pct: round_to(100.0 * trend.savings_rate, 1),
        runway_months: match trend.runway {
            Runway::Months(m) => Runway::Months(round_to(m, 1)),
            Runway::Infinite => Runway::Infinite,
        },
        top_recurring_merchants: recurring
            .into_iter()
            .map(|r| RecurringMerchant {
                avg_monthly_charge: round_to(r.avg_monthly_charge, 2),
                ..r
            })
            .collect(),
        alerts: alerts.iter().map(Alert::rounded).collect(),
        unbudgeted_spend: budget
            .unbudgeted
            .into_iter()
            .map(|u| UnbudgetedSpend {
                spent: round_to(u.spent, 2),
                ..u
            })
            .collect(),
    }
}

/// Categorize raw transactions with `rules`, then compute KPIs
pub fn evaluate(
    txns: Vec<Transaction>,
    rules: &CategoryRules,
    settings: &BudgetSettings,
    balance: Option<f64>,
    today: NaiveDate,
) -> KpiResult {
    let categorized = rules.apply(txns);
    compute_kpis(&categorized, settings, balance, today)
}
