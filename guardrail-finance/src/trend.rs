//! Trailing averages over closed months: income, burn, savings rate, and cash runway.

use guardrail_core::{BudgetSettings, CategorizedTransaction};
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::{debug, warn};

use crate::alerts::Alert;
use crate::period::PeriodView;

/// Number of trailing closed months averaged
pub const TREND_WINDOW_MONTHS: usize = 3;

/// Months of cash left at the current burn. Unbounded when nothing is burned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Runway {
    Months(f64),
    Infinite,
}

impl Runway {
    pub fn from_balance(total_balance: f64, avg_burn: f64) -> Self {
        if avg_burn > 0.0 {
            Runway::Months(total_balance / avg_burn)
        } else {
            Runway::Infinite
        }
    }

    /// Strict comparison; `Infinite` is never below anything
    pub fn is_below(&self, months: f64) -> bool {
        match self {
            Runway::Months(m) => *m < months,
            Runway::Infinite => false,
        }
    }
}

impl fmt::Display for Runway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Runway::Months(m) => write!(f, "{:.1}", m),
            Runway::Infinite => write!(f, "∞"),
        }
    }
}

impl Serialize for Runway {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Runway::Months(m) => serializer.serialize_f64(*m),
            Runway::Infinite => serializer.serialize_str("∞"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trend {
    /// Closed months that made up the window
    pub months_used: usize,
    pub avg_income: f64,
    pub avg_burn: f64,
    pub net_month: f64,
    pub savings_rate: f64,
    pub total_balance: f64,
    pub runway: Runway,
    pub low_savings: Option<Alert>,
    pub short_runway: Option<Alert>,
}

pub struct TrendEstimator<'s> {
    settings: &'s BudgetSettings,
}

impl<'s> TrendEstimator<'s> {
    pub fn new(settings: &'s BudgetSettings) -> Self {
        Self { settings }
    }

    /// `all` is the full snapshot (balance fallback); `balance` is an external snapshot total.
    pub fn estimate(
        &self,
        period: &PeriodView<'_>,
        all: &[CategorizedTransaction],
        balance: Option<f64>,
    ) -> Trend {
        let guard = &self.settings.guardrails;
        let months = period.recent_closed_months(TREND_WINDOW_MONTHS);

        let (avg_income, avg_burn) = if months.is_empty() {
            (self.settings.monthly_income_target.unwrap_or(0.0), 0.0)
        } else {
            let mut income = 0.0;
            let mut expense = 0.0;
            for t in period.closed_in(&months) {
                if t.txn.is_income() {
                    income += t.txn.amount;
                } else if t.txn.is_expense() {
                    expense += t.txn.abs_amount();
                }
            }
            let n = months.len() as f64;
            (income / n, expense / n)
        };

        let net_month = avg_income - avg_burn;
        let savings_rate = if avg_income != 0.0 {
            net_month / avg_income
        } else {
            0.0
        };

        // An empty snapshot carries no savings signal
        let low_savings = (!all.is_empty() && savings_rate < guard.min_savings_rate).then(|| {
            Alert::LowSavingsRate {
                savings_rate: 100.0 * savings_rate,
                threshold_pct: 100.0 * guard.min_savings_rate,
            }
        });

        let total_balance = match balance {
            Some(b) => b,
            None => {
                if !all.is_empty() {
                    warn!("no balance snapshot; approximating balance from transaction history");
                }
                all.iter().map(|t| t.txn.amount).sum()
            }
        };

        let runway = Runway::from_balance(total_balance, avg_burn);
        let short_runway = match runway {
            Runway::Months(m) if runway.is_below(guard.min_runway_months) => {
                Some(Alert::ShortRunway {
                    runway_months: m,
                    threshold_months: guard.min_runway_months,
                })
            }
            _ => None,
        };

        debug!(
            months = months.len(),
            avg_income,
            avg_burn,
            savings_rate,
            total_balance,
            "trend estimated"
        );

        Trend {
            months_used: months.len(),
            avg_income,
            avg_burn,
            net_month,
            savings_rate,
            total_balance,
            runway,
            low_savings,
            short_runway,
        }
    }
}
