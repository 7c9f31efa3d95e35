//! Guardrail alerts and their fixed collection order.

use serde::{Deserialize, Serialize};

use crate::round_to;

/// A guardrail violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Alert {
    Overspend {
        category: String,
        spent: f64,
        budget: f64,
        ratio: f64,
    },
    LowSavingsRate {
        savings_rate: f64,
        threshold_pct: f64,
    },
    ShortRunway {
        runway_months: f64,
        threshold_months: f64,
    },
}

impl Alert {
    /// Short machine label, same as the serialized `type`
    pub fn kind(&self) -> &'static str {
        match self {
            Alert::Overspend { .. } => "overspend",
            Alert::LowSavingsRate { .. } => "low_savings_rate",
            Alert::ShortRunway { .. } => "short_runway",
        }
    }

    /// Copy with display precision applied (money 2 dp, ratio 2 dp, pct and months 1 dp)
    pub fn rounded(&self) -> Alert {
        match self {
            Alert::Overspend {
                category,
                spent,
                budget,
                ratio,
            } => Alert::Overspend {
                category: category.clone(),
                spent: round_to(*spent, 2),
                budget: *budget,
                ratio: round_to(*ratio, 2),
            },
            Alert::LowSavingsRate {
                savings_rate,
                threshold_pct,
            } => Alert::LowSavingsRate {
                savings_rate: round_to(*savings_rate, 1),
                threshold_pct: round_to(*threshold_pct, 1),
            },
            Alert::ShortRunway {
                runway_months,
                threshold_months,
            } => Alert::ShortRunway {
                runway_months: round_to(*runway_months, 1),
                threshold_months: *threshold_months,
            },
        }
    }
}

/// Overspend alerts in budget order, then savings, then runway. No dedup.
pub fn collect_alerts(
    overspend: Vec<Alert>,
    low_savings: Option<Alert>,
    short_runway: Option<Alert>,
) -> Vec<Alert> {
    let mut alerts = overspend;
    alerts.extend(low_savings);
    alerts.extend(short_runway);
    alerts
}
