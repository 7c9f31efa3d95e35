//! Report sink: Markdown report and alerts JSON rendered from a `KpiResult`.

use crate::alerts::Alert;
use crate::budget::BudgetStatus;
use crate::kpi::KpiResult;

/// Render the human-readable Markdown report
pub fn render_markdown(kpis: &KpiResult) -> String {
    let mut md: Vec<String> = Vec::new();

    md.push(format!("# 💰 Budget Guardrail Report — {}", kpis.month));
    md.push(String::new());
    md.push(format!(
        "- **Avg Monthly Income (last 3 closed months):** €{:.2}",
        kpis.avg_income
    ));
    md.push(format!(
        "- **Avg Monthly Burn (last 3 closed months):** €{:.2}",
        kpis.avg_burn
    ));
    md.push(format!(
        "- **Net / mo:** €{:.2} &nbsp;|&nbsp; **Savings rate:** {:.1}%",
        kpis.net_month, kpis.savings_rate_pct
    ));
    md.push(format!("- **Runway:** {} months", kpis.runway_months));
    md.push(String::new());

    md.push("## Budgets vs Spend (current month)".to_string());
    md.push(String::new());
    md.push("| Category | Budget | Spent | Used | Status |".to_string());
    md.push("|---|---:|---:|---:|---|".to_string());
    for row in &kpis.budgets {
        let status = match row.status {
            BudgetStatus::Ok => "🟢 OK",
            BudgetStatus::Alert => "🔴 ALERT",
        };
        md.push(format!(
            "| {} | €{:.0} | €{:.2} | {:.1}% | {} |",
            row.category, row.budget, row.spent, row.used_pct, status
        ));
    }

    if !kpis.top_recurring_merchants.is_empty() {
        md.push(String::new());
        md.push("## Recurring merchants (≥ 3 months)".to_string());
        md.push(String::new());
        md.push("| Merchant | Category | Months billed | Avg / month |".to_string());
        md.push("|---|---|---:|---:|".to_string());
        for row in &kpis.top_recurring_merchants {
            md.push(format!(
                "| {} | {} | {} | €{:.2} |",
                title_case(&row.merchant),
                row.category,
                row.months_charged,
                row.avg_monthly_charge
            ));
        }
    }

    if !kpis.unbudgeted_spend.is_empty() {
        md.push(String::new());
        md.push("## Unbudgeted categories with spend".to_string());
        md.push(String::new());
        md.push("| Category | Spent |".to_string());
        md.push("|---|---:|".to_string());
        for row in &kpis.unbudgeted_spend {
            md.push(format!("| {} | €{:.2} |", row.category, row.spent));
        }
    }

    md.push(String::new());
    if kpis.alerts.is_empty() {
        md.push("## ✅ No alerts this cycle".to_string());
    } else {
        md.push("## ⚠️ Alerts".to_string());
        for alert in &kpis.alerts {
            md.push(alert_line(alert));
        }
    }

    md.join("\n")
}

fn alert_line(alert: &Alert) -> String {
    match alert {
        Alert::Overspend {
            category,
            spent,
            budget,
            ratio,
        } => format!(
            "- **Overspend:** {} at €{:.2} / €{:.0} ({:.0}% of budget)",
            category,
            spent,
            budget,
            ratio * 100.0
        ),
        Alert::LowSavingsRate {
            savings_rate,
            threshold_pct,
        } => format!(
            "- **Low savings rate:** {:.1}% (target ≥ {:.1}%)",
            savings_rate, threshold_pct
        ),
        Alert::ShortRunway {
            runway_months,
            threshold_months,
        } => format!(
            "- **Short runway:** {:.1} months (target ≥ {:.1} months)",
            runway_months, threshold_months
        ),
    }
}

/// Pretty JSON array of the alerts
pub fn render_alerts_json(kpis: &KpiResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&kpis.alerts)
}

/// Pretty JSON of the whole result
pub fn render_kpis_json(kpis: &KpiResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(kpis)
}

/// "NETFLIX.COM" -> "Netflix.Com": capitalize each letter run, lowercase the rest
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
