use chrono::NaiveDate;
use guardrail_core::{BudgetSettings, CategoryRules, Guardrails, Transaction};
use guardrail_finance::{evaluate, round_to, Alert, BudgetStatus, RecurringMerchant, Runway};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rules() -> CategoryRules {
    CategoryRules::new(
        vec![
            ("Income", vec!["PAYROLL"]),
            ("Subscriptions", vec!["NETFLIX", "SPOTIFY"]),
            ("Groceries", vec!["ALDI", "DELHAIZE"]),
            ("Rent", vec!["RENT"]),
        ],
        "Other",
    )
}

fn settings() -> BudgetSettings {
    BudgetSettings {
        monthly_budgets: vec![
            ("Groceries".to_string(), 300.0),
            ("Subscriptions".to_string(), 40.0),
        ],
        monthly_income_target: Some(2500.0),
        guardrails: Guardrails::default(),
    }
}

/// Three closed months (Jan-Mar 2026) plus a partial April.
fn snapshot() -> Vec<Transaction> {
    let mut txns = Vec::new();
    for m in 1..=3 {
        txns.push(Transaction::new(day(2026, m, 25), 3000.0, "ACME PAYROLL", "bank.csv"));
        txns.push(Transaction::new(day(2026, m, 1), -1400.0, "RENT APARTMENT", "bank.csv"));
        txns.push(Transaction::new(day(2026, m, 3), -50.0, "NETFLIX.COM", "card.csv"));
        txns.push(Transaction::new(day(2026, m, 12), -550.0, "ALDI  BRUSSEL", "card.csv"));
    }
    txns.push(Transaction::new(day(2026, 4, 2), -200.0, "Aldi Brussel", "card.csv"));
    txns.push(Transaction::new(day(2026, 4, 6), -130.0, "DELHAIZE IXELLES", "card.csv"));
    txns.push(Transaction::new(day(2026, 4, 8), -75.0, "IKEA ANDERLECHT", "card.csv"));
    txns.push(Transaction::new(day(2026, 4, 9), 0.0, "CARD VERIFICATION", "card.csv"));
    txns
}

#[test]
fn test_full_run_budget_and_trend() {
    let kpis = evaluate(snapshot(), &rules(), &settings(), Some(12000.0), day(2026, 4, 15));

    assert_eq!(kpis.month, "2026-04-01");
    assert_eq!(kpis.avg_income, 3000.0);
    assert_eq!(kpis.avg_burn, 2000.0);
    assert_eq!(kpis.net_month, 1000.0);
    assert_eq!(kpis.savings_rate_pct, 33.3);
    assert_eq!(kpis.runway_months, Runway::Months(6.0));

    let groceries = &kpis.budgets[0];
    assert_eq!(groceries.category, "Groceries");
    assert_eq!(groceries.spent, 330.0);
    assert_eq!(groceries.used_pct, 110.0);
    assert_eq!(groceries.status, BudgetStatus::Alert);
    assert_eq!(kpis.budgets[1].status, BudgetStatus::Ok);

    // Only the overspend: savings is healthy and runway sits exactly on the floor
    assert_eq!(
        kpis.alerts,
        vec![Alert::Overspend {
            category: "Groceries".to_string(),
            spent: 330.0,
            budget: 300.0,
            ratio: 1.1,
        }]
    );

    assert_eq!(kpis.unbudgeted_spend.len(), 1);
    assert_eq!(kpis.unbudgeted_spend[0].category, "Other");
    assert_eq!(kpis.unbudgeted_spend[0].spent, 75.0);
}

#[test]
fn test_recurring_merchants_from_closed_months() {
    let kpis = evaluate(snapshot(), &rules(), &settings(), Some(12000.0), day(2026, 4, 15));
    let netflix = RecurringMerchant {
        merchant: "NETFLIX.COM".to_string(),
        category: "Subscriptions".to_string(),
        months_charged: 3,
        avg_monthly_charge: 50.0,
    };
    assert!(kpis.top_recurring_merchants.contains(&netflix));
    // payroll is income, so only the three expense merchants qualify
    assert_eq!(kpis.top_recurring_merchants.len(), 3);
    assert!(kpis
        .top_recurring_merchants
        .iter()
        .all(|r| r.merchant != "ACME PAYROLL"));
}

#[test]
fn test_alert_order_when_everything_fires() {
    let mut settings = settings();
    settings.guardrails = Guardrails {
        overspend_threshold: 1.0,
        min_savings_rate: 0.5,
        min_runway_months: 12.0,
    };
    let kpis = evaluate(snapshot(), &rules(), &settings, Some(12000.0), day(2026, 4, 15));
    let kinds: Vec<_> = kpis.alerts.iter().map(Alert::kind).collect();
    assert_eq!(kinds, vec!["overspend", "low_savings_rate", "short_runway"]);
    assert_eq!(
        kpis.alerts[1],
        Alert::LowSavingsRate {
            savings_rate: 33.3,
            threshold_pct: 50.0,
        }
    );
    assert_eq!(
        kpis.alerts[2],
        Alert::ShortRunway {
            runway_months: 6.0,
            threshold_months: 12.0,
        }
    );
}

#[test]
fn test_reference_date_drives_closed_months() {
    // Seen from February, only January is closed
    let kpis = evaluate(snapshot(), &rules(), &settings(), None, day(2026, 2, 10));
    assert_eq!(kpis.month, "2026-02-01");
    assert_eq!(kpis.avg_income, 3000.0);
    assert_eq!(kpis.avg_burn, 2000.0);
    assert!(kpis.top_recurring_merchants.is_empty());
    // Balance falls back to the sum of every known amount
    let expected_balance: f64 = snapshot().iter().map(|t| t.amount).sum();
    assert_eq!(kpis.runway_months, Runway::Months(round_to(expected_balance / 2000.0, 1)));
}

#[test]
fn test_deterministic_output() {
    let a = evaluate(snapshot(), &rules(), &settings(), Some(5000.0), day(2026, 4, 15));
    let b = evaluate(snapshot(), &rules(), &settings(), Some(5000.0), day(2026, 4, 15));
    assert_eq!(a, b);
}
