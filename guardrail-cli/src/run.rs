//! The `run` pipeline: ingest -> categorize -> KPIs -> report artifacts.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use guardrail_core::{local_today, parse_reference_date, parse_timezone};
use guardrail_finance::report::{render_alerts_json, render_markdown};
use guardrail_finance::{evaluate, KpiResult};
use guardrail_ingest::{load_balance_total, load_config, load_transactions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const REPORT_FILE: &str = "finance_report.md";
pub const ALERTS_FILE: &str = "alerts.json";

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub data_dir: PathBuf,
    pub config: PathBuf,
    pub balances: PathBuf,
    pub docs_dir: PathBuf,
    pub today: Option<String>,
    pub tz: String,
}

pub fn reference_date(today: Option<&str>, tz: &str) -> Result<NaiveDate> {
    match today {
        Some(s) => parse_reference_date(s),
        None => Ok(local_today(Utc::now(), parse_timezone(tz)?)),
    }
}

pub fn run(opts: &RunOptions) -> Result<KpiResult> {
    let cfg = load_config(&opts.config)
        .with_context(|| format!("loading {}", opts.config.display()))?;
    let txns = load_transactions(&opts.data_dir)
        .with_context(|| format!("loading transactions from {}", opts.data_dir.display()))?;
    let balance = load_balance_total(&opts.balances)
        .with_context(|| format!("loading {}", opts.balances.display()))?;
    let today = reference_date(opts.today.as_deref(), &opts.tz)?;

    info!(%today, transactions = txns.len(), "computing KPIs");
    let kpis = evaluate(txns, &cfg.rules, &cfg.settings, balance, today);

    write_artifacts(&kpis, &opts.docs_dir)?;
    Ok(kpis)
}

pub fn write_artifacts(kpis: &KpiResult, docs_dir: &Path) -> Result<()> {
    fs::create_dir_all(docs_dir).with_context(|| format!("create {}", docs_dir.display()))?;

    let report = docs_dir.join(REPORT_FILE);
    fs::write(&report, render_markdown(kpis)).with_context(|| format!("write {}", report.display()))?;

    let alerts = docs_dir.join(ALERTS_FILE);
    let json = render_alerts_json(kpis).context("serialize alerts")?;
    fs::write(&alerts, json).with_context(|| format!("write {}", alerts.display()))?;

    info!(report = %report.display(), alerts = kpis.alerts.len(), "report written");
    Ok(())
}

/// `"<description> => <category>"` per input, fallback marked
pub fn categorize(config: &Path, descriptions: &[String]) -> Result<Vec<String>> {
    let cfg = load_config(config).with_context(|| format!("loading {}", config.display()))?;
    Ok(descriptions
        .iter()
        .map(|d| match cfg.rules.matching(d) {
            Some(category) => format!("{} => {}", d, category),
            None => format!("{} => {} (fallback)", d, cfg.rules.fallback()),
        })
        .collect())
}
