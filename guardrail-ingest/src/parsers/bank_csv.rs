//! Generic bank CSV export parser.
//!
//! Banks disagree on header spelling (English, German, Dutch exports), so
//! columns are located by alias. Required: date, amount, description.
//! Optional: currency, account (default "N/A").

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use guardrail_core::Transaction;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};

const DATE_ALIASES: &[&str] = &["date", "booking date", "datum"];
const AMOUNT_ALIASES: &[&str] = &["amount", "betrag", "value"];
const DESCRIPTION_ALIASES: &[&str] = &["description", "verwendungszweck", "description 1", "merchant"];
const CURRENCY_ALIASES: &[&str] = &["currency", "währung"];
const ACCOUNT_ALIASES: &[&str] = &["account", "konto"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Positions of the recognized columns in one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub amount: usize,
    pub description: usize,
    pub currency: Option<usize>,
    pub account: Option<usize>,
}

impl ColumnMap {
    /// Locate columns by alias; the first header (in file order) matching wins.
    /// Returns the names of missing required columns on failure.
    pub fn from_headers<'h>(headers: impl IntoIterator<Item = &'h str>) -> std::result::Result<Self, Vec<&'static str>> {
        let normalized: Vec<String> = headers.into_iter().map(normalize_header).collect();
        let find = |aliases: &[&str]| normalized.iter().position(|h| aliases.contains(&h.as_str()));

        let date = find(DATE_ALIASES);
        let amount = find(AMOUNT_ALIASES);
        let description = find(DESCRIPTION_ALIASES);

        match (date, amount, description) {
            (Some(date), Some(amount), Some(description)) => Ok(Self {
                date,
                amount,
                description,
                currency: find(CURRENCY_ALIASES),
                account: find(ACCOUNT_ALIASES),
            }),
            _ => {
                let mut missing = Vec::new();
                if date.is_none() {
                    missing.push("date");
                }
                if amount.is_none() {
                    missing.push("amount");
                }
                if description.is_none() {
                    missing.push("description");
                }
                Err(missing)
            }
        }
    }
}

fn normalize_header(h: &str) -> String {
    h.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Parse a date cell; accepts the common bank export spellings.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Parse an amount cell. Non-numeric and non-finite values are rejected.
pub fn parse_amount(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse one CSV stream. `source` labels the records and error messages.
pub fn parse_bank_csv_reader<R: Read>(reader: R, source: &str) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();

    let columns = ColumnMap::from_headers(headers.iter().map(String::as_str)).map_err(|missing| {
        IngestError::MissingColumns {
            path: PathBuf::from(source),
            missing: missing.join(", "),
        }
    })?;
    debug!(source, ?columns, "columns located");

    let mut txns = Vec::new();
    let mut dropped = 0usize;

    for result in rdr.byte_records() {
        let record = result?;
        let cell = |i: usize| {
            record
                .get(i)
                .map(|b| String::from_utf8_lossy(b).into_owned())
                .unwrap_or_default()
        };

        let (Some(date), Some(amount)) = (parse_date(&cell(columns.date)), parse_amount(&cell(columns.amount))) else {
            dropped += 1;
            continue;
        };

        txns.push(Transaction {
            date,
            amount,
            description: cell(columns.description),
            currency: columns.currency.map(&cell).unwrap_or_else(|| "N/A".to_string()),
            account: columns.account.map(&cell).unwrap_or_else(|| "N/A".to_string()),
            source: source.to_string(),
        });
    }

    if dropped > 0 {
        warn!(source, dropped, "dropped rows with unparsable date or amount");
    }
    Ok(txns)
}

/// Parse a single bank CSV file
pub fn parse_bank_csv(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let file = fs::File::open(path)?;
    parse_bank_csv_reader(file, &source).map_err(|e| match e {
        IngestError::MissingColumns { missing, .. } => IngestError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        },
        other => other,
    })
}

/// `*.csv` files directly inside `dir`, sorted by path
pub fn list_csv_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(IngestError::NoCsvFiles(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(IngestError::NoCsvFiles(dir.to_path_buf()));
    }
    Ok(files)
}

/// Load every CSV in `dir` into one date-ordered stream
pub fn load_transactions(dir: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let files = list_csv_files(&dir)?;

    let mut all = Vec::new();
    for file in &files {
        let txns = parse_bank_csv(file)?;
        info!(file = %file.display(), rows = txns.len(), "parsed statement");
        all.extend(txns);
    }

    if all.is_empty() {
        return Err(IngestError::NoValidRows);
    }

    // Stable: same-day rows keep file order
    all.sort_by_key(|t| t.date);
    info!(files = files.len(), transactions = all.len(), "transactions loaded");
    Ok(all)
}
