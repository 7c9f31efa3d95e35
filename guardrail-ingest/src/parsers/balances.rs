//! Account balance snapshot: a CSV with a `balance` column, summed to one total.

use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::error::Result;
use crate::parsers::bank_csv::parse_amount;

/// Sum the `balance` column. A file without one totals 0.
pub fn parse_balances_reader<R: Read>(reader: R) -> Result<f64> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let column = rdr
        .byte_headers()?
        .iter()
        .position(|h| {
            String::from_utf8_lossy(h)
                .trim_start_matches('\u{feff}')
                .trim()
                .eq_ignore_ascii_case("balance")
        });

    let Some(column) = column else {
        warn!("balance snapshot has no balance column; treating total as 0");
        return Ok(0.0);
    };

    let mut total = 0.0;
    for result in rdr.byte_records() {
        let record = result?;
        let cell = record
            .get(column)
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default();
        match parse_amount(&cell) {
            Some(v) => total += v,
            None => warn!(value = %cell, "skipping non-numeric balance"),
        }
    }
    Ok(total)
}

/// Load the optional snapshot. `Ok(None)` when the file does not exist.
pub fn load_balance_total(path: impl AsRef<Path>) -> Result<Option<f64>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    let total = parse_balances_reader(std::fs::File::open(path)?)?;
    info!(file = %path.display(), total, "balance snapshot loaded");
    Ok(Some(total))
}
