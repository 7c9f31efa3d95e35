//! Month bucketing: splits a snapshot into the current month and closed months.

use chrono::NaiveDate;
use guardrail_core::{month_start, CategorizedTransaction};
use std::collections::BTreeSet;

/// Read-only view over a categorized snapshot relative to a reference date
#[derive(Debug)]
pub struct PeriodView<'a> {
    current_month: NaiveDate,
    current: Vec<&'a CategorizedTransaction>,
    closed: Vec<&'a CategorizedTransaction>,
}

impl<'a> PeriodView<'a> {
    /// `today` decides the current month; everything strictly before it is closed.
    /// Records dated after the current month belong to neither side.
    pub fn new(txns: &'a [CategorizedTransaction], today: NaiveDate) -> Self {
        let current_month = month_start(today);
        let mut current = Vec::new();
        let mut closed = Vec::new();

        for t in txns {
            let month = month_start(t.txn.date);
            if month == current_month {
                current.push(t);
            } else if month < current_month {
                closed.push(t);
            }
        }

        Self {
            current_month,
            current,
            closed,
        }
    }

    pub fn current_month(&self) -> NaiveDate {
        self.current_month
    }

    pub fn current(&self) -> &[&'a CategorizedTransaction] {
        &self.current
    }

    pub fn closed(&self) -> &[&'a CategorizedTransaction] {
        &self.closed
    }

    /// Up to `n` most recent closed months that have at least one record, ascending
    pub fn recent_closed_months(&self, n: usize) -> Vec<NaiveDate> {
        let months: BTreeSet<NaiveDate> = self.closed.iter().map(|t| month_start(t.txn.date)).collect();
        let skip = months.len().saturating_sub(n);
        months.into_iter().skip(skip).collect()
    }

    /// Closed-month records falling into one of `months`
    pub fn closed_in(&self, months: &[NaiveDate]) -> Vec<&'a CategorizedTransaction> {
        self.closed
            .iter()
            .copied()
            .filter(|t| months.contains(&month_start(t.txn.date)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardrail_core::Transaction;

    fn txn(y: i32, m: u32, d: u32, amount: f64) -> CategorizedTransaction {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        CategorizedTransaction::new(Transaction::new(date, amount, "X", "t.csv"), "Other")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn test_split_current_and_closed() {
        let txns = vec![
            txn(2026, 1, 15, -10.0),
            txn(2026, 2, 28, -20.0),
            txn(2026, 3, 1, -30.0),
            txn(2026, 3, 31, -40.0),
            txn(2026, 4, 2, -50.0),
        ];
        let view = PeriodView::new(&txns, today());
        assert_eq!(view.current_month(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(view.current().len(), 2);
        assert_eq!(view.closed().len(), 2);
    }

    #[test]
    fn test_recent_closed_months_window() {
        let txns = vec![
            txn(2025, 10, 1, 1.0),
            txn(2025, 11, 3, 1.0),
            txn(2025, 11, 9, 1.0),
            txn(2026, 1, 2, 1.0),
            txn(2026, 2, 2, 1.0),
            txn(2026, 3, 2, 1.0),
        ];
        let view = PeriodView::new(&txns, today());
        let months = view.recent_closed_months(3);
        let expected: Vec<NaiveDate> = [(2025, 11), (2026, 1), (2026, 2)]
            .iter()
            .map(|&(y, m)| NaiveDate::from_ymd_opt(y, m, 1).unwrap())
            .collect();
        // December has no records so it is not part of the window
        assert_eq!(months, expected);
        assert_eq!(view.closed_in(&months).len(), 4);
    }

    #[test]
    fn test_fewer_closed_months_than_window() {
        let txns = vec![txn(2026, 2, 1, 5.0)];
        let view = PeriodView::new(&txns, today());
        assert_eq!(view.recent_closed_months(3).len(), 1);

        let empty: Vec<CategorizedTransaction> = Vec::new();
        let view = PeriodView::new(&empty, today());
        assert!(view.recent_closed_months(3).is_empty());
    }
}
