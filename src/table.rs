use std::ops::Index;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One exchange-rate observation: source converted to target on a given date.
pub struct ExchangeRateRow {
    pub date: String,
    pub source_currency: String,
    pub target_currency: String,
    pub exchange_rate_to_target: f64,
}

/// Long-format result table.
///
/// Rows are kept sorted ascending by (date, source_currency, target_currency)
/// after every query operation; the Vec position is the dense row index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExchangeRateTable {
    rows: Vec<ExchangeRateRow>,
}

impl ExchangeRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[ExchangeRateRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExchangeRateRow> {
        self.rows.iter()
    }

    pub(crate) fn extend(&mut self, rows: Vec<ExchangeRateRow>) {
        self.rows.extend(rows);
    }

    /// Restores the sort invariant after per-source results are concatenated.
    pub(crate) fn sort(&mut self) {
        self.rows.sort_by(|a, b| {
            (&a.date, &a.source_currency, &a.target_currency).cmp(&(
                &b.date,
                &b.source_currency,
                &b.target_currency,
            ))
        });
    }
}

impl Index<usize> for ExchangeRateTable {
    type Output = ExchangeRateRow;

    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

impl IntoIterator for ExchangeRateTable {
    type Item = ExchangeRateRow;
    type IntoIter = std::vec::IntoIter<ExchangeRateRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExchangeRateTable {
    type Item = &'a ExchangeRateRow;
    type IntoIter = std::slice::Iter<'a, ExchangeRateRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
