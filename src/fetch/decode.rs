use std::collections::BTreeMap;

use serde::Deserialize;

use crate::table::ExchangeRateRow;

/// Envelope returned by the `latest` and single-date endpoints.
///
/// `rates` decodes into a BTreeMap so flattening walks targets in a
/// deterministic order regardless of how the API serializes the object.
#[derive(Debug, Deserialize)]
pub struct DailyRates {
    pub base: String,
    pub date: String,
    pub rates: BTreeMap<String, f64>,
}

/// Envelope returned by the `history` endpoint.
///
/// Rates nest two levels deep (date, then target), unlike the single-level
/// daily shape. The asymmetry is part of the upstream contract.
#[derive(Debug, Deserialize)]
pub struct HistoryRates {
    pub base: String,
    pub rates: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Flattens a daily envelope into one row per target currency.
///
/// Single-date queries stamp rows with the caller-supplied date rather than
/// the envelope's own `date` field; `latest` passes no override and uses the
/// envelope date.
pub fn flatten_daily(envelope: DailyRates, date_override: Option<&str>) -> Vec<ExchangeRateRow> {
    let date = date_override.unwrap_or(&envelope.date).to_string();

    envelope
        .rates
        .into_iter()
        .map(|(target, rate)| ExchangeRateRow {
            date: date.clone(),
            source_currency: envelope.base.clone(),
            target_currency: target,
            exchange_rate_to_target: rate,
        })
        .collect()
}

/// Flattens a history envelope into one row per (date, target) pair.
pub fn flatten_history(envelope: HistoryRates) -> Vec<ExchangeRateRow> {
    let mut rows = Vec::new();
    for (date, targets) in envelope.rates {
        for (target, rate) in targets {
            rows.push(ExchangeRateRow {
                date: date.clone(),
                source_currency: envelope.base.clone(),
                target_currency: target,
                exchange_rate_to_target: rate,
            });
        }
    }
    rows
}
