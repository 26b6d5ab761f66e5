use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;

use crate::currency::{validate_codes, CurrencySelection};
use crate::error::{Context, FxError, Result};
use crate::fetch::{
    decode, request, Endpoint, RateLimitConfig, RateLimiter, REQUEST_TIMEOUT_SECS,
};
use crate::table::ExchangeRateTable;

pub const DEFAULT_BASE_URL: &str = "https://api.exchangeratesapi.io";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Client for the exchange-rate API.
///
/// Source and target currencies are fixed at construction; each query method
/// issues one request per source currency, sequentially and in input order,
/// and merges the responses into a single sorted [`ExchangeRateTable`].
#[derive(Debug)]
pub struct FxClient {
    source_currencies: Vec<String>,
    target_currencies: Option<Vec<String>>,
    base_url: String,
    http: Client,
    limiter: Option<RateLimiter>,
}

impl FxClient {
    /// Creates a client for the given source selection and optional targets.
    ///
    /// A target of `None` (or an empty selection) requests every target the
    /// API quotes for each source.
    pub fn new(
        source: impl Into<CurrencySelection>,
        target: Option<CurrencySelection>,
    ) -> Result<Self> {
        let source_currencies = source.into().into_codes();
        validate_codes(&source_currencies, "source_currency", false)?;

        let target_currencies = match target {
            Some(selection) => {
                let codes = selection.into_codes();
                validate_codes(&codes, "target_currency", true)?;
                if codes.is_empty() {
                    None
                } else {
                    Some(codes)
                }
            }
            None => None,
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to construct HTTP client")?;

        Ok(Self {
            source_currencies,
            target_currencies,
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
            limiter: None,
        })
    }

    /// Points the client at a different API host, mainly for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Enables request throttling with the given policy.
    pub fn with_rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.limiter = Some(RateLimiter::new(config));
        self
    }

    pub fn source_currencies(&self) -> &[String] {
        &self.source_currencies
    }

    pub fn target_currencies(&self) -> Option<&[String]> {
        self.target_currencies.as_deref()
    }

    /// Fetches the latest available rates for every configured source.
    pub fn latest(&self) -> Result<ExchangeRateTable> {
        self.query(Endpoint::Latest)
    }

    /// Fetches rates for one historical date.
    ///
    /// Returned rows carry the caller-supplied date string verbatim.
    pub fn on_date(&self, date: &str) -> Result<ExchangeRateTable> {
        validate_date(date, "date")?;
        self.query(Endpoint::OnDate(date))
    }

    /// Fetches rates for an inclusive date range.
    ///
    /// Non-trading days are simply absent from the result. The bounds are not
    /// checked against each other; the API answers as it sees fit.
    pub fn date_range(&self, start_at: &str, end_at: &str) -> Result<ExchangeRateTable> {
        validate_date(start_at, "start_at")?;
        validate_date(end_at, "end_at")?;
        self.query(Endpoint::History { start_at, end_at })
    }

    /// One request per source currency, merged and re-sorted.
    ///
    /// Any per-source failure aborts the whole query; there are no partial
    /// results.
    fn query(&self, endpoint: Endpoint<'_>) -> Result<ExchangeRateTable> {
        let mut table = ExchangeRateTable::new();

        for source in &self.source_currencies {
            let url = request::build_url(
                &self.base_url,
                endpoint,
                source,
                self.target_currencies.as_deref(),
            );
            let body = self.dispatch(&url)?;

            let rows = match endpoint {
                Endpoint::Latest => decode::flatten_daily(serde_json::from_str(&body)?, None),
                Endpoint::OnDate(date) => {
                    decode::flatten_daily(serde_json::from_str(&body)?, Some(date))
                }
                Endpoint::History { .. } => decode::flatten_history(serde_json::from_str(&body)?),
            };
            table.extend(rows);
        }

        table.sort();
        Ok(table)
    }

    fn dispatch(&self, url: &str) -> Result<String> {
        match &self.limiter {
            Some(limiter) => limiter.run(|| request::send_get(&self.http, url)),
            None => request::send_get(&self.http, url),
        }
    }
}

impl Default for FxClient {
    /// Equivalent to `FxClient::new("GBP", None)`.
    fn default() -> Self {
        Self::new("GBP", None).expect("GBP with all targets is a valid configuration")
    }
}

fn validate_date(value: &str, label: &str) -> Result<()> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        FxError::invalid_argument(format!(
            "{label} must be provided in the date format YYYY-MM-DD, got `{value}`"
        ))
    })?;
    Ok(())
}
