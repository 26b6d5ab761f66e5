pub mod client;
pub mod currency;
pub mod error;
pub mod fetch;
pub mod table;

pub use client::{FxClient, DEFAULT_BASE_URL};
pub use currency::CurrencySelection;
pub use error::{FxError, Result};
pub use fetch::{RateLimitConfig, RateLimiter};
pub use table::{ExchangeRateRow, ExchangeRateTable};
