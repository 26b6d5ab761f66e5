use crate::error::Result;

pub mod decode;
pub mod limiter;
pub mod request;

pub use decode::{DailyRates, HistoryRates};
pub use limiter::{RateLimitConfig, RateLimiter};
pub use request::Endpoint;

/// Timeout applied to every outbound request.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

pub type FetchResult<T> = Result<T>;
