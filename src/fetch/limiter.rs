use std::collections::VecDeque;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use log::warn;

use crate::error::FxError;

use super::FetchResult;

const MAX_BACKOFF_SECS: u64 = 64;

/// Sliding-window throttle policy for outbound requests.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub calls_per_window: usize,
    pub window: Duration,
    pub max_attempts: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            calls_per_window: 20,
            window: Duration::from_secs(20),
            max_attempts: 10,
        }
    }
}

/// Token-bucket limiter wrapped around the transport call.
///
/// Permit acquisition retries with exponential backoff up to the configured
/// attempt budget; the wrapped call itself runs at most once and is never
/// retried.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    calls: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            calls: Mutex::new(VecDeque::new()),
        }
    }

    /// Runs `op` once a permit is available within the attempt budget.
    pub fn run<T>(&self, op: impl FnOnce() -> FetchResult<T>) -> FetchResult<T> {
        self.acquire()?;
        op()
    }

    fn acquire(&self) -> FetchResult<()> {
        for attempt in 0..self.config.max_attempts {
            if self.try_acquire() {
                return Ok(());
            }

            if attempt + 1 < self.config.max_attempts {
                let delay = backoff_delay(attempt);
                warn!(
                    "Rate limit window full, backing off for {}s (attempt {}/{})",
                    delay.as_secs(),
                    attempt + 1,
                    self.config.max_attempts
                );
                thread::sleep(delay);
            }
        }

        Err(FxError::RateLimited {
            attempts: self.config.max_attempts,
        })
    }

    fn try_acquire(&self) -> bool {
        let now = Instant::now();
        let mut calls = match self.calls.lock() {
            Ok(calls) => calls,
            Err(poisoned) => poisoned.into_inner(),
        };

        while let Some(oldest) = calls.front() {
            if now.duration_since(*oldest) >= self.config.window {
                calls.pop_front();
            } else {
                break;
            }
        }

        if calls.len() < self.config.calls_per_window {
            calls.push_back(now);
            true
        } else {
            false
        }
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let exponent = attempt.min(u32::BITS - 1);
    let secs = 1u64.checked_shl(exponent).unwrap_or(MAX_BACKOFF_SECS);
    Duration::from_secs(secs.min(MAX_BACKOFF_SECS))
}
