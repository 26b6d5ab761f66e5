use crate::error::{FxError, Result};

/// One currency code or an ordered list of codes.
///
/// The upstream API takes a single `base` currency per request but callers
/// often want several, so both forms convert into the same ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencySelection {
    One(String),
    Many(Vec<String>),
}

impl CurrencySelection {
    /// Normalizes the selection into an ordered sequence of codes.
    pub fn into_codes(self) -> Vec<String> {
        match self {
            CurrencySelection::One(code) => vec![code],
            CurrencySelection::Many(codes) => codes,
        }
    }
}

impl From<&str> for CurrencySelection {
    fn from(code: &str) -> Self {
        CurrencySelection::One(code.to_string())
    }
}

impl From<String> for CurrencySelection {
    fn from(code: String) -> Self {
        CurrencySelection::One(code)
    }
}

impl From<Vec<String>> for CurrencySelection {
    fn from(codes: Vec<String>) -> Self {
        CurrencySelection::Many(codes)
    }
}

impl From<Vec<&str>> for CurrencySelection {
    fn from(codes: Vec<&str>) -> Self {
        CurrencySelection::Many(codes.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for CurrencySelection {
    fn from(codes: &[&str]) -> Self {
        CurrencySelection::Many(codes.iter().map(|c| c.to_string()).collect())
    }
}

/// Validates a normalized selection before it is stored on the client.
///
/// `allow_empty` is set for target currencies, where an empty list behaves
/// like "all available targets"; source currencies must name at least one.
pub fn validate_codes(codes: &[String], label: &str, allow_empty: bool) -> Result<()> {
    if codes.is_empty() && !allow_empty {
        return Err(FxError::invalid_argument(format!(
            "{label} must contain at least one currency code"
        )));
    }

    for code in codes {
        if code.trim().is_empty() {
            return Err(FxError::invalid_argument(format!(
                "{label} contains an empty currency code"
            )));
        }
    }

    Ok(())
}
