//! Currency-less decimal prices.
//!
//! Variant prices are edited as free text ("49", "49.9", "49.90"); everything
//! that sums money works in integer cents.

use crate::error::{DomainError, DomainResult};

/// Parse a decimal price string into cents.
///
/// Accepts an optional fractional part of at most two digits. Negative values,
/// exponents and thousands separators are rejected.
pub fn parse_price(raw: &str) -> DomainResult<u64> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(DomainError::validation("price cannot be empty"));
    }

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(DomainError::validation(format!("invalid price: {raw:?}")));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::validation(format!("invalid price: {raw:?}")));
    }
    if frac.len() > 2 {
        return Err(DomainError::validation(format!(
            "price has more than two decimal places: {raw:?}"
        )));
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| DomainError::validation(format!("price out of range: {raw:?}")))?
    };
    let frac: u64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<u64>().unwrap_or(0) * 10,
        _ => frac.parse::<u64>().unwrap_or(0),
    };

    whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac))
        .ok_or_else(|| DomainError::validation(format!("price out of range: {raw:?}")))
}

/// Render cents as a plain two-decimal string (`4990` -> `"49.90"`).
pub fn format_cents(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
