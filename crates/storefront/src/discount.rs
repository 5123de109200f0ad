//! Discount codes redeemable at checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use maison_core::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DiscountKind {
    /// Percentage off the subtotal, in basis points (1500 = 15%).
    Percentage { basis_points: u32 },
    /// Fixed amount off, in cents.
    Fixed { cents: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub code: String,
    pub kind: DiscountKind,
    pub min_subtotal_cents: u64,
    pub active: bool,
    pub usage_limit: Option<u32>,
    pub used: u32,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Discount {
    pub fn new(code: impl Into<String>, kind: DiscountKind) -> DomainResult<Self> {
        let code = code.into().trim().to_ascii_uppercase();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(DomainError::validation(format!("invalid discount code: {code:?}")));
        }
        if let DiscountKind::Percentage { basis_points } = kind {
            if basis_points == 0 || basis_points > 10_000 {
                return Err(DomainError::validation("percentage must be between 0.01% and 100%"));
            }
        }
        Ok(Self {
            code,
            kind,
            min_subtotal_cents: 0,
            active: true,
            usage_limit: None,
            used: 0,
            expires_at: None,
        })
    }

    /// Codes are matched case-insensitively.
    pub fn matches(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }

    pub fn is_exhausted(&self) -> bool {
        self.usage_limit.is_some_and(|limit| self.used >= limit)
    }

    /// Amount taken off `subtotal_cents`, never more than the subtotal.
    pub fn amount_off(&self, subtotal_cents: u64, now: DateTime<Utc>) -> DomainResult<u64> {
        self.ensure_usable(now)?;
        if subtotal_cents < self.min_subtotal_cents {
            return Err(DomainError::validation(format!(
                "code {} needs a subtotal of at least {}",
                self.code,
                maison_core::format_cents(self.min_subtotal_cents)
            )));
        }

        let off = match self.kind {
            DiscountKind::Percentage { basis_points } => {
                subtotal_cents.saturating_mul(u64::from(basis_points)) / 10_000
            }
            DiscountKind::Fixed { cents } => cents,
        };
        Ok(off.min(subtotal_cents))
    }

    /// Record one redemption at `now`.
    pub fn redeem(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_usable(now)?;
        self.used = self.used.saturating_add(1);
        Ok(())
    }

    fn ensure_usable(&self, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.active {
            return Err(DomainError::validation(format!("code {} is not active", self.code)));
        }
        if self.expires_at.is_some_and(|at| now >= at) {
            return Err(DomainError::validation(format!("code {} has expired", self.code)));
        }
        if self.is_exhausted() {
            return Err(DomainError::conflict(format!(
                "code {} reached its usage limit",
                self.code
            )));
        }
        Ok(())
    }
}
