//! Editing session for a product's options and variants.

use chrono::{DateTime, Utc};
use tracing::debug;

use maison_core::{DomainError, DomainResult};

use crate::option::{MAX_OPTIONS, ProductOption};
use crate::variant::{FieldValue, InventoryEntry, Variant, VariantField, generate, update_variant_field};

/// Clamp a stock count entered by the operator to zero or more.
pub fn clamp_stock(value: i64) -> i64 {
    value.max(0)
}

/// Options being edited plus the variants derived from them.
///
/// Variants are regenerated from scratch whenever the normalized options
/// change; field edits made before that are discarded. Edits survive as long
/// as the options normalize to the same names and values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantMatrix {
    options: Vec<ProductOption>,
    variants: Vec<Variant>,
}

type Axes = Vec<(Option<String>, Vec<String>)>;

fn axes(options: &[ProductOption]) -> Axes {
    options
        .iter()
        .map(|o| (o.label().map(str::to_owned), o.normalized_values()))
        .collect()
}

impl VariantMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Vec<ProductOption>) -> Self {
        let variants = generate(&options);
        Self { options, variants }
    }

    /// Resume a saved product: variants are taken as persisted.
    pub fn from_saved(options: Vec<ProductOption>, variants: Vec<Variant>) -> Self {
        Self { options, variants }
    }

    pub fn options(&self) -> &[ProductOption] {
        &self.options
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn into_parts(self) -> (Vec<ProductOption>, Vec<Variant>) {
        (self.options, self.variants)
    }

    /// Replace the option set. Returns `true` when the variants were regenerated.
    pub fn set_options(&mut self, options: Vec<ProductOption>) -> bool {
        let changed = axes(&options) != axes(&self.options);
        self.options = options;
        if changed {
            self.variants = generate(&self.options);
            debug!(
                options = self.options.len(),
                variants = self.variants.len(),
                "variant matrix regenerated"
            );
        }
        changed
    }

    /// Append an empty option row, up to [`MAX_OPTIONS`].
    pub fn add_option(&mut self, option: ProductOption) -> DomainResult<bool> {
        if self.options.len() >= MAX_OPTIONS {
            return Err(DomainError::validation(format!(
                "a product supports at most {MAX_OPTIONS} options"
            )));
        }
        let mut options = self.options.clone();
        options.push(option);
        Ok(self.set_options(options))
    }

    pub fn replace_option(&mut self, index: usize, option: ProductOption) -> DomainResult<bool> {
        if index >= self.options.len() {
            return Err(DomainError::invalid_index(index, self.options.len()));
        }
        let mut options = self.options.clone();
        options[index] = option;
        Ok(self.set_options(options))
    }

    pub fn remove_option(&mut self, index: usize) -> DomainResult<bool> {
        if index >= self.options.len() {
            return Err(DomainError::invalid_index(index, self.options.len()));
        }
        let mut options = self.options.clone();
        options.remove(index);
        Ok(self.set_options(options))
    }

    pub fn update_field(
        &mut self,
        index: usize,
        field: VariantField,
        value: impl Into<FieldValue>,
    ) -> DomainResult<()> {
        self.variants = update_variant_field(&self.variants, index, field, value)?;
        Ok(())
    }

    /// Record a stock movement. The resulting stock is clamped at zero and the
    /// history entry carries the adjustment that was actually applied.
    pub fn adjust_stock(
        &mut self,
        index: usize,
        delta: i64,
        event: impl Into<String>,
        at: DateTime<Utc>,
    ) -> DomainResult<i64> {
        let len = self.variants.len();
        let variant = self
            .variants
            .get_mut(index)
            .ok_or_else(|| DomainError::invalid_index(index, len))?;

        let before = variant.stock;
        variant.stock = clamp_stock(before.saturating_add(delta));
        let applied = variant.stock - before;
        variant.inventory_history.push(InventoryEntry {
            date: at,
            event: event.into(),
            adjustment: applied,
        });
        Ok(variant.stock)
    }

    pub fn total_stock(&self) -> i64 {
        self.variants.iter().map(|v| v.stock.max(0)).sum()
    }
}
