//! Variant matrix generation.
//!
//! A product with options Size = [S, M] and Color = [Red, Blue] sells four
//! variants. [`generate`] expands the options into that full matrix, in
//! odometer order (leftmost option varies slowest), and hands back blank
//! records for the operator to price and stock.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use maison_core::{DomainError, DomainResult};

use crate::option::ProductOption;

/// One stock movement recorded against a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub date: DateTime<Utc>,
    pub event: String,
    pub adjustment: i64,
}

/// One purchasable combination of option values.
///
/// `id` is the position in the generation pass that produced the record. It is
/// reassigned from zero every time the matrix is regenerated and must not be
/// used as a persistent key; see [`Variant::combination_key`] for that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: usize,
    pub options: BTreeMap<String, String>,
    pub sku: String,
    pub price: String,
    pub stock: i64,
    pub inventory_history: Vec<InventoryEntry>,
}

impl Variant {
    fn blank(id: usize, options: BTreeMap<String, String>) -> Self {
        Self {
            id,
            options,
            sku: String::new(),
            price: String::new(),
            stock: 0,
            inventory_history: Vec::new(),
        }
    }

    /// Stable identity of the combination: `name=value` pairs sorted by name and
    /// joined with `;` (e.g. `Color=Red;Size=M`).
    pub fn combination_key(&self) -> String {
        self.options
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Values joined by " / " in option-name order, since the label map does
    /// not keep axis order. Use [`Variant::title_in`] when the options are at
    /// hand.
    pub fn title(&self) -> String {
        self.options.values().cloned().collect::<Vec<_>>().join(" / ")
    }

    /// Values joined by " / " in the order of `options` ("S / Blue" for
    /// Size then Color).
    pub fn title_in(&self, options: &[ProductOption]) -> String {
        options
            .iter()
            .filter_map(|opt| opt.label())
            .filter_map(|name| self.options.get(name).map(String::as_str))
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Editable fields of a generated variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantField {
    Price,
    Sku,
    Stock,
}

/// Raw value coming out of the variant table's inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(i64),
    Text(String),
}

impl FieldValue {
    fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Number(n) => n.to_string(),
        }
    }

    /// Integer coercion used for stock. Text that does not hold an integer
    /// (including the empty string of a cleared input) becomes 0.
    fn into_integer(self) -> i64 {
        match self {
            FieldValue::Number(n) => n,
            FieldValue::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value)
    }
}

/// Expand `options` into the full combination matrix.
///
/// Returns an empty vector when there are no options, when any option has no
/// values left after normalization, or when the matrix size overflows `usize`. Options with a blank name still multiply
/// the matrix but add no key to `Variant::options`.
pub fn generate(options: &[ProductOption]) -> Vec<Variant> {
    if options.is_empty() {
        return Vec::new();
    }

    let axes: Vec<(Option<&str>, Vec<String>)> = options
        .iter()
        .map(|opt| (opt.label(), opt.normalized_values()))
        .collect();

    if axes.iter().any(|(_, values)| values.is_empty()) {
        return Vec::new();
    }

    let Some(total) = axes
        .iter()
        .try_fold(1usize, |acc, (_, values)| acc.checked_mul(values.len()))
    else {
        return Vec::new();
    };
    let mut variants = Vec::with_capacity(total);
    let mut cursor = vec![0usize; axes.len()];

    for id in 0..total {
        let labels = axes
            .iter()
            .zip(&cursor)
            .filter_map(|((name, values), &pos)| {
                name.map(|n| (n.to_owned(), values[pos].clone()))
            })
            .collect();
        variants.push(Variant::blank(id, labels));

        // Advance the odometer: rightmost axis turns fastest.
        for axis in (0..cursor.len()).rev() {
            cursor[axis] += 1;
            if cursor[axis] < axes[axis].1.len() {
                break;
            }
            cursor[axis] = 0;
        }
    }

    variants
}

/// Return a copy of `variants` with one field of the record at `index` replaced.
///
/// The input slice is never modified.
pub fn update_variant_field(
    variants: &[Variant],
    index: usize,
    field: VariantField,
    value: impl Into<FieldValue>,
) -> DomainResult<Vec<Variant>> {
    if index >= variants.len() {
        return Err(DomainError::invalid_index(index, variants.len()));
    }

    let mut updated = variants.to_vec();
    let target = &mut updated[index];
    let value = value.into();
    match field {
        VariantField::Price => target.price = value.into_text(),
        VariantField::Sku => target.sku = value.into_text(),
        VariantField::Stock => target.stock = value.into_integer(),
    }
    Ok(updated)
}
