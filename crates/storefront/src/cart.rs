use serde::{Deserialize, Serialize};

use maison_core::ProductId;

use crate::store::Reducer;

/// Upper bound on the quantity of a single line.
pub const MAX_LINE_QUANTITY: u32 = 99;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    /// Variant combination key (`Color=Red;Size=M`); empty for products
    /// without options.
    pub variant_key: String,
    pub name: String,
    pub variant_title: String,
    pub unit_price_cents: u64,
    pub quantity: u32,
}

impl CartLine {
    fn same_item(&self, product_id: ProductId, variant_key: &str) -> bool {
        self.product_id == product_id && self.variant_key == variant_key
    }

    pub fn line_total_cents(&self) -> u64 {
        self.unit_price_cents.saturating_mul(u64::from(self.quantity))
    }
}

#[derive(Debug, Clone)]
pub enum CartAction {
    /// Add a line, merging into an existing line for the same variant.
    AddItem(CartLine),
    RemoveItem { product_id: ProductId, variant_key: String },
    /// Set the quantity of a line; 0 removes it.
    UpdateQuantity { product_id: ProductId, variant_key: String, quantity: u32 },
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of units across all lines (the badge count).
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn subtotal_cents(&self) -> u64 {
        self.lines
            .iter()
            .map(CartLine::line_total_cents)
            .fold(0u64, u64::saturating_add)
    }
}

impl Reducer for Cart {
    type Action = CartAction;

    const NAME: &'static str = "cart";

    fn reduce(&self, action: &Self::Action) -> Self {
        let mut next = self.clone();
        match action {
            CartAction::AddItem(line) => {
                if line.quantity == 0 {
                    return next;
                }
                match next
                    .lines
                    .iter_mut()
                    .find(|l| l.same_item(line.product_id, &line.variant_key))
                {
                    Some(existing) => {
                        existing.quantity =
                            (existing.quantity.saturating_add(line.quantity)).min(MAX_LINE_QUANTITY);
                    }
                    None => {
                        let mut line = line.clone();
                        line.quantity = line.quantity.min(MAX_LINE_QUANTITY);
                        next.lines.push(line);
                    }
                }
            }
            CartAction::RemoveItem { product_id, variant_key } => {
                next.lines.retain(|l| !l.same_item(*product_id, variant_key));
            }
            CartAction::UpdateQuantity { product_id, variant_key, quantity } => {
                if *quantity == 0 {
                    next.lines.retain(|l| !l.same_item(*product_id, variant_key));
                } else if let Some(line) = next
                    .lines
                    .iter_mut()
                    .find(|l| l.same_item(*product_id, variant_key))
                {
                    line.quantity = (*quantity).min(MAX_LINE_QUANTITY);
                }
            }
            CartAction::Clear => next.lines.clear(),
        }
        next
    }
}
