use serde::{Deserialize, Serialize};

use maison_core::ProductId;

use crate::store::Reducer;

#[derive(Debug, Clone)]
pub enum WishlistAction {
    /// Add the product if absent, remove it if present (the heart button).
    Toggle(ProductId),
    Remove(ProductId),
    Clear,
}

/// Saved products, most recently added last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    pub items: Vec<ProductId>,
}

impl Wishlist {
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.contains(&product_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Reducer for Wishlist {
    type Action = WishlistAction;

    const NAME: &'static str = "wishlist";

    fn reduce(&self, action: &Self::Action) -> Self {
        let mut next = self.clone();
        match action {
            WishlistAction::Toggle(id) => {
                if next.contains(*id) {
                    next.items.retain(|i| i != id);
                } else {
                    next.items.push(*id);
                }
            }
            WishlistAction::Remove(id) => next.items.retain(|i| i != id),
            WishlistAction::Clear => next.items.clear(),
        }
        next
    }
}
