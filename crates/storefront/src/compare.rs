use serde::{Deserialize, Serialize};
use tracing::debug;

use maison_core::ProductId;

use crate::store::Reducer;

/// Products that fit side by side in the comparison table.
pub const COMPARE_LIMIT: usize = 4;

#[derive(Debug, Clone)]
pub enum CompareAction {
    Add(ProductId),
    Remove(ProductId),
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareList {
    pub items: Vec<ProductId>,
}

impl CompareList {
    pub fn is_full(&self) -> bool {
        self.items.len() >= COMPARE_LIMIT
    }
}

impl Reducer for CompareList {
    type Action = CompareAction;

    const NAME: &'static str = "compare";

    fn reduce(&self, action: &Self::Action) -> Self {
        let mut next = self.clone();
        match action {
            CompareAction::Add(id) => {
                if next.items.contains(id) {
                    return next;
                }
                if next.is_full() {
                    debug!(product_id = %id, "compare list full; add ignored");
                    return next;
                }
                next.items.push(*id);
            }
            CompareAction::Remove(id) => next.items.retain(|i| i != id),
            CompareAction::Clear => next.items.clear(),
        }
        next
    }
}
