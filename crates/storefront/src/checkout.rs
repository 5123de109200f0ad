//! Order totals shown on the checkout page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use maison_core::DomainResult;

use crate::cart::Cart;
use crate::discount::Discount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    pub flat_rate_cents: u64,
    /// Orders at or above this amount (after discount) ship free.
    pub free_over_cents: u64,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            flat_rate_cents: 995,
            free_over_cents: 15_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub subtotal_cents: u64,
    pub discount_cents: u64,
    pub shipping_cents: u64,
    pub total_cents: u64,
    pub discount_code: Option<String>,
}

/// Price a cart. An unusable discount code fails the quote so the page can
/// show why; an empty cart quotes zero with no shipping.
pub fn quote(
    cart: &Cart,
    discount: Option<&Discount>,
    shipping: ShippingPolicy,
    now: DateTime<Utc>,
) -> DomainResult<Quote> {
    let subtotal = cart.subtotal_cents();
    let discount_cents = match discount {
        Some(d) => d.amount_off(subtotal, now)?,
        None => 0,
    };
    let discounted = subtotal - discount_cents;

    let shipping_cents = if cart.is_empty() || discounted >= shipping.free_over_cents {
        0
    } else {
        shipping.flat_rate_cents
    };

    Ok(Quote {
        subtotal_cents: subtotal,
        discount_cents,
        shipping_cents,
        total_cents: discounted + shipping_cents,
        discount_code: discount.map(|d| d.code.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartAction, CartLine};
    use crate::discount::DiscountKind;
    use crate::store::Reducer;
    use maison_core::ProductId;

    fn cart_of(cents: u64, qty: u32) -> Cart {
        Cart::default().reduce(&CartAction::AddItem(CartLine {
            product_id: ProductId::new(),
            variant_key: "Size=M".to_string(),
            name: "Wrap Dress".to_string(),
            variant_title: "M".to_string(),
            unit_price_cents: cents,
            quantity: qty,
        }))
    }

    #[test]
    fn small_order_pays_flat_shipping() {
        let q = quote(&cart_of(4990, 1), None, ShippingPolicy::default(), Utc::now()).unwrap();
        assert_eq!(q.subtotal_cents, 4990);
        assert_eq!(q.shipping_cents, 995);
        assert_eq!(q.total_cents, 5985);
        assert_eq!(q.discount_code, None);
    }

    #[test]
    fn discount_can_drop_order_below_free_shipping() {
        let d = Discount::new("TENOFF", DiscountKind::Percentage { basis_points: 1000 }).unwrap();
        let q = quote(&cart_of(15_000, 1), Some(&d), ShippingPolicy::default(), Utc::now()).unwrap();
        assert_eq!(q.discount_cents, 1500);
        assert_eq!(q.shipping_cents, 995);
        assert_eq!(q.total_cents, 13_500 + 995);
        assert_eq!(q.discount_code.as_deref(), Some("TENOFF"));
    }

    #[test]
    fn empty_cart_quotes_zero() {
        let q = quote(&Cart::default(), None, ShippingPolicy::default(), Utc::now()).unwrap();
        assert_eq!(q.total_cents, 0);
    }

    #[test]
    fn unusable_code_fails_quote() {
        let mut d = Discount::new("BIG", DiscountKind::Fixed { cents: 100 }).unwrap();
        d.min_subtotal_cents = 100_000;
        assert!(quote(&cart_of(1000, 1), Some(&d), ShippingPolicy::default(), Utc::now()).is_err());
    }
}
