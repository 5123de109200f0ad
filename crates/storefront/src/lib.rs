//! Storefront client state.
//!
//! Cart, wishlist, compare list and theme are each a plain value with a pure
//! transition function `(state, action) -> state`. A [`Store`] owns one of them
//! and is passed explicitly to whatever renders it.

pub mod cart;
pub mod checkout;
pub mod compare;
pub mod discount;
pub mod store;
pub mod theme;
pub mod wishlist;

pub use cart::{Cart, CartAction, CartLine};
pub use checkout::{Quote, ShippingPolicy, quote};
pub use compare::{COMPARE_LIMIT, CompareAction, CompareList};
pub use discount::{Discount, DiscountKind};
pub use store::{Reducer, Store};
pub use theme::{Theme, ThemeAction, ThemeMode};
pub use wishlist::{Wishlist, WishlistAction};
