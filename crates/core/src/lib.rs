//! `maison-core` — shared domain building blocks for the storefront and back-office.
//!
//! This crate contains **pure domain** primitives (no IO, no rendering, no storage).

pub mod aggregate;
pub mod error;
pub mod event;
pub mod id;
pub mod money;

pub use aggregate::{Aggregate, AggregateRoot, ExpectedVersion};
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::{CategoryId, CustomerId, OrderId, ProductId};
pub use money::{format_cents, parse_price};
