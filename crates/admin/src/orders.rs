//! Orders and their fulfilment status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use maison_core::{CustomerId, DomainError, DomainResult, OrderId, ProductId};
use maison_storefront::{Cart, Quote};

use crate::query::{ListQuery, Listable, Page, SortKey, run_query};
use crate::settings::AdminSettings;
use crate::store::Repository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }

    /// Allowed fulfilment moves:
    /// pending -> processing -> shipped -> delivered -> refunded, and
    /// cancellation while nothing has shipped.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Processing, Shipped)
                | (Shipped, Delivered)
                | (Pending, Cancelled)
                | (Processing, Cancelled)
                | (Delivered, Refunded)
        )
    }

    /// Orders in these states count toward revenue.
    pub fn is_revenue(self) -> bool {
        !matches!(self, OrderStatus::Cancelled | OrderStatus::Refunded)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub variant_key: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price_cents: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub customer_email: String,
    pub lines: Vec<OrderLine>,
    pub subtotal_cents: u64,
    pub discount_cents: u64,
    pub shipping_cents: u64,
    pub total_cents: u64,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
    pub history: Vec<StatusChange>,
}

impl Order {
    /// Turn a checked-out cart into a pending order.
    pub fn from_checkout(
        id: OrderId,
        customer_id: CustomerId,
        customer_name: impl Into<String>,
        customer_email: impl Into<String>,
        cart: &Cart,
        quote: &Quote,
        placed_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if cart.is_empty() {
            return Err(DomainError::validation("cannot place an order for an empty cart"));
        }
        if quote.subtotal_cents != cart.subtotal_cents() {
            return Err(DomainError::conflict("cart changed after the quote was computed"));
        }

        let lines = cart
            .lines
            .iter()
            .map(|l| OrderLine {
                product_id: l.product_id,
                variant_key: l.variant_key.clone(),
                name: l.name.clone(),
                quantity: l.quantity,
                unit_price_cents: l.unit_price_cents,
            })
            .collect();

        Ok(Self {
            id,
            customer_id,
            customer_name: customer_name.into(),
            customer_email: customer_email.into(),
            lines,
            subtotal_cents: quote.subtotal_cents,
            discount_cents: quote.discount_cents,
            shipping_cents: quote.shipping_cents,
            total_cents: quote.total_cents,
            status: OrderStatus::Pending,
            placed_at,
            history: Vec::new(),
        })
    }

    pub fn units(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn transition(&mut self, next: OrderStatus, at: DateTime<Utc>) -> DomainResult<()> {
        if self.status == next {
            return Err(DomainError::conflict(format!(
                "order is already {}",
                next.as_str()
            )));
        }
        if !self.status.can_transition_to(next) {
            warn!(
                order_id = %self.id,
                from = self.status.as_str(),
                to = next.as_str(),
                "rejected order status change"
            );
            return Err(DomainError::invariant(format!(
                "cannot move order from {} to {}",
                self.status.as_str(),
                next.as_str()
            )));
        }

        self.history.push(StatusChange {
            from: self.status,
            to: next,
            at,
        });
        self.status = next;
        info!(order_id = %self.id, status = next.as_str(), "order status changed");
        Ok(())
    }
}

impl Listable for Order {
    fn search_text(&self) -> String {
        format!("{} {} {}", self.id, self.customer_name, self.customer_email)
    }

    fn matches_filter(&self, field: &str, value: &str) -> bool {
        match field {
            "status" => self.status.as_str().eq_ignore_ascii_case(value),
            "customer" => self.customer_id.to_string() == value,
            _ => false,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "placed_at" | "date" => Some(SortKey::Time(self.placed_at)),
            "total" => Some(SortKey::Number(self.total_cents as i64)),
            "customer" => Some(SortKey::text(&self.customer_name)),
            "status" => Some(SortKey::Text(self.status.as_str().to_string())),
            _ => None,
        }
    }
}

/// Order operations behind a [`Repository`].
pub struct OrderBook<R>
where
    R: Repository<OrderId, Order>,
{
    repo: R,
    settings: AdminSettings,
}

impl<R> OrderBook<R>
where
    R: Repository<OrderId, Order>,
{
    pub fn new(repo: R, settings: AdminSettings) -> Self {
        Self { repo, settings }
    }

    pub fn place(&self, order: Order) -> DomainResult<OrderId> {
        let id = order.id;
        let total_cents = order.total_cents;
        self.repo.insert_new(id, order).map_err(|err| match err {
            DomainError::Conflict(_) => DomainError::conflict(format!("order {id} already exists")),
            other => other,
        })?;
        info!(order_id = %id, total_cents, "order placed");
        Ok(id)
    }

    pub fn get(&self, id: OrderId) -> DomainResult<Order> {
        self.repo.get(&id).ok_or_else(DomainError::not_found)
    }

    pub fn update_status(
        &self,
        id: OrderId,
        next: OrderStatus,
        at: DateTime<Utc>,
    ) -> DomainResult<Order> {
        self.repo.update(&id, |order| order.transition(next, at))
    }

    pub fn all(&self) -> Vec<Order> {
        self.repo.list()
    }

    pub fn list(&self, query: &ListQuery) -> Page<Order> {
        run_query(&self.repo.list(), query, &self.settings)
    }
}
