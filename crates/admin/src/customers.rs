use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use maison_core::{CustomerId, DomainError, DomainResult};

use crate::orders::Order;
use crate::query::{Listable, SortKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub joined_at: DateTime<Utc>,
    pub orders_count: u32,
    pub total_spent_cents: u64,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        email: impl Into<String>,
        joined_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        let email = email.into().trim().to_lowercase();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => return Err(DomainError::validation(format!("invalid email: {email:?}"))),
        }
        Ok(Self {
            id,
            name,
            email,
            joined_at,
            orders_count: 0,
            total_spent_cents: 0,
        })
    }
}

/// Recompute order counts and lifetime spend from `orders`.
///
/// Cancelled and refunded orders count as orders but not as spend.
pub fn refresh_stats(customers: &[Customer], orders: &[Order]) -> Vec<Customer> {
    let mut stats: HashMap<CustomerId, (u32, u64)> = HashMap::new();
    for order in orders {
        let entry = stats.entry(order.customer_id).or_default();
        entry.0 += 1;
        if order.status.is_revenue() {
            entry.1 += order.total_cents;
        }
    }

    customers
        .iter()
        .map(|c| {
            let (count, spent) = stats.get(&c.id).copied().unwrap_or_default();
            Customer {
                orders_count: count,
                total_spent_cents: spent,
                ..c.clone()
            }
        })
        .collect()
}

impl Listable for Customer {
    fn search_text(&self) -> String {
        format!("{} {}", self.name, self.email)
    }

    fn matches_filter(&self, field: &str, value: &str) -> bool {
        match field {
            "segment" => match value {
                "new" => self.orders_count == 0,
                "returning" => self.orders_count > 1,
                _ => false,
            },
            _ => false,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "name" => Some(SortKey::text(&self.name)),
            "joined" => Some(SortKey::Time(self.joined_at)),
            "orders" => Some(SortKey::Number(i64::from(self.orders_count))),
            "spent" => Some(SortKey::Number(self.total_spent_cents as i64)),
            _ => None,
        }
    }
}
