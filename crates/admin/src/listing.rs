//! List-page support for catalog and storefront records.

use maison_catalog::{Product, ProductStatus};
use maison_core::AggregateRoot;
use maison_storefront::{Discount, DiscountKind};

use crate::query::{Listable, SortKey};

fn status_str(status: ProductStatus) -> &'static str {
    match status {
        ProductStatus::Draft => "draft",
        ProductStatus::Active => "active",
        ProductStatus::Archived => "archived",
    }
}

impl Listable for Product {
    fn search_text(&self) -> String {
        let skus: Vec<&str> = self.variants().iter().map(|v| v.sku.as_str()).collect();
        format!("{} {} {}", self.name(), self.slug(), skus.join(" "))
    }

    fn matches_filter(&self, field: &str, value: &str) -> bool {
        match field {
            "status" => status_str(self.status()).eq_ignore_ascii_case(value),
            "category" => self
                .category_id()
                .is_some_and(|c| c.to_string() == value),
            "stock" => match value {
                "out" => self.total_stock() == 0,
                "in" => self.total_stock() > 0,
                _ => false,
            },
            _ => false,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "name" => Some(SortKey::text(self.name())),
            "price" => self
                .price_range_cents()
                .map(|(min, _)| SortKey::Number(min as i64)),
            "stock" => Some(SortKey::Number(self.total_stock())),
            "updated" => Some(SortKey::Number(self.version() as i64)),
            _ => None,
        }
    }
}

impl Listable for Discount {
    fn search_text(&self) -> String {
        self.code.clone()
    }

    fn matches_filter(&self, field: &str, value: &str) -> bool {
        match field {
            "active" => match value {
                "yes" | "true" => self.active && !self.is_exhausted(),
                "no" | "false" => !self.active || self.is_exhausted(),
                _ => false,
            },
            "type" => matches!(
                (&self.kind, value),
                (DiscountKind::Percentage { .. }, "percentage") | (DiscountKind::Fixed { .. }, "fixed")
            ),
            _ => false,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "code" => Some(SortKey::text(&self.code)),
            "used" => Some(SortKey::Number(i64::from(self.used))),
            "expires" => self.expires_at.map(SortKey::Time),
            _ => None,
        }
    }
}
