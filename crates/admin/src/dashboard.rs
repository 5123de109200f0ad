//! Headline numbers for the admin dashboard.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use maison_catalog::Product;
use maison_core::{AggregateRoot, ProductId};

use crate::orders::{Order, OrderStatus};
use crate::settings::AdminSettings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub variant_title: String,
    pub stock: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_id: ProductId,
    pub name: String,
    pub units: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub revenue_cents: u64,
    pub order_count: usize,
    pub average_order_cents: u64,
    pub orders_by_status: BTreeMap<OrderStatus, usize>,
    pub low_stock: Vec<LowStockItem>,
    pub top_products: Vec<TopProduct>,
}

/// How many best sellers the dashboard shows.
pub const TOP_PRODUCTS: usize = 5;

/// Summarize orders and catalog stock.
///
/// Revenue and the average cover only orders that were not cancelled or
/// refunded. Low stock lists listed (active) products' variants at or below
/// the configured threshold, lowest first.
pub fn summarize(orders: &[Order], products: &[Product], settings: &AdminSettings) -> DashboardSummary {
    let mut orders_by_status = BTreeMap::new();
    let mut revenue_cents = 0u64;
    let mut revenue_orders = 0u64;
    let mut units: HashMap<ProductId, (String, u32)> = HashMap::new();

    for order in orders {
        *orders_by_status.entry(order.status).or_insert(0) += 1;
        if !order.status.is_revenue() {
            continue;
        }
        revenue_cents += order.total_cents;
        revenue_orders += 1;
        for line in &order.lines {
            let entry = units
                .entry(line.product_id)
                .or_insert_with(|| (line.name.clone(), 0));
            entry.1 += line.quantity;
        }
    }

    let average_order_cents = if revenue_orders == 0 {
        0
    } else {
        revenue_cents / revenue_orders
    };

    let threshold = settings.low_stock_threshold;
    let mut low_stock: Vec<LowStockItem> = products
        .iter()
        .filter(|p| p.is_listed())
        .flat_map(|p| {
            p.variants()
                .iter()
                .filter(move |v| v.stock <= threshold)
                .map(move |v| LowStockItem {
                    product_id: *p.id(),
                    product_name: p.name().to_string(),
                    variant_title: v.title_in(p.options()),
                    stock: v.stock,
                })
        })
        .collect();
    low_stock.sort_by(|a, b| a.stock.cmp(&b.stock).then_with(|| a.product_name.cmp(&b.product_name)));

    let mut top_products: Vec<TopProduct> = units
        .into_iter()
        .map(|(product_id, (name, units))| TopProduct { product_id, name, units })
        .collect();
    top_products.sort_by(|a, b| b.units.cmp(&a.units).then_with(|| a.name.cmp(&b.name)));
    top_products.truncate(TOP_PRODUCTS);

    DashboardSummary {
        revenue_cents,
        order_count: orders.len(),
        average_order_cents,
        orders_by_status,
        low_stock,
        top_products,
    }
}
