//! Back-office logic: list pages, orders, customers, dashboard.
//!
//! Records live behind the [`Repository`] trait; the in-memory implementation
//! is what the admin runs on today.

pub mod customers;
pub mod dashboard;
pub mod listing;
pub mod orders;
pub mod query;
pub mod settings;
pub mod store;

pub use customers::{Customer, refresh_stats};
pub use dashboard::{DashboardSummary, LowStockItem, TopProduct, summarize};
pub use orders::{Order, OrderBook, OrderLine, OrderStatus, StatusChange};
pub use query::{ListQuery, Listable, Page, SortDirection, SortKey, run_query};
pub use settings::{AdminSettings, SettingsError};
pub use store::{InMemoryRepository, Repository};
