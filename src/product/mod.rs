//! Products (the rows of the transactions table) and the shared month/search filter.
//!
//! This module contains:
//! - The `Product` model and `NewProduct` for inserting products
//! - The `ProductFilter` used by both the transactions page and the statistics
//! - The `/transactions` JSON endpoint

mod core;
mod filter;
mod query;
mod transactions_endpoint;

pub use core::{NewProduct, Product, count_products, create_product_table, insert_products};
pub(crate) use filter::FILTER_CONDITION;
pub use filter::{FilterQuery, ProductFilter};
pub(crate) use query::get_products_page;
pub use transactions_endpoint::get_transactions_endpoint;
