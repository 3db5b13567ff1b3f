//! Dashboard module
//!
//! Provides a page showing one page of transactions for a month together with
//! the month's statistics, a price range bar chart and a category pie chart.
//! The month selector, search box and page links re-render the page through
//! HTMX in a single request.

mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
