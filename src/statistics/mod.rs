//! Statistics over the products matching a month and search term.
//!
//! Three views share the product filter: the summary totals, the price range
//! histogram (bar chart) and the category histogram (pie chart).

mod aggregation;
mod endpoints;
mod sale;

pub use aggregation::{CategoryHistogram, PriceHistogram, SalesAggregates, SalesSummary};
pub(crate) use aggregation::aggregate_sales;
pub use endpoints::{get_bar_chart_endpoint, get_pie_chart_endpoint, get_statistics_endpoint};
pub(crate) use sale::get_matching_sales;
