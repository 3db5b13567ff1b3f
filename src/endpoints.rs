//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page with the transactions table, statistics and charts.
pub const DASHBOARD_VIEW: &str = "/dashboard";

/// The route that downloads the seed data and saves it to the database.
pub const INITIALIZE: &str = "/initialize";
/// The route for a page of transactions matching a month and search term.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for the total sales and sold/unsold counts.
pub const STATISTICS: &str = "/statistics";
/// The route for the price range histogram.
pub const BAR_CHART: &str = "/barchart";
/// The route for the category histogram.
pub const PIE_CHART: &str = "/piechart";
