//! Route handlers for the statistics, bar chart and pie chart JSON endpoints.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    product::{FilterQuery, ProductFilter},
    statistics::{
        aggregation::{
            CategoryHistogram, PriceHistogram, SalesSummary, build_category_histogram,
            build_price_histogram, summarize_sales,
        },
        sale::{Sale, get_matching_sales},
    },
};

/// The state needed for computing statistics.
#[derive(Debug, Clone)]
pub struct StatisticsState {
    /// The database connection for reading products.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for StatisticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Resolve the filter and load every matching sale.
///
/// The filter is checked before the database lock is taken.
fn load_sales(state: &StatisticsState, query: &FilterQuery) -> Result<Vec<Sale>, Error> {
    let filter = ProductFilter::from_query(query)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_matching_sales(&filter, &connection).inspect_err(|error| {
        tracing::error!(
            "could not get sales for {} with search {:?}: {error}",
            filter.month_name(),
            filter.search()
        )
    })
}

/// Get the total sales and the number of sold and unsold items.
pub async fn get_statistics_endpoint(
    State(state): State<StatisticsState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<SalesSummary>, Error> {
    let sales = load_sales(&state, &query)?;

    Ok(Json(summarize_sales(&sales)))
}

/// Get the number of items in each price range.
pub async fn get_bar_chart_endpoint(
    State(state): State<StatisticsState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<PriceHistogram>, Error> {
    let sales = load_sales(&state, &query)?;

    Ok(Json(build_price_histogram(&sales)))
}

/// Get the number of items in each category.
pub async fn get_pie_chart_endpoint(
    State(state): State<StatisticsState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<CategoryHistogram>, Error> {
    let sales = load_sales(&state, &query)?;

    Ok(Json(build_category_histogram(&sales)))
}
