//! Defines the route handler for a page of transactions as JSON.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    pagination::{PageRequest, PaginationConfig},
    product::{
        core::Product,
        filter::{FilterQuery, ProductFilter},
        query::get_products_page,
    },
};

/// The state needed to query products.
#[derive(Debug, Clone)]
pub struct ProductState {
    /// The database connection for reading products.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The default page and page size.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters for `/transactions`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    /// The 1-indexed page number.
    pub page: Option<u64>,
    /// The maximum number of transactions on the page.
    pub per_page: Option<u64>,
    /// The name of a month, e.g. "March".
    pub month: Option<String>,
    /// Text to look for in the title or description, or an exact price.
    pub search: Option<String>,
}

/// Get a page of the transactions in a month that match a search term.
pub async fn get_transactions_endpoint(
    State(state): State<ProductState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<Vec<Product>>, Error> {
    let filter = ProductFilter::from_query(&FilterQuery {
        month: query.month,
        search: query.search,
    })?;
    let page = PageRequest::new(query.page, query.per_page, &state.pagination_config)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let products = get_products_page(&filter, page, &connection)
        .inspect_err(|error| tracing::error!("Error fetching transactions: {error}"))?;

    Ok(Json(products))
}
