//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for rendering the dashboard UI
//! - State and query types used by the handler

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    dashboard::{
        charts::{DashboardChart, category_chart, charts_view, price_range_chart},
        tables::{filter_controls, statistics_block, transactions_table},
    },
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, error_content, error_view},
    pagination::{PageRequest, PaginationConfig},
    product::{FilterQuery, Product, ProductFilter, get_products_page},
    statistics::{SalesAggregates, aggregate_sales, get_matching_sales},
};

const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading products.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The default page and page size.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The dashboard state carried in the URL.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// The 1-indexed page of the transactions table.
    pub page: Option<u64>,
    /// The name of the selected month, e.g. "March".
    pub month: Option<String>,
    /// The applied search term.
    pub search: Option<String>,
}

/// Holds all the data needed to render the dashboard.
struct DashboardData {
    filter: ProductFilter,
    page: PageRequest,
    products: Vec<Product>,
    aggregates: SalesAggregates,
}

/// Display the transactions table, statistics and charts for a month.
///
/// HTMX requests get just the dashboard content so that it can be swapped into
/// the existing page, any other request gets the full page.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<DashboardQuery>,
) -> Response {
    match build_dashboard_data(&query, &state) {
        Ok(data) if is_htmx_request => dashboard_content(&data).into_response(),
        Ok(data) => dashboard_view(&dashboard_content(&data)).into_response(),
        Err(error) => dashboard_error_response(error, is_htmx_request),
    }
}

/// Fetches and builds all data needed for the dashboard display.
///
/// The aggregates are only computed when the requested page has products;
/// otherwise they are left at zero.
///
/// # Errors
/// Returns [Error::InvalidMonth] or [Error::InvalidPagination] for a bad
/// query, or an error if the database could not be read.
fn build_dashboard_data(
    query: &DashboardQuery,
    state: &DashboardState,
) -> Result<DashboardData, Error> {
    let filter = ProductFilter::from_query(&FilterQuery {
        month: query.month.clone(),
        search: query.search.clone(),
    })?;
    let page = PageRequest::new(query.page, None, &state.pagination_config)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let products = get_products_page(&filter, page, &connection).inspect_err(|error| {
        tracing::error!(
            "could not get page {} of products for {}: {error}",
            page.page(),
            filter.month_name()
        )
    })?;

    let aggregates = if products.is_empty() {
        SalesAggregates::default()
    } else {
        let sales = get_matching_sales(&filter, &connection).inspect_err(|error| {
            tracing::error!("could not get sales for {}: {error}", filter.month_name())
        })?;

        aggregate_sales(&sales)
    };

    Ok(DashboardData {
        filter,
        page,
        products,
        aggregates,
    })
}

fn build_dashboard_charts(data: &DashboardData) -> [DashboardChart; 2] {
    let month_name = data.filter.month_name();

    [
        DashboardChart {
            id: "price-range-chart",
            options: price_range_chart(month_name, &data.aggregates.price_histogram).to_string(),
        },
        DashboardChart {
            id: "category-chart",
            options: category_chart(month_name, &data.aggregates.category_histogram).to_string(),
        },
    ]
}

/// Renders everything that changes when the page, month or search changes.
fn dashboard_content(data: &DashboardData) -> Markup {
    let charts = build_dashboard_charts(data);

    html!(
        (filter_controls(&data.filter, data.page))
        (transactions_table(&data.products, &data.filter, data.page))
        (statistics_block(data.filter.month_name(), &data.aggregates.summary))
        (charts_view(&charts))
    )
}

/// Renders the full dashboard page around `content`.
///
/// Requests from inside the content container replace the container's
/// contents, push the new URL to the browser history and cancel any request
/// still in flight.
fn dashboard_view(content: &Markup) -> Markup {
    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-6" { "Transaction Dashboard" }

            div
                id="dashboard-content"
                class="flex flex-col items-center w-full max-w-screen-xl"
                hx-target="this"
                hx-swap="innerHTML"
                hx-sync="this:replace"
                hx-push-url="true"
            {
                (content)
            }
        }
    );

    let scripts = [HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned())];

    base("Dashboard", &scripts, &content)
}

fn dashboard_error_response(error: Error, is_htmx_request: bool) -> Response {
    let status = error.status_code();

    let (description, fix) = if status.is_client_error() {
        (error.to_string(), "Check the month and page in the address bar.")
    } else {
        (
            "Something went wrong.".to_owned(),
            "Try again in a few moments.",
        )
    };
    let header = status.as_u16().to_string();

    let markup = if is_htmx_request {
        error_content(&header, &description, fix)
    } else {
        error_view("Error", &header, &description, fix)
    };

    (status, markup).into_response()
}
