//! Application router configuration.

use axum::{Router, response::Redirect, routing::get};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    not_found::get_404_not_found,
    product::get_transactions_endpoint,
    seed::initialize_endpoint,
    statistics::{get_bar_chart_endpoint, get_pie_chart_endpoint, get_statistics_endpoint},
};

/// Return a router with all the app's routes.
///
/// The JSON API accepts requests from any origin so that it can be used by a
/// separately hosted frontend.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::INITIALIZE, get(initialize_endpoint))
        .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
        .route(endpoints::STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
        .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}


#[cfg(test)]
mod router_tests {
    use std::time::Duration;

    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{
        AppState, DEFAULT_SEED_URL, add_tracing_layer, build_http_client, build_router, endpoints,
        pagination::PaginationConfig,
    };

    fn get_test_server() -> TestServer {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            build_http_client(Duration::from_secs(5)).unwrap(),
            DEFAULT_SEED_URL,
            PaginationConfig::default(),
        )
        .unwrap();

        TestServer::try_new(add_tracing_layer(build_router(state)))
            .expect("Could not create test server.")
    }

    #[tokio::test]
    async fn json_endpoints_answer_on_empty_database() {
        let server = get_test_server();

        server
            .get(endpoints::TRANSACTIONS)
            .await
            .assert_json(&json!([]));
        server
            .get(endpoints::STATISTICS)
            .await
            .assert_json(&json!({"totalSales": 0.0, "soldItems": 0, "unsoldItems": 0}));
        server
            .get(endpoints::PIE_CHART)
            .await
            .assert_json(&json!({}));

        let bar_chart = server.get(endpoints::BAR_CHART).await.json::<Value>();
        assert_eq!(bar_chart.as_object().map(|buckets| buckets.len()), Some(10));
    }

    #[tokio::test]
    async fn dashboard_renders() {
        let server = get_test_server();

        let response = server.get(endpoints::DASHBOARD_VIEW).await;

        response.assert_status_ok();
        assert!(response.text().contains("Transaction Dashboard"));
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let server = get_test_server();

        let response = server.get("/does-not-exist").expect_failure().await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn allows_cross_origin_requests() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS)
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("http://localhost:3000"),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.header("access-control-allow-origin"),
            HeaderValue::from_static("*")
        );
    }
}
