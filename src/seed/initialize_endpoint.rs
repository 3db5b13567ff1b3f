use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, seed::seed_database};

/// The text sent back after a successful seed.
pub const SEED_SUCCESS_MESSAGE: &str = "Data fetched and saved successfully";

/// The state needed for seeding the database.
#[derive(Debug, Clone)]
pub struct SeedState {
    /// The database connection the products are saved to.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The client used to download the seed feed.
    pub http_client: reqwest::Client,
    /// Where the seed feed is downloaded from.
    pub seed_url: String,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            http_client: state.http_client.clone(),
            seed_url: state.seed_url.clone(),
        }
    }
}

/// Route handler that downloads the seed feed and appends it to the database.
///
/// Responds with plain text in both the success and the failure case.
pub async fn initialize_endpoint(State(state): State<SeedState>) -> Response {
    match seed_database(&state.http_client, &state.seed_url, &state.db_connection).await {
        Ok(count) => {
            tracing::info!("Saved {count} products from {}", state.seed_url);
            (StatusCode::OK, SEED_SUCCESS_MESSAGE).into_response()
        }
        Err(error) => {
            tracing::error!("Could not seed the database from {}: {error}", state.seed_url);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error fetching data: {error}"),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use axum::{Json, Router, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{
        db::initialize,
        endpoints,
        product::count_products,
        seed::{build_http_client, serve_seed_feed},
    };

    use super::{SEED_SUCCESS_MESSAGE, SeedState, initialize_endpoint};

    async fn serve_json(feed: Value) -> String {
        let app = Router::new().route(
            "/product_transaction.json",
            get(move || {
                let feed = feed.clone();
                async move { Json(feed) }
            }),
        );

        serve_seed_feed(app).await
    }

    fn get_test_server(seed_url: String) -> (TestServer, Arc<Mutex<Connection>>) {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let db_connection = Arc::new(Mutex::new(conn));
        let state = SeedState {
            db_connection: db_connection.clone(),
            http_client: build_http_client(Duration::from_secs(5)).unwrap(),
            seed_url,
        };
        let app = Router::new()
            .route(endpoints::INITIALIZE, get(initialize_endpoint))
            .with_state(state);

        (
            TestServer::try_new(app).expect("Could not create test server."),
            db_connection,
        )
    }

    fn feed() -> Value {
        json!([
            {
                "id": 1,
                "title": "Fjallraven Backpack",
                "price": 109.95,
                "description": "Fits 15 inch laptops",
                "category": "men's clothing",
                "sold": false,
                "dateOfSale": "2021-11-27T20:29:54+05:30"
            },
            {
                "id": 2,
                "title": "Mens Casual Slim Fit",
                "price": 15.99,
                "description": "The color could be slightly different",
                "category": "men's clothing",
                "sold": true,
                "dateOfSale": "2022-03-27T20:29:54+05:30"
            }
        ])
    }

    #[tokio::test]
    async fn seeds_database() {
        let url = serve_json(feed()).await;
        let (server, db_connection) = get_test_server(url);

        let response = server.get(endpoints::INITIALIZE).await;

        response.assert_status_ok();
        response.assert_text(SEED_SUCCESS_MESSAGE);
        assert_eq!(count_products(&db_connection.lock().unwrap()).unwrap(), 2);
    }

    #[tokio::test]
    async fn seeding_twice_appends() {
        let url = serve_json(feed()).await;
        let (server, db_connection) = get_test_server(url);

        server.get(endpoints::INITIALIZE).await.assert_status_ok();
        server.get(endpoints::INITIALIZE).await.assert_status_ok();

        assert_eq!(count_products(&db_connection.lock().unwrap()).unwrap(), 4);
    }

    #[tokio::test]
    async fn non_array_feed_is_server_error() {
        let url = serve_json(json!({"data": []})).await;
        let (server, db_connection) = get_test_server(url);

        let response = server.get(endpoints::INITIALIZE).expect_failure().await;

        response.assert_status_internal_server_error();
        response.assert_text("Error fetching data: Invalid data format received from the API");
        assert_eq!(count_products(&db_connection.lock().unwrap()).unwrap(), 0);
    }

    #[tokio::test]
    async fn malformed_record_saves_nothing() {
        let mut records = feed();
        records[1]["dateOfSale"] = json!("not a date");
        let url = serve_json(records).await;
        let (server, db_connection) = get_test_server(url);

        let response = server.get(endpoints::INITIALIZE).expect_failure().await;

        response.assert_status_internal_server_error();
        assert!(
            response
                .text()
                .starts_with("Error fetching data: invalid record at index 1"),
            "got {}",
            response.text()
        );
        assert_eq!(count_products(&db_connection.lock().unwrap()).unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_feed_is_server_error() {
        let url = serve_seed_feed(Router::new()).await;
        let (server, _) = get_test_server(url);

        let response = server.get(endpoints::INITIALIZE).expect_failure().await;

        response.assert_status_internal_server_error();
        assert!(response.text().starts_with("Error fetching data: "));
    }
}
