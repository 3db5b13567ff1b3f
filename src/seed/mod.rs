//! Seeding the database from the remote product feed.
//!
//! Seeding runs in three steps: download the feed, decode every record, then
//! insert all of them in one transaction. A failure in any step saves nothing.

use std::{sync::Mutex, time::Duration};

use reqwest::Client;
use rusqlite::Connection;

use crate::{
    Error,
    product::{NewProduct, insert_products},
};

mod initialize_endpoint;
mod payload;

pub use initialize_endpoint::{SEED_SUCCESS_MESSAGE, initialize_endpoint};
pub use payload::{fetch_seed_payload, parse_seed_payload};

/// The product feed used when no seed URL is configured.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Build the HTTP client used to download the seed feed.
///
/// Requests are abandoned after `timeout`.
///
/// # Errors
/// Returns an error if the TLS backend cannot be initialised.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
}

/// Download the feed at `url` and append its products to the database.
///
/// The database lock is only taken once the feed has been downloaded and
/// decoded.
///
/// Returns the number of products saved.
///
/// # Errors
/// - [Error::UpstreamFetch] if the feed could not be downloaded.
/// - [Error::InvalidFormat] or [Error::InvalidRecord] if the feed is malformed.
/// - [Error::DatabaseLockError] or [Error::SqlError] if saving fails.
pub async fn seed_database(
    client: &Client,
    url: &str,
    db_connection: &Mutex<Connection>,
) -> Result<usize, Error> {
    let payload = fetch_seed_payload(client, url).await?;
    let products = parse_seed_payload(payload)?;
    tracing::debug!("Decoded {} products from {url}", products.len());

    save_products(&products, db_connection)
}

fn save_products(products: &[NewProduct], db_connection: &Mutex<Connection>) -> Result<usize, Error> {
    let connection = db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    insert_products(products, &connection)
}

/// Serve `app` on a random local port and return the URL of its feed route.
#[cfg(test)]
pub(crate) async fn serve_seed_feed(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind seed server.");
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{address}/product_transaction.json")
}
