//! Sales Dashboard is a small reporting web app over a single collection of
//! product sales.
//!
//! This library provides a JSON API for seeding, searching and aggregating the
//! sales, plus a dashboard page that renders the same data as HTML.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod dashboard;
mod db;
mod endpoints;
mod html;
mod logging;
mod month;
mod not_found;
mod pagination;
mod product;
mod routing;
mod seed;
mod statistics;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{add_tracing_layer, setup_logging};
pub use pagination::PaginationConfig;
pub use product::{NewProduct, Product, count_products};
pub use routing::build_router;
pub use seed::{
    DEFAULT_SEED_URL, build_http_client, fetch_seed_payload, parse_seed_payload, seed_database,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The seed payload was valid JSON but not a JSON array.
    #[error("Invalid data format received from the API")]
    InvalidFormat,

    /// An element of the seed payload could not be decoded as a product.
    ///
    /// `index` is the position of the element in the seed array.
    #[error("invalid record at index {index}: {reason}")]
    InvalidRecord {
        /// The position of the offending element in the seed array.
        index: usize,
        /// Why the element was rejected.
        reason: String,
    },

    /// The seed source could not be reached, answered with a non-success
    /// status, or did not send JSON.
    #[error("could not fetch seed data: {0}")]
    UpstreamFetch(String),

    /// The month name is not one of "January" through "December".
    #[error("Invalid month provided: \"{0}\"")]
    InvalidMonth(String),

    /// The page number or page size was zero.
    #[error("page and perPage must both be at least 1")]
    InvalidPagination,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl Error {
    /// The HTTP status code that the error maps to at the request boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidMonth(_) | Error::InvalidPagination => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        (status, self.to_string()).into_response()
    }
}
