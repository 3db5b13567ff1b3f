use std::{net::SocketAddr, path::PathBuf, time::Duration};

use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;

use sales_dashboard::{
    AppState, DEFAULT_SEED_URL, PaginationConfig, add_tracing_layer, build_http_client,
    build_router, graceful_shutdown, setup_logging,
};

/// The web server for the sales dashboard and its JSON API.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "DATABASE_PATH")]
    db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// The URL of the JSON array of products loaded by `/initialize`.
    #[arg(long, env = "SEED_URL", default_value = DEFAULT_SEED_URL)]
    seed_url: String,

    /// How long to wait for the seed data before giving up.
    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value_t = 30)]
    fetch_timeout_secs: u64,

    /// File path to append debug logs to.
    #[arg(long, env = "LOG_PATH", default_value = "debug.log")]
    log_path: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(&args.log_path).expect("Could not create log file");

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let conn = Connection::open(&args.db_path).expect("Could not open the database");
    let http_client = build_http_client(Duration::from_secs(args.fetch_timeout_secs))
        .expect("Could not create the HTTP client");
    let app_state = AppState::new(
        conn,
        http_client,
        &args.seed_url,
        PaginationConfig::default(),
    )
    .expect("Could not initialize the database");

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(app_state));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();
}
