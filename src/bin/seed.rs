use std::error::Error;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use rusqlite::Connection;

use sales_dashboard::{
    DEFAULT_SEED_URL, build_http_client, count_products, initialize_db, seed_database,
};

/// A utility for loading the product feed into a sales dashboard database
/// without starting the server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database. It is created if it does not exist.
    #[arg(long, env = "DATABASE_PATH")]
    db_path: String,

    /// The URL of the JSON array of products to load.
    #[arg(long, env = "SEED_URL", default_value = DEFAULT_SEED_URL)]
    seed_url: String,

    /// How long to wait for the seed data before giving up.
    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value_t = 30)]
    fetch_timeout_secs: u64,
}

/// Download the product feed and append it to the database.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let db_path = Path::new(&args.db_path);
    println!("Opening database at {db_path:#?}");
    let conn = Connection::open(db_path)?;
    initialize_db(&conn)?;
    let conn = Mutex::new(conn);

    println!("Fetching products from {}...", args.seed_url);
    let client = build_http_client(Duration::from_secs(args.fetch_timeout_secs))?;
    let inserted = seed_database(&client, &args.seed_url, &conn).await?;

    let connection = conn.lock().map_err(|error| error.to_string())?;
    let total = count_products(&connection)?;
    println!("Saved {inserted} products, the database now has {total}.");

    Ok(())
}
