//! Defines the core data model and database functions for products.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for product IDs.
pub type ProductId = i64;

/// A product listing and whether it has sold, i.e. one row of the
/// transactions table.
///
/// To create a new `Product`, insert a [NewProduct] with [insert_products].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The ID the database assigned to the product.
    pub id: ProductId,
    /// The name of the product.
    pub title: String,
    /// A longer text description of the product.
    pub description: String,
    /// The listed price in dollars.
    pub price: f64,
    /// When the product was sold (or listed, if it is unsold), in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// A free text category, e.g. "electronics".
    pub category: String,
    /// Whether the product has sold.
    pub sold: bool,
}

/// A product that has not been saved to the database yet.
///
/// The field names match the seed feed, e.g. `dateOfSale`. Any other fields in
/// the feed (such as its own `id` or `image`) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    /// The name of the product.
    pub title: String,
    /// A longer text description of the product.
    #[serde(default)]
    pub description: String,
    /// The listed price in dollars.
    pub price: f64,
    /// When the product was sold as an RFC 3339 date-time, e.g. "2021-11-27T20:29:54+05:30".
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// A free text category, e.g. "electronics".
    #[serde(default)]
    pub category: String,
    /// Whether the product has sold.
    #[serde(default)]
    pub sold: bool,
}

impl NewProduct {
    /// Create a new product.
    ///
    /// Shortcut for test data: the description and category are left empty
    /// and the product is unsold.
    #[cfg(test)]
    pub fn build(title: &str, price: f64, date_of_sale: OffsetDateTime) -> Self {
        Self {
            title: title.to_owned(),
            description: String::new(),
            price,
            date_of_sale,
            category: String::new(),
            sold: false,
        }
    }

    /// Set the description of the product.
    #[cfg(test)]
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category of the product.
    #[cfg(test)]
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set whether the product has sold.
    #[cfg(test)]
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert many products in a single transaction.
///
/// Products are appended as they are; inserting the same products twice
/// stores them twice. Sale dates are normalised to UTC so that the month
/// filter sees the same month regardless of the offset in the feed.
///
/// Returns the number of products inserted.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an unexpected SQL error, in which
/// case none of the products are saved.
pub fn insert_products(products: &[NewProduct], connection: &Connection) -> Result<usize, Error> {
    let tx = connection.unchecked_transaction()?;

    // Prepare the insert statement once for reuse
    let mut stmt = tx.prepare(
        "INSERT INTO product (title, description, price, date_of_sale, category, sold)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;

    for product in products {
        stmt.execute((
            &product.title,
            &product.description,
            product.price,
            product.date_of_sale.to_offset(UtcOffset::UTC),
            &product.category,
            product.sold,
        ))?;
    }

    drop(stmt);
    tx.commit()?;

    Ok(products.len())
}

/// Get the total number of products in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_products(connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM product;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the product table and its month index in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_product_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS product (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                date_of_sale TEXT NOT NULL,
                category TEXT NOT NULL,
                sold INTEGER NOT NULL
                )",
        (),
    )?;

    // Every query filters on the month of the sale.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_product_month
         ON product(CAST(strftime('%m', date_of_sale) AS INTEGER))",
        (),
    )?;

    Ok(())
}

/// The columns selected by [map_product_row], in order.
pub(crate) const PRODUCT_COLUMNS: &str =
    "id, title, description, price, date_of_sale, category, sold";

/// Map a database row to a Product.
pub fn map_product_row(row: &Row) -> Result<Product, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let description = row.get(2)?;
    let price = row.get(3)?;
    let date_of_sale = row.get(4)?;
    let category = row.get(5)?;
    let sold = row.get(6)?;

    Ok(Product {
        id,
        title,
        description,
        price,
        date_of_sale,
        category,
        sold,
    })
}

// ============================================================================
// TESTS
// ============================================================================
