//! Database queries for pages of filtered products.

use rusqlite::{Connection, ToSql};

use crate::{
    Error,
    pagination::PageRequest,
    product::{
        core::{PRODUCT_COLUMNS, Product, map_product_row},
        filter::{FILTER_CONDITION, ProductFilter},
    },
};

/// Get one page of the products matching `filter`, in insertion order.
///
/// A page past the last match is empty rather than an error.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub(crate) fn get_products_page(
    filter: &ProductFilter,
    page: PageRequest,
    connection: &Connection,
) -> Result<Vec<Product>, Error> {
    let limit = i64::try_from(page.limit()).unwrap_or(i64::MAX);
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

    let mut stmt = connection.prepare(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM product
         WHERE {FILTER_CONDITION}
         ORDER BY id
         LIMIT :limit OFFSET :offset"
    ))?;

    let page_params = [
        (":limit", &limit as &dyn ToSql),
        (":offset", &offset as &dyn ToSql),
    ];

    filter
        .with_params(&page_params, |params| {
            stmt.query_map(params, map_product_row)?
                .collect::<Result<Vec<Product>, rusqlite::Error>>()
        })
        .map_err(|error| error.into())
}
