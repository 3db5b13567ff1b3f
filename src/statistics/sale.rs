//! Database queries for retrieving the sales that statistics are computed from.
//!
//! This module provides a simplified product view optimized for aggregations,
//! containing only the fields the statistics need (price, category, sold).

use rusqlite::Connection;

use crate::{
    Error,
    product::{FILTER_CONDITION, ProductFilter},
};

/// A simplified product view for aggregations.
///
/// This is separate from the main Product model because the statistics only
/// need the price, category and sold flag.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Sale {
    pub price: f64,
    pub category: String,
    pub sold: bool,
}

/// Gets every product matching `filter`, without pagination.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
pub(crate) fn get_matching_sales(
    filter: &ProductFilter,
    connection: &Connection,
) -> Result<Vec<Sale>, Error> {
    let mut stmt = connection.prepare(&format!(
        "SELECT price, category, sold FROM product WHERE {FILTER_CONDITION}"
    ))?;

    filter
        .with_params(&[], |params| {
            stmt.query_map(params, |row| {
                Ok(Sale {
                    price: row.get(0)?,
                    category: row.get(1)?,
                    sold: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<Sale>, rusqlite::Error>>()
        })
        .map_err(|error| error.into())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::{Month, macros::datetime};

    use crate::{
        db::initialize,
        product::{NewProduct, ProductFilter, insert_products},
    };

    use super::{Sale, get_matching_sales};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn returns_every_match_without_paging() {
        let conn = get_test_connection();
        let products: Vec<_> = (0..35)
            .map(|i| NewProduct::build("Lamp", i as f64, datetime!(2022-03-15 10:00 UTC)))
            .collect();
        insert_products(&products, &conn).unwrap();

        let sales = get_matching_sales(&ProductFilter::new(Month::March, ""), &conn).unwrap();

        assert_eq!(sales.len(), 35);
    }

    #[test]
    fn applies_month_and_search() {
        let conn = get_test_connection();
        insert_products(
            &[
                NewProduct::build("Desk lamp", 25.0, datetime!(2022-03-15 10:00 UTC))
                    .category("home")
                    .sold(true),
                NewProduct::build("Chair", 80.0, datetime!(2022-03-15 10:00 UTC))
                    .category("home"),
                NewProduct::build("Floor lamp", 60.0, datetime!(2022-04-15 10:00 UTC))
                    .category("home"),
            ],
            &conn,
        )
        .unwrap();

        let sales = get_matching_sales(&ProductFilter::new(Month::March, "LAMP"), &conn).unwrap();

        assert_eq!(
            sales,
            [Sale {
                price: 25.0,
                category: "home".to_owned(),
                sold: true,
            }]
        );
    }
}
