//! Sets up the application's database schema.

use rusqlite::{Connection, functions::FunctionFlags};

use crate::{Error, product::create_product_table};

/// Create all the tables the application needs and register the SQL
/// functions its queries use.
///
/// Safe to call on a database that has already been initialized. Must be
/// called on every new connection since SQL functions are not stored in the
/// database file.
///
/// # Errors
/// Returns an [Error::SqlError] if a function, table or index could not be
/// created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    register_fold_case(connection)?;
    create_product_table(connection)?;

    Ok(())
}

/// Register `fold_case(text)`, which lower-cases text in any script.
///
/// SQLite's built-in `lower` only handles ASCII letters.
fn register_fold_case(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| {
            let text = context.get::<Option<String>>(0)?;
            Ok(text.map(|text| text.to_lowercase()))
        },
    )
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("first initialize failed");
        initialize(&conn).expect("second initialize failed");

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'product'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(table_count, 1);
    }

    #[test]
    fn fold_case_lowers_any_script() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let folded: String = conn
            .query_row("SELECT fold_case('ÉCLAIR Set')", [], |row| row.get(0))
            .unwrap();

        assert_eq!(folded, "éclair set");
    }
}
