//! The month and search filter shared by the transactions page and the statistics.

use rusqlite::ToSql;
use serde::Deserialize;
use time::Month;

use crate::{
    Error,
    month::{DEFAULT_MONTH, month_name, parse_month},
};

/// The SQL condition selecting the products that match a [ProductFilter].
///
/// Bind it with [ProductFilter::with_params]. `fold_case` is registered on
/// every connection by [crate::db::initialize].
pub(crate) const FILTER_CONDITION: &str = "
    CAST(strftime('%m', date_of_sale) AS INTEGER) = :month
    AND (
        :search = ''
        OR instr(fold_case(title), fold_case(:search)) > 0
        OR instr(fold_case(description), fold_case(:search)) > 0
        OR price = :price
    )";

/// The raw `month` and `search` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// The name of a month, e.g. "March".
    pub month: Option<String>,
    /// Text to look for in the title or description, or an exact price.
    pub search: Option<String>,
}

/// Selects the products sold in a calendar month (of any year) whose title or
/// description contains a search term, or whose price equals the number the
/// search term starts with.
///
/// Text matching ignores case in any script, so "éclair" finds "ÉCLAIR set".
/// An empty search term matches every product in the month.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    month: Month,
    search: String,
    price: Option<f64>,
}

impl ProductFilter {
    /// Create a filter for `month` and `search`.
    pub fn new(month: Month, search: &str) -> Self {
        Self {
            month,
            search: search.to_owned(),
            price: parse_price(search),
        }
    }

    /// Build a filter from query parameters, defaulting to March and an empty
    /// search.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if the month name is not recognised.
    pub fn from_query(query: &FilterQuery) -> Result<Self, Error> {
        let month = match query.month.as_deref() {
            Some(name) => parse_month(name)?,
            None => DEFAULT_MONTH,
        };

        Ok(Self::new(month, query.search.as_deref().unwrap_or_default()))
    }

    /// The month as it appears in query strings, e.g. "March".
    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    /// The search term exactly as it was given.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Run `query` with the parameters for [FILTER_CONDITION] followed by
    /// `extra`.
    pub(crate) fn with_params<T>(
        &self,
        extra: &[(&str, &dyn ToSql)],
        query: impl FnOnce(&[(&str, &dyn ToSql)]) -> T,
    ) -> T {
        let month = u8::from(self.month);
        let mut params: Vec<(&str, &dyn ToSql)> = vec![
            (":month", &month as &dyn ToSql),
            (":search", &self.search as &dyn ToSql),
            (":price", &self.price as &dyn ToSql),
        ];
        params.extend_from_slice(extra);

        query(&params)
    }
}

/// Read the number at the start of a search term, e.g. 12 from "12 inch".
///
/// Leading whitespace is skipped and anything after the longest numeric
/// prefix is ignored. Only finite numbers count, so "NaN" and "Infinity" are
/// treated as plain text.
fn parse_price(search: &str) -> Option<f64> {
    let text = search.trim_start();
    let bytes = text.as_bytes();
    let count_digits = |from: usize| {
        bytes
            .get(from..)
            .unwrap_or_default()
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let integer_digits = count_digits(end);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(end + 1);
        end += 1 + fraction_digits;
    }

    if integer_digits + fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_start = end + 1;
        if matches!(bytes.get(exponent_start), Some(b'+' | b'-')) {
            exponent_start += 1;
        }

        let exponent_digits = count_digits(exponent_start);
        if exponent_digits > 0 {
            end = exponent_start + exponent_digits;
        }
    }

    text[..end]
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
}
