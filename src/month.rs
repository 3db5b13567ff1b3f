//! Resolves month names from query strings into calendar months.

use time::Month;

use crate::Error;

/// The month names accepted by the API, in calendar order.
pub(crate) const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The month used when a request does not name one.
pub(crate) const DEFAULT_MONTH: Month = Month::March;

/// Resolve a month name such as "March" to its calendar month.
///
/// Names must match one of [MONTH_NAMES] exactly.
///
/// # Errors
/// Returns [Error::InvalidMonth] for any other string.
pub(crate) fn parse_month(name: &str) -> Result<Month, Error> {
    let month = match name {
        "January" => Month::January,
        "February" => Month::February,
        "March" => Month::March,
        "April" => Month::April,
        "May" => Month::May,
        "June" => Month::June,
        "July" => Month::July,
        "August" => Month::August,
        "September" => Month::September,
        "October" => Month::October,
        "November" => Month::November,
        "December" => Month::December,
        other => return Err(Error::InvalidMonth(other.to_owned())),
    };

    Ok(month)
}

/// The English name of `month`, the inverse of [parse_month].
pub(crate) fn month_name(month: Month) -> &'static str {
    MONTH_NAMES[usize::from(u8::from(month)) - 1]
}

#[cfg(test)]
mod tests {
    use time::Month;

    use crate::Error;

    use super::{MONTH_NAMES, month_name, parse_month};

    #[test]
    fn resolves_every_month_name_to_its_ordinal() {
        for (index, name) in MONTH_NAMES.iter().enumerate() {
            let month = parse_month(name).unwrap();

            assert_eq!(usize::from(u8::from(month)), index + 1, "{name}");
            assert_eq!(month_name(month), *name);
        }
    }

    #[test]
    fn rejects_unknown_names() {
        for name in ["", "march", "MARCH", "Mar", " March", "Smarch", "13"] {
            let result = parse_month(name);

            assert!(
                matches!(result, Err(Error::InvalidMonth(ref got)) if got == name),
                "want InvalidMonth for {name:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn default_month_is_march() {
        assert_eq!(super::DEFAULT_MONTH, Month::March);
    }
}
