//! Downloading and decoding the seed feed.

use reqwest::Client;
use serde_json::Value;

use crate::{Error, product::NewProduct};

/// Download the seed feed at `url` and parse the body as JSON.
///
/// # Errors
/// Returns [Error::UpstreamFetch] if the request fails, times out, the server
/// responds with a non-success status, or the body is not JSON.
pub async fn fetch_seed_payload(client: &Client, url: &str) -> Result<Value, Error> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|error| Error::UpstreamFetch(error.to_string()))?;

    response
        .json::<Value>()
        .await
        .map_err(|error| Error::UpstreamFetch(error.to_string()))
}

/// Decode the seed feed into products ready for insertion.
///
/// # Errors
/// - [Error::InvalidFormat] if `payload` is not a JSON array.
/// - [Error::InvalidRecord] for the first element that is not a valid product,
///   e.g. one with a missing title or an unparseable `dateOfSale`.
pub fn parse_seed_payload(payload: Value) -> Result<Vec<NewProduct>, Error> {
    let Value::Array(records) = payload else {
        return Err(Error::InvalidFormat);
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(record).map_err(|error| Error::InvalidRecord {
                index,
                reason: error.to_string(),
            })
        })
        .collect()
}
