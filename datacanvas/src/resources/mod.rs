//! Resource facades exposed on [`DataCanvas`](crate::DataCanvas).

mod data;
mod devices;

pub use data::DataResource;
pub use devices::DevicesResource;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;

/// Turn a successful response body into a typed record.
fn parse_response<T: DeserializeOwned>(raw: Value) -> Result<T, Error> {
    serde_json::from_value(raw.clone()).map_err(|e| {
        Error::unexpected_response(
            format!("Unexpected response shape: {e}"),
            None,
            Some(raw),
        )
    })
}
