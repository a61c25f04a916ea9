//! Checks data-query parameters before anything is sent.
//!
//! Rules run in a fixed order and the first failure wins. Explicit values are
//! checked before defaults are applied, so an invalid value is never masked by
//! a default.

use serde::Serialize;

use crate::error::Error;
use crate::types::{DataQuery, SortOrder, DEFAULT_LIMIT, DEFAULT_ORDER, DEFAULT_PAGE, MAX_LIMIT};

/// Body of a data-query request once every parameter has been checked and
/// defaulted. Credentials are merged in by the transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct DataRequest<'a> {
    pub datatable_name: &'a str,
    pub devices: &'a [i64],
    pub page: i64,
    pub limit: i64,
    pub order: SortOrder,
}

pub(crate) fn validate_query(query: &DataQuery) -> Result<DataRequest<'_>, Error> {
    if query.table_name.trim().is_empty() {
        return Err(Error::validation(
            "table_name is required and cannot be empty or whitespace",
        ));
    }

    if let Some(page) = query.page {
        if page < 0 {
            return Err(Error::validation("page must be a non-negative integer"));
        }
    }

    if let Some(limit) = query.limit {
        if limit <= 0 {
            return Err(Error::validation("limit must be a positive integer"));
        }
    }
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if limit > MAX_LIMIT {
        return Err(Error::validation(format!(
            "Limit cannot exceed {MAX_LIMIT}. Requested: {limit}"
        )));
    }

    let devices = query.devices.as_deref().unwrap_or_default();
    if devices.iter().any(|&id| id <= 0) {
        return Err(Error::validation("All devices must be positive integers"));
    }

    Ok(DataRequest {
        datatable_name: &query.table_name,
        devices,
        page: query.page.unwrap_or(DEFAULT_PAGE),
        limit,
        order: query.order.unwrap_or(DEFAULT_ORDER),
    })
}
