//! Time-series data retrieval.

use std::sync::Arc;

use tracing::debug;

use crate::error::Error;
use crate::http::{Transport, DATA_ENDPOINT};
use crate::types::{DataQuery, DataQueryResult};
use crate::validate::validate_query;

/// Queries rows from the project's datatables.
pub struct DataResource {
    transport: Arc<Transport>,
}

impl DataResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Fetch one page of rows from a datatable.
    ///
    /// The query is validated before any request is made; an invalid query
    /// fails with [`Error::Validation`] and never reaches the network. A 404
    /// is reported as [`Error::NotFound`] naming the datatable.
    pub fn list(&self, query: &DataQuery) -> Result<DataQueryResult, Error> {
        let request = validate_query(query)?;
        debug!(
            table = request.datatable_name,
            page = request.page,
            limit = request.limit,
            order = %request.order,
            "querying datatable"
        );

        let raw = self
            .transport
            .post(DATA_ENDPOINT, &request)
            .map_err(|err| match err {
                Error::NotFound { error, .. } => Error::NotFound {
                    resource: format!("datatable '{}'", query.table_name),
                    error,
                },
                other => other,
            })?;
        super::parse_response(raw)
    }
}
