//! Device enumeration.

use std::sync::Arc;

use serde_json::json;

use crate::error::Error;
use crate::http::{Transport, DEVICES_ENDPOINT};
use crate::types::DeviceListResult;

/// Operations on the devices of the configured project.
pub struct DevicesResource {
    transport: Arc<Transport>,
}

impl DevicesResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// List every device associated with the project.
    pub fn list(&self) -> Result<DeviceListResult, Error> {
        let raw = self.transport.post(DEVICES_ENDPOINT, &json!({}))?;
        super::parse_response(raw)
    }
}
