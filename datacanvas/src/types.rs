//! Query parameters and result records for the DataCanvas API.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default page number (pages are 0-indexed).
pub const DEFAULT_PAGE: i64 = 0;
/// Default number of items per page.
pub const DEFAULT_LIMIT: i64 = 20;
/// Largest page size the API accepts.
pub const MAX_LIMIT: i64 = 1000;
/// Default sort order for data retrieval.
pub const DEFAULT_ORDER: SortOrder = SortOrder::Desc;

/// Sort order for data queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Oldest to newest.
    Asc,
    /// Newest to oldest.
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for retrieving rows from a datatable.
///
/// Only the table name is required. Unset fields fall back to
/// [`DEFAULT_PAGE`], [`DEFAULT_LIMIT`] and [`DEFAULT_ORDER`] after the
/// explicitly given values have been validated.
///
/// ```
/// use datacanvas::{DataQuery, SortOrder};
///
/// let query = DataQuery::new("temperature_sensors")
///     .devices([1, 2, 3])
///     .limit(50)
///     .order(SortOrder::Asc);
/// assert_eq!(query.limit, Some(50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataQuery {
    pub table_name: String,
    pub devices: Option<Vec<i64>>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub order: Option<SortOrder>,
}

impl DataQuery {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            devices: None,
            page: None,
            limit: None,
            order: None,
        }
    }

    /// Restrict results to these device ids.
    pub fn devices(mut self, devices: impl IntoIterator<Item = i64>) -> Self {
        self.devices = Some(devices.into_iter().collect());
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }
}

/// An IoT device registered in the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: i64,
    pub device_name: String,
}

/// Response of the device-list call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceListResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub devices: Vec<Device>,
}

/// A single row produced by a device.
///
/// `id` and `device` are lifted out; every other column of the datatable is
/// kept verbatim in `extra_fields`, since the schema is only known server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, rename = "device", deserialize_with = "null_as_default")]
    pub device_id: i64,
    #[serde(flatten)]
    pub extra_fields: Map<String, Value>,
}

/// Response of the data-query call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataQueryResult {
    /// Total number of matching records reported by the server; may exceed
    /// the number of points returned in this page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: i64,
    /// Points keyed by device id (as a string).
    #[serde(default, rename = "data", deserialize_with = "null_as_default")]
    pub data_by_device: BTreeMap<String, Vec<DataPoint>>,
}

impl DataQueryResult {
    /// Points returned for one device, if any.
    pub fn points_for(&self, device_id: i64) -> Option<&[DataPoint]> {
        self.data_by_device
            .get(&device_id.to_string())
            .map(Vec::as_slice)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
