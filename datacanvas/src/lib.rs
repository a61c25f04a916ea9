//! DataCanvas IoT platform API client library.
//!
//! Provides a typed, synchronous client for the DataCanvas HTTP API: device
//! enumeration and time-series data retrieval. Credentials are injected into
//! every request, parameters are validated before anything is sent, and HTTP
//! failures are mapped onto [`Error`].
//!
//! ```no_run
//! use datacanvas::{Config, DataCanvas, DataQuery, SortOrder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DataCanvas::new(Config::new(
//!     "your-access-key-id",
//!     "your-secret-key",
//!     123,
//!     "https://api.example.com",
//! ))?;
//!
//! for device in client.devices.list()?.devices {
//!     println!("{} ({})", device.device_name, device.device_id);
//! }
//!
//! let data = client.data.list(
//!     &DataQuery::new("temperature_sensors")
//!         .devices([1, 2, 3])
//!         .limit(50)
//!         .order(SortOrder::Desc),
//! )?;
//! println!("total records: {}", data.count);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod types;
mod validate;

pub use client::DataCanvas;
pub use config::{Config, DEFAULT_TIMEOUT};
pub use error::{ApiError, ConfigError, Error, NetworkError};
pub use http::{DATA_ENDPOINT, DEVICES_ENDPOINT};
pub use resources::{DataResource, DevicesResource};
pub use types::{
    DataPoint, DataQuery, DataQueryResult, Device, DeviceListResult, SortOrder, DEFAULT_LIMIT,
    DEFAULT_ORDER, DEFAULT_PAGE, MAX_LIMIT,
};

/// Library version for User-Agent and diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
