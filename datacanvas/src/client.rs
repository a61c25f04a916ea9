//! Entry point for the DataCanvas API.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::Config;
use crate::error::ConfigError;
use crate::http::Transport;
use crate::resources::{DataResource, DevicesResource};

/// DataCanvas API client.
///
/// Construction validates the configuration and opens one HTTP session that
/// every resource call reuses. The session is released by [`close`] or when
/// the client is dropped, so a client confined to a block is closed on every
/// exit path from it.
///
/// Calls are synchronous. Sharing one client across threads is not
/// coordinated in any way; use one client per thread if in doubt.
///
/// [`close`]: DataCanvas::close
pub struct DataCanvas {
    transport: Arc<Transport>,
    /// Device operations.
    pub devices: DevicesResource,
    /// Data retrieval operations.
    pub data: DataResource,
}

impl DataCanvas {
    /// Validate `config` and build a client.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let transport = Arc::new(Transport::new(&config)?);
        debug!(
            base_url = transport.base_url(),
            project_id = config.project_id,
            "client created"
        );
        Ok(Self {
            devices: DevicesResource::new(Arc::clone(&transport)),
            data: DataResource::new(Arc::clone(&transport)),
            transport,
        })
    }

    /// Base URL requests are sent to (trailing slash removed).
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Release the HTTP session. Calling it again is a no-op; resource calls
    /// made afterwards fail with [`Error::Network`](crate::Error::Network).
    pub fn close(&self) {
        self.transport.close();
    }

    /// Whether [`close`](DataCanvas::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }
}

impl Drop for DataCanvas {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for DataCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataCanvas")
            .field("base_url", &self.base_url())
            .field("closed", &self.is_closed())
            .finish()
    }
}
