//! HTTP transport for the DataCanvas API.
//!
//! The only place that performs network I/O. Every call is a single JSON POST
//! with the credentials merged into the body; non-2xx responses and transport
//! failures are turned into [`Error`] variants here so nothing from reqwest
//! leaks to callers.

use std::sync::{Mutex, PoisonError};

use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::{Config, Credentials};
use crate::error::{ApiError, ConfigError, Error, NetworkError};

/// Device-list endpoint path.
pub const DEVICES_ENDPOINT: &str = "/access-keys/external/devices";
/// Data-query endpoint path.
pub const DATA_ENDPOINT: &str = "/access-keys/external/data";

const FALLBACK_MESSAGE: &str = "An error occurred";

/// Owns the credentials and the pooled HTTP session.
pub(crate) struct Transport {
    base_url: String,
    credentials: Credentials,
    http: Mutex<Option<HttpClient>>,
}

impl Transport {
    /// Build the session. Expects an already validated config.
    pub(crate) fn new(config: &Config) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = HttpClient::builder()
            .user_agent(format!("datacanvas-sdk-rust/{}", crate::VERSION))
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(ConfigError::Transport)?;
        Ok(Self {
            base_url: config.normalized_base_url(),
            credentials: config.credentials(),
            http: Mutex::new(Some(http)),
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` (plus credentials) to `endpoint` and return the parsed JSON.
    pub(crate) fn post<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<Value, Error> {
        let payload = merge_credentials(body, &self.credentials)?;
        let http = self
            .session()
            .ok_or_else(|| NetworkError::new("client is closed"))?;
        let url = format!("{}{}", self.base_url, endpoint);

        debug!(endpoint, "sending request");
        let res = http.post(&url).json(&payload).send().map_err(|e| {
            warn!(endpoint, error = %e, "request failed before a response arrived");
            Error::from(e)
        })?;
        let status = res.status();
        let text = res.text()?;

        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "API returned an error status");
            return Err(error_for_status(endpoint, status, &text));
        }
        serde_json::from_str(&text).map_err(|e| {
            Error::unexpected_response(
                format!("Response body is not valid JSON: {e}"),
                Some(status.as_u16()),
                None,
            )
        })
    }

    /// Release the session. Safe to call more than once.
    pub(crate) fn close(&self) {
        let mut guard = self.http.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.take().is_some() {
            debug!(base_url = %self.base_url, "closed HTTP session");
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.http
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn session(&self) -> Option<HttpClient> {
        self.http
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Merge the caller's body with the credentials. Credential fields win on a
/// key collision so callers cannot override project or key fields.
fn merge_credentials<B: Serialize>(
    body: &B,
    credentials: &Credentials,
) -> Result<Map<String, Value>, Error> {
    let mut payload = match serde_json::to_value(body) {
        Ok(Value::Object(map)) => map,
        Ok(Value::Null) => Map::new(),
        Ok(other) => {
            return Err(Error::validation(format!(
                "request body must be a JSON object, got {other}"
            )))
        }
        Err(e) => {
            return Err(Error::validation(format!(
                "request body could not be serialized: {e}"
            )))
        }
    };
    payload.insert("project_id".to_string(), Value::from(credentials.project_id));
    payload.insert(
        "access_key_client".to_string(),
        Value::from(credentials.access_key_client.as_str()),
    );
    payload.insert(
        "access_key_secret".to_string(),
        Value::from(credentials.access_key_secret.as_str()),
    );
    Ok(payload)
}

/// Map a non-2xx response to the matching error kind.
fn error_for_status(endpoint: &str, status: StatusCode, body: &str) -> Error {
    let data: Option<Value> = serde_json::from_str(body).ok();
    let message = extract_message(data.as_ref(), status);
    let code = status.as_u16();
    let error = ApiError::new(message, Some(code), data);

    match code {
        400 | 422 => Error::Validation(error),
        401 => Error::Authentication(error),
        403 => Error::Authorization(error),
        404 => Error::NotFound {
            resource: endpoint.to_string(),
            error,
        },
        429 => Error::RateLimit(error),
        500..=u16::MAX => Error::Server(error),
        400..=499 => Error::Validation(error),
        _ => Error::Api(error),
    }
}

/// `message`, then `error`, then the reason phrase for the status.
fn extract_message(data: Option<&Value>, status: StatusCode) -> String {
    str_field(data, "message")
        .or_else(|| str_field(data, "error"))
        .or_else(|| status.canonical_reason())
        .unwrap_or(FALLBACK_MESSAGE)
        .to_string()
}

fn str_field<'a>(data: Option<&'a Value>, name: &str) -> Option<&'a str> {
    data.and_then(|d| d.get(name))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
