//! End-to-end behaviour of the public client against a mock DataCanvas server.

use datacanvas::{
    Config, ConfigError, DataCanvas, DataQuery, Error, SortOrder, DATA_ENDPOINT,
    DEVICES_ENDPOINT,
};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn client(server: &MockServer) -> DataCanvas {
    DataCanvas::new(Config::new("key", "secret", 1, server.url("/api"))).unwrap()
}

fn api_path(endpoint: &str) -> String {
    format!("/api{endpoint}")
}

#[test]
fn construction_rejects_each_invalid_field() {
    let cases = [
        (Config::new("", "s", 1, "http://localhost/api"), "access_key_client"),
        (Config::new("k", "", 1, "http://localhost/api"), "access_key_secret"),
        (Config::new("k", "s", 0, "http://localhost/api"), "project_id"),
        (Config::new("k", "s", 1, ""), "base_url"),
    ];
    for (config, field) in cases {
        let err = DataCanvas::new(config).unwrap_err();
        assert_eq!(err.field(), Some(field));
        assert!(err.to_string().contains(field), "{err}");
    }
}

#[test]
fn construction_rejects_relative_base_url() {
    let err = DataCanvas::new(Config::new("k", "s", 1, "/api")).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
}

#[test]
fn devices_round_trip() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(api_path(DEVICES_ENDPOINT));
        then.status(200).json_body(json!({
            "success": true,
            "devices": [{"device_id": 1, "device_name": "A"}]
        }));
    });

    let result = client(&server).devices.list().unwrap();

    mock.assert();
    assert!(result.success);
    assert_eq!(result.devices.len(), 1);
    assert_eq!(result.devices[0].device_id, 1);
    assert_eq!(result.devices[0].device_name, "A");
}

#[test]
fn devices_missing_fields_default() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(api_path(DEVICES_ENDPOINT));
        then.status(200).json_body(json!({}));
    });

    let result = client(&server).devices.list().unwrap();
    assert!(!result.success);
    assert!(result.devices.is_empty());
}

#[test]
fn data_round_trip() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(api_path(DATA_ENDPOINT));
        then.status(200).json_body(json!({
            "count": 2,
            "data": {"5": [{"id": 10, "device": 5, "temp": 21.5}]}
        }));
    });

    let result = client(&server).data.list(&DataQuery::new("t")).unwrap();

    mock.assert();
    assert_eq!(result.count, 2);
    let points = &result.data_by_device["5"];
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].id, 10);
    assert_eq!(points[0].device_id, 5);
    assert_eq!(points[0].extra_fields.len(), 1);
    assert_eq!(points[0].extra_fields["temp"], json!(21.5));
}

#[test]
fn data_point_with_null_ids_is_kept() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(api_path(DATA_ENDPOINT));
        then.status(200).json_body(json!({
            "count": 1,
            "data": {"5": [{"id": null, "device": 5, "temp": 1}]}
        }));
    });

    let result = client(&server).data.list(&DataQuery::new("t")).unwrap();

    let points = &result.data_by_device["5"];
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].id, 0);
    assert_eq!(points[0].device_id, 5);
    assert_eq!(points[0].extra_fields["temp"], json!(1));
}

#[test]
fn data_defaults_are_sent() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(api_path(DATA_ENDPOINT))
            .header("content-type", "application/json")
            .json_body(json!({
                "datatable_name": "t",
                "devices": [],
                "page": 0,
                "limit": 20,
                "order": "DESC",
                "project_id": 1,
                "access_key_client": "key",
                "access_key_secret": "secret"
            }));
        then.status(200).json_body(json!({"count": 0, "data": {}}));
    });

    client(&server).data.list(&DataQuery::new("t")).unwrap();
    mock.assert();
}

#[test]
fn data_explicit_order_is_sent() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(api_path(DATA_ENDPOINT)).json_body(json!({
            "datatable_name": "sensors",
            "devices": [7],
            "page": 1,
            "limit": 1000,
            "order": "ASC",
            "project_id": 1,
            "access_key_client": "key",
            "access_key_secret": "secret"
        }));
        then.status(200).json_body(json!({"count": 0, "data": {}}));
    });

    let query = DataQuery::new("sensors")
        .devices([7])
        .page(1)
        .limit(1000)
        .order(SortOrder::Asc);
    client(&server).data.list(&query).unwrap();
    mock.assert();
}

#[test]
fn invalid_queries_never_reach_the_network() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(api_path(DATA_ENDPOINT));
        then.status(200).json_body(json!({"count": 0, "data": {}}));
    });
    let client = client(&server);

    let cases = [
        (DataQuery::new(""), "table_name"),
        (DataQuery::new("   "), "table_name"),
        (DataQuery::new("t").page(-1), "page"),
        (DataQuery::new("t").limit(0), "limit"),
        (DataQuery::new("t").limit(1001), "1000"),
        (DataQuery::new("t").devices([0]), "positive integers"),
        (DataQuery::new("t").devices([-4]), "positive integers"),
    ];
    for (query, needle) in cases {
        let err = client.data.list(&query).unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "{query:?}: {err:?}");
        assert!(err.to_string().contains(needle), "{query:?}: {err}");
    }

    mock.assert_hits(0);
}

#[test]
fn status_codes_map_to_error_kinds() {
    let cases: [(u16, fn(&Error) -> bool); 10] = [
        (400, |e| matches!(e, Error::Validation(_))),
        (401, |e| matches!(e, Error::Authentication(_))),
        (403, |e| matches!(e, Error::Authorization(_))),
        (404, |e| matches!(e, Error::NotFound { .. })),
        (422, |e| matches!(e, Error::Validation(_))),
        (429, |e| matches!(e, Error::RateLimit(_))),
        (500, |e| matches!(e, Error::Server(_))),
        (502, |e| matches!(e, Error::Server(_))),
        (503, |e| matches!(e, Error::Server(_))),
        (504, |e| matches!(e, Error::Server(_))),
    ];

    for (status, is_expected) in cases {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(api_path(DEVICES_ENDPOINT));
            then.status(status).json_body(json!({"message": "boom"}));
        });

        let err = client(&server).devices.list().unwrap_err();
        assert!(is_expected(&err), "status {status} mapped to {err:?}");
        assert_eq!(err.status_code(), Some(status));
        assert_eq!(err.message(), "boom");
    }
}

#[test]
fn error_message_falls_back_to_reason_phrase() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(api_path(DEVICES_ENDPOINT));
        then.status(503).body("upstream unavailable");
    });

    let err = client(&server).devices.list().unwrap_err();
    assert!(matches!(err, Error::Server(_)));
    assert_eq!(err.message(), "Service Unavailable");
}

#[test]
fn connection_refused_is_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client =
        DataCanvas::new(Config::new("k", "s", 1, format!("http://127.0.0.1:{port}"))).unwrap();

    let err = client.devices.list().unwrap_err();
    assert!(matches!(err, Error::Network(_)), "{err:?}");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn slow_response_times_out_as_network_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(api_path(DEVICES_ENDPOINT));
        then.status(200)
            .delay(Duration::from_millis(500))
            .json_body(json!({"success": true, "devices": []}));
    });

    let config = Config::new("key", "secret", 1, server.url("/api"))
        .with_timeout(Duration::from_millis(50));
    let client = DataCanvas::new(config).unwrap();

    let err = client.devices.list().unwrap_err();
    assert!(matches!(err, Error::Network(_)), "{err:?}");
    assert!(err.message().starts_with("Request timed out"), "{err}");
}

#[test]
fn close_is_idempotent() {
    let server = MockServer::start();
    let client = client(&server);
    client.close();
    client.close();
    assert!(client.is_closed());
    assert!(matches!(client.devices.list(), Err(Error::Network(_))));
}

#[test]
fn scoped_client_is_closed_on_exit() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(api_path(DEVICES_ENDPOINT));
        then.status(200).json_body(json!({"success": true, "devices": []}));
    });

    {
        let client = client(&server);
        assert!(client.devices.list().unwrap().success);
    }

    mock.assert();
}
