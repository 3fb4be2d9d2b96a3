//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `LinodeClient` with
//! its real ureq transport over HTTP. Validates that form encoding, batch
//! wrapping and envelope decoding agree with what the server sees and sends.

use std::time::Duration;

use linode_core::{ApiError, ArgValue, ClientConfig, LinodeClient, Request};
use serde_json::json;

/// Start the mock server on a background thread and return its base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}/")
}

#[test]
fn batch_echo_round_trip() {
    let client = LinodeClient::new(&start_server());

    let results = client
        .batch(&[
            Request::new("test.echo", "secret", [("foo", "bar")]),
            Request::new("test.echo", "secret", [("a", "b")]),
        ])
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].data, json!({"foo": "bar"}));
    assert!(results[0].errors.is_empty());
    assert_eq!(results[1].data, json!({"a": "b"}));
    assert!(results[1].errors.is_empty());
}

#[test]
fn single_calls_cover_every_outcome() {
    let config = ClientConfig::new(start_server()).with_timeout(Duration::from_secs(10));
    let client = LinodeClient::from_config(&config);

    // Step 1: echo with mixed scalar arguments.
    let data = client
        .perform(&Request::new(
            "test.echo",
            "secret",
            [
                ("Label", ArgValue::from("web 1 & co")),
                ("PlanID", ArgValue::from(3)),
                ("Backups", ArgValue::from(false)),
            ],
        ))
        .unwrap();
    assert_eq!(
        data,
        json!({"Label": "web 1 & co", "PlanID": "3", "Backups": "false"})
    );

    // Step 2: colliding argument names never replace the credential.
    let data = client
        .perform(&Request::new(
            "test.echo",
            "secret",
            [("api_key", ""), ("x", "y")],
        ))
        .unwrap();
    assert_eq!(data, json!({"x": "y"}));

    // Step 3: one remote error.
    let err = client.perform(&Request::bare("linode.reboot", "secret")).unwrap_err();
    assert!(matches!(err, ApiError::Linode(ref e) if e.code == 3));
    assert_eq!(err.to_string(), "error 3: The requested class does not exist");

    // Step 4: several remote errors.
    let err = client.perform(&Request::bare("test.fail", "secret")).unwrap_err();
    assert!(matches!(err, ApiError::LinodeMany(ref e) if e.len() == 2));
    assert_eq!(
        err.to_string(),
        "error 6: A required property is missing for this action, error 7: A property is invalid"
    );

    // Step 5: empty credential is rejected by the server.
    let err = client.perform(&Request::bare("test.echo", "")).unwrap_err();
    assert!(matches!(err, ApiError::Linode(ref e) if e.code == 4));
}

#[test]
fn batch_keeps_partial_failures_per_element() {
    let client = LinodeClient::new(&start_server());

    let results = client
        .batch(&[
            Request::new("test.echo", "k", [("n", 1u32)]),
            Request::bare("test.fail", "k"),
            Request::bare("linode.list", "k"),
            Request::new("test.echo", "k", [("n", 4u32)]),
        ])
        .unwrap();

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].data, json!({"n": "1"}));
    assert_eq!(results[1].errors.len(), 2);
    assert_eq!(results[2].errors[0].code, 3);
    assert_eq!(results[3].data, json!({"n": "4"}));

    let outcomes: Vec<bool> = results.into_iter().map(|r| r.into_result().is_ok()).collect();
    assert_eq!(outcomes, vec![true, false, false, true]);
}

#[test]
fn batch_with_mixed_credentials_never_reaches_server() {
    // No server: a network attempt would surface as a transport error.
    let client = LinodeClient::new("http://127.0.0.1:9/");
    let err = client
        .batch(&[
            Request::bare("test.echo", "a"),
            Request::bare("test.echo", "b"),
            Request::bare("test.echo", "a"),
        ])
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    assert!(client.batch(&[]).unwrap().is_empty());
}

#[test]
fn wrong_path_surfaces_http_status() {
    let base = start_server();
    let client = LinodeClient::new(&format!("{base}missing"));
    let err = client.perform(&Request::bare("test.echo", "k")).unwrap_err();
    assert!(matches!(err, ApiError::HttpStatus { status: 404, .. }), "got {err:?}");
}
