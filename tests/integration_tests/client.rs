use crate::common::{
    object,
    transports::{RecordingTransport, Reply},
};
use geniebiz_connect::{
    error::{DecodeError, TransportError},
    pagination::{self, Pagination},
    Error, GenieClient, Mode,
};
use reqwest::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Method, StatusCode,
};
use serde_json::json;
use std::error::Error as _;
use test_case::test_case;

fn client_with(transport: &RecordingTransport, mode: Mode) -> GenieClient {
    GenieClient::builder("mock-api-key", "mock-application-id")
        .with_mode(mode)
        .with_transport(transport.clone())
        .build()
        .unwrap()
}

#[tokio::test]
async fn post_adds_protocol_fields_to_payload() {
    let transport = RecordingTransport::new();
    let client = client_with(&transport, Mode::Sandbox);

    client
        .post("transactions", object(json!({ "amount": 1000, "currency": "LKR" })))
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(
        request.url.as_str(),
        "https://api.uat.geniebiz.lk/public/transactions"
    );
    assert_eq!(
        request.json,
        Some(json!({
            "amount": 1000,
            "currency": "LKR",
            "apiVersion": "2.0",
            "appVersion": "geniebiz-connect-rust",
            "signMethod": "sha1"
        }))
    );
}

#[tokio::test]
async fn post_overwrites_caller_supplied_protocol_fields() {
    let transport = RecordingTransport::new();
    let client = client_with(&transport, Mode::Production);

    client
        .post(
            "transactions",
            object(json!({
                "amount": 5,
                "apiVersion": "1.0",
                "appVersion": { "nested": true },
                "signMethod": null
            })),
        )
        .await
        .unwrap();

    let body = transport.last_request().json.unwrap();
    assert_eq!(body["amount"], 5);
    assert_eq!(body["apiVersion"], GenieClient::API_VERSION);
    assert_eq!(body["appVersion"], GenieClient::APP_VERSION);
    assert_eq!(body["signMethod"], GenieClient::SIGN_METHOD);
}

#[tokio::test]
async fn get_without_pagination_targets_the_bare_endpoint() {
    let transport = RecordingTransport::new();
    let client = client_with(&transport, Mode::Production);

    client
        .get("transactions", &Pagination::new())
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.url.as_str(), "https://api.geniebiz.lk/public/transactions");
    assert!(request.json.is_none());
}

#[test_case(json!({ "limit": 10 }) ; "single unknown key")]
#[test_case(json!({ "per_page": 50, "sort": "desc", "Page": 3 }) ; "several unknown keys")]
#[test_case(json!({ "page": null }) ; "null page")]
#[tokio::test]
async fn get_drops_pagination_without_page(pagination: serde_json::Value) {
    let transport = RecordingTransport::new();
    let client = client_with(&transport, Mode::Production);

    client
        .get("transactions", &object(pagination))
        .await
        .unwrap();

    let url = transport.last_request().url;
    assert_eq!(url.as_str(), "https://api.geniebiz.lk/public/transactions");
    assert_eq!(url.query(), None);
}

#[tokio::test]
async fn get_forwards_only_the_page_key() {
    let transport = RecordingTransport::new();
    let client = client_with(&transport, Mode::Sandbox);

    client
        .get("transactions", &object(json!({ "page": 2, "extra": "x" })))
        .await
        .unwrap();

    let url = transport.last_request().url;
    assert_eq!(url.query(), Some("page=2"));
    assert_eq!(
        url.as_str(),
        "https://api.uat.geniebiz.lk/public/transactions?page=2"
    );
}

#[test_case("../admin" ; "parent segment")]
#[test_case("/transactions/../../admin" ; "parent segments after leading slash")]
#[test_case("transactions#frag" ; "fragment")]
#[tokio::test]
async fn endpoints_outside_the_base_path_never_reach_the_transport(endpoint: &str) {
    let transport = RecordingTransport::new();
    let client = client_with(&transport, Mode::Production);

    let get_err = client
        .get(endpoint, &pagination::page(2))
        .await
        .expect_err("Call succeeded");
    let post_err = client
        .post(endpoint, object(json!({})))
        .await
        .expect_err("Call succeeded");

    assert!(matches!(get_err, Error::InvalidEndpoint { .. }));
    assert!(matches!(post_err, Error::InvalidEndpoint { .. }));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn authorization_header_is_the_raw_api_key_on_every_request() {
    let transport = RecordingTransport::new();
    let client = client_with(&transport, Mode::Sandbox);

    client
        .get("transactions", &pagination::page(1))
        .await
        .unwrap();
    client
        .post("transactions", object(json!({})))
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    for request in requests {
        assert_eq!(request.headers[AUTHORIZATION], "mock-api-key");
        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
        assert_eq!(request.headers[ACCEPT], "application/json");
    }
}

#[tokio::test]
async fn responses_are_returned_untouched() {
    let body = r#"{"id":"tx-1","amount":"10.50","items":[1,2.5,null,false],"meta":{}}"#;
    let transport =
        RecordingTransport::replying(Reply::Body(StatusCode::OK, body.to_string()));
    let client = client_with(&transport, Mode::Sandbox);

    let res = client
        .get("transactions/tx-1", &Pagination::new())
        .await
        .unwrap();

    assert_eq!(res, serde_json::from_str::<serde_json::Value>(body).unwrap());
}

#[test_case(r#"{"a":"# ; "truncated object")]
#[test_case("" ; "empty body")]
#[test_case("<html>maintenance</html>" ; "html page")]
#[tokio::test]
async fn malformed_json_is_a_decode_error(body: &str) {
    let transport =
        RecordingTransport::replying(Reply::Body(StatusCode::OK, body.to_string()));
    let client = client_with(&transport, Mode::Sandbox);

    let err = client
        .post("transactions", object(json!({ "amount": 1 })))
        .await
        .expect_err("Call succeeded");

    match err {
        Error::Decode(DecodeError { body: raw, source }) => {
            assert_eq!(raw, body);
            assert!(source.is_eof() || source.is_syntax());
        }
        e => panic!("Unexpected error: {}", e),
    }
}

#[tokio::test]
async fn transport_failures_are_transport_errors() {
    let transport = RecordingTransport::replying(Reply::ConnectionRefused);
    let client = client_with(&transport, Mode::Sandbox);

    let err = client
        .get("transactions", &Pagination::new())
        .await
        .expect_err("Call succeeded");

    assert!(matches!(err, Error::Transport(TransportError::Other(_))));
    assert_eq!(
        err.source().map(|e| e.to_string()),
        Some("connection refused".to_string())
    );
}

#[tokio::test]
async fn set_transport_applies_to_clones_and_api_handles() {
    let first = RecordingTransport::new();
    let second = RecordingTransport::new();
    let client = client_with(&first, Mode::Sandbox);
    let clone = client.clone();

    client.set_transport(second.clone());

    clone
        .get("transactions", &Pagination::new())
        .await
        .unwrap();
    client
        .transactions
        .get_by_id("tx-1")
        .await
        .unwrap();

    assert!(first.requests().is_empty());
    assert_eq!(second.requests().len(), 2);
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let transport = RecordingTransport::new();
    let client = client_with(&transport, Mode::Sandbox);

    let calls = (1..=5u64).map(|page| {
        let client = client.clone();
        async move { client.get("transactions", &pagination::page(page)).await }
    });
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(Result::is_ok));

    let mut queries: Vec<_> = transport
        .requests()
        .into_iter()
        .map(|r| r.url.query().unwrap_or_default().to_string())
        .collect();
    queries.sort();
    assert_eq!(
        queries,
        vec!["page=1", "page=2", "page=3", "page=4", "page=5"]
    );
}
