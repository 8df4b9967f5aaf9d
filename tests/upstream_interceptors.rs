//! Integration tests for the BPOOL API client and its interceptor
//! pipeline, against a wiremock backend.

use reqwest::multipart::Form;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bpool_admin::errors::AppError;
use bpool_admin::upstream::ApiClient;

#[tokio::test]
async fn bearer_token_is_attached_when_a_session_is_present() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vehicles"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"data": []}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri());
    let resp = client
        .get(Some("tok-123"), "/vehicles", &[("page", "1".into())])
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn no_authorization_header_without_a_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes/get-all"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri());
    client.get(None, "/routes/get-all", &[]).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn multipart_upload_keeps_bearer_and_transport_boundary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vehicles"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let form = Form::new()
        .text("regNum", "AB12 CDE")
        .text("type", "bus")
        .text("capacity", "32");

    let client = ApiClient::new(&server.uri());
    let resp = client
        .post_multipart(Some("tok-123"), "/vehicles", form)
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    // The content-type must be the transport's own, boundary included — an
    // explicit boundary-less one would make the body unparseable.
    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("AB12 CDE"));
}

#[tokio::test]
async fn authenticated_401_invalidates_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/parents"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri());
    let err = client
        .get(Some("stale-token"), "/users/parents", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SessionExpired));
}

#[tokio::test]
async fn unauthenticated_401_passes_through_to_the_caller() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "bad credentials"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri());
    let resp = client
        .post_json(None, "/users/login", &json!({"email": "x", "password": "y"}))
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn query_parameters_pass_through_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/paypal/all"))
        .and(wiremock::matchers::query_param("status", "pending"))
        .and(wiremock::matchers::query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri());
    client
        .get(
            Some("tok"),
            "/paypal/all",
            &[
                ("page", "3".into()),
                ("limit", "10".into()),
                ("status", "pending".into()),
            ],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn connection_failure_surfaces_as_upstream_error() {
    let client = ApiClient::new("http://127.0.0.1:1");
    let err = client.get(None, "/vehicles", &[]).await.unwrap_err();
    assert!(matches!(err, AppError::Upstream(_)));
}
