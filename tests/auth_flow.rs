//! Integration tests for the credential sign-in flow.
//!
//! A wiremock server stands in for the BPOOL backend; requests go through
//! the full router so the session cookie, the admin gate, and the error
//! envelope are all exercised end to end.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bpool_admin::auth::AuthenticatedUser;
use bpool_admin::config::Config;
use bpool_admin::upstream::ApiClient;
use bpool_admin::{api, session, AppState};

const SECRET: &str = "test-session-secret";

fn test_app(upstream: &str) -> axum::Router {
    let config = Config {
        port: 0,
        api_base_url: upstream.to_string(),
        session_secret: SECRET.into(),
        session_ttl_hours: 1,
        dashboard_origin: "http://localhost:3000".into(),
    };
    let state = Arc::new(AppState {
        bpool: ApiClient::new(&config.api_base_url),
        config,
    });
    api::app(state)
}

fn login_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn admin_login_payload() -> Value {
    json!({
        "data": {
            "_id": "64fa1b2c3d4e5f6a7b8c9d0e",
            "email": "admin@bpool.test",
            "role": "admin",
            "accessToken": "backend-access",
            "refreshToken": "backend-refresh",
        }
    })
}

mod admin_login {
    use super::*;

    #[tokio::test]
    async fn successful_login_sets_session_and_round_trips() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(admin_login_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let app = test_app(&server.uri());

        let resp = app
            .clone()
            .oneshot(login_request(
                json!({"email": "admin@bpool.test", "password": "hunter2"}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp.headers()[SET_COOKIE].to_str().unwrap().to_string();
        assert!(cookie.starts_with("bpool_session="));
        let session_cookie = cookie.split(';').next().unwrap().to_string();

        let body = body_json(resp).await;
        assert_eq!(body["user"]["id"], "64fa1b2c3d4e5f6a7b8c9d0e");
        assert_eq!(body["user"]["role"], "admin");
        assert_eq!(body["accessToken"], "backend-access");

        // Round-trip: whatever login issued must read back unchanged.
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/dashboard/session")
                    .header(COOKIE, session_cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let read_back = body_json(resp).await;
        assert_eq!(read_back["user"]["id"], "64fa1b2c3d4e5f6a7b8c9d0e");
        assert_eq!(read_back["user"]["role"], "admin");
        assert_eq!(read_back["accessToken"], "backend-access");
        assert_eq!(read_back["refreshToken"], "backend-refresh");
    }

    #[tokio::test]
    async fn non_admin_login_yields_no_session() {
        let server = MockServer::start().await;
        let mut payload = admin_login_payload();
        payload["data"]["role"] = json!("parent");
        Mock::given(method("POST"))
            .and(path("/users/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .mount(&server)
            .await;

        let resp = test_app(&server.uri())
            .oneshot(login_request(
                json!({"email": "parent@bpool.test", "password": "hunter2"}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert!(resp.headers().get(SET_COOKIE).is_none());

        let body = body_json(resp).await;
        assert_eq!(body["error"]["message"], "Access denied: Admins only.");
        assert_eq!(body["error"]["code"], "not_admin");
    }

    #[tokio::test]
    async fn missing_access_token_is_an_invalid_login_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"_id": "u1", "email": "admin@bpool.test", "role": "admin"}
            })))
            .mount(&server)
            .await;

        let resp = test_app(&server.uri())
            .oneshot(login_request(
                json!({"email": "admin@bpool.test", "password": "hunter2"}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert!(resp.headers().get(SET_COOKIE).is_none());

        let body = body_json(resp).await;
        assert_eq!(body["error"]["message"], "Invalid login response");
    }

    #[tokio::test]
    async fn missing_fields_fail_before_any_network_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/login"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let resp = test_app(&server.uri())
            .oneshot(login_request(
                json!({"email": "admin@bpool.test", "password": ""}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["message"], "Email and password are required");
    }

    #[tokio::test]
    async fn backend_rejection_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Account suspended"})),
            )
            .mount(&server)
            .await;

        let resp = test_app(&server.uri())
            .oneshot(login_request(
                json!({"email": "admin@bpool.test", "password": "hunter2"}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["message"], "Account suspended");
    }

    #[tokio::test]
    async fn backend_rejection_without_message_uses_generic_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let resp = test_app(&server.uri())
            .oneshot(login_request(
                json!({"email": "admin@bpool.test", "password": "wrong"}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["message"], "Invalid email or password");
    }
}

mod sign_out {
    use super::*;

    fn admin_session_cookie() -> String {
        let user = AuthenticatedUser {
            id: "64fa1b2c3d4e5f6a7b8c9d0e".into(),
            email: "admin@bpool.test".into(),
            role: "admin".into(),
            access_token: "backend-access".into(),
            refresh_token: "backend-refresh".into(),
        };
        let token = session::issue(&user, SECRET, 1).unwrap();
        format!("{}={}", session::SESSION_COOKIE, token)
    }

    // A live admin session is the only kind that exists, so sign-out must
    // not get swept up in the admins-leave-the-auth-pages redirect.
    #[tokio::test]
    async fn logout_with_admin_session_clears_the_cookie() {
        let server = MockServer::start().await;
        let resp = test_app(&server.uri())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/logout")
                    .header(COOKIE, admin_session_cookie())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        // Removal cookie: empty value, so the browser drops the session.
        let cookie = resp.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("bpool_session=;"));
    }

    #[tokio::test]
    async fn logout_without_a_session_is_a_quiet_no_op() {
        let server = MockServer::start().await;
        let resp = test_app(&server.uri())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }
}

mod password_reset_relays {
    use super::*;

    #[tokio::test]
    async fn forgot_password_relays_the_backend_response_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/forget-password"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "OTP sent"})))
            .expect(1)
            .mount(&server)
            .await;

        let resp = test_app(&server.uri())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/forgot-password")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({"email": "admin@bpool.test"}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "OTP sent");
    }

    #[tokio::test]
    async fn verify_otp_failure_passes_through_for_local_handling() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/verify-code"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid OTP"})),
            )
            .mount(&server)
            .await;

        let resp = test_app(&server.uri())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/verify-otp")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({"email": "admin@bpool.test", "otp": "000000"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Invalid OTP");
    }
}
