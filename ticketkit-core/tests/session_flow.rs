//! End-to-end session flow against a mock backend: login, token expiry
//! with transparent refresh, durable storage, and logout.

use std::sync::Arc;

use mockito::{Matcher, Server};
use serde_json::json;
use ticketkit_core::storage::{FileTokenStore, TokenStore};
use ticketkit_core::types::{EventQuery, LoginCredentials};
use ticketkit_core::{ApiClient, Config, Session};

fn login_body(access: &str, refresh: &str) -> String {
    json!({
        "data": {
            "accessToken": access,
            "refreshToken": refresh,
            "user": {
                "_id": "u1",
                "email": "vendor@example.com",
                "businessName": "Good Times Ltd",
                "role": "vendor",
                "isActive": true,
                "createdAt": "2026-01-01T00:00:00Z"
            }
        }
    })
    .to_string()
}

fn empty_page() -> String {
    json!({
        "data": {
            "data": [],
            "pagination": {"page": 1, "limit": 20, "total": 0, "pages": 0}
        }
    })
    .to_string()
}

#[tokio::test]
async fn login_expire_refresh_and_logout_round_trip() {
    let mut server = Server::new_async().await;

    let login = server
        .mock("POST", "/tickets/auth/login")
        .match_body(Matcher::Json(
            json!({"identifier": "vendor@example.com", "password": "hunter2"}),
        ))
        .with_status(200)
        .with_body(login_body("A1", "R1"))
        .expect(1)
        .create_async()
        .await;

    // First list call is rejected with the expiry signal, the refresh
    // rotates the pair, and the replay succeeds with the new token.
    let expired = server
        .mock("GET", "/tickets/events")
        .match_header("authorization", "Bearer A1")
        .with_status(401)
        .with_body(r#"{"message": "Access token has expired"}"#)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/tickets/auth/refresh")
        .match_body(Matcher::Json(json!({"refreshToken": "R1"})))
        .with_status(200)
        .with_body(r#"{"data": {"accessToken": "A2", "refreshToken": "R2"}}"#)
        .expect(1)
        .create_async()
        .await;
    let retried = server
        .mock("GET", "/tickets/events")
        .match_header("authorization", "Bearer A2")
        .with_status(200)
        .with_body(empty_page())
        .expect(1)
        .create_async()
        .await;

    let logout = server
        .mock("POST", "/tickets/auth/logout")
        .match_body(Matcher::Json(json!({"refreshToken": "R2"})))
        .with_status(200)
        .with_body(r#"{"message": "logged out"}"#)
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");
    let store = Arc::new(FileTokenStore::new(&path));

    let client = Arc::new(
        ApiClient::new(&Config::new(server.url()), Arc::clone(&store) as Arc<dyn TokenStore>)
            .unwrap(),
    );
    let session = Session::new(Arc::clone(&client));

    let user = session
        .login(&LoginCredentials {
            identifier: "vendor@example.com".to_owned(),
            password: "hunter2".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(user.business_name, "Good Times Ltd");
    assert!(session.is_authenticated());

    let page = client.events(&EventQuery::default()).await.unwrap();
    assert!(page.data.is_empty());

    // The rotated pair reached the durable store: a fresh client built
    // over the same file starts with it.
    let rehydrated = ApiClient::new(
        &Config::new(server.url()),
        Arc::new(FileTokenStore::new(&path)),
    )
    .unwrap();
    assert_eq!(rehydrated.access_token().as_deref(), Some("A2"));
    assert_eq!(rehydrated.refresh_token().as_deref(), Some("R2"));

    session.logout().await;
    assert!(!session.is_authenticated());
    assert_eq!(client.access_token(), None);
    assert_eq!(client.refresh_token(), None);

    login.assert_async().await;
    expired.assert_async().await;
    refresh.assert_async().await;
    retried.assert_async().await;
    logout.assert_async().await;
}

#[tokio::test]
async fn bootstrap_restores_a_stored_session_from_disk() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/tickets/auth/me")
        .match_header("authorization", "Bearer A1")
        .with_status(200)
        .with_body(
            json!({
                "data": {
                    "_id": "u1",
                    "businessName": "Good Times Ltd",
                    "role": "vendor",
                    "isActive": true,
                    "createdAt": "2026-01-01T00:00:00Z"
                }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");
    let store = Arc::new(FileTokenStore::new(&path));
    store.set("ticketkit_access_token", "A1").unwrap();
    store.set("ticketkit_refresh_token", "R1").unwrap();

    let client = Arc::new(
        ApiClient::new(&Config::new(server.url()), store as Arc<dyn TokenStore>).unwrap(),
    );
    let session = Session::new(client);

    session.initialize().await;

    assert!(session.is_authenticated());
    assert_eq!(session.current_user().unwrap().id, "u1");
}
