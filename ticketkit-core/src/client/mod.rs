//! Authenticated HTTP request engine.
//!
//! [`ApiClient`] owns the token pair, builds JSON requests with a bearer
//! header, classifies failures, and on the backend's expired-token signal
//! runs the single-flight refresh (see [`refresh`]) before retrying the
//! original request exactly once.

mod refresh;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Result, TicketKitError};
use crate::session::SessionEvents;
use crate::storage::{StorageResult, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use refresh::RefreshCoordinator;

pub(crate) const LOGIN_ENDPOINT: &str = "/tickets/auth/login";
pub(crate) const REFRESH_ENDPOINT: &str = "/tickets/auth/refresh";

pub(crate) const USER_AGENT: &str =
    concat!("ticketkit-core/", env!("CARGO_PKG_VERSION"));

#[derive(Default)]
struct TokenState {
    access: Option<String>,
    refresh: Option<String>,
}

/// Authenticated client for the ticketing backend.
///
/// All in-memory token state lives here and is mutated only through
/// [`ApiClient::set_token`] and [`ApiClient::clear_token`], which keep the
/// durable [`TokenStore`] in step.
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
    store: Arc<dyn TokenStore>,
    tokens: RwLock<TokenState>,
    refresh: RefreshCoordinator,
    events: RwLock<Option<Arc<dyn SessionEvents>>>,
}

impl ApiClient {
    /// Creates a client, loading any previously stored tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be read.
    pub fn new(config: &Config, store: Arc<dyn TokenStore>) -> Result<Self> {
        let tokens = TokenState {
            access: store.get(ACCESS_TOKEN_KEY)?,
            refresh: store.get(REFRESH_TOKEN_KEY)?,
        };
        Ok(Self {
            base_url: config.base_url().to_owned(),
            timeout: config.timeout(),
            http: reqwest::Client::new(),
            store,
            tokens: RwLock::new(tokens),
            refresh: RefreshCoordinator::new(),
            events: RwLock::new(None),
        })
    }

    /// Registers the observer notified when the session becomes unusable
    /// and the user must log in again.
    pub fn set_session_events(&self, events: Arc<dyn SessionEvents>) {
        *write_lock(&self.events) = Some(events);
    }

    /// The access token currently held in memory, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        read_lock(&self.tokens).access.clone()
    }

    /// The refresh token currently held in memory, if any.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        read_lock(&self.tokens).refresh.clone()
    }

    /// Stores a new access token, and optionally a new refresh token, in
    /// memory and in the durable store in the same call. When no refresh
    /// token is given the previous one is retained.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable store cannot be written; the
    /// in-memory tokens are updated regardless.
    pub fn set_token(&self, access: &str, refresh: Option<&str>) -> Result<()> {
        {
            let mut tokens = write_lock(&self.tokens);
            tokens.access = Some(access.to_owned());
            if let Some(refresh) = refresh {
                tokens.refresh = Some(refresh.to_owned());
            }
        }
        debug!(rotated_refresh = refresh.is_some(), "storing new tokens");
        self.store.set(ACCESS_TOKEN_KEY, access)?;
        if let Some(refresh) = refresh {
            self.store.set(REFRESH_TOKEN_KEY, refresh)?;
        }
        Ok(())
    }

    /// Drops both tokens from memory and from the durable store.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable store cannot be written; the
    /// in-memory tokens are cleared regardless.
    pub fn clear_token(&self) -> Result<()> {
        {
            let mut tokens = write_lock(&self.tokens);
            tokens.access = None;
            tokens.refresh = None;
        }
        debug!("clearing stored tokens");
        self.store.remove(&[ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY])?;
        Ok(())
    }

    pub(crate) fn stored_access_token(&self) -> StorageResult<Option<String>> {
        self.store.get(ACCESS_TOKEN_KEY)
    }

    pub(crate) fn notify_login_required(&self) {
        let events = read_lock(&self.events).clone();
        if let Some(events) = events {
            events.on_login_required();
        }
    }

    // ---- request helpers used by the typed endpoint methods ----

    pub(crate) async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request(Method::GET, endpoint, None).await
    }

    pub(crate) async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, Some(to_body(body)?))
            .await
    }

    pub(crate) async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, endpoint, Some(to_body(body)?))
            .await
    }

    pub(crate) async fn put_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request(Method::PUT, endpoint, None).await
    }

    pub(crate) async fn patch<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, endpoint, Some(to_body(body)?))
            .await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request(Method::DELETE, endpoint, None).await
    }

    pub(crate) async fn delete_with_body<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::DELETE, endpoint, Some(to_body(body)?))
            .await
    }

    /// Issues a request, running the refresh-then-retry path at most once
    /// when the backend reports an expired access token.
    pub(crate) async fn request<T>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let mut refreshed = false;
        loop {
            match self.execute(method.clone(), endpoint, body.as_ref()).await {
                Ok(value) => {
                    return serde_json::from_value(value)
                        .map_err(|err| TicketKitError::UnexpectedResponse(err.to_string()))
                }
                Err(err) if !refreshed && self.should_refresh(endpoint, &err) => {
                    refreshed = true;
                    debug!(endpoint, "access token expired, refreshing before retry");
                    if let Err(refresh_err) = self.refresh_session().await {
                        warn!(error = %refresh_err, "token refresh failed");
                        return Err(TicketKitError::SessionExpired);
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Downloads a raw response body, bearer-authenticated but without the
    /// JSON envelope handling.
    pub(crate) async fn download(&self, endpoint: &str) -> Result<Vec<u8>> {
        let url = format!("{}{endpoint}", self.base_url);
        let mut builder = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .header("User-Agent", USER_AGENT);
        if let Some(token) = self.access_token() {
            builder = builder.bearer_auth(token);
        }
        let response = builder
            .send()
            .await
            .map_err(|err| network_error(&url, &err))?;
        if !response.status().is_success() {
            return Err(error_from_response(response, &url).await);
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| network_error(&url, &err))?;
        Ok(bytes.to_vec())
    }

    /// Sends a multipart form, bearer-authenticated.
    ///
    /// Multipart bodies are not replayable, so expiry surfaces as an error
    /// here instead of going through the refresh-and-retry path.
    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let url = format!("{}{endpoint}", self.base_url);
        let mut builder = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .header("User-Agent", USER_AGENT)
            .multipart(form);
        if let Some(token) = self.access_token() {
            builder = builder.bearer_auth(token);
        }
        let response = builder
            .send()
            .await
            .map_err(|err| network_error(&url, &err))?;
        let value = handle_response(response, &url).await?;
        serde_json::from_value(value)
            .map_err(|err| TicketKitError::UnexpectedResponse(err.to_string()))
    }

    // Never refresh for the refresh/login endpoints themselves, or a
    // rejected refresh token would loop the engine forever.
    fn should_refresh(&self, endpoint: &str, err: &TicketKitError) -> bool {
        err.is_token_expired()
            && !endpoint.contains(REFRESH_ENDPOINT)
            && !endpoint.contains(LOGIN_ENDPOINT)
            && self.refresh_token().is_some()
    }

    async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = format!("{}{endpoint}", self.base_url);
        let token = self.access_token();
        debug!(%method, %url, has_token = token.is_some(), "sending request");

        let mut builder = self
            .http
            .request(method, &url)
            .timeout(self.timeout)
            .header("Content-Type", "application/json")
            .header("User-Agent", USER_AGENT);
        if let Some(token) = &token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| network_error(&url, &err))?;
        handle_response(response, &url).await
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<Value> {
    serde_json::to_value(body).map_err(|err| TicketKitError::Serialization(err.to_string()))
}

async fn handle_response(response: reqwest::Response, url: &str) -> Result<Value> {
    if !response.status().is_success() {
        return Err(error_from_response(response, url).await);
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|err| network_error(url, &err))?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|err| TicketKitError::UnexpectedResponse(err.to_string()))?;
    Ok(unwrap_envelope(value))
}

async fn error_from_response(response: reqwest::Response, url: &str) -> TicketKitError {
    let status = response.status();
    let fallback = format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("request failed")
    );
    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .filter(|message| !message.is_empty())
        .unwrap_or(fallback);
    warn!(status = status.as_u16(), %url, %message, "request failed");
    TicketKitError::Api {
        status: status.as_u16(),
        message,
    }
}

/// The backend wraps most payloads as `{"data": ...}` but returns some
/// bare. Unwrap the envelope when a non-null `data` field is present,
/// otherwise hand back the body as-is.
fn unwrap_envelope(mut value: Value) -> Value {
    if let Value::Object(map) = &mut value {
        if map.get("data").is_some_and(|data| !data.is_null()) {
            if let Some(data) = map.remove("data") {
                return data;
            }
        }
    }
    value
}

fn network_error(url: &str, err: &reqwest::Error) -> TicketKitError {
    TicketKitError::Network {
        url: url.to_owned(),
        error: err.to_string(),
    }
}

fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn lock_mutex<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use mockito::Server;
    use serde_json::json;

    use super::*;
    use crate::storage::MemoryTokenStore;

    fn client_for(server: &Server) -> ApiClient {
        let store = Arc::new(MemoryTokenStore::new());
        ApiClient::new(&Config::new(server.url()), store).unwrap()
    }

    fn client_with_tokens(server: &Server, access: &str, refresh: &str) -> ApiClient {
        let store = Arc::new(MemoryTokenStore::new());
        store.set(ACCESS_TOKEN_KEY, access).unwrap();
        store.set(REFRESH_TOKEN_KEY, refresh).unwrap();
        ApiClient::new(&Config::new(server.url()), store).unwrap()
    }

    struct CountingEvents(AtomicUsize);

    impl SessionEvents for CountingEvents {
        fn on_login_required(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn unwraps_data_envelope() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/tickets/events/e1")
            .with_status(200)
            .with_body(r#"{"data": {"value": 7}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let body: Value = client.get("/tickets/events/e1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(body, json!({"value": 7}));
    }

    #[tokio::test]
    async fn returns_bare_body_when_no_envelope() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/tickets/auth/me")
            .with_status(200)
            .with_body(r#"{"value": 7}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let body: Value = client.get("/tickets/auth/me").await.unwrap();
        assert_eq!(body, json!({"value": 7}));
    }

    #[tokio::test]
    async fn error_message_comes_from_body_with_status_line_fallback() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/tickets/events")
            .with_status(422)
            .with_body(r#"{"message": "capacity must be positive"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/tickets/sales")
            .with_status(500)
            .with_body("not json")
            .create_async()
            .await;

        let client = client_for(&server);

        let err = client.get::<Value>("/tickets/events").await.unwrap_err();
        assert!(
            matches!(&err, TicketKitError::Api { status: 422, message } if message == "capacity must be positive")
        );

        let err = client.get::<Value>("/tickets/sales").await.unwrap_err();
        assert!(
            matches!(&err, TicketKitError::Api { status: 500, message } if message.starts_with("HTTP 500"))
        );
    }

    #[tokio::test]
    async fn transport_failures_become_network_errors() {
        // Nothing listens on this port.
        let config = Config::new("http://127.0.0.1:9");
        let client = ApiClient::new(&config, Arc::new(MemoryTokenStore::new())).unwrap();

        let err = client.get::<Value>("/tickets/auth/me").await.unwrap_err();
        assert!(matches!(err, TicketKitError::Network { .. }));
    }

    #[tokio::test]
    async fn expired_token_refreshes_and_retries_exactly_once() {
        let mut server = Server::new_async().await;

        let expired = server
            .mock("GET", "/tickets/events/e1")
            .match_header("authorization", "Bearer A1")
            .with_status(401)
            .with_body(r#"{"message": "Token has expired"}"#)
            .expect(1)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/tickets/auth/refresh")
            .match_body(mockito::Matcher::Json(json!({"refreshToken": "R1"})))
            .with_status(200)
            .with_body(r#"{"data": {"accessToken": "A2", "refreshToken": "R2"}}"#)
            .expect(1)
            .create_async()
            .await;
        let retried = server
            .mock("GET", "/tickets/events/e1")
            .match_header("authorization", "Bearer A2")
            .with_status(200)
            .with_body(r#"{"data": {"ok": true}}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_with_tokens(&server, "A1", "R1");
        let body: Value = client.get("/tickets/events/e1").await.unwrap();

        expired.assert_async().await;
        refresh.assert_async().await;
        retried.assert_async().await;
        assert_eq!(body, json!({"ok": true}));
        assert_eq!(client.access_token().as_deref(), Some("A2"));
        assert_eq!(client.refresh_token().as_deref(), Some("R2"));
        assert_eq!(
            client.stored_access_token().unwrap().as_deref(),
            Some("A2")
        );
    }

    #[tokio::test]
    async fn second_expiry_after_refresh_does_not_loop() {
        let mut server = Server::new_async().await;

        server
            .mock("GET", "/tickets/events/e1")
            .with_status(401)
            .with_body(r#"{"message": "Token has expired"}"#)
            .expect(2)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/tickets/auth/refresh")
            .with_status(200)
            .with_body(r#"{"accessToken": "A2", "refreshToken": "R2"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_with_tokens(&server, "A1", "R1");
        let err = client.get::<Value>("/tickets/events/e1").await.unwrap_err();

        refresh.assert_async().await;
        assert!(
            matches!(&err, TicketKitError::Api { status: 401, message } if message.contains("expired"))
        );
    }

    #[tokio::test]
    async fn refresh_failure_surfaces_session_expired_and_clears_tokens() {
        let mut server = Server::new_async().await;

        server
            .mock("GET", "/tickets/events/e1")
            .with_status(401)
            .with_body(r#"{"message": "Token has expired"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/tickets/auth/refresh")
            .with_status(401)
            .with_body(r#"{"message": "refresh token revoked"}"#)
            .create_async()
            .await;

        let client = client_with_tokens(&server, "A1", "R1");
        let events = Arc::new(CountingEvents(AtomicUsize::new(0)));
        client.set_session_events(Arc::clone(&events) as Arc<dyn SessionEvents>);

        let err = client.get::<Value>("/tickets/events/e1").await.unwrap_err();

        assert!(matches!(err, TicketKitError::SessionExpired));
        assert_eq!(client.access_token(), None);
        assert_eq!(client.refresh_token(), None);
        assert_eq!(client.stored_access_token().unwrap(), None);
        assert_eq!(events.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expiry_on_login_endpoint_never_triggers_refresh() {
        let mut server = Server::new_async().await;

        server
            .mock("POST", "/tickets/auth/login")
            .with_status(401)
            .with_body(r#"{"message": "Token has expired"}"#)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/tickets/auth/refresh")
            .expect(0)
            .create_async()
            .await;

        let client = client_with_tokens(&server, "A1", "R1");
        let err = client
            .post::<Value, _>("/tickets/auth/login", &json!({}))
            .await
            .unwrap_err();

        refresh.assert_async().await;
        assert!(matches!(err, TicketKitError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn expiry_without_refresh_token_propagates() {
        let mut server = Server::new_async().await;

        server
            .mock("GET", "/tickets/events/e1")
            .with_status(401)
            .with_body(r#"{"message": "Token has expired"}"#)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/tickets/auth/refresh")
            .expect(0)
            .create_async()
            .await;

        let store = Arc::new(MemoryTokenStore::new());
        store.set(ACCESS_TOKEN_KEY, "A1").unwrap();
        let client = ApiClient::new(&Config::new(server.url()), store).unwrap();

        let err = client.get::<Value>("/tickets/events/e1").await.unwrap_err();

        refresh.assert_async().await;
        assert!(matches!(err, TicketKitError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn set_token_retains_refresh_token_when_only_access_rotates() {
        let server = Server::new_async().await;
        let client = client_with_tokens(&server, "A1", "R1");

        client.set_token("A2", None).unwrap();

        assert_eq!(client.access_token().as_deref(), Some("A2"));
        assert_eq!(client.refresh_token().as_deref(), Some("R1"));
    }

    #[tokio::test]
    async fn empty_body_deserializes_as_unit() {
        let mut server = Server::new_async().await;
        server
            .mock("DELETE", "/tickets/events/e1")
            .with_status(204)
            .create_async()
            .await;

        let client = client_for(&server);
        let () = client.delete("/tickets/events/e1").await.unwrap();
    }
}
