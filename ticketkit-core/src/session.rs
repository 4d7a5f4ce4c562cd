//! Session state: current user, bootstrap, login and logout.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::error::Result;
use crate::retry::{retry_with_backoff, DEFAULT_INITIAL_DELAY, DEFAULT_MAX_ATTEMPTS};
use crate::types::{AuthUser, LoginCredentials};

/// Observer for session lifecycle events the embedding application must
/// react to, typically by navigating to its login surface.
pub trait SessionEvents: Send + Sync {
    /// The session is no longer usable: tokens were cleared after a failed
    /// refresh or an explicit logout.
    fn on_login_required(&self);
}

/// Delay between assigning the authenticated user and resolving `login`,
/// giving dependent observers a tick to see the new state before the
/// caller navigates.
const POST_LOGIN_SETTLE: Duration = Duration::from_millis(50);

/// Owns the current-user state and composes the client, the durable token
/// store and the retry policy into the application-facing session.
///
/// A session is authenticated exactly when a user profile is present;
/// stored tokens alone do not count.
pub struct Session {
    client: Arc<ApiClient>,
    user: RwLock<Option<AuthUser>>,
    init: OnceCell<()>,
    loading: AtomicBool,
}

impl Session {
    /// Creates a session over `client`. Call [`Session::initialize`] to
    /// restore a previous login from stored tokens.
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            user: RwLock::new(None),
            init: OnceCell::new(),
            loading: AtomicBool::new(true),
        }
    }

    /// The underlying API client.
    #[must_use]
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// A snapshot of the current user, if authenticated.
    #[must_use]
    pub fn current_user(&self) -> Option<AuthUser> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a user profile is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// True until the first [`Session::initialize`] call has finished.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Bootstraps the session from stored tokens.
    ///
    /// Runs at most once per session: a concurrent second call awaits the
    /// first run, and any later call returns immediately.
    pub async fn initialize(&self) {
        self.init.get_or_init(|| self.run_init()).await;
    }

    async fn run_init(&self) {
        let snapshot = match self.client.stored_access_token() {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "token store unreadable, starting unauthenticated");
                None
            }
        };
        debug!(token_present = snapshot.is_some(), "initializing session");

        if let Some(snapshot) = snapshot {
            let fetched = retry_with_backoff(
                || self.client.me(),
                DEFAULT_MAX_ATTEMPTS,
                DEFAULT_INITIAL_DELAY,
            )
            .await;
            match fetched {
                Ok(user) => {
                    debug!(user_id = %user.id, role = %user.role, "restored session from stored tokens");
                    self.set_user(Some(user));
                }
                Err(err) if err.is_auth_fatal() => {
                    warn!(error = %err, "stored token rejected by the server");
                    self.evict_stale_token(&snapshot);
                }
                Err(err) => {
                    // Transient failure: keep the tokens so a later start
                    // can retry; this lifetime stays unauthenticated.
                    warn!(error = %err, "profile fetch failed, keeping stored tokens");
                }
            }
        }

        self.loading.store(false, Ordering::Release);
        debug!("session initialization complete");
    }

    /// Clears stored tokens only if the stored access token is still the
    /// one this bootstrap started from. A login that raced the bootstrap
    /// has already replaced it, and its fresh token must survive.
    fn evict_stale_token(&self, snapshot: &str) {
        match self.client.stored_access_token() {
            Ok(Some(current)) if current == snapshot => {
                if let Err(err) = self.client.clear_token() {
                    warn!(error = %err, "failed to clear rejected tokens");
                }
            }
            Ok(_) => {
                debug!("stored token changed during bootstrap, leaving it in place");
            }
            Err(err) => {
                warn!(error = %err, "token store unreadable, leaving tokens in place");
            }
        }
    }

    /// Logs in and populates the session.
    ///
    /// Resolves only after a short settle delay so state observers see the
    /// authenticated session before the caller navigates away.
    ///
    /// # Errors
    ///
    /// Returns the login endpoint's error; session state is untouched on
    /// failure.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthUser> {
        let response = self.client.login(credentials).await?;
        info!(user_id = %response.user.id, role = %response.user.role, "login successful");
        self.set_user(Some(response.user.clone()));
        tokio::time::sleep(POST_LOGIN_SETTLE).await;
        Ok(response.user)
    }

    /// Logs out. The server call is best-effort: local session state is
    /// cleared and the observer notified even when it fails.
    pub async fn logout(&self) {
        if let Err(err) = self.client.logout().await {
            warn!(error = %err, "logout request failed, clearing local session anyway");
        }
        self.set_user(None);
        if let Err(err) = self.client.clear_token() {
            warn!(error = %err, "failed to clear stored tokens on logout");
        }
        self.client.notify_login_required();
    }

    fn set_user(&self, user: Option<AuthUser>) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    use mockito::Server;

    use super::*;
    use crate::config::Config;
    use crate::storage::{
        MemoryTokenStore, StorageResult, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY,
    };

    const VENDOR_PROFILE: &str = r#"{
        "data": {
            "_id": "u1",
            "email": "v@x.com",
            "businessName": "Good Times Ltd",
            "role": "vendor",
            "isActive": true,
            "createdAt": "2026-01-01T00:00:00Z"
        }
    }"#;

    fn session_for(server: &Server, store: Arc<dyn TokenStore>) -> Session {
        let client = ApiClient::new(&Config::new(server.url()), store).unwrap();
        Session::new(Arc::new(client))
    }

    fn store_with_tokens(access: &str, refresh: &str) -> Arc<MemoryTokenStore> {
        let store = Arc::new(MemoryTokenStore::new());
        store.set(ACCESS_TOKEN_KEY, access).unwrap();
        store.set(REFRESH_TOKEN_KEY, refresh).unwrap();
        store
    }

    #[tokio::test]
    async fn initialize_without_stored_token_finishes_unauthenticated() {
        let mut server = Server::new_async().await;
        let me = server
            .mock("GET", "/tickets/auth/me")
            .expect(0)
            .create_async()
            .await;

        let session = session_for(&server, Arc::new(MemoryTokenStore::new()));
        assert!(session.is_loading());
        session.initialize().await;

        me.assert_async().await;
        assert!(!session.is_loading());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn initialize_restores_user_from_stored_tokens() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/tickets/auth/me")
            .match_header("authorization", "Bearer A1")
            .with_status(200)
            .with_body(VENDOR_PROFILE)
            .create_async()
            .await;

        let session = session_for(&server, store_with_tokens("A1", "R1"));
        session.initialize().await;

        assert!(session.is_authenticated());
        assert_eq!(session.current_user().unwrap().id, "u1");
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn initialize_runs_at_most_once() {
        let mut server = Server::new_async().await;
        let me = server
            .mock("GET", "/tickets/auth/me")
            .with_status(200)
            .with_body(VENDOR_PROFILE)
            .expect(1)
            .create_async()
            .await;

        let session = session_for(&server, store_with_tokens("A1", "R1"));
        tokio::join!(session.initialize(), session.initialize());
        session.initialize().await;

        me.assert_async().await;
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn auth_fatal_bootstrap_evicts_unchanged_tokens() {
        let mut server = Server::new_async().await;
        // Auth-fatal but not the expiry signal, so no refresh is attempted
        // and the retry policy gives up after the first attempt.
        let me = server
            .mock("GET", "/tickets/auth/me")
            .with_status(401)
            .with_body(r#"{"message": "Unauthorized"}"#)
            .expect(1)
            .create_async()
            .await;

        let store = store_with_tokens("A1", "R1");
        let session = session_for(&server, Arc::clone(&store) as Arc<dyn TokenStore>);
        session.initialize().await;

        me.assert_async().await;
        assert!(!session.is_authenticated());
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap(), None);
    }

    /// Token store whose access-token reads follow a scripted sequence,
    /// simulating a login that replaces the token mid-bootstrap.
    struct ScriptedStore {
        access_reads: Mutex<Vec<Option<String>>>,
        inner: MemoryTokenStore,
        removals: AtomicUsize,
    }

    impl TokenStore for ScriptedStore {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            if key == ACCESS_TOKEN_KEY {
                let mut reads = self.access_reads.lock().unwrap();
                if let Some(next) = reads.pop() {
                    return Ok(next);
                }
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            self.inner.set(key, value)
        }

        fn remove(&self, keys: &[&str]) -> StorageResult<()> {
            self.removals.fetch_add(1, Ordering::SeqCst);
            self.inner.remove(keys)
        }
    }

    #[tokio::test]
    async fn bootstrap_does_not_clobber_a_token_replaced_by_a_racing_login() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/tickets/auth/me")
            .with_status(401)
            .with_body(r#"{"message": "Unauthorized"}"#)
            .create_async()
            .await;

        // Reads pop from the back: client construction sees OLD, the
        // bootstrap snapshot sees OLD, the post-failure re-read sees NEW.
        let store = Arc::new(ScriptedStore {
            access_reads: Mutex::new(vec![
                Some("NEW".to_owned()),
                Some("OLD".to_owned()),
                Some("OLD".to_owned()),
            ]),
            inner: MemoryTokenStore::new(),
            removals: AtomicUsize::new(0),
        });
        store.inner.set(ACCESS_TOKEN_KEY, "NEW").unwrap();
        store.inner.set(REFRESH_TOKEN_KEY, "RN").unwrap();

        let session = session_for(&server, Arc::clone(&store) as Arc<dyn TokenStore>);
        session.initialize().await;

        assert_eq!(store.removals.load(Ordering::SeqCst), 0);
        assert_eq!(store.inner.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("NEW"));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn login_populates_user_and_stores_tokens() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/tickets/auth/login")
            .with_status(200)
            .with_body(
                r#"{
                    "data": {
                        "accessToken": "A",
                        "refreshToken": "R",
                        "user": {
                            "_id": "u1",
                            "email": "v@x.com",
                            "businessName": "Good Times Ltd",
                            "role": "vendor",
                            "isActive": true,
                            "createdAt": "2026-01-01T00:00:00Z"
                        }
                    }
                }"#,
            )
            .create_async()
            .await;

        let store = Arc::new(MemoryTokenStore::new());
        let session = session_for(&server, Arc::clone(&store) as Arc<dyn TokenStore>);

        let credentials = LoginCredentials {
            identifier: "v@x.com".to_owned(),
            password: "p".to_owned(),
        };
        let user = session.login(&credentials).await.unwrap();

        assert_eq!(user.role, crate::types::UserRole::Vendor);
        assert!(session.is_authenticated());
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("A"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("R"));
    }

    #[tokio::test]
    async fn logout_is_locally_effective_when_the_server_call_fails() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/tickets/auth/login")
            .with_status(200)
            .with_body(
                r#"{
                    "accessToken": "A",
                    "refreshToken": "R",
                    "user": {
                        "_id": "u1",
                        "businessName": "Good Times Ltd",
                        "role": "vendor",
                        "isActive": true,
                        "createdAt": "2026-01-01T00:00:00Z"
                    }
                }"#,
            )
            .create_async()
            .await;
        server
            .mock("POST", "/tickets/auth/logout")
            .with_status(500)
            .with_body(r#"{"message": "boom"}"#)
            .create_async()
            .await;

        let store = Arc::new(MemoryTokenStore::new());
        let session = session_for(&server, Arc::clone(&store) as Arc<dyn TokenStore>);
        session
            .login(&LoginCredentials {
                identifier: "v@x.com".to_owned(),
                password: "p".to_owned(),
            })
            .await
            .unwrap();

        session.logout().await;

        assert!(!session.is_authenticated());
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap(), None);
    }
}
