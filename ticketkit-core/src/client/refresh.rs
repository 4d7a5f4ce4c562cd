//! Single-flight token refresh.
//!
//! At most one refresh HTTP call is in flight at any time. A caller that
//! observes an expired access token while a refresh is already running
//! subscribes to the in-flight outcome instead of issuing a second call,
//! so all racing callers converge on one result.

use std::sync::Mutex;

use serde::Deserialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::{lock_mutex, network_error, ApiClient, REFRESH_ENDPOINT, USER_AGENT};
use crate::error::{Result, TicketKitError};

/// Outcome fanned out to waiters. Failures are carried as the rendered
/// message so the type stays cloneable across the channel.
type Outcome = std::result::Result<(), String>;

enum RefreshState {
    Idle,
    Refreshing(broadcast::Sender<Outcome>),
}

enum Role {
    Leader(broadcast::Sender<Outcome>),
    Waiter(broadcast::Receiver<Outcome>),
}

pub(super) struct RefreshCoordinator {
    state: Mutex<RefreshState>,
}

impl RefreshCoordinator {
    pub(super) fn new() -> Self {
        Self {
            state: Mutex::new(RefreshState::Idle),
        }
    }

    /// Joins the in-flight refresh when one exists, otherwise claims
    /// leadership. Leadership is decided synchronously, before any await,
    /// so two callers can never both issue the HTTP call.
    fn begin(&self) -> Role {
        let mut state = lock_mutex(&self.state);
        match &*state {
            RefreshState::Refreshing(tx) => Role::Waiter(tx.subscribe()),
            RefreshState::Idle => {
                let (tx, _rx) = broadcast::channel(1);
                *state = RefreshState::Refreshing(tx.clone());
                Role::Leader(tx)
            }
        }
    }

    /// Returns to idle. The pending handle is destroyed whether the call
    /// succeeded or failed; the next expiry starts a fresh refresh.
    fn finish(&self) {
        *lock_mutex(&self.state) = RefreshState::Idle;
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenPair {
    access_token: String,
    refresh_token: String,
}

impl ApiClient {
    /// Rotates the token pair, sharing one in-flight refresh across all
    /// concurrent callers.
    ///
    /// # Errors
    ///
    /// Returns an error if no refresh token is stored or the refresh call
    /// fails; in the failure case both tokens are cleared and the session
    /// observer is told a login is required.
    pub(crate) async fn refresh_session(&self) -> Result<()> {
        match self.refresh.begin() {
            Role::Waiter(mut rx) => {
                debug!("refresh already in progress, awaiting its outcome");
                match rx.recv().await {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(message)) => Err(TicketKitError::Api {
                        status: 401,
                        message,
                    }),
                    // Leader dropped without publishing (cancelled mid-flight).
                    Err(_) => Err(TicketKitError::SessionExpired),
                }
            }
            Role::Leader(tx) => {
                let outcome = self.perform_refresh().await;
                self.refresh.finish();
                if let Err(err) = &outcome {
                    warn!(error = %err, "token refresh failed, clearing session");
                    if let Err(storage_err) = self.clear_token() {
                        warn!(error = %storage_err, "failed to clear tokens after refresh failure");
                    }
                    self.notify_login_required();
                }
                let _ = tx.send(outcome.as_ref().map(|()| ()).map_err(ToString::to_string));
                outcome
            }
        }
    }

    /// Issues the refresh call itself. Deliberately bypasses `request` so
    /// an expired-token response here can never recurse into another
    /// refresh.
    async fn perform_refresh(&self) -> Result<()> {
        let refresh_token = self
            .refresh_token()
            .ok_or(TicketKitError::MissingRefreshToken)?;
        let url = format!("{}{REFRESH_ENDPOINT}", self.base_url);
        debug!("refreshing access token");

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .header("Content-Type", "application/json")
            .header("User-Agent", USER_AGENT)
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await
            .map_err(|err| network_error(&url, &err))?;

        let value = super::handle_response(response, &url).await?;
        let pair: TokenPair = serde_json::from_value(value)
            .map_err(|err| TicketKitError::UnexpectedResponse(err.to_string()))?;
        self.set_token(&pair.access_token, Some(&pair.refresh_token))?;
        debug!("token refresh succeeded");
        Ok(())
    }
}
