//! Authentication endpoints.

use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::client::{ApiClient, LOGIN_ENDPOINT};
use crate::error::Result;
use crate::types::{AuthResponse, AuthUser, LoginCredentials};

const LOGOUT_ENDPOINT: &str = "/tickets/auth/logout";
const ME_ENDPOINT: &str = "/tickets/auth/me";

impl ApiClient {
    /// Exchanges credentials for a token pair and stores it.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error on rejected credentials, or a storage
    /// error if the new tokens cannot be persisted.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        let response: AuthResponse = self.post(LOGIN_ENDPOINT, credentials).await?;
        self.set_token(&response.access_token, Some(&response.refresh_token))?;
        Ok(response)
    }

    /// Revokes the refresh token server-side, then drops the stored pair.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error; tokens are only cleared after the
    /// server call succeeds. [`crate::Session::logout`] wraps this with
    /// best-effort semantics.
    pub async fn logout(&self) -> Result<()> {
        let body = self
            .refresh_token()
            .map(|token| serde_json::json!({ "refreshToken": token }));
        let _: Value = self.request(Method::POST, LOGOUT_ENDPOINT, body).await?;
        debug!("server-side logout acknowledged");
        self.clear_token()?;
        Ok(())
    }

    /// Fetches the authenticated user's profile.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error, including the auth-fatal rejection of
    /// a stale token.
    pub async fn me(&self) -> Result<AuthUser> {
        self.get(ME_ENDPOINT).await
    }
}
