//! Authenticated session: token pair plus the auth endpoints.
//!
//! The session is an explicit context object constructed at app start and
//! injected into its collaborators (no ambient/global token storage). It
//! is torn down by `logout`, and cleared whenever a token refresh fails.

use crate::error::ApiError;
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Access/refresh token pair as issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// The logged-in user as reported by `GET /auth/me/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Credential state and its renewal policy, shared across API callers.
#[derive(Clone)]
pub struct Session {
    base_url: String,
    http: reqwest::Client,
    tokens: Arc<RwLock<Option<TokenPair>>>,
}

impl Session {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            tokens: Arc::new(RwLock::new(None)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.read().expect("token lock poisoned").is_some()
    }

    pub fn access_token(&self) -> Option<String> {
        self.tokens
            .read()
            .expect("token lock poisoned")
            .as_ref()
            .map(|t| t.access.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        self.tokens
            .read()
            .expect("token lock poisoned")
            .as_ref()
            .map(|t| t.refresh.clone())
    }

    /// Drop the token pair. Called on logout and on failed refresh.
    pub fn clear(&self) {
        *self.tokens.write().expect("token lock poisoned") = None;
    }

    fn store(&self, tokens: TokenPair) {
        *self.tokens.write().expect("token lock poisoned") = Some(tokens);
    }

    fn replace_access(&self, access: String) {
        if let Some(pair) = self.tokens.write().expect("token lock poisoned").as_mut() {
            pair.access = access;
        }
    }

    async fn obtain_tokens(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<TokenPair, ApiError> {
        let response = self
            .http
            .post(format!("{}{path}", self.base_url))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let detail = read_detail(response).await;
            return Err(ApiError::from_status(status, detail));
        }
        let tokens: TokenPair = response.json().await.map_err(ApiError::Network)?;
        self.store(tokens.clone());
        Ok(tokens)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        self.obtain_tokens(
            "/auth/login/",
            json!({ "username": username, "password": password }),
        )
        .await
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<TokenPair, ApiError> {
        self.obtain_tokens(
            "/auth/register/",
            json!({ "username": username, "email": email, "password": password }),
        )
        .await
    }

    /// Invalidate the refresh token server-side, then drop local tokens
    /// regardless of whether the call succeeded.
    pub async fn logout(&self) {
        if let Some(refresh) = self.refresh_token() {
            let result = self
                .http
                .post(format!("{}/auth/logout/", self.base_url))
                .json(&json!({ "refresh": refresh }))
                .send()
                .await;
            if let Err(e) = result {
                log::warn!("logout request failed, clearing local session anyway: {e}");
            }
        }
        self.clear();
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Any failure here is a forced logout: local tokens are cleared and
    /// the caller sees `Unauthorized`. Callers must not loop on this.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let Some(refresh) = self.refresh_token() else {
            return Err(ApiError::Unauthorized);
        };
        let response = self
            .http
            .post(format!("{}/auth/refresh/", self.base_url))
            .json(&json!({ "refresh": refresh }))
            .send()
            .await;
        match response {
            Ok(r) if r.status().is_success() => {
                let body: RefreshResponse = r.json().await.map_err(|e| {
                    self.clear();
                    ApiError::Network(e)
                })?;
                self.replace_access(body.access);
                Ok(())
            }
            Ok(r) => {
                log::warn!("token refresh rejected ({}), clearing session", r.status());
                self.clear();
                Err(ApiError::Unauthorized)
            }
            Err(e) => {
                log::warn!("token refresh failed: {e}");
                self.clear();
                Err(ApiError::Unauthorized)
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn set_tokens_for_test(&self, tokens: Option<TokenPair>) {
        *self.tokens.write().expect("token lock poisoned") = tokens;
    }
}

/// Pull the backend's `{"detail": …}` message out of an error response.
pub(crate) async fn read_detail(response: reqwest::Response) -> Option<String> {
    #[derive(Deserialize)]
    struct Detail {
        detail: String,
    }
    response
        .json::<Detail>()
        .await
        .ok()
        .map(|d| d.detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair() -> TokenPair {
        TokenPair {
            access: "access-1".to_string(),
            refresh: "refresh-1".to_string(),
        }
    }

    #[test]
    fn session_starts_unauthenticated() {
        let session = Session::new("http://localhost:8000/blog/api");
        assert!(!session.is_authenticated());
        assert!(session.access_token().is_none());
    }

    #[test]
    fn clear_tears_the_session_down() {
        let session = Session::new("http://localhost:8000/blog/api");
        session.set_tokens_for_test(Some(pair()));
        assert!(session.is_authenticated());

        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.access_token().is_none());
    }

    #[test]
    fn replace_access_keeps_the_refresh_token() {
        let session = Session::new("http://localhost:8000/blog/api");
        session.set_tokens_for_test(Some(pair()));
        session.replace_access("access-2".to_string());

        assert_eq!(session.access_token().as_deref(), Some("access-2"));
        assert_eq!(session.refresh_token().as_deref(), Some("refresh-1"));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let session = Session::new("http://localhost:8000/blog/api/");
        assert_eq!(session.base_url(), "http://localhost:8000/blog/api");
    }

    #[tokio::test]
    async fn refresh_without_a_refresh_token_is_unauthorized() {
        let session = Session::new("http://localhost:8000/blog/api");
        let result = session.refresh().await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }
}
