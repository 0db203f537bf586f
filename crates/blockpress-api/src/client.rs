//! Request plumbing shared by every authenticated resource call.
//!
//! One path applies the bearer header, maps non-success statuses to the
//! error taxonomy, and performs the transparent token refresh: a request
//! answered with 401 is retried exactly once after a successful refresh.
//! A second 401, or a failed refresh, clears the session and surfaces
//! `Unauthorized` — there is no retry loop and no backoff.

use crate::error::ApiError;
use crate::session::{CurrentUser, Session, read_detail};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Whether a failed request should be retried after a token refresh.
///
/// Exactly one refresh-and-retry per original request: only the first
/// attempt of a 401, and only while a session exists to refresh.
pub(crate) fn should_attempt_refresh(status: StatusCode, attempt: u32, authenticated: bool) -> bool {
    status == StatusCode::UNAUTHORIZED && attempt == 0 && authenticated
}

/// Client for the blog backend, wrapping a shared [`Session`].
#[derive(Clone)]
pub struct ApiClient {
    session: Session,
}

impl ApiClient {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.session.base_url())
    }

    /// Send a request built by `build`, refreshing the access token and
    /// retrying once on 401. `build` is called per attempt so multipart
    /// bodies can be rebuilt for the retry.
    pub(crate) async fn send<F>(&self, build: F) -> Result<reqwest::Response, ApiError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        for attempt in 0..2 {
            let mut request = build();
            if let Some(token) = self.session.access_token() {
                request = request.bearer_auth(token);
            }
            let response = request.send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }
            if should_attempt_refresh(status, attempt, self.session.is_authenticated()) {
                // Forced logout happens inside refresh() when it fails.
                self.session.refresh().await?;
                continue;
            }
            if status == StatusCode::UNAUTHORIZED {
                self.session.clear();
                return Err(ApiError::Unauthorized);
            }
            let detail = read_detail(response).await;
            return Err(ApiError::from_status(status, detail));
        }
        unreachable!("request loop always returns within two attempts")
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ApiError::Decode)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self.send(|| self.session.http().get(&url)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self.send(|| self.session.http().post(&url).json(body)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self.send(|| self.session.http().post(&url)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self.send(|| self.session.http().patch(&url).json(body)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        self.send(|| self.session.http().delete(&url)).await?;
        Ok(())
    }

    /// Send a multipart request; `form` builds a fresh body per attempt.
    pub(crate) async fn send_multipart<F, T>(
        &self,
        method: reqwest::Method,
        path: &str,
        form: F,
    ) -> Result<T, ApiError>
    where
        F: Fn() -> reqwest::multipart::Form,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self
            .send(|| {
                self.session
                    .http()
                    .request(method.clone(), &url)
                    .multipart(form())
            })
            .await?;
        Self::decode(response).await
    }

    /// `GET /auth/me/` — the logged-in user.
    pub async fn me(&self) -> Result<CurrentUser, ApiError> {
        self.get_json("/auth/me/").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // The retried request failing 401 again (attempt 1) must not recurse.
    #[rstest]
    #[case::first_401_with_a_session(StatusCode::UNAUTHORIZED, 0, true, true)]
    #[case::second_401_never_retries(StatusCode::UNAUTHORIZED, 1, true, false)]
    #[case::anonymous_request(StatusCode::UNAUTHORIZED, 0, false, false)]
    #[case::not_found(StatusCode::NOT_FOUND, 0, true, false)]
    #[case::bad_request(StatusCode::BAD_REQUEST, 0, true, false)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, 0, true, false)]
    fn refresh_retry_decision_table(
        #[case] status: StatusCode,
        #[case] attempt: u32,
        #[case] authenticated: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(should_attempt_refresh(status, attempt, authenticated), expected);
    }
}
