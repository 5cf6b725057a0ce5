//! Authenticated HTTP client for the NinjaOne public API.
//!
//! `RmmClient` wraps a `reqwest::Client` and a `TokenProvider` behind a
//! `Mutex`. Every resource function in this crate funnels through
//! [`RmmClient::execute`] (or one of the verb helpers built on it), which:
//!
//! 1. ensures a valid bearer token, logging in if the cached one is absent
//!    or expired;
//! 2. serializes the optional JSON payload;
//! 3. sends the request to `{base}/v2/{path}` with bearer, content-type and
//!    accept headers, under a one-minute total timeout;
//! 4. treats any status above 299 as a failure carrying status and body;
//! 5. decodes the JSON body into the caller's type, or discards it.
//!
//! Failed calls are never retried. The only implicit extra round-trip is
//! the login in step 1.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::auth::{Credentials, DEFAULT_BASE_URL, TokenProvider};
use crate::config::Settings;
use crate::error::{Result, RmmError};

const API_PREFIX: &str = "/v2/";

/// Connect timeout (TCP + TLS handshake).
const API_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Total timeout per API call, including reading the response body.
const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const APPLICATION_JSON: &str = "application/json";

fn build_api_client() -> Client {
    Client::builder()
        .connect_timeout(API_CONNECT_TIMEOUT)
        .timeout(API_REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Authenticated HTTP client for the NinjaOne REST API.
///
/// - `auth` is behind a `tokio::sync::Mutex`. The lock is held for the
///   whole check-expiry-then-refresh step so that concurrent calls share a
///   single login, but it is released before the API request is sent.
/// - `api_url` is stored so tests can point the client at a mock server.
pub struct RmmClient {
    client: Client,
    api_url: String,
    auth: Mutex<TokenProvider>,
}

impl RmmClient {
    /// Client for the default regional host.
    pub fn new(auth: TokenProvider) -> Self {
        RmmClient::with_base_url(auth, DEFAULT_BASE_URL)
    }

    /// Client for an arbitrary host, e.g. `https://app.ninjarmm.com` or a
    /// local mock server. `base_url` must not include the `/v2` prefix.
    pub fn with_base_url(auth: TokenProvider, base_url: &str) -> Self {
        RmmClient {
            client: build_api_client(),
            api_url: format!("{}{API_PREFIX}", base_url.trim_end_matches('/')),
            auth: Mutex::new(auth),
        }
    }

    /// Builds the token provider and client from loaded settings. No network
    /// call is made until the first request.
    pub fn from_settings(settings: &Settings) -> Self {
        let provider = TokenProvider::new(&settings.base_url, Some(settings.credentials()));
        RmmClient::with_base_url(provider, &settings.base_url)
    }

    /// Absolute URL that relative resource paths are appended to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Logs in with explicit credentials, unless a valid session already
    /// exists. Later calls reuse these credentials for refreshes.
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        let mut auth = self.auth.lock().await;
        auth.ensure_authenticated(Some(credentials)).await?;
        Ok(())
    }

    /// Expiry of the cached session, if any.
    pub async fn session_expires_at(&self) -> Option<DateTime<Utc>> {
        self.auth.lock().await.session().map(|s| s.expires_at())
    }

    /// Returns a valid bearer token, logging in with remembered credentials
    /// if needed. Failures are wrapped in `RmmError::DispatchAuth`.
    async fn bearer_token(&self) -> Result<String> {
        let mut auth = self.auth.lock().await;
        auth.ensure_authenticated(None)
            .await
            .map(|session| session.access_token().to_owned())
            .map_err(|e| RmmError::DispatchAuth(Box::new(e)))
    }

    /// Sends the request and checks the status. The returned response has
    /// a 2xx status and an unread body.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&B>,
    ) -> Result<Response> {
        let token = self.bearer_token().await?;

        let url = format!("{}{}", self.api_url, path.trim_start_matches('/'));
        let mut req = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .header(ACCEPT, APPLICATION_JSON);

        if let Some(payload) = payload {
            let body = serde_json::to_vec(payload).map_err(RmmError::PayloadEncode)?;
            req = req.body(body);
        }

        debug!(%method, path, "sending request");
        let resp = req.send().await?;
        let status = resp.status();

        if status.as_u16() > 299 {
            // A body that cannot be read still yields the status error.
            let body = resp.text().await.unwrap_or_default();
            warn!(%method, path, %status, "request failed");
            return Err(RmmError::Api { status, body });
        }

        debug!(%method, path, %status, "request succeeded");
        Ok(resp)
    }

    /// Core dispatch: sends an authenticated request and decodes the JSON
    /// response into `T`.
    ///
    /// `path` is relative to `{base}/v2/` and may carry a query string.
    /// `payload`, when present, is sent as the JSON body.
    ///
    /// # Errors
    ///
    /// - `RmmError::DispatchAuth`: no valid token could be obtained.
    /// - `RmmError::PayloadEncode`: `payload` failed to serialize.
    /// - `RmmError::Transport`: network failure or timeout.
    /// - `RmmError::Api`: status above 299; carries status and body.
    /// - `RmmError::ResponseDecode`: the body is not the expected JSON.
    pub async fn execute<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&B>,
    ) -> Result<T> {
        let resp = self.send(method, path, payload).await?;
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(RmmError::ResponseDecode)
    }

    /// Like [`execute`](Self::execute) but discards the response body. Used
    /// for PATCH/PUT endpoints that return nothing of interest.
    pub async fn execute_discard<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&B>,
    ) -> Result<()> {
        self.send(method, path, payload).await?;
        Ok(())
    }

    /// Sends an authenticated GET request and decodes the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute::<(), T>(Method::GET, path, None).await
    }

    /// Sends an authenticated POST request with a JSON body and decodes the
    /// response.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.execute(Method::POST, path, Some(body)).await
    }

    /// Sends an authenticated PUT request with a JSON body and decodes the
    /// response.
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.execute(Method::PUT, path, Some(body)).await
    }

    /// Sends an authenticated PATCH request with a JSON body and discards
    /// the response body.
    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.execute_discard(Method::PATCH, path, Some(body)).await
    }
}
