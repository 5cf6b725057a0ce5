//! OAuth2 client-credentials authentication for the NinjaOne API.
//!
//! Tokens come from `POST {base}/ws/oauth/token` using the
//! `client_credentials` grant. [`TokenProvider`] caches the resulting
//! [`Session`] together with the credentials that produced it, so later
//! calls can refresh the token without the caller re-supplying secrets.
//!
//! `TokenProvider` itself is not synchronized. `RmmClient` keeps it behind
//! a mutex and holds the lock across the whole check-then-refresh step, so
//! concurrent callers never log in twice or see a half-written session.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, RmmError};

/// Regional API host used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://eu.ninjarmm.com";

/// Scope requested by the CLI when none is configured.
pub const DEFAULT_SCOPE: &str = "monitoring management control";

const TOKEN_PATH: &str = "/ws/oauth/token";

/// Subtracted from `expires_in` so the token is refreshed before the
/// server starts rejecting it.
const EXPIRY_BUFFER_SECS: i64 = 60;

const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client ID, secret and optional scope for the client-credentials grant.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// OAuth application client ID.
    pub client_id: String,
    /// OAuth application client secret.
    pub client_secret: String,
    /// Space-separated scopes, e.g. `"monitoring management control"`.
    /// Omitted from the token request when `None`.
    pub scope: Option<String>,
}

impl Credentials {
    /// Credentials without an explicit scope.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Credentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: None,
        }
    }

    /// Sets the requested scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}

/// Form body sent to the token endpoint.
/// Serialized as `application/x-www-form-urlencoded` by reqwest's `.form()`.
#[derive(Serialize)]
pub struct TokenRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a str>,
}

impl<'a> TokenRequest<'a> {
    fn client_credentials(credentials: &'a Credentials) -> Self {
        TokenRequest {
            grant_type: "client_credentials",
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
            scope: credentials.scope.as_deref(),
        }
    }
}

/// Token endpoint response. Missing fields default to empty/zero and are
/// rejected afterwards, so a sparse payload produces `AuthResponse` rather
/// than a decode error.
#[derive(Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub scope: Option<String>,
}

/// An acquired bearer token plus the credentials that obtained it.
///
/// Invariants: `access_token` is non-empty, and
/// `expires_at == issued_at + expires_in - 60s`.
#[derive(Clone)]
pub struct Session {
    access_token: String,
    token_type: String,
    scope: Option<String>,
    expires_at: DateTime<Utc>,
    credentials: Credentials,
}

impl Session {
    fn from_response(
        token: TokenResponse,
        credentials: Credentials,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let lifetime = TimeDelta::try_seconds(token.expires_in.saturating_sub(EXPIRY_BUFFER_SECS))
            .unwrap_or(TimeDelta::MAX);
        Session {
            access_token: token.access_token,
            token_type: token.token_type,
            scope: token.scope,
            expires_at: issued_at
                .checked_add_signed(lifetime)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            credentials,
        }
    }

    /// The bearer token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Token type reported by the server (normally `"Bearer"`).
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Scopes granted by the server.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Instant after which the token is treated as expired.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Credentials replayed on the next refresh.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// `true` while `expires_at` is strictly after `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("expires_at", &self.expires_at)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Manages OAuth2 token acquisition and caching.
///
/// Invariants:
/// - `session` is `None` until the first successful login and is replaced
///   wholesale on every later login.
/// - A login uses, in order: credentials passed to
///   [`ensure_authenticated`](Self::ensure_authenticated), the current
///   session's credentials, then the credentials given at construction.
pub struct TokenProvider {
    client: Client,
    token_url: String,
    credentials: Option<Credentials>,
    session: Option<Session>,
}

impl TokenProvider {
    /// Creates a provider for the API host at `base_url` (no trailing path,
    /// e.g. `https://eu.ninjarmm.com`). `credentials` may be `None` when
    /// they will be passed to the first `ensure_authenticated` call.
    pub fn new(base_url: &str, credentials: Option<Credentials>) -> Self {
        TokenProvider {
            client: build_token_client(),
            token_url: format!("{}{TOKEN_PATH}", base_url.trim_end_matches('/')),
            credentials,
            session: None,
        }
    }

    /// Creates a provider with a pre-set token, bypassing the token
    /// endpoint. The token is treated as freshly issued with a one-hour
    /// lifetime. Used by tests to avoid real HTTP calls during login.
    pub fn with_token(token: &str) -> Self {
        let response = TokenResponse {
            access_token: token.to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
            scope: None,
        };
        let mut provider = TokenProvider::new(DEFAULT_BASE_URL, None);
        provider.session = Some(Session::from_response(
            response,
            Credentials::new("", ""),
            Utc::now(),
        ));
        provider
    }

    /// Absolute URL of the token endpoint.
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// The cached session, valid or not.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Returns a valid session, logging in first if needed.
    ///
    /// A cached session whose expiry is still in the future is returned
    /// without any network call. Otherwise a client-credentials grant is
    /// performed and its result replaces the cached session.
    ///
    /// # Errors
    ///
    /// - `RmmError::AuthConfig`: no credentials from any source.
    /// - `RmmError::AuthHttp`: the token endpoint did not answer `200 OK`.
    /// - `RmmError::AuthResponse`: the token payload is unusable.
    /// - `RmmError::Transport`: the token endpoint could not be reached.
    pub async fn ensure_authenticated(
        &mut self,
        credentials: Option<&Credentials>,
    ) -> Result<&Session> {
        let now = Utc::now();
        if self.session.as_ref().is_some_and(|s| s.is_valid_at(now)) {
            debug!("reusing cached access token");
        } else {
            let credentials = credentials
                .or(self.session.as_ref().map(Session::credentials))
                .or(self.credentials.as_ref())
                .cloned()
                .ok_or_else(|| {
                    RmmError::AuthConfig("no client ID or secret provided".to_string())
                })?;
            let session = request_token(&self.client, &self.token_url, credentials, now).await?;
            self.session = Some(session);
        }

        self.session.as_ref().ok_or_else(|| RmmError::AuthResponse {
            message: "login did not produce a session".to_string(),
            source: None,
        })
    }
}

/// Performs one client-credentials exchange.
///
/// The body is read as text before the status check so the server's OAuth
/// error payload ends up in `AuthHttp`.
async fn request_token(
    client: &Client,
    token_url: &str,
    credentials: Credentials,
    issued_at: DateTime<Utc>,
) -> Result<Session> {
    debug!(client_id = %credentials.client_id, "requesting access token");
    let form = TokenRequest::client_credentials(&credentials);
    let response = client.post(token_url).form(&form).send().await?;

    let status = response.status();
    let body = response.text().await?;

    if status != StatusCode::OK {
        warn!(%status, "token request rejected");
        return Err(RmmError::AuthHttp { status, body });
    }

    let token: TokenResponse = serde_json::from_str(&body).map_err(|e| RmmError::AuthResponse {
        message: "token response is not valid JSON".to_string(),
        source: Some(Box::new(e)),
    })?;

    if token.access_token.is_empty() || token.expires_in == 0 {
        return Err(RmmError::AuthResponse {
            message: "no valid access token found in response".to_string(),
            source: None,
        });
    }

    info!(expires_in = token.expires_in, "acquired access token");
    Ok(Session::from_response(token, credentials, issued_at))
}

fn build_token_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(TOKEN_REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(expires_in: i64) -> TokenResponse {
        TokenResponse {
            access_token: "tok".to_string(),
            token_type: "Bearer".to_string(),
            expires_in,
            scope: Some("monitoring".to_string()),
        }
    }

    #[test]
    fn session_is_none_before_login() {
        let tp = TokenProvider::new(DEFAULT_BASE_URL, Some(Credentials::new("id", "secret")));
        assert!(tp.session().is_none(), "session must be None before any login");
    }

    #[test]
    fn token_url_is_derived_from_base() {
        let tp = TokenProvider::new("https://eu.ninjarmm.com/", None);
        assert_eq!(tp.token_url(), "https://eu.ninjarmm.com/ws/oauth/token");
    }

    #[test]
    fn token_request_serializes_as_form() {
        let creds = Credentials::new("cid", "secret~value").with_scope("monitoring management");
        let encoded =
            serde_urlencoded::to_string(TokenRequest::client_credentials(&creds)).unwrap();
        assert_eq!(
            encoded,
            "grant_type=client_credentials&client_id=cid&client_secret=secret%7Evalue\
             &scope=monitoring+management"
        );
    }

    #[test]
    fn token_request_omits_missing_scope() {
        let creds = Credentials::new("cid", "s");
        let encoded =
            serde_urlencoded::to_string(TokenRequest::client_credentials(&creds)).unwrap();
        assert!(!encoded.contains("scope"), "got {encoded}");
    }

    #[test]
    fn token_response_deserializes_and_ignores_unknown_fields() {
        let json = r#"{
            "access_token": "eyJ.test",
            "token_type": "Bearer",
            "expires_in": 3600,
            "scope": "monitoring management",
            "refresh_token": null
        }"#;
        let resp: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access_token, "eyJ.test");
        assert_eq!(resp.expires_in, 3600);
        assert_eq!(resp.scope.as_deref(), Some("monitoring management"));
    }

    #[test]
    fn token_response_tolerates_missing_fields() {
        let resp: TokenResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.access_token.is_empty());
        assert_eq!(resp.expires_in, 0);
    }

    #[test]
    fn session_expiry_subtracts_safety_margin() {
        let issued = Utc::now();
        let session = Session::from_response(response(3600), Credentials::new("a", "b"), issued);
        assert_eq!(session.expires_at(), issued + TimeDelta::seconds(3540));
        assert!(session.is_valid_at(issued));
        assert!(!session.is_valid_at(issued + TimeDelta::seconds(3540)));
    }

    #[test]
    fn short_lifetime_session_is_already_expired() {
        let issued = Utc::now();
        let session = Session::from_response(response(30), Credentials::new("a", "b"), issued);
        assert!(!session.is_valid_at(issued));
    }

    #[test]
    fn huge_lifetime_does_not_overflow() {
        let creds = Credentials::new("a", "b");
        let session = Session::from_response(response(i64::MAX), creds, Utc::now());
        assert!(session.is_valid_at(Utc::now()));
    }

    #[test]
    fn fresh_token_is_available() {
        let tp = TokenProvider::with_token("test-token");
        let session = tp.session().expect("with_token sets a session");
        assert_eq!(session.access_token(), "test-token");
        assert!(session.is_valid_at(Utc::now()));
    }

    #[test]
    fn backdated_session_is_invalid() {
        let mut tp = TokenProvider::with_token("test-token");
        if let Some(session) = tp.session.as_mut() {
            session.expires_at = Utc::now() - TimeDelta::seconds(1);
        }
        assert!(
            tp.session().is_some_and(|s| !s.is_valid_at(Utc::now())),
            "session must be invalid after expiry"
        );
    }

    #[tokio::test]
    async fn valid_session_short_circuits_without_credentials() {
        let mut tp = TokenProvider::with_token("cached");
        let session = tp.ensure_authenticated(None).await.unwrap();
        assert_eq!(session.access_token(), "cached");
    }

    #[tokio::test]
    async fn expired_session_without_reachable_endpoint_keeps_stale_session() {
        let mut tp = TokenProvider::new("http://127.0.0.1:9", None);
        tp.session = Some(Session::from_response(
            response(3600),
            Credentials::new("remembered", "s"),
            Utc::now() - TimeDelta::hours(2),
        ));
        let err = tp.ensure_authenticated(None).await.unwrap_err();
        assert!(matches!(err, RmmError::Transport(_)), "got {err:?}");
        let stale = tp.session().expect("failed refresh leaves the old session");
        assert_eq!(stale.credentials().client_id, "remembered");
    }

    #[tokio::test]
    async fn missing_credentials_is_a_config_error() {
        let mut tp = TokenProvider::new(DEFAULT_BASE_URL, None);
        let err = tp.ensure_authenticated(None).await.unwrap_err();
        assert!(matches!(err, RmmError::AuthConfig(_)), "got {err:?}");
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let creds = Credentials::new("id", "super-secret");
        let session = Session::from_response(response(3600), creds.clone(), Utc::now());
        let printed = format!("{creds:?} {session:?}");
        assert!(!printed.contains("super-secret"));
        assert!(!printed.contains("\"tok\""));
        assert!(printed.contains("<redacted>"));
    }
}
