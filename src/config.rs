//! Client settings and credential sourcing.
//!
//! Values are resolved per field, first match wins:
//!
//! 1. explicit overrides (CLI flags);
//! 2. environment variables (`NINJARMM_CLIENT_ID`, `NINJARMM_CLIENT_SECRET`,
//!    `NINJARMM_SCOPE`, `NINJARMM_BASE_URL`), which the CLI may have
//!    populated from a `.env` file;
//! 3. a JSON credentials file, `env.json` by default:
//!    `{"client_id": "...", "client_secret": "..."}`.
//!
//! Scope and base URL fall back to [`DEFAULT_SCOPE`] and
//! [`DEFAULT_BASE_URL`]; client ID and secret have no default.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::auth::{Credentials, DEFAULT_BASE_URL, DEFAULT_SCOPE};
use crate::error::{Result, RmmError};

pub const CLIENT_ID_VAR: &str = "NINJARMM_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "NINJARMM_CLIENT_SECRET";
pub const SCOPE_VAR: &str = "NINJARMM_SCOPE";
pub const BASE_URL_VAR: &str = "NINJARMM_BASE_URL";

/// Credentials file read when no other path is given.
pub const DEFAULT_CREDENTIALS_FILE: &str = "env.json";

/// Contents of a JSON credentials file. Every key is optional.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CredentialsFile {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl CredentialsFile {
    /// Reads and parses a credentials file.
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RmmError::AuthConfig(format!("cannot read credentials file {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            RmmError::AuthConfig(format!("invalid credentials file {}: {e}", path.display()))
        })
    }
}

/// Values supplied explicitly, e.g. from command-line flags.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub scope: Option<String>,
    pub base_url: Option<String>,
    /// Credentials file to read instead of `env.json`. Unlike the default
    /// file, an explicit path that does not exist is an error.
    pub credentials_file: Option<PathBuf>,
}

/// Fully resolved client settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
    pub base_url: String,
}

impl Settings {
    /// Resolves settings from overrides, the process environment and the
    /// credentials file.
    pub fn load(overrides: Overrides) -> Result<Self> {
        let file = match &overrides.credentials_file {
            Some(path) => Some(CredentialsFile::read(path)?),
            None => {
                let default = Path::new(DEFAULT_CREDENTIALS_FILE);
                if default.exists() {
                    Some(CredentialsFile::read(default)?)
                } else {
                    None
                }
            }
        };
        Settings::resolve(overrides, |name| std::env::var(name).ok(), file)
    }

    /// Resolution logic behind [`load`](Self::load), with the environment
    /// lookup injected.
    pub fn resolve(
        overrides: Overrides,
        env: impl Fn(&str) -> Option<String>,
        file: Option<CredentialsFile>,
    ) -> Result<Self> {
        let file = file.unwrap_or_default();
        // Blank values count as unset at every layer.
        let non_blank = |v: &String| !v.trim().is_empty();
        let pick = |explicit: Option<String>, var: &str, from_file: Option<String>| {
            explicit
                .filter(non_blank)
                .or_else(|| env(var).filter(non_blank))
                .or(from_file.filter(non_blank))
        };

        let client_id = pick(overrides.client_id, CLIENT_ID_VAR, file.client_id).ok_or_else(|| {
            RmmError::AuthConfig(format!(
                "missing client ID: pass --client-id, set {CLIENT_ID_VAR} or add it to {DEFAULT_CREDENTIALS_FILE}"
            ))
        })?;
        let client_secret = pick(overrides.client_secret, CLIENT_SECRET_VAR, file.client_secret)
            .ok_or_else(|| {
                RmmError::AuthConfig(format!(
                    "missing client secret: pass --client-secret, set {CLIENT_SECRET_VAR} or add it to {DEFAULT_CREDENTIALS_FILE}"
                ))
            })?;
        let scope = pick(overrides.scope, SCOPE_VAR, file.scope)
            .unwrap_or_else(|| DEFAULT_SCOPE.to_string());
        let base_url = pick(overrides.base_url, BASE_URL_VAR, file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        debug!(%client_id, %base_url, "resolved client settings");
        Ok(Settings {
            client_id,
            client_secret,
            scope,
            base_url,
        })
    }

    /// Credentials for the token exchange.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.client_id, &self.client_secret).with_scope(&self.scope)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .field("base_url", &self.base_url)
            .finish()
    }
}
