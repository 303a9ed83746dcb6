//! Completion API credential resolution.
//!
//! The key is looked up in the process environment first, then in the secret
//! store file. The full lookup is reported so the assistant page can show
//! why it is unavailable.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::AppConfig;

/// Name of the credential in both the environment and the secret store.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Where a resolved credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    Environment,
    SecretStore,
}

/// A resolved API key.
#[derive(Clone)]
pub struct Credential {
    pub key: String,
    pub source: CredentialSource,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("key", &"[REDACTED]")
            .field("source", &self.source)
            .finish()
    }
}

/// Outcome of reading the secret store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SecretStoreStatus {
    /// The store holds a non-empty key
    Available { path: PathBuf },
    /// No secrets file exists
    Missing { path: PathBuf },
    /// The file exists but has no usable key
    NoKey { path: PathBuf },
    /// The file could not be read or parsed
    Error { path: PathBuf, reason: String },
}

/// Everything learned while resolving the credential.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialReport {
    /// Whether the environment variable is set to a non-empty value
    pub env_set: bool,

    pub secret_store: SecretStoreStatus,

    #[serde(skip)]
    pub credential: Option<Credential>,
}

impl CredentialReport {
    pub fn is_available(&self) -> bool {
        self.credential.is_some()
    }

    pub fn source(&self) -> Option<CredentialSource> {
        self.credential.as_ref().map(|c| c.source)
    }
}

impl AppConfig {
    /// Resolve the API key from the process environment, then the secret store.
    pub fn resolve_credential(&self) -> CredentialReport {
        self.resolve_credential_with(|key| std::env::var(key).ok())
    }

    /// Resolve the API key using the given environment lookup.
    pub fn resolve_credential_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> CredentialReport {
        let env_key = env(API_KEY_VAR).filter(|k| !k.trim().is_empty());
        let (secret_store, stored_key) = read_secret_store(&self.secrets_path());

        let credential = match (env_key, stored_key) {
            (Some(key), _) => Some(Credential {
                key,
                source: CredentialSource::Environment,
            }),
            (None, Some(key)) => Some(Credential {
                key,
                source: CredentialSource::SecretStore,
            }),
            (None, None) => None,
        };

        match &credential {
            Some(c) => tracing::debug!(source = ?c.source, "Resolved completion API key"),
            None => tracing::warn!(
                var = API_KEY_VAR,
                "No completion API key found; the assistant will be unavailable"
            ),
        }

        CredentialReport {
            env_set: credential
                .as_ref()
                .is_some_and(|c| c.source == CredentialSource::Environment),
            secret_store,
            credential,
        }
    }
}

fn read_secret_store(path: &Path) -> (SecretStoreStatus, Option<String>) {
    if !path.exists() {
        return (
            SecretStoreStatus::Missing {
                path: path.to_path_buf(),
            },
            None,
        );
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            return (
                SecretStoreStatus::Error {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                },
                None,
            );
        }
    };

    let table: toml::Table = match toml::from_str(&content) {
        Ok(table) => table,
        Err(e) => {
            return (
                SecretStoreStatus::Error {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                },
                None,
            );
        }
    };

    match table
        .get(API_KEY_VAR)
        .and_then(|v| v.as_str())
        .filter(|k| !k.trim().is_empty())
    {
        Some(key) => (
            SecretStoreStatus::Available {
                path: path.to_path_buf(),
            },
            Some(key.to_string()),
        ),
        None => (
            SecretStoreStatus::NoKey {
                path: path.to_path_buf(),
            },
            None,
        ),
    }
}
