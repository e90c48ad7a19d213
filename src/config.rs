//! Environment-driven configuration.
//!
//! Everything the portal needs is read from the environment once at
//! startup: the session signing secret, the backend base URL, and
//! optional PostgreSQL parameters that switch session storage from the
//! in-process store to the database-backed store.

use sha2::{Digest, Sha512};
use tower_sessions::cookie::Key;

/// Fallback signing secret for local development.
const DEFAULT_SECRET_KEY: &str = "frontend_secret_key";

/// Fallback backend base URL.
const DEFAULT_API_URL: &str = "http://backend:5000";

/// Runtime settings for the portal.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Secret used to derive the session cookie signing key.
    pub secret_key: String,
    /// Base URL of the backend API.
    pub api_url: String,
    /// PostgreSQL connection URI for session storage, if configured.
    pub database_url: Option<String>,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Self {
        let get = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        Self {
            secret_key: get("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string()),
            api_url: get("API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            database_url: resolve_database_url(&get),
        }
    }

    /// Derive the session cookie signing key from the secret.
    ///
    /// The cookie `Key` requires at least 64 bytes of material, so the
    /// secret is stretched with SHA-512 and any secret length works.
    pub fn signing_key(&self) -> Key {
        let digest = Sha512::digest(self.secret_key.as_bytes());
        Key::from(digest.as_slice())
    }
}

/// Resolve the session database URI.
///
/// `DATABASE_URL` wins when set. Otherwise a URI is assembled from the
/// discrete `POSTGRES_*` variables, but only when `POSTGRES_DB` names a
/// database; without one the portal stays on the in-process store.
fn resolve_database_url(get: &dyn Fn(&str) -> Option<String>) -> Option<String> {
    if let Some(url) = get("DATABASE_URL") {
        return Some(url);
    }

    let db = get("POSTGRES_DB")?;
    let user = get("POSTGRES_USER").unwrap_or_else(|| "postgres".to_string());
    let password = get("POSTGRES_PASSWORD").unwrap_or_default();
    let host = get("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string());
    let port = get("POSTGRES_PORT").unwrap_or_else(|| "5432".to_string());

    Some(format!(
        "postgresql://{}:{}@{}:{}/{}",
        user, password, host, port, db
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|v| v.to_string())
    }

    #[test]
    fn test_full_uri_wins() {
        let get = lookup(&[
            ("DATABASE_URL", "postgresql://u:p@db:5432/sessions"),
            ("POSTGRES_DB", "ignored"),
        ]);
        assert_eq!(
            resolve_database_url(&get).as_deref(),
            Some("postgresql://u:p@db:5432/sessions")
        );
    }

    #[test]
    fn test_uri_assembled_from_parts() {
        let get = lookup(&[
            ("POSTGRES_DB", "frontend"),
            ("POSTGRES_USER", "app"),
            ("POSTGRES_PASSWORD", "hunter2"),
            ("POSTGRES_HOST", "db"),
            ("POSTGRES_PORT", "5433"),
        ]);
        assert_eq!(
            resolve_database_url(&get).as_deref(),
            Some("postgresql://app:hunter2@db:5433/frontend")
        );
    }

    #[test]
    fn test_parts_default_when_missing() {
        let get = lookup(&[("POSTGRES_DB", "frontend")]);
        assert_eq!(
            resolve_database_url(&get).as_deref(),
            Some("postgresql://postgres:@localhost:5432/frontend")
        );
    }

    #[test]
    fn test_no_database_configured() {
        let get = lookup(&[("POSTGRES_USER", "app")]);
        assert_eq!(resolve_database_url(&get), None);
    }

    #[test]
    fn test_signing_key_accepts_short_secret() {
        let settings = Settings {
            secret_key: "s".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            database_url: None,
        };
        // Key::from panics on insufficient material; the digest makes
        // any secret long enough.
        let _ = settings.signing_key();
    }
}
