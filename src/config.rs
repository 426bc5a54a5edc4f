//! Process configuration, read once at startup from the environment.
//!
//! `main` loads a `.env` file first (via `dotenvy`), so any of these may live
//! there instead of the real environment:
//!
//! | Variable                  | Default                               |
//! |---------------------------|---------------------------------------|
//! | `EV_CHARGER_API_KEY`      | required                              |
//! | `EV_CHARGER_BASE_URL`     | `https://api.ev-charger-locator.com`  |
//! | `EV_CHARGER_TIMEOUT_SECS` | `30`                                  |
//! | `BIND_ADDR`               | `127.0.0.1:5000`                      |
//! | `STATIC_DIR`              | `static`                              |

use anyhow::{Context, Result, bail};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.ev-charger-locator.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_STATIC_DIR: &str = "static";

/// API key presented to the upstream service. Redacted in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub credential: Credential,
    pub timeout: Duration,
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = lookup("EV_CHARGER_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("EV_CHARGER_API_KEY must be set")?;

        let base_url = or_default(&lookup, "EV_CHARGER_BASE_URL", DEFAULT_BASE_URL);
        reqwest::Url::parse(&base_url)
            .with_context(|| format!("EV_CHARGER_BASE_URL is not a valid URL: '{base_url}'"))?;

        let timeout_secs: u64 = or_default(
            &lookup,
            "EV_CHARGER_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse()
        .context("EV_CHARGER_TIMEOUT_SECS must be a whole number of seconds")?;
        if timeout_secs == 0 {
            bail!("EV_CHARGER_TIMEOUT_SECS must be greater than zero");
        }

        let bind_addr = or_default(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr
            .parse()
            .with_context(|| format!("BIND_ADDR is not a socket address: '{bind_addr}'"))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credential: Credential::new(credential.trim()),
            timeout: Duration::from_secs(timeout_secs),
            bind_addr,
            static_dir: or_default(&lookup, "STATIC_DIR", DEFAULT_STATIC_DIR).into(),
        })
    }
}

fn or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| {
        debug!(key, default, "Variable not set, using default");
        default.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_only_key() {
        let config = load(&[("EV_CHARGER_API_KEY", "abc")]).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.credential.expose(), "abc");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:5000");
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("EV_CHARGER_API_KEY"));
    }

    #[test]
    fn test_blank_key_is_an_error() {
        assert!(load(&[("EV_CHARGER_API_KEY", "   ")]).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = load(&[
            ("EV_CHARGER_API_KEY", "abc"),
            ("EV_CHARGER_BASE_URL", "http://localhost:9000/v1/"),
        ])
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000/v1");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = load(&[
            ("EV_CHARGER_API_KEY", "abc"),
            ("EV_CHARGER_BASE_URL", "not a url"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = load(&[
            ("EV_CHARGER_API_KEY", "abc"),
            ("EV_CHARGER_TIMEOUT_SECS", "0"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_bind_addr() {
        let result = load(&[("EV_CHARGER_API_KEY", "abc"), ("BIND_ADDR", "localhost")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let config = load(&[("EV_CHARGER_API_KEY", "topsecret")]).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("topsecret"));
        assert!(debug.contains("Credential(***)"));
    }
}
