//! Configuration module for hostinger-ddns
//!
//! Loads configuration from an optional TOML file, overrides with environment
//! variables, and validates the result. The loaded `Config` is immutable and
//! passed explicitly into each component.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};
use zeroize::ZeroizeOnDrop;

use crate::constants::{
    DEFAULT_DOMAIN, DEFAULT_LOG_FILE, DEFAULT_STATE_FILE, DEFAULT_SUBDOMAIN, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TTL_SECS, ENV_API_TOKEN, ENV_DOMAIN, ENV_LOG_FILE, ENV_STATE_FILE, ENV_SUBDOMAIN,
    ENV_TIMEOUT, ENV_TTL, ENV_VERBOSE, MAX_TIMEOUT_SECS, MAX_TTL_SECS, MIN_TIMEOUT_SECS,
    MIN_TTL_SECS,
};
use crate::validation::validate_record_name;

//==============================================================================
// Config
//==============================================================================

/// Configuration for a single updater run.
///
/// Loaded once at process entry from (in order of precedence) environment
/// variables, an optional TOML config file, and built-in defaults. The API
/// token is wrapped in `Zeroizing` so it is cleared from memory on drop.
///
/// The token is deliberately not required at load time: a run that detects no
/// IP change never talks to the provider and must succeed without one. The
/// credential check happens in the publisher, immediately before the only
/// call that needs it.
#[derive(Debug, Clone, ZeroizeOnDrop)]
pub struct Config {
    /// Hostinger API token (bearer credential for the DNS zone API)
    #[zeroize(skip)]
    pub api_token: zeroize::Zeroizing<String>,
    /// Zone apex the record lives in (e.g. "example.com")
    #[zeroize(skip)]
    pub domain: String,
    /// Record label within the zone (e.g. "vpn")
    #[zeroize(skip)]
    pub subdomain: String,
    /// TTL for the published A record, in seconds
    #[zeroize(skip)]
    pub ttl: u32,
    /// Per-request HTTP timeout
    #[zeroize(skip)]
    pub timeout: Duration,
    /// Log file path (appended, created if missing)
    #[zeroize(skip)]
    pub log_file: PathBuf,
    /// State file holding the last successfully published IP
    #[zeroize(skip)]
    pub state_file: PathBuf,
    /// Enable debug-level logging
    #[zeroize(skip)]
    pub verbose: bool,
}

impl Config {
    /// Loads configuration from an optional TOML file and the environment.
    ///
    /// File values fill in over defaults, environment variables override file
    /// values (empty values are ignored), and the result is validated.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::load_from_file(config_path)?;
        Self::override_with_env(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Full record name for log messages, e.g. "vpn.example.com".
    pub fn record_fqdn(&self) -> String {
        format!("{}.{}", self.subdomain, self.domain)
    }

    fn load_from_file(config_path: Option<PathBuf>) -> Result<Self> {
        let mut api_token = String::new();
        let mut domain = DEFAULT_DOMAIN.to_string();
        let mut subdomain = DEFAULT_SUBDOMAIN.to_string();
        let mut ttl = DEFAULT_TTL_SECS;
        let mut timeout = DEFAULT_TIMEOUT_SECS;
        let mut log_file = PathBuf::from(DEFAULT_LOG_FILE);
        let mut state_file = PathBuf::from(DEFAULT_STATE_FILE);
        let mut verbose = false;

        if let Some(path) = config_path {
            if path.exists() {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config: {}", path.display()))?;
                let toml_config: TomlConfig =
                    toml::from_str(&content).with_context(|| "Failed to parse config file")?;

                if let Some(v) = toml_config.api_token {
                    api_token = v;
                }
                if let Some(v) = toml_config.domain {
                    domain = v;
                }
                if let Some(v) = toml_config.subdomain {
                    subdomain = v;
                }
                if let Some(v) = toml_config.ttl {
                    ttl = v;
                }
                if let Some(v) = toml_config.timeout {
                    timeout = v;
                }
                if let Some(v) = toml_config.log_file {
                    log_file = PathBuf::from(v);
                }
                if let Some(v) = toml_config.state_file {
                    state_file = PathBuf::from(v);
                }
                if let Some(v) = toml_config.verbose {
                    verbose = v;
                }
            }
        }

        Ok(Self {
            api_token: zeroize::Zeroizing::new(api_token),
            domain,
            subdomain,
            ttl,
            timeout: Duration::from_secs(timeout),
            log_file,
            state_file,
            verbose,
        })
    }

    fn override_with_env(config: &mut Self) -> Result<()> {
        if let Ok(v) = env::var(ENV_API_TOKEN) {
            if !v.is_empty() {
                config.api_token = zeroize::Zeroizing::new(v);
            }
        }
        if let Ok(v) = env::var(ENV_DOMAIN) {
            if !v.is_empty() {
                config.domain = v;
            }
        }
        if let Ok(v) = env::var(ENV_SUBDOMAIN) {
            if !v.is_empty() {
                config.subdomain = v;
            }
        }
        if let Ok(v) = env::var(ENV_TTL) {
            if !v.is_empty() {
                config.ttl = v
                    .parse()
                    .with_context(|| format!("Invalid {} value", ENV_TTL))?;
            }
        }
        if let Ok(v) = env::var(ENV_TIMEOUT) {
            if !v.is_empty() {
                let secs: u64 = v
                    .parse()
                    .with_context(|| format!("Invalid {} value", ENV_TIMEOUT))?;
                config.timeout = Duration::from_secs(secs);
            }
        }
        if let Ok(v) = env::var(ENV_LOG_FILE) {
            if !v.is_empty() {
                config.log_file = PathBuf::from(v);
            }
        }
        if let Ok(v) = env::var(ENV_STATE_FILE) {
            if !v.is_empty() {
                config.state_file = PathBuf::from(v);
            }
        }
        if let Ok(v) = env::var(ENV_VERBOSE) {
            if !v.is_empty() {
                config.verbose =
                    parse_bool_env(&v).with_context(|| format!("Invalid {} value", ENV_VERBOSE))?;
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        validate_record_name(&self.domain)
            .with_context(|| format!("Invalid domain: '{}'", self.domain))?;
        validate_record_name(&self.subdomain)
            .with_context(|| format!("Invalid subdomain: '{}'", self.subdomain))?;

        if !(MIN_TTL_SECS..=MAX_TTL_SECS).contains(&self.ttl) {
            return Err(anyhow::anyhow!(
                "ttl must be between {} and {} seconds, got {}",
                MIN_TTL_SECS,
                MAX_TTL_SECS,
                self.ttl
            ));
        }

        let timeout_secs = self.timeout.as_secs();
        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&timeout_secs) {
            return Err(anyhow::anyhow!(
                "timeout must be between {} and {} seconds, got {}",
                MIN_TIMEOUT_SECS,
                MAX_TIMEOUT_SECS,
                timeout_secs
            ));
        }

        Ok(())
    }
}

/// Parses a boolean environment value ("1"/"true"/"yes"/"on" and negations).
fn parse_bool_env(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow::anyhow!(
            "expected boolean (true/false/1/0/yes/no/on/off)"
        )),
    }
}

/// TOML configuration file structure
#[derive(Debug, serde::Deserialize)]
struct TomlConfig {
    api_token: Option<String>,
    domain: Option<String>,
    subdomain: Option<String>,
    ttl: Option<u32>,
    timeout: Option<u64>,
    log_file: Option<String>,
    state_file: Option<String>,
    verbose: Option<bool>,
}

//==============================================================================
// Tests
//==============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_env_accepts_common_spellings() {
        for v in ["1", "true", "YES", "on"] {
            assert!(parse_bool_env(v).unwrap());
        }
        for v in ["0", "false", "No", "off"] {
            assert!(!parse_bool_env(v).unwrap());
        }
        assert!(parse_bool_env("maybe").is_err());
    }

    #[test]
    fn record_fqdn_joins_subdomain_and_domain() {
        let config = Config {
            api_token: zeroize::Zeroizing::new(String::new()),
            domain: "example.com".to_string(),
            subdomain: "vpn".to_string(),
            ttl: 60,
            timeout: Duration::from_secs(15),
            log_file: PathBuf::from("/tmp/log"),
            state_file: PathBuf::from("/tmp/state"),
            verbose: false,
        };
        assert_eq!(config.record_fqdn(), "vpn.example.com");
    }
}
