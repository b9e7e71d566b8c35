//! CLI-owned configuration: TOML profiles, credential resolution, and
//! construction of the API client.
//!
//! The engine never sees these types -- it receives a ready `ApiClient`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use stratus_api::{ApiClient, TlsMode, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config structs ──────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name (used when --profile is not specified).
    pub default_profile: Option<String>,

    /// Named account profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// API endpoint base URL (e.g., "https://api.stratus.example").
    pub endpoint: String,

    /// API key (plaintext -- prefer api_key_env).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Accept self-signed TLS certificates for this profile.
    pub insecure: Option<bool>,
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "stratus-tools", "stratus")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("stratus");
            p.push("config.toml");
            p
        })
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the full Config from file + environment.
///
/// Nested env keys use a double underscore so snake_case field names
/// stay addressable (`STRATUS_DEFAULT_PROFILE` sets `default_profile`,
/// `STRATUS_PROFILES__PROD__ENDPOINT` reaches into a profile).
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("STRATUS_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

// ── Client construction ──────────────────────────────────────────────

/// Build an `ApiClient` from the config file, profile, and CLI overrides.
///
/// Returns the client together with the resolved endpoint so errors can
/// name it later.
pub fn build_client(global: &GlobalOpts) -> Result<(ApiClient, String), CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    // An explicitly requested profile must exist; the implicit default
    // may be absent when flags / env vars carry the whole config.
    if global.profile.is_some() && !cfg.profiles.contains_key(&profile_name) {
        let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
        available.sort();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: if available.is_empty() {
                "(none)".into()
            } else {
                available.join(", ")
            },
        });
    }

    let profile = cfg.profiles.get(&profile_name);

    // 1. Endpoint (flag > env > profile)
    let endpoint = global
        .endpoint
        .clone()
        .or_else(|| profile.map(|p| p.endpoint.clone()))
        .ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;

    // 2. API key
    let api_key = resolve_api_key(profile, &profile_name, global)?;

    // 3. TLS verification
    let tls = if global.insecure || profile.and_then(|p| p.insecure).unwrap_or(false) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ca_path) = profile.and_then(|p| p.ca_cert.clone()) {
        TlsMode::CustomCa(ca_path)
    } else {
        TlsMode::System
    };

    let transport = TransportConfig {
        tls,
        timeout: Duration::from_secs(global.timeout),
    };

    let client =
        ApiClient::from_api_key(&endpoint, &api_key, &transport).map_err(|e| match e {
            stratus_api::Error::InvalidUrl(source) => CliError::Validation {
                field: "endpoint".into(),
                reason: format!("invalid URL '{endpoint}': {source}"),
            },
            stratus_api::Error::Tls(reason) => CliError::Validation {
                field: "ca_cert".into(),
                reason,
            },
            other => CliError::Validation {
                field: "endpoint".into(),
                reason: other.to_string(),
            },
        })?;

    Ok((client, endpoint))
}

/// Resolve an API key from the credential chain:
/// CLI flag > profile's api_key_env > plaintext in config.
fn resolve_api_key(
    profile: Option<&Profile>,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    if let Some(ref key) = global.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    if let Some(env_name) = profile.and_then(|p| p.api_key_env.as_deref()) {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Some(key) = profile.and_then(|p| p.api_key.clone()) {
        return Ok(SecretString::from(key));
    }

    Err(CliError::NoCredentials {
        profile: profile_name.into(),
    })
}
