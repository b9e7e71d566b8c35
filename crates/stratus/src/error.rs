//! CLI error types with miette diagnostics.
//!
//! Maps engine and API errors into user-facing errors with actionable
//! help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use stratus_core::ReportError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to the API endpoint {endpoint}")]
    #[diagnostic(
        code(stratus::connection_failed),
        help(
            "Check that the endpoint is reachable.\n\
             Endpoint: {endpoint}"
        )
    )]
    ConnectionFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(stratus::timeout),
        help("Increase the timeout with --timeout or check endpoint responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed")]
    #[diagnostic(
        code(stratus::auth_failed),
        help(
            "Verify your API key.\n\
             Set it with --api-key, STRATUS_API_KEY, or in your profile."
        )
    )]
    AuthFailed,

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(stratus::no_credentials),
        help(
            "Set the STRATUS_API_KEY environment variable,\n\
             or add api_key to the profile in your config file."
        )
    )]
    NoCredentials { profile: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No API endpoint configured")]
    #[diagnostic(
        code(stratus::no_config),
        help(
            "Pass --endpoint, set STRATUS_ENDPOINT, or create a config file.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(stratus::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(stratus::config))]
    Config(Box<figment::Error>),

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(stratus::validation))]
    Validation { field: String, reason: String },

    // ── Collection ───────────────────────────────────────────────────

    #[error("Collecting {population} bandwidth data failed")]
    #[diagnostic(code(stratus::collection))]
    Collection {
        population: String,
        #[source]
        source: stratus_api::Error,
    },
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Translate an engine error, attributing transport failures to the
    /// resolved endpoint and timeout settings.
    pub fn from_report(err: ReportError, endpoint: &str, timeout_secs: u64) -> Self {
        match err {
            ReportError::Usage { field, reason } => Self::Validation { field, reason },

            ReportError::Collection { population, source } => match source {
                source if source.is_auth() => Self::AuthFailed,

                stratus_api::Error::Transport(e) if e.is_timeout() => Self::Timeout {
                    seconds: timeout_secs,
                },

                stratus_api::Error::Transport(e) if e.is_connect() => Self::ConnectionFailed {
                    endpoint: endpoint.to_owned(),
                    source: e.into(),
                },

                source => Self::Collection {
                    population: population.to_string(),
                    source,
                },
            },
        }
    }
}
