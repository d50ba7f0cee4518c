//! Environment-sourced relay configuration.
//!
//! The relay has a frozen CLI surface (positionals only), so everything
//! tunable arrives through the environment. Bad values never abort startup:
//! a bridge that refuses to start over a stale variable takes the whole
//! client session down with it, so unparsable settings are reported and
//! replaced with defaults.

use std::time::Duration;

/// Environment variable holding the optional gateway bearer token.
pub const AUTH_TOKEN_VAR: &str = "MCP_GATEWAY_AUTH_TOKEN";

/// Environment variable overriding the per-request HTTP timeout, in seconds.
pub const TIMEOUT_VAR: &str = "MCP_RELAY_TIMEOUT_SECS";

/// Default per-request timeout. Generous on purpose: remote tool calls
/// routinely run for minutes.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Settings the relay reads once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Bearer token attached to every forwarded request, when present.
    /// Empty values are treated as absent.
    pub auth_token: Option<String>,

    /// Per-request timeout for forwarded HTTP calls.
    pub request_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            auth_token: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl RelayConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(AUTH_TOKEN_VAR).ok(),
            std::env::var(TIMEOUT_VAR).ok(),
        )
    }

    /// Build configuration from raw variable values.
    ///
    /// Split out from [`from_env`](Self::from_env) so tests don't have to
    /// mutate process-global environment state.
    pub fn from_vars(auth_token: Option<String>, timeout_secs: Option<String>) -> Self {
        let auth_token = auth_token.filter(|t| !t.trim().is_empty());

        let request_timeout = match timeout_secs {
            None => DEFAULT_REQUEST_TIMEOUT,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                Ok(_) => {
                    tracing::warn!(
                        var = TIMEOUT_VAR,
                        value = %raw,
                        "timeout must be positive, keeping default"
                    );
                    DEFAULT_REQUEST_TIMEOUT
                }
                Err(e) => {
                    tracing::warn!(
                        var = TIMEOUT_VAR,
                        value = %raw,
                        error = %e,
                        "unparsable timeout, keeping default"
                    );
                    DEFAULT_REQUEST_TIMEOUT
                }
            },
        };

        Self {
            auth_token,
            request_timeout,
        }
    }
}
