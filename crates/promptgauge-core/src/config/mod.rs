//! Environment-backed configuration.
//!
//! Most settings have defaults. The upstream key (`OPENAI_API_KEY`) is the
//! only required variable.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

/// Default chat-completions endpoint (any OpenAI-compatible URL works).
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model id, used in all three call shapes and in cache keys.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Server and pipeline configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Bearer token for the upstream endpoint. Required.
    pub api_key: String,

    /// Chat-completions endpoint URL.
    pub base_url: String,

    /// Model id; part of every cache key. Default: `gpt-4o-mini`.
    pub model: String,

    /// TTL for cached score records. Default: 60 s.
    pub score_ttl: Duration,

    /// Completion samples per empirical evaluation. Default: `2`.
    pub empirical_runs: usize,

    /// `max_tokens` for empirical completion calls. Default: `16384`.
    pub empirical_max_tokens: u32,

    /// Per-attempt timeout for the judge call. Default: 20 s.
    pub judge_timeout: Duration,

    /// Per-attempt timeout for raw completion calls. Default: 30 s.
    pub complete_timeout: Duration,

    /// Per-attempt timeout for the suggestion call. Default: 10 s.
    pub suggest_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            score_ttl: Duration::from_secs(60),
            empirical_runs: 2,
            empirical_max_tokens: 16_384,
            judge_timeout: Duration::from_secs(20),
            complete_timeout: Duration::from_secs(30),
            suggest_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "GAUGE_PORT";
    const ENV_BIND_ADDR: &'static str = "GAUGE_BIND_ADDR";
    const ENV_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_BASE_URL: &'static str = "OPENAI_BASE_URL";
    const ENV_MODEL: &'static str = "OPENAI_MODEL";
    const ENV_SCORE_TTL: &'static str = "SCORE_TTL_SECONDS";
    const ENV_EMPIRICAL_RUNS: &'static str = "EMPIRICAL_RUNS";
    const ENV_EMPIRICAL_MAX_TOKENS: &'static str = "EMPIRICAL_MAX_TOKENS";
    const ENV_JUDGE_TIMEOUT: &'static str = "JUDGE_TIMEOUT_SECONDS";
    const ENV_COMPLETE_TIMEOUT: &'static str = "COMPLETE_TIMEOUT_SECONDS";
    const ENV_SUGGEST_TIMEOUT: &'static str = "SUGGEST_TIMEOUT_SECONDS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_key = env::var(Self::ENV_API_KEY)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            port: Self::parse_port_from_env(defaults.port)?,
            bind_addr: Self::parse_bind_addr_from_env(defaults.bind_addr)?,
            api_key,
            base_url: Self::parse_string_from_env(Self::ENV_BASE_URL, defaults.base_url),
            model: Self::parse_string_from_env(Self::ENV_MODEL, defaults.model),
            score_ttl: Self::parse_secs_from_env(Self::ENV_SCORE_TTL, defaults.score_ttl),
            empirical_runs: Self::parse_usize_from_env(
                Self::ENV_EMPIRICAL_RUNS,
                defaults.empirical_runs,
            ),
            empirical_max_tokens: Self::parse_u32_from_env(
                Self::ENV_EMPIRICAL_MAX_TOKENS,
                defaults.empirical_max_tokens,
            ),
            judge_timeout: Self::parse_secs_from_env(
                Self::ENV_JUDGE_TIMEOUT,
                defaults.judge_timeout,
            ),
            complete_timeout: Self::parse_secs_from_env(
                Self::ENV_COMPLETE_TIMEOUT,
                defaults.complete_timeout,
            ),
            suggest_timeout: Self::parse_secs_from_env(
                Self::ENV_SUGGEST_TIMEOUT,
                defaults.suggest_timeout,
            ),
        })
    }

    /// Validates basic invariants beyond what parsing enforces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.empirical_runs == 0 {
            return Err(ConfigError::InvalidRuns);
        }
        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_secs_from_env(var_name: &str, default: Duration) -> Duration {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_u32_from_env(var_name: &str, default: u32) -> u32 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
