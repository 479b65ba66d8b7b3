use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY must be set")]
    MissingApiKey,

    #[error("invalid port '{value}': {source}")]
    PortParseError {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("port must be non-zero, got '{value}'")]
    InvalidPort { value: String },

    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("EMPIRICAL_RUNS must be at least 1")]
    InvalidRuns,
}
