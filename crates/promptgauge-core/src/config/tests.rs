use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::time::Duration;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_gauge_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("GAUGE_PORT");
        env::remove_var("GAUGE_BIND_ADDR");
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("OPENAI_BASE_URL");
        env::remove_var("OPENAI_MODEL");
        env::remove_var("SCORE_TTL_SECONDS");
        env::remove_var("EMPIRICAL_RUNS");
        env::remove_var("EMPIRICAL_MAX_TOKENS");
        env::remove_var("JUDGE_TIMEOUT_SECONDS");
        env::remove_var("COMPLETE_TIMEOUT_SECONDS");
        env::remove_var("SUGGEST_TIMEOUT_SECONDS");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert!(config.api_key.is_empty());
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.model, "gpt-4o-mini");
    assert_eq!(config.score_ttl, Duration::from_secs(60));
    assert_eq!(config.empirical_runs, 2);
    assert_eq!(config.empirical_max_tokens, 16_384);
    assert_eq!(config.judge_timeout, Duration::from_secs(20));
    assert_eq!(config.complete_timeout, Duration::from_secs(30));
    assert_eq!(config.suggest_timeout, Duration::from_secs(10));
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_gauge_env();

    let config = with_env_vars(&[("OPENAI_API_KEY", "sk-test")], || {
        Config::from_env().expect("config should load")
    });

    assert_eq!(config.api_key, "sk-test");
    assert_eq!(config.model, "gpt-4o-mini");
    assert_eq!(config.score_ttl, Duration::from_secs(60));
    assert_eq!(config.empirical_runs, 2);
}

#[test]
#[serial]
fn test_from_env_with_overrides() {
    clear_gauge_env();

    let config = with_env_vars(
        &[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("SCORE_TTL_SECONDS", "120"),
            ("EMPIRICAL_RUNS", "3"),
            ("EMPIRICAL_MAX_TOKENS", "300"),
            ("JUDGE_TIMEOUT_SECONDS", "5"),
            ("COMPLETE_TIMEOUT_SECONDS", "8"),
            ("SUGGEST_TIMEOUT_SECONDS", "4"),
            ("GAUGE_PORT", "9090"),
            ("GAUGE_BIND_ADDR", "0.0.0.0"),
        ],
        || Config::from_env().expect("config should load"),
    );

    assert_eq!(config.model, "gpt-4o");
    assert_eq!(config.score_ttl, Duration::from_secs(120));
    assert_eq!(config.empirical_runs, 3);
    assert_eq!(config.empirical_max_tokens, 300);
    assert_eq!(config.judge_timeout, Duration::from_secs(5));
    assert_eq!(config.complete_timeout, Duration::from_secs(8));
    assert_eq!(config.suggest_timeout, Duration::from_secs(4));
    assert_eq!(config.port, 9090);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0))
    );
}

#[test]
#[serial]
fn test_from_env_missing_api_key() {
    clear_gauge_env();

    let result = Config::from_env();
    assert!(matches!(result, Err(ConfigError::MissingApiKey)));
}

#[test]
#[serial]
fn test_from_env_blank_api_key_rejected() {
    clear_gauge_env();

    let result = with_env_vars(&[("OPENAI_API_KEY", "   ")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::MissingApiKey)));
}

#[test]
#[serial]
fn test_from_env_invalid_port() {
    clear_gauge_env();

    let result = with_env_vars(
        &[("OPENAI_API_KEY", "sk-test"), ("GAUGE_PORT", "not-a-port")],
        Config::from_env,
    );
    assert!(matches!(result, Err(ConfigError::PortParseError { .. })));

    let result = with_env_vars(
        &[("OPENAI_API_KEY", "sk-test"), ("GAUGE_PORT", "0")],
        Config::from_env,
    );
    assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
}

#[test]
#[serial]
fn test_from_env_invalid_bind_addr() {
    clear_gauge_env();

    let result = with_env_vars(
        &[
            ("OPENAI_API_KEY", "sk-test"),
            ("GAUGE_BIND_ADDR", "not-an-addr"),
        ],
        Config::from_env,
    );
    assert!(matches!(result, Err(ConfigError::InvalidBindAddr { .. })));
}

#[test]
fn test_validate_rejects_zero_runs() {
    let config = Config {
        api_key: "sk-test".to_string(),
        empirical_runs: 0,
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRuns)));
}

#[test]
fn test_validate_accepts_complete_config() {
    let config = Config {
        api_key: "sk-test".to_string(),
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}
