use super::*;
use crate::ranking::SelectionStrategy;
use serial_test::serial;
use std::env;
use std::net::IpAddr;

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

fn clear_agrifind_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("AGRIFIND_PORT");
        env::remove_var("AGRIFIND_BIND_ADDR");
        env::remove_var("AGRIFIND_FIRESTORE_URL");
        env::remove_var("AGRIFIND_FIRESTORE_PROJECT");
        env::remove_var("AGRIFIND_FIRESTORE_TOKEN");
        env::remove_var("AGRIFIND_MODEL_PATH");
        env::remove_var("AGRIFIND_EMBEDDING_MODEL");
        env::remove_var("AGRIFIND_PAGE_SIZE");
        env::remove_var("AGRIFIND_TIE_BREAK_BY_PRICE");
        env::remove_var("AGRIFIND_STRATEGY");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_agrifind_env();
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.firestore_url, DEFAULT_FIRESTORE_URL);
    assert!(config.firestore_project.is_empty());
    assert!(config.firestore_token.is_none());
    assert!(config.model_path.is_none());
    assert_eq!(config.page_size, 50);
    assert!(config.tie_break_by_price);
    assert_eq!(config.strategy, SelectionStrategy::Streaming);
}

#[test]
#[serial]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_agrifind_env();
    let config = with_env_vars(
        &[
            ("AGRIFIND_PORT", "3000"),
            ("AGRIFIND_BIND_ADDR", "0.0.0.0"),
            ("AGRIFIND_FIRESTORE_PROJECT", "agrimarket-test"),
            ("AGRIFIND_PAGE_SIZE", "25"),
            ("AGRIFIND_TIE_BREAK_BY_PRICE", "false"),
            ("AGRIFIND_STRATEGY", "full-sort"),
        ],
        || Config::from_env().unwrap(),
    );

    assert_eq!(config.port, 3000);
    assert_eq!(config.bind_addr, "0.0.0.0".parse::<IpAddr>().unwrap());
    assert_eq!(config.firestore_project, "agrimarket-test");
    assert_eq!(config.page_size, 25);
    assert!(!config.tie_break_by_price);
    assert_eq!(config.strategy, SelectionStrategy::FullSort);
}

#[test]
#[serial]
fn test_invalid_port_rejected() {
    clear_agrifind_env();
    let result = with_env_vars(&[("AGRIFIND_PORT", "0")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));

    let result = with_env_vars(&[("AGRIFIND_PORT", "not-a-port")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::PortParseError { .. })));
}

#[test]
#[serial]
fn test_zero_page_size_rejected() {
    clear_agrifind_env();
    let result = with_env_vars(&[("AGRIFIND_PAGE_SIZE", "0")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidPageSize { .. })));
}

#[test]
#[serial]
fn test_unknown_strategy_rejected() {
    clear_agrifind_env();
    let result = with_env_vars(&[("AGRIFIND_STRATEGY", "quantum")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::UnknownStrategy { .. })));
}

#[test]
#[serial]
fn test_embedding_model_from_env() {
    clear_agrifind_env();
    let config = with_env_vars(
        &[("AGRIFIND_EMBEDDING_MODEL", "paraphrase-minilm-l3-v2")],
        || Config::from_env().unwrap(),
    );
    assert_eq!(
        config.embedding_model,
        crate::embedding::EmbeddingModel::ParaphraseMiniLmL3V2
    );

    let result = with_env_vars(&[("AGRIFIND_EMBEDDING_MODEL", "gpt-screwdriver")], Config::from_env);
    assert!(matches!(
        result,
        Err(ConfigError::UnknownEmbeddingModel { .. })
    ));
}

#[test]
#[serial]
fn test_validate_rejects_missing_model_dir() {
    let config = Config {
        model_path: Some(std::path::PathBuf::from("/nonexistent/model/dir")),
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}
