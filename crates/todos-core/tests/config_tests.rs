use std::io::Write;

use todos_core::config::{
    DEFAULT_CONNECTION, DEFAULT_LOG_LEVEL, DEFAULT_NAMESPACE, DEFAULT_PORT, DEFAULT_QUERY_TIMEOUT_MS,
    DEFAULT_STORE_PATH,
};
use todos_core::Config;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.server.port, DEFAULT_PORT);
    assert!(config.server.csrf);
    assert_eq!(config.store.connection, DEFAULT_CONNECTION);
    assert_eq!(config.store.store_path, DEFAULT_STORE_PATH);
    assert_eq!(config.store.namespace, DEFAULT_NAMESPACE);
    assert_eq!(config.query.timeout_ms, DEFAULT_QUERY_TIMEOUT_MS);
    assert!(config.query.include_query_plan);
    assert!(!config.query.result_as_document);
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
}

#[test]
fn test_default_descriptor_parses() {
    let descriptor = Config::default().store.descriptor().unwrap();
    assert_eq!(descriptor.credentials(), Some(("root", "root")));
    assert_eq!(descriptor.engine_url().as_deref(), Some("ws://127.0.0.1:8000"));
}

#[test]
fn test_config_to_toml() {
    let toml_str = Config::default_config_string();
    assert!(toml_str.contains("[server]"));
    assert!(toml_str.contains("[store]"));
    assert!(toml_str.contains("[query]"));
    assert!(toml_str.contains("[logging]"));
}

#[test]
fn test_config_from_toml() {
    let toml_str = r#"
[server]
port = 8080
csrf = false

[store]
connection = "memory"
store_path = "/work/tasks"

[query]
timeout_ms = 250
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.port, 8080);
    assert!(!config.server.csrf);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.store.connection, "memory");
    assert_eq!(config.store.store_path, "/work/tasks");
    assert_eq!(config.query.timeout_ms, 250);
    assert!(config.query.include_query_plan);
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[store]\nnamespace = \"custom\"").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.store.namespace, "custom");
}

#[test]
fn test_config_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server]\nport = \"not a number\"").unwrap();

    assert!(matches!(
        Config::from_file(file.path()),
        Err(todos_core::ConfigError::ParseError(_))
    ));
}
