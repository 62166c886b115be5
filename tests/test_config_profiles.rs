use bioinsight::config::{ConfigError, load_config, load_config_from_path};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_no_path_returns_defaults() {
    let config = load_config(None).unwrap();
    assert_eq!(config.profile_name, "base");
    assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
    assert_eq!(config.api.timeout_secs, 30);
}

#[test]
fn test_profile_file_overrides_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
profile_name = "deployed"

[api]
base_url = "https://bioinsight-lite.onrender.com"
predict_limit = 5
"#
    )
    .unwrap();

    let config = load_config(Some(file.path())).unwrap();
    assert_eq!(config.profile_name, "deployed");
    assert_eq!(config.api.base_url, "https://bioinsight-lite.onrender.com");
    assert_eq!(config.api.predict_limit, 5);
    // untouched fields keep their defaults
    assert_eq!(config.api.result_limit, 500);
}

#[test]
fn test_missing_file_is_a_read_error() {
    let result = load_config_from_path(std::path::Path::new("/nonexistent/bioinsight.toml"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "profile_name = [unclosed").unwrap();

    let result = load_config_from_path(file.path());
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}
