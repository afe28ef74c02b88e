// Unit tests for the config module
// Tests focus on defaults, TOML parsing, setting updates and URL composition

use super::*;

#[test]
fn default_config_targets_local_gateway() {
    let config = AppConfig::default();

    assert_eq!(config.gateway.base_url, "http://localhost:8000");
    assert_eq!(config.gateway.upload_path, "/api/upload");
    assert_eq!(config.gateway.field_name, "file");
    assert_eq!(config.gateway.max_file_size, 5_242_880);
    assert!(config.gateway.localize_html_images);
    assert!(config.verbosity.is_none());
}

#[test]
fn empty_toml_uses_defaults() {
    let config = AppConfig::from_toml("").unwrap();

    assert_eq!(config, AppConfig::default());
}

#[test]
fn partial_gateway_section_keeps_other_defaults() {
    let config = AppConfig::from_toml(
        r#"
verbosity = "debug"

[gateway]
upload_path = "/api/upload/image"
field_name = "image"
"#,
    )
    .unwrap();

    assert_eq!(config.get_verbosity(), VerbosityLevel::Debug);
    assert_eq!(config.gateway.upload_path, "/api/upload/image");
    assert_eq!(config.gateway.field_name, "image");
    assert_eq!(config.gateway.base_url, "http://localhost:8000");
    assert_eq!(config.gateway.timeout_secs, 30);
}

#[test]
fn invalid_toml_is_reported() {
    let result = AppConfig::from_toml("gateway = [");

    assert!(matches!(result, Err(ConfigError::InvalidToml(_))));
}

#[test]
fn upload_url_joins_base_and_path() {
    let mut gateway = GatewayConfig::with_base_url("http://blog.test/");
    assert_eq!(gateway.upload_url(), "http://blog.test/api/upload");

    gateway.upload_path = "api/upload/image".to_string();
    assert_eq!(gateway.upload_url(), "http://blog.test/api/upload/image");
}

#[test]
fn absolute_url_prefixes_relative_paths_with_origin() {
    let gateway = GatewayConfig::with_base_url("http://localhost:8000");

    assert_eq!(
        gateway.absolute_url("/files/a.png"),
        "http://localhost:8000/files/a.png"
    );
    assert_eq!(
        gateway.absolute_url("files/a.png"),
        "http://localhost:8000/files/a.png"
    );
    assert_eq!(
        gateway.absolute_url("https://cdn.test/a.png"),
        "https://cdn.test/a.png"
    );
}

#[test]
fn public_origin_overrides_base_url() {
    let gateway = GatewayConfig {
        public_origin: Some("https://static.blog.test/".to_string()),
        ..GatewayConfig::default()
    };

    assert_eq!(gateway.public_origin(), "https://static.blog.test");
    assert_eq!(
        gateway.absolute_url("/files/a.png"),
        "https://static.blog.test/files/a.png"
    );
}

#[test]
fn update_setting_changes_gateway_fields() {
    let mut config = AppConfig::default();

    config
        .update_setting("base_url", "https://blog.test".to_string())
        .unwrap();
    config
        .update_setting("max_file_size", "1024".to_string())
        .unwrap();
    config
        .update_setting("localize_html_images", "false".to_string())
        .unwrap();

    assert_eq!(config.gateway.base_url, "https://blog.test");
    assert_eq!(config.gateway.max_file_size, 1024);
    assert!(!config.gateway.localize_html_images);
}

#[test]
fn update_setting_sets_verbosity() {
    let mut config = AppConfig::default();

    config
        .update_setting("verbosity", "verbose".to_string())
        .unwrap();

    assert_eq!(config.get_verbosity(), VerbosityLevel::Verbose);
}

#[test]
fn update_setting_rejects_bad_numbers() {
    let mut config = AppConfig::default();

    let result = config.update_setting("max_file_size", "huge".to_string());

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    assert_eq!(config.gateway.max_file_size, DEFAULT_MAX_FILE_SIZE);
}

#[test]
fn update_setting_rejects_unknown_key() {
    let mut config = AppConfig::default();

    let result = config.update_setting("api_key", "secret".to_string());

    match result {
        Err(ConfigError::UnknownConfigKey { key }) => assert_eq!(key, "api_key"),
        other => panic!("Expected UnknownConfigKey, got {:?}", other),
    }
}

#[test]
fn load_from_creates_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = AppConfig::load_from(&path).unwrap();

    assert_eq!(config, AppConfig::default());
    assert!(path.exists());
}

#[test]
fn save_and_load_preserves_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut config = AppConfig::default();
    config.set_verbosity(VerbosityLevel::Quiet);
    config.gateway.field_name = "image".to_string();

    config.save_to(&path).unwrap();
    let loaded = AppConfig::load_from(&path).unwrap();

    assert_eq!(loaded.get_verbosity(), VerbosityLevel::Quiet);
    assert_eq!(loaded.gateway.field_name, "image");
}
