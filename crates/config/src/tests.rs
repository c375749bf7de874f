use crate::{AppConfig, EngineConfig};
use figment::{
    Figment,
    providers::{Format, Toml},
};
use secrecy::{ExposeSecret, Secret};

const MINIMAL: &str = r#"
app_name = "iam-rest"

[server]
port = 9090

[engine]
endpoint = "http://127.0.0.1:9000/engine"
"#;

#[test]
fn test_secret_redaction() {
    let secret = Secret::new("my_secret_api_key".to_string());
    let debug_output = format!("{:?}", secret);
    assert!(debug_output.contains("Secret([REDACTED"));
    assert!(!debug_output.contains("my_secret_api_key"));
}

#[test]
fn test_config_struct_redaction() {
    let config = EngineConfig {
        endpoint: "http://engine".to_string(),
        api_key: Some(Secret::new("s3cr3t-key".to_string())),
        timeout_secs: 5,
    };
    let debug_output = format!("{:?}", config);
    assert!(!debug_output.contains("s3cr3t-key"));
    assert!(debug_output.contains("Secret([REDACTED"));
}

#[test]
fn test_defaults_applied() {
    let config = AppConfig::from_figment(Figment::from(Toml::string(MINIMAL))).unwrap();

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9090);
    assert!(config.is_development());
    assert_eq!(config.telemetry.log_level, "info");
    assert!(config.authorization.role_annotation.is_none());
    assert!(config.authorization.annotation_kinds.is_empty());
    assert!(config.authorization.session_binding);
    assert_eq!(config.identity.user_header, "x-remote-user");
    assert_eq!(config.identity.principal_header, "x-remote-principal");
    assert_eq!(config.engine.timeout_secs, 30);
    assert!(config.engine.api_key.is_none());
}

#[test]
fn test_overrides_merged() {
    let overrides = r#"
app_env = "production"

[authorization]
role_annotation = "acme.Secured"
annotation_kinds = ["acme.Secured"]
session_binding = false

[engine]
api_key = "k-123"
"#;
    let figment = Figment::from(Toml::string(MINIMAL)).merge(Toml::string(overrides));
    let config = AppConfig::from_figment(figment).unwrap();

    assert!(config.is_production());
    assert_eq!(
        config.authorization.role_annotation.as_deref(),
        Some("acme.Secured")
    );
    assert_eq!(config.authorization.annotation_kinds, ["acme.Secured"]);
    assert!(!config.authorization.session_binding);
    assert_eq!(
        config.engine.api_key.as_ref().map(|k| k.expose_secret().as_str()),
        Some("k-123")
    );
    assert_eq!(config.engine.endpoint, "http://127.0.0.1:9000/engine");
}

#[test]
fn test_missing_engine_is_an_error() {
    let figment = Figment::from(Toml::string("app_name = \"x\"\n[server]\n"));
    assert!(AppConfig::from_figment(figment).is_err());
}
