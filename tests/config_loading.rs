use std::time::Duration;

use nexis_doctor::config::{enforce_yaml_policy, AppConfig};

#[test]
fn defaults_point_at_the_local_stack() {
    let config = AppConfig::default();
    assert_eq!(config.backend_url, "http://localhost:8000");
    assert_eq!(config.frontend_url, "http://localhost:3003");
    assert_eq!(config.database.host, "localhost");
    assert_eq!(config.database.port, 5432);
    assert_eq!(config.database.database, "darknexis");
    assert_eq!(config.auth.username, "demo@example.com");
    assert!(config.database.password.is_none());
    assert!(config.auth.password.is_none());
    assert_eq!(config.timeouts.request, Duration::from_secs(5));
    assert_eq!(config.timeouts.connect, Duration::from_secs(3));
}

#[test]
fn partial_yaml_fills_in_defaults() {
    let raw = r#"
backend_url: http://backend.internal:9000
database:
  host: db.internal
timeouts:
  request: 10s
"#;
    let config: AppConfig = serde_yaml::from_str(raw).expect("partial config parses");
    assert_eq!(config.backend_url, "http://backend.internal:9000");
    assert_eq!(config.frontend_url, "http://localhost:3003");
    assert_eq!(config.database.host, "db.internal");
    assert_eq!(config.database.port, 5432);
    assert_eq!(config.timeouts.request, Duration::from_secs(10));
    assert_eq!(config.timeouts.connect, Duration::from_secs(3));
}

#[test]
fn yaml_policy_rejects_inline_database_password() {
    let raw = r#"
database:
  password: admin11
"#;
    let config: AppConfig = serde_yaml::from_str(raw).expect("config parses");
    let err = enforce_yaml_policy(&config).expect_err("inline password must be rejected");
    assert!(err.to_string().contains("NEXIS_DB_PASSWORD"));
}

#[test]
fn yaml_policy_rejects_inline_login_password() {
    let raw = r#"
auth:
  username: demo@example.com
  password: password
"#;
    let config: AppConfig = serde_yaml::from_str(raw).expect("config parses");
    let err = enforce_yaml_policy(&config).expect_err("inline password must be rejected");
    assert!(err.to_string().contains("NEXIS_AUTH_PASSWORD"));
}

#[test]
fn missing_secrets_surface_as_errors_on_use() {
    let config = AppConfig::default();
    assert!(config.database.password().is_err());
    assert!(config.auth.password().is_err());

    let mut config = AppConfig::default();
    config.database.password = Some("secret".into());
    assert_eq!(config.database.password().unwrap(), "secret");
}
