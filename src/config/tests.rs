use super::settings::Settings;
use super::{load_config, load_config_from};
use crate::broker::UnsubscribeNotify;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(
        settings.registry.unsubscribe_notify,
        UnsubscribeNotify::Always
    );
    assert_eq!(settings.logging.level, "info");
}

#[test]
#[serial]
fn load_config_without_sources_uses_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let stem = tmp.path().join("missing");

    let cfg = load_config_from(stem.to_str().unwrap()).expect("load_config failed");
    assert_eq!(cfg, Settings::default());
}

#[test]
#[serial]
fn load_config_from_file_overrides_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let toml = r#"
        [server]
        host = "0.0.0.0"
        port = 9000

        [registry]
        unsubscribe_notify = "arena_only"
    "#;
    fs::write(tmp.path().join("default.toml"), toml).expect("write config file");
    let stem = tmp.path().join("default");

    let cfg = load_config_from(stem.to_str().unwrap()).expect("load_config failed");
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.port, 9000);
    assert_eq!(
        cfg.registry.unsubscribe_notify,
        UnsubscribeNotify::ArenaOnly
    );
    assert_eq!(cfg.logging.level, "info");
}

#[test]
#[serial]
fn load_config_env_overrides_file() {
    let tmp = TempDir::new().expect("create tempdir");
    fs::write(
        tmp.path().join("default.toml"),
        "[server]\nport = 9000\n",
    )
    .expect("write config file");
    let stem = tmp.path().join("default");

    temp_env::with_vars(
        [
            ("ARENASUB_SERVER__PORT", Some("9100")),
            ("ARENASUB_LOGGING__LEVEL", Some("debug")),
        ],
        || {
            let cfg = load_config_from(stem.to_str().unwrap()).expect("load_config failed");
            assert_eq!(cfg.server.port, 9100);
            assert_eq!(cfg.logging.level, "debug");
        },
    );
}

#[test]
#[serial]
fn load_config_rejects_unknown_policy() {
    temp_env::with_var(
        "ARENASUB_REGISTRY__UNSUBSCRIBE_NOTIFY",
        Some("sometimes"),
        || {
            assert!(load_config().is_err());
        },
    );
}
