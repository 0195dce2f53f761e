use physio_cli::config::{
    self, CURRENT_VERSION, DEFAULT_SUBMIT_TIMEOUT_SECS, PhysioConfig,
};

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = config::load_config(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, PhysioConfig::default());
    assert_eq!(config.history_limit, 50);
    assert_eq!(config.canvas.width, 200.0);
    assert_eq!(config.canvas.height, 400.0);
}

#[test]
fn unversioned_config_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "data_dir": "/var/lib/physio", "history_limit": 10 }"#,
    )
    .unwrap();

    let config = config::load_config(&path).unwrap();
    assert_eq!(config.config_version, CURRENT_VERSION);
    assert_eq!(config.data_dir, std::path::PathBuf::from("/var/lib/physio"));
    assert_eq!(config.history_limit, 10);
    assert_eq!(config.submit_timeout_secs, Some(DEFAULT_SUBMIT_TIMEOUT_SECS));
}

#[test]
fn migration_keeps_an_existing_timeout() {
    let json = serde_json::json!({ "submit_timeout_secs": 5 });
    let migrated = config::migrate(json, 0).unwrap();
    assert_eq!(migrated["submit_timeout_secs"], 5);
    assert_eq!(migrated["config_version"], 1);
}

#[test]
fn current_config_without_a_timeout_gets_the_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "config_version": 1, "history_limit": 20 }"#).unwrap();

    let config = config::load_config(&path).unwrap();
    assert_eq!(config.submit_timeout_secs, Some(DEFAULT_SUBMIT_TIMEOUT_SECS));
    assert_eq!(
        config.submit_timeout(),
        PhysioConfig::default().submit_timeout()
    );
}

#[test]
fn explicit_null_timeout_disables_it() {
    let json = serde_json::json!({ "config_version": 1, "submit_timeout_secs": null });
    let config: PhysioConfig = serde_json::from_value(json).unwrap();
    assert_eq!(config.submit_timeout(), None);
}

#[test]
fn newer_config_is_rejected() {
    let json = serde_json::json!({ "config_version": CURRENT_VERSION + 1 });
    assert!(config::migrate(json, CURRENT_VERSION + 1).is_err());
}

#[test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = PhysioConfig {
        config_version: 0,
        default_intensity: 4,
        submit_timeout_secs: None,
        ..Default::default()
    };
    config::save_config(&config, &path).unwrap();
    assert!(!path.with_extension("json.tmp").exists());

    let loaded = config::load_config(&path).unwrap();
    assert_eq!(loaded.config_version, CURRENT_VERSION);
    assert_eq!(loaded.default_intensity, 4);
    assert_eq!(loaded.submit_timeout(), None);
}
