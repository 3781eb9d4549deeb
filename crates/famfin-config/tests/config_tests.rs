use std::path::PathBuf;

use famfin_config::{Config, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_is_persian() {
    let cfg = Config::default();

    assert_eq!(cfg.locale, "fa-IR");
    assert!(cfg.ui_color_enabled);
    assert!(cfg.data_root.is_none());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().join("home")).expect("manager");

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded, Config::default());
    assert!(!manager.config_path().exists());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let cfg = Config {
        locale: "en".to_string(),
        ui_color_enabled: false,
        data_root: Some(PathBuf::from("/tmp/famfin-data")),
        backup_retention: Some(2),
    };

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert_eq!(loaded.resolve_backup_retention(), 2);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn corrupt_file_is_a_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").expect("write");

    let err = ConfigManager::new(path).load().unwrap_err();
    assert!(err.to_string().starts_with("Serialization error"));
}
