use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

/// Environment variable that relocates the whole data directory.
pub const HOME_ENV_VAR: &str = "FAMFIN_HOME";

const DEFAULT_LOCALE: &str = "fa-IR";
const DEFAULT_BACKUP_RETENTION: usize = 5;

/// Stores user-configurable CLI preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for household data. Defaults to the home directory.
    pub data_root: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_retention: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_root: None,
            backup_retention: None,
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        DEFAULT_LOCALE.into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        self.data_root.clone().unwrap_or_else(default_home)
    }

    pub fn resolve_backup_retention(&self) -> usize {
        self.backup_retention.unwrap_or(DEFAULT_BACKUP_RETENTION)
    }
}

/// `$FAMFIN_HOME` when set, otherwise `~/.famfin`.
pub fn default_home() -> PathBuf {
    if let Some(home) = env::var_os(HOME_ENV_VAR).filter(|value| !value.is_empty()) {
        return PathBuf::from(home);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".famfin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.locale, "fa-IR");
        assert_eq!(cfg.resolve_backup_retention(), 5);
    }

    #[test]
    fn explicit_data_root_wins() {
        let cfg = Config {
            data_root: Some(PathBuf::from("/srv/famfin")),
            ..Config::default()
        };
        assert_eq!(cfg.resolve_data_root(), PathBuf::from("/srv/famfin"));
    }
}
