use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use famfin_core::{storage::HouseholdStorage, CoreError};
use famfin_domain::Household;
use tracing::debug;

const HOUSEHOLD_FILE: &str = "household.json";
const BACKUP_DIR: &str = "backups";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_PREFIX: &str = "household";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Describes a persisted backup of the household file.
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub path: PathBuf,
}

/// Filesystem-backed JSON persistence for a household and its backups.
#[derive(Debug, Clone)]
pub struct JsonHouseholdStorage {
    household_path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonHouseholdStorage {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        Self::with_retention(root, DEFAULT_RETENTION)
    }

    pub fn with_retention(root: PathBuf, retention: usize) -> Result<Self, CoreError> {
        let backups_dir = root.join(BACKUP_DIR);
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            household_path: root.join(HOUSEHOLD_FILE),
            backups_dir,
            retention: retention.max(1),
        })
    }

    pub fn household_path(&self) -> &Path {
        &self.household_path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    /// Backups, newest first.
    pub fn list_backups(&self) -> Result<Vec<BackupInfo>, CoreError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(BackupInfo {
                    id: file_name.to_string(),
                    created_at: parse_backup_timestamp(file_name),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by_key(|info| Reverse(info.created_at));
        Ok(entries)
    }

    fn backup_existing_file(&self) -> Result<(), CoreError> {
        if !self.household_path.exists() {
            return Ok(());
        }
        fs::create_dir_all(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let file_name = format!("{BACKUP_PREFIX}_{timestamp}.{BACKUP_EXTENSION}");
        let backup_path = self.backups_dir.join(&file_name);
        fs::copy(&self.household_path, &backup_path)?;
        debug!(backup = %backup_path.display(), "backed up household file");
        self.prune_backups()
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        for entry in self.list_backups()?.into_iter().skip(self.retention) {
            debug!(backup = %entry.path.display(), "pruning old backup");
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }
}

impl HouseholdStorage for JsonHouseholdStorage {
    fn load(&self) -> Result<Household, CoreError> {
        if !self.household_path.exists() {
            return Ok(Household::default());
        }
        load_household_from_path(&self.household_path)
    }

    fn save(&self, household: &Household) -> Result<(), CoreError> {
        self.backup_existing_file()?;
        save_household_to_path(household, &self.household_path)
    }
}

/// Saves a household to an arbitrary path on disk.
pub fn save_household_to_path(household: &Household, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(household)
        .map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a household from the provided filesystem path.
pub fn load_household_from_path(path: &Path) -> Result<Household, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    let mut segments = trimmed.rsplit('_');
    let time = segments.next()?;
    let date = segments.next()?;
    if !is_digits(date, 8) || !is_digits(time, 6) {
        return None;
    }
    NaiveDateTime::parse_from_str(&format!("{date}{time}"), "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
