use std::{env, path::PathBuf};

use chrono::NaiveDate;
use famfin_config::{default_home, Config, ConfigManager};
use famfin_core::{household_warnings, Clock, FixedClock, HouseholdStorage, JalaliFormatter, Locale};
use famfin_domain::Household;
use famfin_storage_json::JsonHouseholdStorage;
use tracing::warn;

use crate::{cli::system_clock::SystemClock, errors::CliError};

/// Pins "today" to a fixed `YYYY-MM-DD` date, mainly for scripted runs.
pub const TODAY_ENV_VAR: &str = "FAMFIN_TODAY";

/// Everything a command needs: preferences, storage, and the clock.
pub struct CliContext {
    pub config: Config,
    pub config_manager: ConfigManager,
    storage: JsonHouseholdStorage,
    clock: Box<dyn Clock>,
}

impl CliContext {
    pub fn new(home: PathBuf, clock: Box<dyn Clock>) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(home)?;
        let config = config_manager.load()?;
        let storage = JsonHouseholdStorage::with_retention(
            config.resolve_data_root(),
            config.resolve_backup_retention(),
        )?;
        Ok(Self {
            config,
            config_manager,
            storage,
            clock,
        })
    }

    /// Context rooted at `$FAMFIN_HOME` (or `~/.famfin`), honoring `$FAMFIN_TODAY`.
    pub fn from_env() -> Result<Self, CliError> {
        let clock: Box<dyn Clock> = match env::var(TODAY_ENV_VAR) {
            Ok(raw) if !raw.trim().is_empty() => {
                let today = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                    CliError::usage(format!("{TODAY_ENV_VAR} must be YYYY-MM-DD, got `{raw}`"))
                })?;
                Box::new(FixedClock::new(today))
            }
            _ => Box::new(SystemClock),
        };
        Self::new(default_home(), clock)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn locale(&self) -> Locale {
        Locale::from_tag(&self.config.locale)
    }

    pub fn formatter(&self) -> JalaliFormatter {
        JalaliFormatter::new(self.locale())
    }

    pub fn load_household(&self) -> Result<Household, CliError> {
        let household = self.storage.load()?;
        for warning in household_warnings(&household) {
            warn!("{warning}");
        }
        Ok(household)
    }

    pub fn save_household(&self, household: &Household) -> Result<(), CliError> {
        self.storage.save(household)?;
        Ok(())
    }

    pub fn save_config(&self) -> Result<(), CliError> {
        self.config_manager.save(&self.config)?;
        Ok(())
    }
}
