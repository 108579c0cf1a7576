//! # Tracker Configuration
//!
//! Configuration lives in a single YAML file `food_tracker.yaml` at the root
//! of the data directory. A default file is written on first start.
//!
//! ```yaml
//! data_format_version: "1.0"
//! storage_key: SavedItemsV3
//! log_level: info
//! reminder:
//!   lead_days: 3
//!   hour: 9
//!   minute: 0
//!   title: Expiry reminder
//!   body_template: "{name} expires in {days} days!"
//! view:
//!   default_expiry_days: 7
//!   soon_threshold_days: 3
//!   freshness_window_days: 14
//! ```
//!
//! Missing fields fall back to their defaults.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::storage::{validate_key, FileConnection};

/// When and how expiry reminders are phrased
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderSettings {
    /// Days before the expiry day the reminder fires
    pub lead_days: u32,
    /// Local hour of day (0-23)
    pub hour: u32,
    pub minute: u32,
    pub title: String,
    /// `{name}` and `{days}` are substituted
    pub body_template: String,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            lead_days: 3,
            hour: 9,
            minute: 0,
            title: "Expiry reminder".to_string(),
            body_template: "{name} expires in {days} days!".to_string(),
        }
    }
}

impl ReminderSettings {
    pub fn body_for(&self, item_name: &str) -> String {
        self.body_template
            .replace("{name}", item_name)
            .replace("{days}", &self.lead_days.to_string())
    }
}

/// Thresholds used when presenting the item list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Expiry preset for a new draft, counted from today
    pub default_expiry_days: u32,
    /// Items with at most this many days left are "expiring soon"
    pub soon_threshold_days: i64,
    /// Days that map to a full freshness bar
    pub freshness_window_days: u32,
}

impl ViewSettings {
    /// Ten years
    pub const MAX_DEFAULT_EXPIRY_DAYS: u32 = 3650;
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            default_expiry_days: 7,
            soon_threshold_days: 3,
            freshness_window_days: 14,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub data_format_version: String,
    /// Key the item list is persisted under
    pub storage_key: String,
    /// `env_logger` filter string, e.g. "info" or "food_tracker_backend=debug"
    pub log_level: String,
    pub reminder: ReminderSettings,
    pub view: ViewSettings,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_format_version: "1.0".to_string(),
            storage_key: "SavedItemsV3".to_string(),
            log_level: "info".to_string(),
            reminder: ReminderSettings::default(),
            view: ViewSettings::default(),
        }
    }
}

impl TrackerConfig {
    pub const FILE_NAME: &'static str = "food_tracker.yaml";

    fn config_path(connection: &FileConnection) -> PathBuf {
        connection.base_directory().join(Self::FILE_NAME)
    }

    /// Load the config from the data directory, writing defaults if it doesn't exist
    pub fn load_or_create(connection: &FileConnection) -> Result<Self> {
        let config_path = Self::config_path(connection);

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)?;
            let config: TrackerConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Invalid configuration in {:?}", config_path))?;
            config.validate()?;
            debug!("Loaded tracker config from {:?}", config_path);
            Ok(config)
        } else {
            let config = TrackerConfig::default();
            config.save(connection)?;
            info!("Created default tracker config at {:?}", config_path);
            Ok(config)
        }
    }

    pub fn save(&self, connection: &FileConnection) -> Result<()> {
        self.validate()?;
        let yaml_content = serde_yaml::to_string(self)?;
        connection.write_atomic(&Self::config_path(connection), yaml_content.as_bytes())?;
        debug!("Saved tracker config");
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate_key(&self.storage_key).context("Invalid storage_key")?;
        if self.reminder.hour > 23 {
            return Err(anyhow::anyhow!(
                "reminder.hour must be between 0 and 23, got {}",
                self.reminder.hour
            ));
        }
        if self.reminder.minute > 59 {
            return Err(anyhow::anyhow!(
                "reminder.minute must be between 0 and 59, got {}",
                self.reminder.minute
            ));
        }
        if self.view.default_expiry_days > ViewSettings::MAX_DEFAULT_EXPIRY_DAYS {
            return Err(anyhow::anyhow!(
                "view.default_expiry_days must be at most {}, got {}",
                ViewSettings::MAX_DEFAULT_EXPIRY_DAYS,
                self.view.default_expiry_days
            ));
        }
        if self.view.freshness_window_days == 0 {
            return Err(anyhow::anyhow!("view.freshness_window_days must be positive"));
        }
        Ok(())
    }
}
