use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;

use crate::views::{self, ViewOptions};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub store_path: String,
    pub overdue_after_days: i64,
    pub calendar_preview_per_day: usize,
    pub upcoming_limit: usize,
    pub notification_preview: usize,
}

impl AppConfig {
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            overdue_after_days: self.overdue_after_days,
            calendar_preview_per_day: self.calendar_preview_per_day,
            upcoming_limit: self.upcoming_limit,
            notification_preview: self.notification_preview,
        }
    }
}

/// `Config.toml` if present, then `FLEET_*` environment variables, over
/// built-in defaults.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .set_default("store_path", "fleet_store")?
        .set_default("overdue_after_days", views::DEFAULT_OVERDUE_AFTER_DAYS)?
        .set_default("calendar_preview_per_day", views::DEFAULT_CALENDAR_PREVIEW as u64)?
        .set_default("upcoming_limit", views::DEFAULT_UPCOMING_LIMIT as u64)?
        .set_default("notification_preview", views::DEFAULT_NOTIFICATION_PREVIEW as u64)?
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(Environment::with_prefix("FLEET"))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let config = load_configuration().unwrap();
        assert_eq!(config.overdue_after_days, 90);
        assert_eq!(config.view_options(), ViewOptions::default());
    }
}
