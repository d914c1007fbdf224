//! Configuration
//!
//! Tooltip settings are read key by key from a [`SettingsStore`] each time
//! the tooltip is shown. The binary fills that store from a TOML file.

mod loader;
mod settings_store;
mod types;

pub use loader::{ConfigError, default_config_path, load_config, parse_config};
pub use settings_store::{SettingValue, SettingsStore, keys};
pub use types::{
    Config, DEFAULT_FONT_SIZE, DEFAULT_MAX_WIDTH, DEFAULT_SHOW_DELAY_MS, MAX_SHOW_DELAY_MS,
    TooltipSettings,
};
