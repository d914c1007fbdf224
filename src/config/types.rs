// Configuration type definitions

use std::time::Duration;

use serde::Deserialize;

use super::settings_store::{SettingValue, SettingsStore, keys};

pub const DEFAULT_FONT_SIZE: &str = "14px";
pub const DEFAULT_MAX_WIDTH: u32 = 400;
pub const DEFAULT_SHOW_DELAY_MS: u64 = 300;
pub const MAX_SHOW_DELAY_MS: u64 = 2000;

/// Tooltip settings section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TooltipSettings {
    /// Show tooltips on hover at all
    pub enabled: bool,
    /// Light text on a dark background
    pub dark_mode: bool,
    /// Any CSS font size, e.g. `14px` or `1.2rem`
    pub font_size: String,
    /// Width in pixels before content wraps
    pub max_width: u32,
    /// Hover time before the tooltip appears, 0..=2000
    pub show_delay_ms: u64,
}

impl Default for TooltipSettings {
    fn default() -> Self {
        TooltipSettings {
            enabled: true,
            dark_mode: true,
            font_size: DEFAULT_FONT_SIZE.to_string(),
            max_width: DEFAULT_MAX_WIDTH,
            show_delay_ms: DEFAULT_SHOW_DELAY_MS,
        }
    }
}

impl TooltipSettings {
    /// Read every setting from `store`, falling back to defaults for
    /// missing or mistyped values
    pub fn read<S: SettingsStore + ?Sized>(store: &S) -> Self {
        let defaults = Self::default();

        let enabled = store
            .setting(keys::ENABLED)
            .and_then(|v| v.as_bool())
            .unwrap_or(defaults.enabled);

        let dark_mode = store
            .setting(keys::DARK_MODE)
            .and_then(|v| v.as_bool())
            .unwrap_or(defaults.dark_mode);

        let font_size = match store.setting(keys::FONT_SIZE) {
            Some(SettingValue::Text(s)) if !s.trim().is_empty() => s,
            Some(SettingValue::Number(n)) if n.is_finite() && n > 0.0 => format!("{}px", n),
            _ => defaults.font_size,
        };

        let max_width = store
            .setting(keys::MAX_WIDTH)
            .and_then(|v| v.as_f64())
            .filter(|w| *w > 0.0)
            .map(|w| w.round().min(u32::MAX as f64) as u32)
            .unwrap_or(defaults.max_width);

        let show_delay_ms = store
            .setting(keys::SHOW_DELAY_MS)
            .and_then(|v| v.as_f64())
            .map(|ms| ms.clamp(0.0, MAX_SHOW_DELAY_MS as f64).round() as u64)
            .unwrap_or(defaults.show_delay_ms);

        TooltipSettings {
            enabled,
            dark_mode,
            font_size,
            max_width,
            show_delay_ms,
        }
    }

    /// Show delay, clamped to the supported range
    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.show_delay_ms.min(MAX_SHOW_DELAY_MS))
    }
}

impl SettingsStore for TooltipSettings {
    fn setting(&self, key: &str) -> Option<SettingValue> {
        match key {
            keys::ENABLED => Some(SettingValue::Bool(self.enabled)),
            keys::DARK_MODE => Some(SettingValue::Bool(self.dark_mode)),
            keys::FONT_SIZE => Some(SettingValue::Text(self.font_size.clone())),
            keys::MAX_WIDTH => Some(SettingValue::Number(f64::from(self.max_width))),
            keys::SHOW_DELAY_MS => Some(SettingValue::Number(self.show_delay_ms as f64)),
            _ => None,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tooltip: TooltipSettings,
}
