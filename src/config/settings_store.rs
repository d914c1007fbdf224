use std::collections::HashMap;

/// Setting keys understood by the tooltip
pub mod keys {
    pub const ENABLED: &str = "enabled";
    pub const DARK_MODE: &str = "dark_mode";
    pub const FONT_SIZE: &str = "font_size";
    pub const MAX_WIDTH: &str = "max_width";
    pub const SHOW_DELAY_MS: &str = "show_delay_ms";
}

/// Raw value as held by the host's settings store
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numbers only; non-finite values are treated as absent
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SettingValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Number(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

/// Key-value settings lookup provided by the host
pub trait SettingsStore {
    fn setting(&self, key: &str) -> Option<SettingValue>;
}

impl SettingsStore for HashMap<String, SettingValue> {
    fn setting(&self, key: &str) -> Option<SettingValue> {
        self.get(key).cloned()
    }
}

impl SettingsStore for toml::Table {
    fn setting(&self, key: &str) -> Option<SettingValue> {
        match self.get(key)? {
            toml::Value::Boolean(b) => Some(SettingValue::Bool(*b)),
            toml::Value::Integer(i) => Some(SettingValue::Number(*i as f64)),
            toml::Value::Float(f) => Some(SettingValue::Number(*f)),
            toml::Value::String(s) => Some(SettingValue::Text(s.clone())),
            _ => None,
        }
    }
}
