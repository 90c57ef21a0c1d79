//! TOML-based application configuration.
//!
//! Stores the layout and interaction tunables:
//! - Activity lane packing (gap, reserved lanes)
//! - Drag threshold, scale, orientation and cascade tolerance
//! - Route link matching tolerance
//! - Defect tolerance
//!
//! Configuration is stored at `~/.config/tripline/config.toml` unless
//! `TRIPLINE_CONFIG_DIR` points elsewhere.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::interaction::{InteractionConfig, InteractionEngine};
use crate::timeline::{
    DefectClassifier, LanePacker, LayoutEngine, RouteLinkResolver, DEFAULT_DEFECT_EPSILON,
    DEFAULT_LANE_GAP, DEFAULT_LINK_TOLERANCE, DEFAULT_MIN_LANES,
};

/// Activity lane configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_min_activity_lanes")]
    pub min_activity_lanes: usize,
    #[serde(default = "default_activity_gap")]
    pub activity_gap_days: f64,
}

/// Route link configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "default_link_tolerance")]
    pub link_tolerance_days: f64,
}

/// Defect classifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectConfig {
    #[serde(default = "default_defect_epsilon")]
    pub epsilon_days: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/tripline/config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub route: RouteConfig,
    #[serde(default)]
    pub defects: DefectConfig,
}

// Default functions
fn default_min_activity_lanes() -> usize {
    DEFAULT_MIN_LANES
}
fn default_activity_gap() -> f64 {
    DEFAULT_LANE_GAP
}
fn default_link_tolerance() -> f64 {
    DEFAULT_LINK_TOLERANCE
}
fn default_defect_epsilon() -> f64 {
    DEFAULT_DEFECT_EPSILON
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_activity_lanes: default_min_activity_lanes(),
            activity_gap_days: default_activity_gap(),
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            link_tolerance_days: default_link_tolerance(),
        }
    }
}

impl Default for DefectConfig {
    fn default() -> Self {
        Self {
            epsilon_days: default_defect_epsilon(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(invalid("config key is empty".into()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current
                    .get_mut(part)
                    .ok_or_else(|| invalid("unknown config key".into()))?;
                continue;
            }

            let obj = current
                .as_object_mut()
                .ok_or_else(|| invalid("unknown config key".into()))?;
            let existing = obj
                .get(part)
                .ok_or_else(|| invalid("unknown config key".into()))?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(invalid("unknown config key".into()))
    }

    /// Location of `config.toml` inside [`data_dir`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be created.
    pub fn file_path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Every settable dot-separated key, sorted.
    pub fn keys() -> Vec<String> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<String>) {
            match value.as_object() {
                Some(table) => {
                    for (name, child) in table {
                        let key = if prefix.is_empty() {
                            name.clone()
                        } else {
                            format!("{prefix}.{name}")
                        };
                        walk(&key, child, out);
                    }
                }
                None => out.push(prefix.to_string()),
            }
        }

        let mut keys = Vec::new();
        if let Ok(json) = serde_json::to_value(Self::default()) {
            walk("", &json, &mut keys);
        }
        keys
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::file_path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(&path)?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Render as the TOML stored on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::file_path()?)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = self.to_toml().map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    ///
    /// Only leaf keys (see [`Config::keys`]) resolve; section names do not.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        if val.is_object() {
            return None;
        }
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.update(key, value)?;
        self.save()
    }

    /// Layout engine built from these settings.
    pub fn layout_engine(&self) -> LayoutEngine {
        LayoutEngine::new(
            LanePacker::new()
                .with_min_lanes(self.layout.min_activity_lanes)
                .with_gap(self.layout.activity_gap_days),
            RouteLinkResolver::new().with_tolerance(self.route.link_tolerance_days),
            DefectClassifier::new().with_epsilon(self.defects.epsilon_days),
        )
    }

    /// Interaction engine built from these settings.
    pub fn interaction_engine(&self) -> InteractionEngine {
        InteractionEngine::new(self.interaction.clone())
    }
}
