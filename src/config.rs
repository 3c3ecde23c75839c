use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ai::assistant::AssistantSettings;
use crate::export::ExportSettings;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Load the demo customers and deals at startup.
    pub seed_fixtures: bool,
    pub export_tick_ms: u64,
    pub export_step_percent: u8,
    pub assistant_reply_delay_ms: u64,
    /// Preset value ("7d", "30d", ...) the global filter bar opens with.
    pub default_date_range: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_fixtures: true,
            export_tick_ms: 300,
            export_step_percent: 10,
            assistant_reply_delay_ms: 2000,
            default_date_range: "30d".to_string(),
        }
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}

impl AppConfig {
    /// Per-user config directory, e.g. `~/.config/crm-dashboard`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("crm-dashboard"))
    }

    pub fn load(config_dir: &Path) -> Self {
        let config_path = config_dir.join(CONFIG_FILE);
        let mut config = if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    log::warn!("Malformed {}: {}; using defaults", config_path.display(), e);
                    Self::default()
                }),
                Err(e) => {
                    log::warn!("Cannot read {}: {}", config_path.display(), e);
                    Self::default()
                }
            }
        } else {
            let c = Self::default();
            if let Err(e) = c.save(config_dir) {
                log::warn!("Could not write default config: {:#}", e);
            }
            c
        };

        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply `CRM_*` overrides read through `lookup`. Unparsable values are
    /// logged and skipped.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(seed) = parse_override(&lookup, "CRM_SEED_FIXTURES") {
            self.seed_fixtures = seed;
        }
        if let Some(ms) = parse_override(&lookup, "CRM_EXPORT_TICK_MS") {
            self.export_tick_ms = ms;
        }
        if let Some(ms) = parse_override(&lookup, "CRM_ASSISTANT_DELAY_MS") {
            self.assistant_reply_delay_ms = ms;
        }
    }

    pub fn save(&self, config_dir: &Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(config_dir)
            .with_context(|| format!("creating {}", config_dir.display()))?;
        let config_path = config_dir.join(CONFIG_FILE);
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("writing {}", config_path.display()))?;
        Ok(())
    }

    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            tick: Duration::from_millis(self.export_tick_ms.max(1)),
            step_percent: self.export_step_percent.clamp(1, 100),
        }
    }

    pub fn assistant_settings(&self) -> AssistantSettings {
        AssistantSettings {
            reply_delay: Duration::from_millis(self.assistant_reply_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path());
        assert_eq!(config.export_tick_ms, AppConfig::default().export_tick_ms);
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "seed_fixtures": false, "default_date_range": "90d" }"#,
        )
        .unwrap();

        let config = AppConfig::load(dir.path());
        assert!(!config.seed_fixtures);
        assert_eq!(config.default_date_range, "90d");
        assert_eq!(config.export_step_percent, 10);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        let config = AppConfig::load(dir.path());
        assert_eq!(config.assistant_reply_delay_ms, 2000);
    }

    #[test]
    fn settings_are_clamped() {
        let config = AppConfig {
            export_tick_ms: 0,
            export_step_percent: 0,
            ..Default::default()
        };
        let export = config.export_settings();
        assert_eq!(export.tick, Duration::from_millis(1));
        assert_eq!(export.step_percent, 1);
    }

    #[test]
    fn overrides_replace_file_values() {
        let vars: HashMap<&str, &str> = [
            ("CRM_SEED_FIXTURES", "false"),
            ("CRM_EXPORT_TICK_MS", " 50 "),
            ("CRM_ASSISTANT_DELAY_MS", "soon"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert!(!config.seed_fixtures);
        assert_eq!(config.export_tick_ms, 50);
        // unparsable value keeps the previous setting
        assert_eq!(config.assistant_reply_delay_ms, 2000);
        assert_eq!(config.export_settings().tick, Duration::from_millis(50));
    }
}
