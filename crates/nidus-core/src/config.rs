//! TOML-based application configuration.
//!
//! Stores the engagement settings:
//! - Splash (one-time gate) key, minimum display time, skip policy
//! - Promotion prompt session key and delay
//! - Relay intake endpoint
//! - Cookie-consent acknowledgment key
//! - Collection key names
//!
//! Configuration is stored at `~/.config/nidus/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::gate::{OneTimeGateConfig, PromptGateConfig};
use crate::relay::RelayConfig;
use crate::store::data_dir;

/// Collection key names for lead capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_newsletter_key")]
    pub newsletter_key: String,
    #[serde(default = "default_promotions_key")]
    pub promotions_key: String,
}

/// Cookie-consent acknowledgment key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentConfig {
    #[serde(default = "default_consent_key")]
    pub key: String,
}

/// Collection key names for the mock job board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsConfig {
    #[serde(default = "default_jobs_key")]
    pub jobs_key: String,
    #[serde(default = "default_applications_key")]
    pub applications_key: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/nidus/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub splash: OneTimeGateConfig,
    #[serde(default)]
    pub promotion: PromptGateConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub consent: ConsentConfig,
    #[serde(default)]
    pub jobs: JobsConfig,
}

fn default_newsletter_key() -> String {
    "nidus_newsletter".to_string()
}
fn default_promotions_key() -> String {
    "nidus_promotions".to_string()
}
fn default_consent_key() -> String {
    "cookie_consent".to_string()
}
fn default_jobs_key() -> String {
    "nidus_jobs".to_string()
}
fn default_applications_key() -> String {
    "nidus_applications".to_string()
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            newsletter_key: default_newsletter_key(),
            promotions_key: default_promotions_key(),
        }
    }
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            key: default_consent_key(),
        }
    }
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            jobs_key: default_jobs_key(),
            applications_key: default_applications_key(),
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
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err("config key is empty".into());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| format!("unknown config key: {key}"))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| format!("unknown config key: {key}"))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse::<bool>()?),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| format!("cannot parse '{value}' as number"))?
                        } else {
                            return Err(format!("cannot parse '{value}' as number").into());
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value)?
                    }
                    serde_json::Value::Null => {
                        // Optional fields (e.g. relay.endpoint) accept a raw
                        // string once set.
                        serde_json::Value::String(value.into())
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| format!("unknown config key: {key}"))?;
        }

        Err(format!("unknown config key: {key}").into())
    }

    fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.splash.min_display_ms, 1800);
        assert_eq!(parsed.promotion.delay_ms, 3000);
        assert_eq!(parsed.capture.newsletter_key, "nidus_newsletter");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("splash.persist").as_deref(), Some("true"));
        assert_eq!(cfg.get("promotion.delay_ms").as_deref(), Some("3000"));
        assert_eq!(
            cfg.get("jobs.applications_key").as_deref(),
            Some("nidus_applications")
        );
        assert!(cfg.get("splash.missing_key").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_bool() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "splash.allow_skip", "false").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "splash.allow_skip").unwrap(),
            &serde_json::Value::Bool(false)
        );
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "promotion.delay_ms", "5000").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "promotion.delay_ms").unwrap(),
            &serde_json::Value::Number(5000.into())
        );
    }

    #[test]
    fn set_json_value_by_path_fills_optional_endpoint() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(
            &mut json,
            "relay.endpoint",
            "https://intake.example.com/forms",
        )
        .unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "relay.endpoint").unwrap(),
            &serde_json::Value::String("https://intake.example.com/forms".to_string())
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "splash.nonexistent_key", "value");
        assert!(result.is_err());
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "splash.persist", "not_a_bool");
        assert!(result.is_err());
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.splash.key, "nidus-splash-seen");
        assert_eq!(cfg.splash.min_display_ms, 1800);
        assert!(cfg.splash.persist);
        assert!(cfg.splash.allow_skip);
        assert_eq!(cfg.promotion.session_key, "nidus_promotion_seen");
        assert_eq!(cfg.promotion.delay_ms, 3000);
        assert!(cfg.relay.endpoint.is_none());
        assert_eq!(cfg.consent.key, "cookie_consent");
        assert_eq!(cfg.jobs.jobs_key, "nidus_jobs");
    }
}
