use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::ConfigError;
use crate::update::policy::{UpdateMode, UpdatePolicy};
use crate::zone::Zone;

/// Server configuration: the authoritative zones (in match order) and the
/// dynamic-update policy.
///
/// ```toml
/// allow_updates = "allow"
///
/// [[zones]]
/// name = "example.com"
///
/// [[zones]]
/// name = "example.org"
/// class = "IN"
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ServerConfig {
    /// Update policy mode: "deny", "allow" or "authenticated"
    #[serde(default)]
    pub allow_updates: UpdateMode,

    /// Authoritative zones. Order matters: names are matched against zones
    /// in this order, first suffix match wins.
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ZoneConfig {
    pub name: String,
    #[serde(default = "default_class")]
    pub class: String,
}

fn default_class() -> String {
    "IN".to_string()
}

impl ServerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(text)?;
        config.validate()?;
        info!(zones = config.zones.len(), "loaded server configuration");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for zone in &self.zones {
            if zone.name.trim_end_matches('.').is_empty() {
                return Err(ConfigError::InvalidZone {
                    zone: zone.name.clone(),
                    reason: "empty zone name".to_string(),
                });
            }
            if !zone.class.eq_ignore_ascii_case("IN") {
                return Err(ConfigError::InvalidZone {
                    zone: zone.name.clone(),
                    reason: format!("unsupported class {}", zone.class),
                });
            }
        }
        Ok(())
    }

    /// The configured zones, in configuration order.
    pub fn zones(&self) -> Vec<Zone> {
        self.zones.iter().map(|z| Zone::new(&z.name)).collect()
    }

    pub fn update_policy(&self) -> UpdatePolicy {
        UpdatePolicy::new(self.allow_updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = ServerConfig::from_toml(
            r#"
            allow_updates = "authenticated"

            [[zones]]
            name = "example.com"

            [[zones]]
            name = "sub.example.com"
            class = "in"
            "#,
        )
        .unwrap();

        assert_eq!(config.allow_updates, UpdateMode::Authenticated);
        let zones = config.zones();
        assert_eq!(zones.len(), 2);
        // Configuration order is preserved; it decides zone matching.
        assert_eq!(zones[0].name, "example.com");
        assert_eq!(zones[1].name, "sub.example.com");
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_toml("").unwrap();
        assert_eq!(config.allow_updates, UpdateMode::Deny);
        assert!(config.zones().is_empty());
    }

    #[test]
    fn test_bad_policy_mode_rejected() {
        assert!(ServerConfig::from_toml(r#"allow_updates = "sometimes""#).is_err());
    }

    #[test]
    fn test_non_in_class_rejected() {
        let result = ServerConfig::from_toml(
            r#"
            [[zones]]
            name = "example.com"
            class = "CH"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidZone { .. })));
    }

    #[test]
    fn test_empty_zone_name_rejected() {
        let result = ServerConfig::from_toml(
            r#"
            [[zones]]
            name = "."
            "#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidZone { .. })));
    }

    #[test]
    fn test_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "allow_updates = \"allow\"").unwrap();
        writeln!(file, "[[zones]]").unwrap();
        writeln!(file, "name = \"example.com\"").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.allow_updates, UpdateMode::Allow);
        assert_eq!(config.zones().len(), 1);
    }
}
