//! Gx policy configuration
//!
//! Read from the `gxpolicy` section of a YAML configuration file:
//!
//! ```yaml
//! gxpolicy:
//!   imsi_prefix: IMSI
//!   base_names:
//!     internet:
//!       - allow-all
//!       - zero-rated-dns
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::directory::StaticRuleDirectory;
use crate::error::ConfigError;

/// Subscriber id prefix used by the session manager
pub const DEFAULT_IMSI_PREFIX: &str = "IMSI";

fn default_imsi_prefix() -> String {
    DEFAULT_IMSI_PREFIX.to_string()
}

/// Gx policy configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GxPolicyConfig {
    /// Prefix stripped from subscriber ids before they go into a CCR
    #[serde(default = "default_imsi_prefix")]
    pub imsi_prefix: String,

    /// Charging-Rule-Base-Name to rule ids
    #[serde(default)]
    pub base_names: BTreeMap<String, Vec<String>>,
}

impl Default for GxPolicyConfig {
    fn default() -> Self {
        Self {
            imsi_prefix: default_imsi_prefix(),
            base_names: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigRoot {
    #[serde(default)]
    gxpolicy: Option<GxPolicyConfig>,
}

impl GxPolicyConfig {
    /// Parse from a YAML document; a missing `gxpolicy` section gives defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let root: Option<ConfigRoot> = serde_yaml::from_str(yaml)?;
        let config = root.and_then(|root| root.gxpolicy).unwrap_or_default();

        log::debug!(
            "Gx policy configuration: imsi_prefix={:?}, {} base names",
            config.imsi_prefix,
            config.base_names.len()
        );
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Loading Gx policy configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// In-memory rule directory holding the configured base names
    pub fn rule_directory(&self) -> StaticRuleDirectory {
        self.base_names
            .iter()
            .map(|(base_name, rule_ids)| (base_name.clone(), rule_ids.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::RuleDirectory;

    #[test]
    fn test_default_config() {
        let config = GxPolicyConfig::default();
        assert_eq!(config.imsi_prefix, "IMSI");
        assert!(config.base_names.is_empty());
        assert!(config.rule_directory().is_empty());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
logger:
  level: info
gxpolicy:
  imsi_prefix: SUB
  base_names:
    internet:
      - allow-all
      - zero-rated-dns
    video: [video-hd]
"#;
        let config = GxPolicyConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.imsi_prefix, "SUB");
        assert_eq!(config.base_names.len(), 2);

        let dir = config.rule_directory();
        let ids = dir
            .rule_ids_for_base_names(&["video".to_string(), "internet".to_string()])
            .unwrap();
        assert_eq!(ids, vec!["video-hd", "allow-all", "zero-rated-dns"]);
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let config = GxPolicyConfig::from_yaml_str("logger:\n  level: debug\n").unwrap();
        assert_eq!(config, GxPolicyConfig::default());

        let config = GxPolicyConfig::from_yaml_str("").unwrap();
        assert_eq!(config, GxPolicyConfig::default());
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config = GxPolicyConfig::from_yaml_str("gxpolicy:\n  base_names: {}\n").unwrap();
        assert_eq!(config.imsi_prefix, DEFAULT_IMSI_PREFIX);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            GxPolicyConfig::from_yaml_str("gxpolicy:\n  unknown_key: 1\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GxPolicyConfig::from_yaml_str("gxpolicy:\n  base_names: [1, 2]\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            GxPolicyConfig::from_file("/nonexistent/gxpolicy.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
