//! Registry configuration loaded from YAML.
//!
//! ```yaml
//! aliases:
//!   dotnet: net
//! families:
//!   - token: unity
//!     display_name: Unity
//!     identifier: Unity
//!     engine_versions: { "2": "2.0.50727", "4": "4.0.30319" }
//!     matches: [mono]
//! ```

use crate::families::DeclaredFamily;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Environment variable naming a registry YAML file.
pub const REGISTRY_ENV: &str = "RTID_REGISTRY";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Extra tokens for already-known families (alias -> token).
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Families added on top of the built-in ones.
    #[serde(default)]
    pub families: Vec<DeclaredFamily>,
}

impl RegistryConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = RegistryConfig::from_yaml("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_parse_families_and_aliases() {
        let yaml = r#"
aliases:
  dotnet: net
families:
  - token: unity
    display_name: Unity
    identifier: Unity
    engine_versions:
      "2": "2.0.50727"
    matches: [mono]
"#;
        let config = RegistryConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.aliases.get("dotnet").map(String::as_str), Some("net"));
        let unity = &config.families[0];
        assert_eq!(unity.token, "unity");
        assert_eq!(unity.identifier.as_deref(), Some("Unity"));
        assert_eq!(unity.engine_versions["2"].to_string(), "2.0.50727");
        assert_eq!(unity.matches, vec!["mono".to_string()]);
        assert!(!unity.wildcard);

        let again = RegistryConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(again, config);
    }

    #[test]
    fn test_bad_engine_version_is_rejected() {
        let yaml = r#"
families:
  - token: broken
    display_name: Broken
    engine_versions: { "2": "two" }
"#;
        assert!(RegistryConfig::from_yaml(yaml).is_err());
    }
}
