//! Humanizer configuration
//!
//! Loaded from YAML. Every field has a default, so an empty document is a
//! valid configuration:
//!
//! ```yaml
//! name_separator: " · "
//! direct:
//!   entries:
//!     my-probe: "My Probe"
//! geo:
//!   levels: [continent, country, region, county]
//!   marker: geo
//! fallback: title_case
//! integrity: strict
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::humanize::providers::{FallbackStyle, DEFAULT_GEO_LEVELS};
use crate::metadata::IntegrityPolicy;
use crate::path::{Separators, NAME_SEPARATOR, NAME_SEPARATOR_SKIP};
use crate::topo::TopoConfig;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "FQID_HUMANIZE_CONFIG";

/// AS number with optional `__` and `_` decorations (`AS701`, `__AS_701`)
pub const DEFAULT_ASN_PATTERN: &str = r"(?i)^(?:__)?AS_?(\d{1,10})$";

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanizeConfig {
    pub name_separator: String,
    pub name_separator_skip: String,
    pub direct: DirectConfig,
    pub geo: GeoConfig,
    pub internet_id: InternetIdConfig,
    pub fallback: FallbackStyle,
    pub integrity: IntegrityPolicy,
    pub topo: TopoConfig,
}

impl Default for HumanizeConfig {
    fn default() -> Self {
        Self {
            name_separator: NAME_SEPARATOR.to_string(),
            name_separator_skip: NAME_SEPARATOR_SKIP.to_string(),
            direct: DirectConfig::default(),
            geo: GeoConfig::default(),
            internet_id: InternetIdConfig::default(),
            fallback: FallbackStyle::default(),
            integrity: IntegrityPolicy::default(),
            topo: TopoConfig::default(),
        }
    }
}

/// Extra literal → display name entries, layered over the built-in table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectConfig {
    pub entries: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoConfig {
    /// Geographic entity types, root first
    pub levels: Vec<String>,
    /// Node that must be present for a path to be treated as geographic
    pub marker: Option<String>,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            levels: DEFAULT_GEO_LEVELS.iter().map(|l| l.to_string()).collect(),
            marker: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternetIdConfig {
    /// Metadata entity type holding AS names
    pub asn_entity_type: String,
    /// Regex recognizing AS nodes; group 1 captures the number
    pub asn_pattern: String,
}

impl Default for InternetIdConfig {
    fn default() -> Self {
        Self {
            asn_entity_type: "asn".to_string(),
            asn_pattern: DEFAULT_ASN_PATTERN.to_string(),
        }
    }
}

impl HumanizeConfig {
    /// Load from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let config = Self::load_from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded humanize config");
        Ok(config)
    }

    /// Load from a YAML string
    pub fn load_from_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file named by `FQID_HUMANIZE_CONFIG` (after reading `.env`),
    /// or the defaults when it is unset
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::load_from_file(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name_separator.is_empty() {
            return Err(ConfigError::Invalid("name_separator is empty".to_string()));
        }
        if self.geo.levels.is_empty() {
            return Err(ConfigError::Invalid("geo.levels is empty".to_string()));
        }
        if let Some(level) = self.geo.levels.iter().find(|l| l.is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "geo.levels contains an empty entity type: {:?}",
                level
            )));
        }
        if self.direct.entries.keys().any(|k| k.contains(crate::path::SEPARATOR)) {
            return Err(ConfigError::Invalid(
                "direct.entries keys must be single nodes".to_string(),
            ));
        }
        Ok(())
    }

    pub fn separators(&self) -> Separators {
        Separators::new(&self.name_separator, &self.name_separator_skip)
    }
}
