//! Metadata entity model

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one entity by type and code (`country:US`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub code: String,
}

impl EntityKey {
    pub fn new(entity_type: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            code: code.into(),
        }
    }

    /// Parse the `type:code` form. The code may itself contain `:`.
    pub fn parse(key: &str) -> Option<Self> {
        let (entity_type, code) = key.split_once(':')?;
        if entity_type.is_empty() || code.is_empty() {
            return None;
        }
        Some(Self::new(entity_type, code))
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.code)
    }
}

/// An entity known to the metadata store (country, region, ASN, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    /// Related entities, populated only by relationship lookups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<MetadataEntity>,
}

impl MetadataEntity {
    pub fn new(entity_type: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            code: code.into(),
            name: None,
            attrs: BTreeMap::new(),
            relationships: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn key(&self) -> EntityKey {
        EntityKey::new(&self.entity_type, &self.code)
    }

    /// The display name, if one is recorded and non-empty
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    pub fn relationships(&self) -> &[MetadataEntity] {
        &self.relationships
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_key_parse() {
        assert_eq!(
            EntityKey::parse("country:US"),
            Some(EntityKey::new("country", "US"))
        );
        assert_eq!(
            EntityKey::parse("prefix:10:0"),
            Some(EntityKey::new("prefix", "10:0"))
        );
        assert_eq!(EntityKey::parse("country"), None);
        assert_eq!(EntityKey::parse(":US"), None);
        assert_eq!(EntityKey::new("region", "CA").to_string(), "region:CA");
    }

    #[test]
    fn attrs_round_trip_through_fixture_yaml() {
        let e = MetadataEntity::new("country", "US")
            .with_name("United States")
            .with_attr("iso3", "USA");
        assert_eq!(e.attrs["iso3"], "USA");

        let parsed: MetadataEntity = serde_yaml::from_str(
            "{ type: country, code: US, name: United States, attrs: { iso3: USA } }",
        )
        .unwrap();
        assert_eq!(parsed, e);
    }

    #[test]
    fn empty_name_is_not_a_display_name() {
        let e = MetadataEntity::new("asn", "701").with_name("");
        assert_eq!(e.display_name(), None);
        let e = e.with_name("Verizon Business");
        assert_eq!(e.display_name(), Some("Verizon Business"));
    }
}
