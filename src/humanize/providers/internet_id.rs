//! Internet identifier provider
//!
//! | Node                 | Display            |
//! |----------------------|--------------------|
//! | `__IP_192-0-2-1`     | `192.0.2.1`        |
//! | `__PFX_192-0-2-0_24` | `192.0.2.0/24`     |
//! | `AS701`, `__AS_701`  | `AS701 (Verizon)`  |
//!
//! Dots cannot appear inside a node, so addresses are encoded with `-`.

use regex::Regex;

use crate::config::InternetIdConfig;
use crate::error::{ConfigError, HumanizeResult};
use crate::humanize::provider::{HumanizeProvider, PartialPath, Resolution};
use crate::metadata::MetadataEntitiesService;

const IP_PREFIX: &str = "__IP_";
const PFX_PREFIX: &str = "__PFX_";

#[derive(Debug, Clone)]
pub struct InternetIdProvider {
    asn_pattern: Regex,
    asn_entity_type: String,
    metadata: Option<MetadataEntitiesService>,
}

impl InternetIdProvider {
    /// Build from configuration. Fails if the ASN pattern does not compile
    /// or has no capture group for the number.
    pub fn from_config(config: &InternetIdConfig) -> Result<Self, ConfigError> {
        let asn_pattern = Regex::new(&config.asn_pattern).map_err(|e| {
            ConfigError::Invalid(format!("asn_pattern '{}': {}", config.asn_pattern, e))
        })?;
        if asn_pattern.captures_len() < 2 {
            return Err(ConfigError::Invalid(format!(
                "asn_pattern '{}' must capture the AS number",
                config.asn_pattern
            )));
        }
        Ok(Self {
            asn_pattern,
            asn_entity_type: config.asn_entity_type.clone(),
            metadata: None,
        })
    }

    /// Look AS names up in the metadata store
    pub fn with_metadata(mut self, metadata: MetadataEntitiesService) -> Self {
        self.metadata = Some(metadata);
        self
    }

    fn humanize_ip(encoded: &str) -> String {
        encoded.replace('-', ".")
    }

    fn humanize_prefix(encoded: &str) -> Option<String> {
        match encoded.split('_').collect::<Vec<_>>().as_slice() {
            [ip, len] => Some(format!("{}/{}", Self::humanize_ip(ip), len)),
            _ => None,
        }
    }

    fn humanize_asn(&self, node: &str) -> HumanizeResult<Option<String>> {
        let Some(asn) = self
            .asn_pattern
            .captures(node)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
        else {
            return Ok(None);
        };

        let name = match &self.metadata {
            Some(metadata) => metadata
                .get_one(&self.asn_entity_type, &asn.to_string())?
                .and_then(|e| e.display_name().map(str::to_string)),
            None => None,
        };

        Ok(Some(match name {
            Some(name) => format!("AS{} ({})", asn, name),
            None => format!("AS{}", asn),
        }))
    }
}

impl HumanizeProvider for InternetIdProvider {
    fn name(&self) -> &'static str {
        "internet_id"
    }

    fn attempt(&self, partial: &PartialPath<'_>) -> HumanizeResult<Resolution> {
        let node = partial.terminal();

        if let Some(ip) = node.strip_prefix(IP_PREFIX) {
            return Ok(Resolution::Resolved(Self::humanize_ip(ip)));
        }
        if let Some(pfx) = node.strip_prefix(PFX_PREFIX) {
            return Ok(Self::humanize_prefix(pfx).into());
        }
        Ok(self.humanize_asn(node)?.into())
    }
}
