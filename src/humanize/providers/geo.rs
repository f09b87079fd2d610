//! Geographic provider
//!
//! Walks the partial path looking for a chain of geographic entities:
//!
//! ```text
//! geo . netacuity . NA        . US      . 4412
//!                   continent   country   region
//!                   (root)      ↳ related ↳ related
//! ```
//!
//! The first node that is an entity at any configured level enters the
//! hierarchy. Each later node must be an entity of the next level related to
//! the one before it; otherwise the node is not geographic and the provider
//! declines.

use crate::error::HumanizeResult;
use crate::humanize::provider::{HumanizeProvider, PartialPath, Resolution};
use crate::metadata::{MetadataEntitiesService, MetadataEntity};

/// Default geographic levels, root first
pub const DEFAULT_GEO_LEVELS: [&str; 4] = ["continent", "country", "region", "county"];

#[derive(Debug, Clone)]
pub struct GeoProvider {
    metadata: MetadataEntitiesService,
    levels: Vec<String>,
    marker: Option<String>,
}

impl GeoProvider {
    pub fn new(metadata: MetadataEntitiesService) -> Self {
        Self {
            metadata,
            levels: DEFAULT_GEO_LEVELS.iter().map(|l| l.to_string()).collect(),
            marker: None,
        }
    }

    pub fn with_levels(mut self, levels: Vec<String>) -> Self {
        self.levels = levels;
        self
    }

    /// Only consider paths containing `marker` as one of their nodes
    pub fn with_marker(mut self, marker: Option<String>) -> Self {
        self.marker = marker;
        self
    }

    /// First level at which `node` is a known entity. Codes match exactly,
    /// as they do for related children.
    fn find_root(&self, node: &str) -> HumanizeResult<Option<(usize, MetadataEntity)>> {
        for (level, entity_type) in self.levels.iter().enumerate() {
            let found = self.metadata.lookup(entity_type, Some(node), None, None)?;
            if let Some(entity) = found.into_iter().find(|e| e.code == node) {
                return Ok(Some((level, entity)));
            }
        }
        Ok(None)
    }

    /// `node` as an entity of the level below `parent`, related to it
    fn find_child(
        &self,
        level: usize,
        parent: &MetadataEntity,
        node: &str,
    ) -> HumanizeResult<Option<(usize, MetadataEntity)>> {
        let Some(child_type) = self.levels.get(level + 1) else {
            return Ok(None);
        };
        let found = self.metadata.lookup(
            child_type,
            Some(node),
            Some(parent.entity_type.as_str()),
            Some(parent.code.as_str()),
        )?;
        Ok(found.into_iter().next().map(|entity| (level + 1, entity)))
    }
}

impl HumanizeProvider for GeoProvider {
    fn name(&self) -> &'static str {
        "geo"
    }

    fn attempt(&self, partial: &PartialPath<'_>) -> HumanizeResult<Resolution> {
        if let Some(marker) = &self.marker {
            if !partial.nodes().iter().any(|n| n == marker) {
                return Ok(Resolution::Declined);
            }
        }

        let mut cursor: Option<(usize, MetadataEntity)> = None;
        for node in partial.nodes() {
            cursor = match cursor {
                None if node.is_empty() => None,
                None => self.find_root(node)?,
                Some((level, parent)) => match self.find_child(level, &parent, node)? {
                    Some(child) => Some(child),
                    // left the hierarchy
                    None => return Ok(Resolution::Declined),
                },
            };
        }

        Ok(cursor
            .and_then(|(_, entity)| entity.display_name().map(str::to_string))
            .into())
    }
}
