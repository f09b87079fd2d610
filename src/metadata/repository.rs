//! Metadata repository - read-only entity and relationship queries
//!
//! The repository is the storage boundary. Production deployments back it
//! with the metadata database; [`InMemoryMetadataRepository`] serves tests,
//! the CLI and small static deployments from a YAML fixture.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

use super::entity::{EntityKey, MetadataEntity};
use crate::error::{ConfigError, MetadataError};

// =============================================================================
// Trait Definition
// =============================================================================

/// Relationship query. Unset fields do not constrain the match.
///
/// `related_type`/`related_code` select the entities that own the
/// relationships; `entity_type`/`code` filter the entities they relate to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelationshipQuery<'a> {
    pub entity_type: Option<&'a str>,
    pub code: Option<&'a str>,
    pub related_type: Option<&'a str>,
    pub related_code: Option<&'a str>,
}

/// Read-only access to the metadata store.
pub trait MetadataRepository: Send + Sync {
    /// Entities of `entity_type`, optionally filtered by code
    /// (case-insensitive). Returned entities carry no relationships.
    fn find_metadata(
        &self,
        entity_type: &str,
        code: Option<&str>,
    ) -> Result<Vec<MetadataEntity>, MetadataError>;

    /// Entities matching the `related_*` half of the query that hold at least
    /// one relationship to an entity matching the other half. Each result's
    /// `relationships` lists only those matching entities.
    fn find_relationships(
        &self,
        query: RelationshipQuery<'_>,
    ) -> Result<Vec<MetadataEntity>, MetadataError>;

    /// First entity with exactly this type and code
    fn find_name(
        &self,
        entity_type: &str,
        code: &str,
    ) -> Result<Option<MetadataEntity>, MetadataError>;
}

// =============================================================================
// In-memory implementation
// =============================================================================

/// YAML fixture format for [`InMemoryMetadataRepository`]
///
/// ```yaml
/// entities:
///   - { type: country, code: US, name: United States }
///   - { type: region, code: CA, name: California }
/// relationships:
///   - [ "country:US", "region:CA" ]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataFixture {
    #[serde(default)]
    pub entities: Vec<MetadataEntity>,
    #[serde(default)]
    pub relationships: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
struct EntityRow {
    entity_type: String,
    code: String,
    name: Option<String>,
    attrs: BTreeMap<String, String>,
}

impl EntityRow {
    fn to_entity(&self) -> MetadataEntity {
        MetadataEntity {
            entity_type: self.entity_type.clone(),
            code: self.code.clone(),
            name: self.name.clone(),
            attrs: self.attrs.clone(),
            relationships: Vec::new(),
        }
    }
}

/// Metadata store held entirely in memory.
///
/// Relationships are symmetric. Duplicate `(type, code)` rows are allowed so
/// that corrupt upstream data can be reproduced in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetadataRepository {
    rows: Vec<EntityRow>,
    edges: BTreeMap<usize, BTreeSet<usize>>,
}

impl InMemoryMetadataRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity, returning its row id
    pub fn insert(&mut self, entity: MetadataEntity) -> usize {
        self.rows.push(EntityRow {
            entity_type: entity.entity_type,
            code: entity.code,
            name: entity.name,
            attrs: entity.attrs,
        });
        self.rows.len() - 1
    }

    /// Relate every row matching `a` with every row matching `b`.
    ///
    /// Returns the number of rows matched on each side.
    pub fn relate(&mut self, a: &EntityKey, b: &EntityKey) -> (usize, usize) {
        let left = self.rows_for(a);
        let right = self.rows_for(b);
        for &l in &left {
            for &r in &right {
                self.edges.entry(l).or_default().insert(r);
                self.edges.entry(r).or_default().insert(l);
            }
        }
        (left.len(), right.len())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn from_fixture(fixture: MetadataFixture) -> Result<Self, ConfigError> {
        let mut repo = Self::new();
        for entity in fixture.entities {
            repo.insert(entity);
        }
        for (a, b) in &fixture.relationships {
            let ka = parse_key(a)?;
            let kb = parse_key(b)?;
            let (na, nb) = repo.relate(&ka, &kb);
            if na == 0 || nb == 0 {
                return Err(ConfigError::Invalid(format!(
                    "relationship {} <-> {} references an unknown entity",
                    ka, kb
                )));
            }
        }
        tracing::debug!(entities = repo.len(), "loaded metadata fixture");
        Ok(repo)
    }

    /// Load from a YAML string
    pub fn load_from_str(yaml: &str) -> Result<Self, ConfigError> {
        let fixture: MetadataFixture =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_fixture(fixture)
    }

    /// Load from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::load_from_str(&content)
    }

    fn rows_for(&self, key: &EntityKey) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.entity_type == key.entity_type && r.code == key.code)
            .map(|(i, _)| i)
            .collect()
    }

    fn related_rows(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges.get(&id).into_iter().flatten().copied()
    }
}

fn parse_key(key: &str) -> Result<EntityKey, ConfigError> {
    EntityKey::parse(key)
        .ok_or_else(|| ConfigError::Invalid(format!("expected 'type:code', got '{}'", key)))
}

fn matches(filter: Option<&str>, value: &str) -> bool {
    filter.map_or(true, |f| f == value)
}

impl MetadataRepository for InMemoryMetadataRepository {
    fn find_metadata(
        &self,
        entity_type: &str,
        code: Option<&str>,
    ) -> Result<Vec<MetadataEntity>, MetadataError> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.entity_type == entity_type)
            .filter(|r| code.map_or(true, |c| r.code.eq_ignore_ascii_case(c)))
            .map(EntityRow::to_entity)
            .collect())
    }

    fn find_relationships(
        &self,
        query: RelationshipQuery<'_>,
    ) -> Result<Vec<MetadataEntity>, MetadataError> {
        let mut out = Vec::new();

        for (id, row) in self.rows.iter().enumerate() {
            if !matches(query.related_type, &row.entity_type)
                || !matches(query.related_code, &row.code)
            {
                continue;
            }

            let related: Vec<MetadataEntity> = self
                .related_rows(id)
                .map(|rid| &self.rows[rid])
                .filter(|r| matches(query.entity_type, &r.entity_type))
                .filter(|r| matches(query.code, &r.code))
                .map(EntityRow::to_entity)
                .collect();

            if related.is_empty() {
                continue;
            }

            let mut entity = row.to_entity();
            entity.relationships = related;
            out.push(entity);
        }

        Ok(out)
    }

    fn find_name(
        &self,
        entity_type: &str,
        code: &str,
    ) -> Result<Option<MetadataEntity>, MetadataError> {
        Ok(self
            .rows
            .iter()
            .find(|r| r.entity_type == entity_type && r.code == code)
            .map(EntityRow::to_entity))
    }
}
