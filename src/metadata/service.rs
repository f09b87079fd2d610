//! Metadata entities service
//!
//! Thin policy layer over a [`MetadataRepository`]. The one rule it owns:
//! an exact relationship key (`related_type` + `related_code`) identifies at
//! most one entity. Anything else is corrupt upstream data.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::entity::MetadataEntity;
use super::repository::{MetadataRepository, RelationshipQuery};
use crate::error::MetadataError;

/// What to do when an exact relationship key matches more than one entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrityPolicy {
    /// Fail the request with [`MetadataError::DataIntegrity`]
    #[default]
    Strict,
    /// Log the violation and treat the lookup as not-found
    Lenient,
}

/// Read-only lookups against the metadata store
#[derive(Clone)]
pub struct MetadataEntitiesService {
    repo: Arc<dyn MetadataRepository>,
    policy: IntegrityPolicy,
}

impl MetadataEntitiesService {
    pub fn new(repo: Arc<dyn MetadataRepository>) -> Self {
        Self {
            repo,
            policy: IntegrityPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: IntegrityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> IntegrityPolicy {
        self.policy
    }

    /// Look up entities of `entity_type`.
    ///
    /// Without `related_type` this is a plain lookup by type and optional code.
    /// With `related_type` it is a relationship traversal; when `related_code`
    /// is also given, the result is the entities of `entity_type` related to
    /// that single entity.
    pub fn lookup(
        &self,
        entity_type: &str,
        code: Option<&str>,
        related_type: Option<&str>,
        related_code: Option<&str>,
    ) -> Result<Vec<MetadataEntity>, MetadataError> {
        let Some(related_type) = related_type else {
            return self.repo.find_metadata(entity_type, code);
        };

        let metas = self.repo.find_relationships(RelationshipQuery {
            entity_type: Some(entity_type),
            code,
            related_type: Some(related_type),
            related_code,
        })?;

        let Some(related_code) = related_code else {
            return Ok(metas);
        };

        if metas.len() > 1 {
            let violation = MetadataError::DataIntegrity {
                entity_type: entity_type.to_string(),
                code: code.map(str::to_string),
                related_type: related_type.to_string(),
                related_code: related_code.to_string(),
                found: metas.len(),
            };
            match self.policy {
                IntegrityPolicy::Strict => return Err(violation),
                IntegrityPolicy::Lenient => {
                    tracing::warn!(error = %violation, "treating over-matched relationship as not found");
                    return Ok(Vec::new());
                }
            }
        }

        Ok(metas
            .into_iter()
            .next()
            .map(|m| m.relationships)
            .unwrap_or_default())
    }

    /// Single entity by exact type and code
    pub fn get_one(
        &self,
        entity_type: &str,
        code: &str,
    ) -> Result<Option<MetadataEntity>, MetadataError> {
        self.repo.find_name(entity_type, code)
    }
}

impl std::fmt::Debug for MetadataEntitiesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataEntitiesService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::entity::EntityKey;
    use crate::metadata::repository::InMemoryMetadataRepository;

    fn service_with_duplicate_country() -> MetadataEntitiesService {
        let mut repo = InMemoryMetadataRepository::new();
        repo.insert(MetadataEntity::new("country", "US").with_name("United States"));
        repo.insert(MetadataEntity::new("country", "US").with_name("United States (dup)"));
        repo.insert(MetadataEntity::new("region", "CA").with_name("California"));
        repo.relate(&EntityKey::new("country", "US"), &EntityKey::new("region", "CA"));
        MetadataEntitiesService::new(Arc::new(repo))
    }

    #[test]
    fn exact_relationship_returns_related_entities() {
        let mut repo = InMemoryMetadataRepository::new();
        repo.insert(MetadataEntity::new("country", "US").with_name("United States"));
        repo.insert(MetadataEntity::new("region", "CA").with_name("California"));
        repo.insert(MetadataEntity::new("region", "TX").with_name("Texas"));
        repo.relate(&EntityKey::new("country", "US"), &EntityKey::new("region", "CA"));
        repo.relate(&EntityKey::new("country", "US"), &EntityKey::new("region", "TX"));
        let service = MetadataEntitiesService::new(Arc::new(repo));

        let regions = service
            .lookup("region", None, Some("country"), Some("US"))
            .unwrap();
        let mut names: Vec<_> = regions.iter().filter_map(|r| r.display_name()).collect();
        names.sort();
        assert_eq!(names, ["California", "Texas"]);

        let ca = service
            .lookup("region", Some("CA"), Some("country"), Some("US"))
            .unwrap();
        assert_eq!(ca.len(), 1);
        assert_eq!(ca[0].code, "CA");

        // open-ended relationship lookups return the owning entities
        let owners = service.lookup("region", None, Some("country"), None).unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].code, "US");
    }

    #[test]
    fn strict_policy_surfaces_integrity_violation() {
        let service = service_with_duplicate_country();
        let err = service
            .lookup("region", Some("CA"), Some("country"), Some("US"))
            .unwrap_err();
        assert_eq!(
            err,
            MetadataError::DataIntegrity {
                entity_type: "region".to_string(),
                code: Some("CA".to_string()),
                related_type: "country".to_string(),
                related_code: "US".to_string(),
                found: 2,
            }
        );
    }

    #[test]
    fn lenient_policy_degrades_to_not_found() {
        let service = service_with_duplicate_country().with_policy(IntegrityPolicy::Lenient);
        let found = service
            .lookup("region", Some("CA"), Some("country"), Some("US"))
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn plain_lookup_and_get_one() {
        let service = service_with_duplicate_country();
        assert_eq!(service.lookup("country", Some("US"), None, None).unwrap().len(), 2);
        let one = service.get_one("country", "US").unwrap().unwrap();
        assert_eq!(one.display_name(), Some("United States"));
        assert!(service.get_one("country", "FR").unwrap().is_none());
    }
}
