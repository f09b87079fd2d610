//! Boundary data (TopoJSON) service
//!
//! File-backed geographic boundaries, laid out as
//! `<root>/<database>/<table>.processed.topo.json`. The set of databases,
//! tables and entity-type mappings comes from [`TopoConfig`] so tests can point
//! the service at their own files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TopoError;

const FILE_SUFFIX: &str = ".processed.topo.json";

/// Where an entity type's boundaries live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopoSource {
    pub database: String,
    pub table: String,
    /// Property in each TopoJSON feature holding the entity code
    pub id_field: String,
}

impl TopoSource {
    fn new(database: &str, table: &str, id_field: &str) -> Self {
        Self {
            database: database.to_string(),
            table: table.to_string(),
            id_field: id_field.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopoConfig {
    pub root: PathBuf,
    pub databases: BTreeMap<String, Vec<String>>,
    pub entity_types: BTreeMap<String, TopoSource>,
}

impl Default for TopoConfig {
    fn default() -> Self {
        let mut databases = BTreeMap::new();
        databases.insert(
            "natural-earth".to_string(),
            vec![
                "ne_10m_admin_0.continents.v3.1.0".to_string(),
                "ne_10m_admin_0.countries.v3.1.0".to_string(),
                "ne_10m_admin_1.regions.v3.0.0".to_string(),
            ],
        );
        databases.insert("gadm".to_string(), vec!["gadm.counties.v2.0".to_string()]);

        let mut entity_types = BTreeMap::new();
        entity_types.insert(
            "continent".to_string(),
            TopoSource::new("natural-earth", "ne_10m_admin_0.continents.v3.1.0", "usercode"),
        );
        entity_types.insert(
            "country".to_string(),
            TopoSource::new("natural-earth", "ne_10m_admin_0.countries.v3.1.0", "usercode"),
        );
        entity_types.insert(
            "region".to_string(),
            TopoSource::new("natural-earth", "ne_10m_admin_1.regions.v3.0.0", "id"),
        );
        entity_types.insert(
            "county".to_string(),
            TopoSource::new("gadm", "gadm.counties.v2.0", "id"),
        );

        Self {
            root: PathBuf::from("/var/topojson"),
            databases,
            entity_types,
        }
    }
}

/// Boundaries for one entity type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopoDataset {
    pub id_field: String,
    pub topology: Value,
}

#[derive(Debug, Clone)]
pub struct TopoService {
    config: TopoConfig,
}

impl TopoService {
    pub fn new(config: TopoConfig) -> Self {
        Self { config }
    }

    /// Supported databases
    pub fn databases(&self) -> Vec<&str> {
        self.config.databases.keys().map(String::as_str).collect()
    }

    /// Tables of `db`
    pub fn tables(&self, db: &str) -> Result<&[String], TopoError> {
        self.config
            .databases
            .get(db)
            .map(Vec::as_slice)
            .ok_or_else(|| TopoError::InvalidDatabase(db.to_string()))
    }

    /// Path a table is read from
    pub fn file_path(&self, db: &str, table: &str) -> Result<PathBuf, TopoError> {
        if !self.tables(db)?.iter().any(|t| t == table) {
            return Err(TopoError::InvalidTable {
                database: db.to_string(),
                table: table.to_string(),
            });
        }
        Ok(self
            .config
            .root
            .join(db)
            .join(format!("{}{}", table, FILE_SUFFIX)))
    }

    pub fn topo_json(&self, db: &str, table: &str) -> Result<Value, TopoError> {
        let path = self.file_path(db, table)?;
        read_json(&path)
    }

    /// Boundaries and identifier field for an entity type
    pub fn for_entity_type(&self, entity_type: &str) -> Result<TopoDataset, TopoError> {
        let source = self
            .config
            .entity_types
            .get(entity_type)
            .ok_or_else(|| TopoError::UnknownEntityType(entity_type.to_string()))?;
        let topology = self.topo_json(&source.database, &source.table)?;
        Ok(TopoDataset {
            id_field: source.id_field.clone(),
            topology,
        })
    }
}

fn read_json(path: &Path) -> Result<Value, TopoError> {
    if !path.is_file() {
        return Err(TopoError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|e| TopoError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "loaded topojson");
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service_in(dir: &TempDir) -> TopoService {
        TopoService::new(TopoConfig {
            root: dir.path().to_path_buf(),
            ..TopoConfig::default()
        })
    }

    fn write_table(dir: &TempDir, db: &str, table: &str, body: &str) {
        let db_dir = dir.path().join(db);
        std::fs::create_dir_all(&db_dir).unwrap();
        std::fs::write(db_dir.join(format!("{}{}", table, FILE_SUFFIX)), body).unwrap();
    }

    #[test]
    fn default_databases_and_tables() {
        let service = TopoService::new(TopoConfig::default());
        assert_eq!(service.databases(), ["gadm", "natural-earth"]);
        assert_eq!(service.tables("gadm").unwrap(), ["gadm.counties.v2.0"]);
        assert!(matches!(
            service.tables("osm"),
            Err(TopoError::InvalidDatabase(db)) if db == "osm"
        ));
    }

    #[test]
    fn invalid_table() {
        let service = TopoService::new(TopoConfig::default());
        assert!(matches!(
            service.topo_json("gadm", "gadm.states"),
            Err(TopoError::InvalidTable { .. })
        ));
    }

    #[test]
    fn reads_configured_file() {
        let dir = TempDir::new().unwrap();
        write_table(
            &dir,
            "gadm",
            "gadm.counties.v2.0",
            r#"{"type":"Topology","objects":{}}"#,
        );
        let service = service_in(&dir);

        let json = service.topo_json("gadm", "gadm.counties.v2.0").unwrap();
        assert_eq!(json["type"], "Topology");

        let dataset = service.for_entity_type("county").unwrap();
        assert_eq!(dataset.id_field, "id");
        assert_eq!(dataset.topology, json);
    }

    #[test]
    fn missing_file_and_unknown_type() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        assert!(matches!(
            service.for_entity_type("country"),
            Err(TopoError::MissingFile { .. })
        ));
        assert!(matches!(
            service.for_entity_type("asn"),
            Err(TopoError::UnknownEntityType(_))
        ));
    }

    #[test]
    fn malformed_json() {
        let dir = TempDir::new().unwrap();
        write_table(&dir, "gadm", "gadm.counties.v2.0", "{not json");
        let service = service_in(&dir);
        assert!(matches!(
            service.topo_json("gadm", "gadm.counties.v2.0"),
            Err(TopoError::Parse(_))
        ));
    }
}
