//! Metadata lookup collaborator
//!
//! Entities (countries, regions, ASNs, ...) keyed by type and code, with
//! symmetric relationships between them. Providers consult this to turn a
//! code into a display name.
//!
//! ```text
//! MetadataEntitiesService::lookup("region", "CA", "country", "US")
//!         │
//!         ├─► repository.find_relationships(...)
//!         │       └─► [country:US { relationships: [region:CA] }]
//!         │
//!         ├─► at most one owner for an exact key (IntegrityPolicy)
//!         │
//!         └─► [region:CA "California"]
//! ```

pub mod entity;
pub mod repository;
pub mod service;

pub use entity::{EntityKey, MetadataEntity};
pub use repository::{
    InMemoryMetadataRepository, MetadataFixture, MetadataRepository, RelationshipQuery,
};
pub use service::{IntegrityPolicy, MetadataEntitiesService};
