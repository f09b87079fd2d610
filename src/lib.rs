//! FQID Humanize
//!
//! Resolves machine-oriented hierarchical identifiers (`geo.netacuity.NA.US`)
//! into human-readable names (`Geolocation · Net Acuity · North America ·
//! United States`) without asking the metadata store about every node.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   prefix + terminal   ┌─────────────────┐
//! │  Humanizer   │ ────────────────────► │ ResolutionChain │
//! │ (path walk)  │ ◄──────────────────── │ Direct → Geo →  │
//! └──────────────┘     display name      │ InternetId →    │
//!                                        │ Default         │
//!                                        └────────┬────────┘
//!                                                 │ read-only
//!                                        ┌────────▼────────┐
//!                                        │ MetadataEntities│
//!                                        │ Service         │
//!                                        └─────────────────┘
//! ```
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use fqid_humanize::{HumanizeConfig, Humanizer, InMemoryMetadataRepository, OutputMode};
//!
//! let repo = Arc::new(InMemoryMetadataRepository::new());
//! let humanizer = Humanizer::from_config(&HumanizeConfig::default(), repo).unwrap();
//! let out = humanizer.humanize_fqid("bgp.prefix-visibility", OutputMode::Joined).unwrap();
//! assert_eq!(out, fqid_humanize::HumanizedOutput::Joined("BGP · Global Prefix Visibility".into()));
//! ```

pub mod config;
pub mod error;
pub mod humanize;
pub mod metadata;
pub mod path;
pub mod topo;

pub use config::HumanizeConfig;
pub use error::{ConfigError, HumanizeError, HumanizeResult, MetadataError, TopoError};
pub use humanize::{
    ChainBuilder, HumanizeProvider, HumanizedOutput, HumanizedPath, Humanizer, OutputMode,
    PartialPath, Resolution, ResolutionChain,
};
pub use metadata::{
    InMemoryMetadataRepository, IntegrityPolicy, MetadataEntitiesService, MetadataEntity,
    MetadataRepository,
};
pub use path::{FqidPath, Separators};
pub use topo::{TopoConfig, TopoService};
