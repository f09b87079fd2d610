//! FQID humanization
//!
//! Turns a machine path into display names, one node at a time:
//!
//! ```text
//! Humanizer.walk("geo.netacuity.NA.US")
//!         │
//!         ├─► prefix "geo"                  → chain → "Geolocation"
//!         ├─► prefix "geo.netacuity"        → chain → "Net Acuity"
//!         ├─► prefix "geo.netacuity.NA"     → chain → "North America"
//!         └─► prefix "geo.netacuity.NA.US"  → chain → "United States"
//! ```
//!
//! ## Chain order
//!
//! 1. **Direct** - fixed vocabulary (`bgp`, `v4`, `ping-slash24`)
//! 2. **Geo** - geographic codes resolved in the context of their parents
//! 3. **InternetId** - IPs, prefixes and AS numbers
//! 4. **Default** - total fallback, never declines

pub mod chain;
pub mod humanizer;
pub mod provider;
pub mod providers;

pub use chain::{ChainBuilder, ResolutionChain};
pub use humanizer::{HumanizedOutput, HumanizedPath, Humanizer, OutputMode};
pub use provider::{FallbackProvider, HumanizeProvider, PartialPath, Resolution};
pub use providers::{
    DefaultProvider, DirectProvider, FallbackStyle, GeoProvider, InternetIdProvider,
};
