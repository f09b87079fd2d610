//! Built-in providers, in default priority order

pub mod default;
pub mod direct;
pub mod geo;
pub mod internet_id;

pub use default::{DefaultProvider, FallbackStyle};
pub use direct::DirectProvider;
pub use geo::{GeoProvider, DEFAULT_GEO_LEVELS};
pub use internet_id::InternetIdProvider;
