// crates/tapaterra-core/src/lib.rs

pub mod assets;
pub mod backfill;
pub mod details;
pub mod enrich;
pub mod error;
#[cfg(feature = "icons")]
pub mod icons;
pub mod model;
pub mod prelude;
// Shared Raw Input (REST Countries payloads)
#[doc(hidden)]
pub mod raw;
pub mod reference;
pub mod source;
pub mod store;
pub mod text;

// Re-exports
pub use crate::error::{PipelineError, Result};
pub use crate::model::{CountryDetails, NeighbourStatus};
pub use crate::reference::{GeoFeatureTables, IsoTable};
pub use crate::source::{CountrySource, NameCache, Throttle};
pub use crate::store::DetailsDocument;
#[cfg(feature = "fetch")]
pub use crate::source::RestCountriesClient;
