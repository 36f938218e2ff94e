//! tapaterra-core prelude: bring common types and traits into scope for the
//! binary and demos.

#![allow(unused_imports)]

pub use crate::assets::{import_flags, ImportConfig, ImportReport, SizeVariant};
pub use crate::backfill::{BackfillOptions, BackfillReport, NeighbourBackfill};
pub use crate::details::{DetailsFetcher, FetchSummary};
pub use crate::enrich::{enrich_file, enrich_source, Enriched};
pub use crate::error::{PipelineError, Result};
#[cfg(feature = "icons")]
pub use crate::icons::{generate_icons, ICON_SIZES};
pub use crate::model::{CountryDetails, NeighbourStatus};
pub use crate::raw::RestCountryRaw;
pub use crate::reference::{GeoFeatureTables, IsoTable, UNKNOWN_ISO};
#[cfg(feature = "fetch")]
pub use crate::source::RestCountriesClient;
pub use crate::source::{CountrySource, MemorySource, NameCache, Throttle};
pub use crate::store::DetailsDocument;
