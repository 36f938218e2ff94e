// crates/tapaterra-core/src/details.rs

//! # Country-Detail Fetcher
//!
//! Builds `country_details.json` from scratch: one remote lookup per country
//! for the live fields, the curated tables for cities / rivers / mountains.
//! Remote failures never abort the run; the affected fields stay empty.

use crate::error::Result;
use crate::model::CountryDetails;
use crate::raw::RestCountryRaw;
use crate::reference::{GeoFeatureTables, IsoTable};
use crate::source::{resolve_border_names, CountrySource, Throttle, DETAIL_TIMEOUT};
use crate::store::DetailsDocument;
use std::path::Path;
use tracing::{info, warn};

/// Pause after each remote call.
pub const REQUEST_DELAY: Throttle = Throttle::millis(50);

/// How many entities between progress lines.
const PROGRESS_EVERY: usize = 10;

/// Counts printed at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub countries: usize,
    pub with_capital: usize,
    pub with_cities: usize,
    pub with_rivers: usize,
    pub with_mountains: usize,
    pub remote_failures: usize,
}

impl FetchSummary {
    fn count(&mut self, details: &CountryDetails) {
        self.countries += 1;
        self.with_capital += usize::from(details.capital.is_some());
        self.with_cities += usize::from(!details.main_cities.is_empty());
        self.with_rivers += usize::from(!details.main_rivers.is_empty());
        self.with_mountains += usize::from(!details.main_mountains.is_empty());
    }
}

pub struct DetailsFetcher<'a, S: CountrySource> {
    source: S,
    features: &'a GeoFeatureTables,
    throttle: Throttle,
}

impl<'a, S: CountrySource> DetailsFetcher<'a, S> {
    pub fn new(source: S, features: &'a GeoFeatureTables) -> Self {
        Self {
            source,
            features,
            throttle: REQUEST_DELAY,
        }
    }

    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    /// Details for one country. The second value is `false` when the remote
    /// lookup failed and only fallback data is present.
    pub fn fetch_one(&self, iso2: &str, name: &str) -> (CountryDetails, bool) {
        info!("Fetching data for {name} ({iso2})...");

        let remote = match self.source.lookup(iso2, DETAIL_TIMEOUT) {
            Ok(c) => Some(c),
            Err(e) => {
                warn!(iso2, error = %e, "REST Countries lookup failed");
                None
            }
        };
        self.throttle.pause();

        let ok = remote.is_some();
        (self.assemble(iso2, remote.as_ref()), ok)
    }

    fn assemble(&self, iso2: &str, remote: Option<&RestCountryRaw>) -> CountryDetails {
        let neighbours = remote
            .map(|c| resolve_border_names(&self.source, c.border_codes(), None, self.throttle))
            .unwrap_or_default();

        let mut details = CountryDetails::new(iso2);
        details.capital = remote.and_then(|c| c.capital()).map(str::to_string);
        details.main_cities = self.features.cities(iso2);
        details.main_rivers = self.features.rivers(iso2);
        details.main_mountains = self.features.mountains(iso2);
        details.neighbours = Some(neighbours);
        details.population = remote.and_then(|c| c.population);
        details.area = remote.and_then(|c| c.area);
        details.currency = remote.and_then(|c| c.currency()).map(str::to_string);
        details.language = remote.and_then(|c| c.language()).map(str::to_string);
        details
    }

    /// One entry per row of `table`, in table order.
    pub fn fetch_all(&self, table: &IsoTable) -> Result<(DetailsDocument, FetchSummary)> {
        let total = table.len();
        let mut doc = DetailsDocument::new();
        let mut summary = FetchSummary::default();

        for (processed, (name, iso2)) in table.iter().enumerate() {
            let (details, ok) = self.fetch_one(iso2, name);
            if !ok {
                summary.remote_failures += 1;
            }
            summary.count(&details);
            doc.insert(&details)?;

            let processed = processed + 1;
            if processed % PROGRESS_EVERY == 0 {
                info!(
                    "Progress: {processed}/{total} ({}%)",
                    processed * 100 / total.max(1)
                );
            }
            self.throttle.pause();
        }

        Ok((doc, summary))
    }

    /// Fetches everything and replaces `out_path` with the result.
    pub fn fetch_to_file(
        &self,
        table: &IsoTable,
        out_path: impl AsRef<Path>,
    ) -> Result<FetchSummary> {
        let (doc, summary) = self.fetch_all(table)?;
        doc.save(out_path.as_ref())?;
        info!(
            path = %out_path.as_ref().display(),
            countries = summary.countries,
            "wrote country details"
        );
        Ok(summary)
    }
}
