// crates/tapaterra-core/src/backfill.rs

//! # Neighbour Backfill
//!
//! Fills in `neighbours` for records of an existing details document.
//!
//! Records whose status is [`NeighbourStatus::Known`] are never touched, and
//! an updated record only has its `neighbours` key rewritten.
//! Everything else (`Missing` or `Empty`) is looked up again: an `Empty` list
//! written by the detail fetcher may stand for a failed request rather than
//! an island, so it is re-verified. A record whose own lookup fails keeps
//! whatever it had; a record that truly has no borders ends as `[]`.

use crate::error::Result;
use crate::model::NeighbourStatus;
use crate::source::{resolve_border_names, CountrySource, NameCache, Throttle, BORDER_TIMEOUT};
use crate::store::DetailsDocument;
use crate::text::preview;
use std::path::Path;
use tracing::{info, warn};

/// The two backfill strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackfillOptions {
    /// Memoize ISO3 → name for the duration of the run.
    pub use_cache: bool,
    /// Save the whole document after this many successful updates.
    pub checkpoint_every: Option<usize>,
    /// Pause after each border-name lookup.
    pub border_delay: Throttle,
    /// Pause after each country lookup.
    pub entity_delay: Throttle,
}

impl BackfillOptions {
    /// One request per border, single save at the end.
    pub const fn plain() -> Self {
        Self {
            use_cache: false,
            checkpoint_every: None,
            border_delay: Throttle::millis(50),
            entity_delay: Throttle::millis(100),
        }
    }

    /// Cached names, shorter delays, checkpoint every ten updates.
    pub const fn fast() -> Self {
        Self {
            use_cache: true,
            checkpoint_every: Some(10),
            border_delay: Throttle::millis(30),
            entity_delay: Throttle::millis(50),
        }
    }

    pub fn without_delays(mut self) -> Self {
        self.border_delay = Throttle::none();
        self.entity_delay = Throttle::none();
        self
    }
}

impl Default for BackfillOptions {
    fn default() -> Self {
        Self::fast()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillReport {
    pub total: usize,
    /// Records that received at least one neighbour name.
    pub updated: usize,
    /// Records confirmed to have no borders (written as `[]`).
    pub empty: usize,
    /// Records skipped because they already had neighbours.
    pub skipped: usize,
    /// Records whose own lookup failed.
    pub failed: usize,
    /// Checkpoint saves performed (the final save not included).
    pub checkpoints: usize,
}

pub struct NeighbourBackfill<S: CountrySource> {
    source: S,
    options: BackfillOptions,
    cache: NameCache,
}

impl<S: CountrySource> NeighbourBackfill<S> {
    pub fn new(source: S, options: BackfillOptions) -> Self {
        Self {
            source,
            options,
            cache: NameCache::new(),
        }
    }

    pub fn cache(&self) -> &NameCache {
        &self.cache
    }

    /// Updates `doc` in memory. `checkpoint` is called with the document
    /// whenever a checkpoint is due.
    pub fn run_with<F>(&mut self, doc: &mut DetailsDocument, mut checkpoint: F) -> Result<BackfillReport>
    where
        F: FnMut(&DetailsDocument) -> Result<()>,
    {
        self.cache.reset();
        let codes: Vec<String> = doc.codes().map(str::to_string).collect();
        let total = codes.len();
        let mut report = BackfillReport {
            total,
            ..BackfillReport::default()
        };
        info!("Processing {total} countries...");

        for (idx, code) in codes.iter().enumerate() {
            let idx = idx + 1;
            if doc.neighbour_status(code) == NeighbourStatus::Known {
                report.skipped += 1;
                continue;
            }

            let country = match self.source.lookup(code, BORDER_TIMEOUT) {
                Ok(c) => c,
                Err(e) => {
                    warn!("[{idx}/{total}] Error updating {code}: {e}");
                    report.failed += 1;
                    self.options.entity_delay.pause();
                    continue;
                }
            };

            let borders = country.border_codes();
            let names = if borders.is_empty() {
                Vec::new()
            } else {
                let cache = self.options.use_cache.then_some(&mut self.cache);
                resolve_border_names(&self.source, borders, cache, self.options.border_delay)
            };

            if names.is_empty() && !borders.is_empty() {
                // borders exist but none resolved, keep the previous value
                warn!("[{idx}/{total}] {code}: no border names resolved");
                report.failed += 1;
            } else if names.is_empty() {
                info!("[{idx}/{total}] {}: No borders", doc.iso_code(code));
                doc.set_neighbours(code, Vec::new());
                report.empty += 1;
            } else {
                info!(
                    "[{idx}/{total}] Updated {}: {} neighbours ({})",
                    doc.iso_code(code),
                    names.len(),
                    preview(&names, 3)
                );
                doc.set_neighbours(code, names);
                report.updated += 1;

                if let Some(every) = self.options.checkpoint_every {
                    if every > 0 && report.updated % every == 0 {
                        checkpoint(&*doc)?;
                        report.checkpoints += 1;
                        info!("  (Saved progress: {} countries updated)", report.updated);
                    }
                }
            }

            self.options.entity_delay.pause();
        }

        Ok(report)
    }

    /// Loads `path`, backfills it, checkpoints into the same file and saves
    /// the final state.
    pub fn run_file(&mut self, path: impl AsRef<Path>) -> Result<BackfillReport> {
        let path = path.as_ref();
        info!("Loading existing country data...");
        let mut doc = DetailsDocument::load(path)?;
        let report = self.run_with(&mut doc, |d| d.save(path))?;
        info!("Saving final data...");
        doc.save(path)?;
        Ok(report)
    }
}
