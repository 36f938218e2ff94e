//! tapaterra: command-line interface for tapaterra-core
//!
//! One subcommand per pipeline step:
//!
//! - Patch ISO codes into the Swift flag list
//!   $ tapaterra enrich-iso
//!
//! - Build the country details document (network)
//!   $ tapaterra fetch-details -o country_details.json
//!
//! - Fill in neighbours that are still missing (network)
//!   $ tapaterra backfill-neighbours          # one request per border
//!   $ tapaterra backfill-neighbours --fast   # cached, with checkpoints
//!
//! - Generate the app icon set
//!   $ tapaterra icons --source ../tapaterra.png
//!
//! - Rebuild the Flags asset catalog
//!   $ tapaterra import-flags --source ~/flags/assets/flags --size large
//!
//! Configuration
//! -------------
//!
//! Every path and delay has a default matching the app repository layout, so
//! running from the repository root needs no flags except the flag image
//! source. `--iso-table` swaps the bundled name → code table for a JSON file.
mod args;

use crate::args::{CliArgs, Commands};
use clap::Parser;
use tapaterra_core::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_iso_table(path: Option<&std::path::Path>) -> Result<IsoTable> {
    match path {
        Some(p) => IsoTable::load_from_path(p),
        None => IsoTable::embedded().cloned(),
    }
}

#[cfg(feature = "fetch")]
fn client(remote: &args::RemoteArgs) -> Result<RestCountriesClient> {
    RestCountriesClient::with_base_url(&remote.base_url)
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::EnrichIso { swift_file } => {
            let table = load_iso_table(args.iso_table.as_deref())?;
            let report = enrich_file(&swift_file, &table)?;
            println!("Updated {} with ISO codes", swift_file.display());
            println!("  Literals rewritten: {}", report.replaced);
            if !report.unmapped.is_empty() {
                println!("  Without mapping ({}): {}", UNKNOWN_ISO, report.unmapped.join(", "));
            }
        }

        #[cfg(feature = "fetch")]
        Commands::FetchDetails {
            output,
            features_table,
            remote,
        } => {
            let table = load_iso_table(args.iso_table.as_deref())?;
            let features = match features_table {
                Some(p) => GeoFeatureTables::load_from_path(p)?,
                None => GeoFeatureTables::embedded()?.clone(),
            };
            let mut fetcher = DetailsFetcher::new(client(&remote)?, &features);
            if let Some(ms) = remote.delay_ms {
                fetcher = fetcher.with_throttle(Throttle::millis(ms));
            }
            let summary = fetcher.fetch_to_file(&table, &output)?;

            println!();
            println!("Generated {} with {} countries", output.display(), summary.countries);
            println!("Countries with capital: {}", summary.with_capital);
            println!("Countries with cities: {}", summary.with_cities);
            println!("Countries with rivers: {}", summary.with_rivers);
            println!("Countries with mountains: {}", summary.with_mountains);
            if summary.remote_failures > 0 {
                println!("Lookups failed: {}", summary.remote_failures);
            }
        }

        #[cfg(feature = "icons")]
        Commands::Icons { source, output } => {
            let written = generate_icons(&source, &output)?;
            println!("Done! Generated {} icons in {}", written.len(), output.display());
        }

        Commands::ImportFlags { source, dest, size } => {
            let dest = std::path::absolute(&dest)?;
            let report = import_flags(&ImportConfig {
                source_root: source,
                dest_root: dest.clone(),
                size,
            })?;
            println!("Imported {} flags into {}", report.images, dest.display());
            println!("  Regions: {}", report.regions.join(", "));
        }

        #[cfg(feature = "fetch")]
        Commands::BackfillNeighbours {
            input,
            fast,
            remote,
        } => {
            let mut options = if fast {
                BackfillOptions::fast()
            } else {
                BackfillOptions::plain()
            };
            if let Some(ms) = remote.delay_ms {
                options.entity_delay = Throttle::millis(ms);
                options.border_delay = Throttle::millis(ms);
            }
            let mut backfill = NeighbourBackfill::new(client(&remote)?, options);
            let report = backfill.run_file(&input)?;

            println!();
            println!("Complete!");
            println!("  Updated: {} countries", report.updated);
            println!("  No borders: {} countries", report.empty);
            println!("  Skipped: {} countries (already had neighbours)", report.skipped);
            println!("  Failed: {} countries", report.failed);
            println!("  Total: {} countries", report.total);
        }
    }

    Ok(())
}
