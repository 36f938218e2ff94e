//! Offline run of the country-detail fetcher
//!
//! This demo shows how to:
//! - Serve REST Countries payloads from memory
//! - Merge them with the bundled geographic tables
//! - See how a failed lookup degrades to fallback-only data

use tapaterra_tools::prelude::*;

fn main() -> Result<()> {
    println!("=== Tapaterra Offline Details Demo ===\n");

    let source = MemorySource::new()
        .with_json(
            r#"{"name": {"common": "Poland"}, "cca2": "PL", "cca3": "POL",
                "capital": ["Warsaw"], "borders": ["DEU", "CZE"],
                "population": 37950802, "area": 312679.0,
                "currencies": {"PLN": {"name": "Polish złoty", "symbol": "zł"}},
                "languages": {"pol": "Polish"}}"#,
        )?
        .with_json(r#"{"name": {"common": "Germany"}, "cca2": "DE", "cca3": "DEU"}"#)?;

    let table = IsoTable::from_json(r#"{"Poland": "PL", "United States": "US"}"#)?;
    let features = GeoFeatureTables::embedded()?;
    let fetcher = DetailsFetcher::new(&source, features).with_throttle(Throttle::none());

    let (doc, summary) = fetcher.fetch_all(&table)?;
    println!("{}", doc.to_json_string()?);
    println!();
    println!("Countries: {}", summary.countries);
    println!("With capital: {}", summary.with_capital);
    println!("Failed lookups: {}", summary.remote_failures);
    println!("Requests served: {}", source.calls());

    Ok(())
}
