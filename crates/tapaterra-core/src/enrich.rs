// crates/tapaterra-core/src/enrich.rs

//! Appends `isoCode:` to the `Country(...)` literals in `FlagData.swift`.

use crate::error::{PipelineError, Result};
use crate::reference::{IsoTable, UNKNOWN_ISO};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_SWIFT_FILE: &str = "Tapaterra/Models/FlagData.swift";

/// `Country(name: "...", imageName: "...", continent: .xxx)` with exactly
/// these three fields. A literal that already carries `isoCode:` does not
/// match because the closing parenthesis must follow the continent.
static COUNTRY_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Country\(name: "([^"]+)", imageName: "([^"]+)", continent: (\.\w+)\)"#)
        .expect("country literal pattern is valid")
});

/// Result of one enrichment pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enriched {
    pub text: String,
    /// Number of literals rewritten.
    pub replaced: usize,
    /// Names the lookup mapped to the sentinel code, in source order.
    pub unmapped: Vec<String>,
}

/// Rewrites every three-field literal in `source`, asking `lookup` for the
/// code of each country name.
pub fn enrich_source<F>(source: &str, mut lookup: F) -> Enriched
where
    F: FnMut(&str) -> String,
{
    let mut replaced = 0;
    let mut unmapped = Vec::new();
    let text = COUNTRY_LITERAL
        .replace_all(source, |caps: &Captures<'_>| {
            let name = &caps[1];
            let code = lookup(name);
            if code == UNKNOWN_ISO {
                debug!(name, "no ISO code");
                unmapped.push(name.to_string());
            }
            replaced += 1;
            format!(
                r#"Country(name: "{name}", imageName: "{}", continent: {}, isoCode: "{code}")"#,
                &caps[2], &caps[3]
            )
        })
        .into_owned();
    Enriched {
        text,
        replaced,
        unmapped,
    }
}

/// Enriches `path` in place using `table`.
pub fn enrich_file(path: impl AsRef<Path>, table: &IsoTable) -> Result<Enriched> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| PipelineError::file(path, e))?;
    let enriched = enrich_source(&source, |name| table.code_or_sentinel(name).to_string());
    fs::write(path, &enriched.text).map_err(|e| PipelineError::file(path, e))?;
    info!(
        path = %path.display(),
        replaced = enriched.replaced,
        unmapped = enriched.unmapped.len(),
        "updated with ISO codes"
    );
    Ok(enriched)
}
