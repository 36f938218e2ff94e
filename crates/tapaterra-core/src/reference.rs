// crates/tapaterra-core/src/reference.rs

//! # Reference Data
//!
//! Static lookup tables shipped as JSON data sets under `data/`:
//!
//! - `iso_codes.json`: display name → ISO2 code, in app order
//! - `geo_features.json`: ISO2 code → main cities / rivers / mountains
//!
//! Both are embedded into the binary as defaults and can be replaced by a
//! file on disk, so the geography can be updated without recompiling.

use crate::error::{PipelineError, Result};
use crate::text::fold_key;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Code returned for names that have no mapping.
pub const UNKNOWN_ISO: &str = "XX";

const EMBEDDED_ISO_CODES: &str = include_str!("../data/iso_codes.json");
const EMBEDDED_GEO_FEATURES: &str = include_str!("../data/geo_features.json");

static ISO_TABLE: OnceCell<IsoTable> = OnceCell::new();
static GEO_FEATURES: OnceCell<GeoFeatureTables> = OnceCell::new();

fn open_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| {
        PipelineError::NotFound(format!("Data set not found at {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

// -----------------------------------------------------------------------------
// ISO NAME TABLE
// -----------------------------------------------------------------------------

/// Display name → ISO2 code.
#[derive(Debug, Clone)]
pub struct IsoTable {
    entries: IndexMap<String, String>,
    folded: HashMap<String, String>,
}

impl IsoTable {
    pub fn from_entries(entries: IndexMap<String, String>) -> Self {
        let folded = entries
            .iter()
            .map(|(name, code)| (fold_key(name), code.clone()))
            .collect();
        Self { entries, folded }
    }

    /// The bundled table, parsed once per process.
    pub fn embedded() -> Result<&'static IsoTable> {
        ISO_TABLE.get_or_try_init(|| Self::from_json(EMBEDDED_ISO_CODES))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries: IndexMap<String, String> = serde_json::from_str(json)?;
        Self::validated(entries)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::validated(open_json(path.as_ref())?)
    }

    fn validated(entries: IndexMap<String, String>) -> Result<Self> {
        if let Some((name, code)) = entries
            .iter()
            .find(|(_, c)| c.len() != 2 || !c.chars().all(|ch| ch.is_ascii_uppercase()))
        {
            return Err(PipelineError::InvalidData(format!(
                "ISO code for {name:?} must be two upper-case letters, got {code:?}"
            )));
        }
        Ok(Self::from_entries(entries))
    }

    /// Exact match first, then accent/case-insensitive.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .or_else(|| self.folded.get(&fold_key(name)))
            .map(String::as_str)
    }

    /// Like [`IsoTable::lookup`] but never fails: unmapped names give
    /// [`UNKNOWN_ISO`].
    pub fn code_or_sentinel(&self, name: &str) -> &str {
        self.lookup(name).unwrap_or(UNKNOWN_ISO)
    }

    /// `(name, code)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// -----------------------------------------------------------------------------
// GEOGRAPHIC FALLBACK TABLES
// -----------------------------------------------------------------------------

/// Curated main cities / rivers / mountains per ISO2 code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoFeatureTables {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub cities: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub rivers: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub mountains: HashMap<String, Vec<String>>,
}

impl GeoFeatureTables {
    pub fn embedded() -> Result<&'static GeoFeatureTables> {
        GEO_FEATURES.get_or_try_init(|| Self::from_json(EMBEDDED_GEO_FEATURES))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        open_json(path.as_ref())
    }

    pub fn cities(&self, iso2: &str) -> Vec<String> {
        self.cities.get(iso2).cloned().unwrap_or_default()
    }

    pub fn rivers(&self, iso2: &str) -> Vec<String> {
        self.rivers.get(iso2).cloned().unwrap_or_default()
    }

    pub fn mountains(&self, iso2: &str) -> Vec<String> {
        self.mountains.get(iso2).cloned().unwrap_or_default()
    }
}
