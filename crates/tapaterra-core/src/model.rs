// crates/tapaterra-core/src/model.rs
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of `country_details.json`, keyed by its ISO2 code.
///
/// Field names follow the app's `CountryDetails` Swift model (camelCase).
/// `capital` and the other optional scalars are written as `null` when
/// absent; `neighbours` is omitted entirely while it has never been resolved
/// (see [`NeighbourStatus`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDetails {
    /// Empty when the stored record has no `isoCode`; see [`CountryDetails::from_record`].
    #[serde(default)]
    pub iso_code: String,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub main_cities: Vec<String>,
    #[serde(default)]
    pub main_rivers: Vec<String>,
    #[serde(default)]
    pub main_mountains: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbours: Option<Vec<String>>,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub area: Option<f64>, // km²
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub language: Option<String>,

    /// Keys we do not model are carried through a load/save cycle untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Resolution state of a record's neighbour list.
///
/// The document distinguishes three cases:
/// - `Missing`: the key is absent or `null`, nobody has tried yet
/// - `Empty`: `[]`, either "no land borders" or "lookup failed at fetch time"
/// - `Known`: at least one neighbour name is recorded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeighbourStatus {
    Missing,
    Empty,
    Known,
}

impl NeighbourStatus {
    /// Status of a raw `neighbours` value. Anything other than an array
    /// counts as `Missing`.
    pub fn of_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Array(a)) if a.is_empty() => NeighbourStatus::Empty,
            Some(Value::Array(_)) => NeighbourStatus::Known,
            _ => NeighbourStatus::Missing,
        }
    }
}

impl CountryDetails {
    /// A record with only its code set.
    pub fn new(iso_code: impl Into<String>) -> Self {
        Self {
            iso_code: iso_code.into(),
            capital: None,
            main_cities: Vec::new(),
            main_rivers: Vec::new(),
            main_mountains: Vec::new(),
            neighbours: None,
            population: None,
            area: None,
            currency: None,
            language: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Typed view of a stored record. A record without `isoCode` takes the
    /// document key as its code.
    pub fn from_record(code: &str, record: &Value) -> Result<Self> {
        let mut details: CountryDetails = serde_json::from_value(record.clone())?;
        if details.iso_code.is_empty() {
            details.iso_code = code.to_string();
        }
        Ok(details)
    }

    pub fn neighbour_status(&self) -> NeighbourStatus {
        match &self.neighbours {
            None => NeighbourStatus::Missing,
            Some(n) if n.is_empty() => NeighbourStatus::Empty,
            Some(_) => NeighbourStatus::Known,
        }
    }

    /// Neighbour names, empty when unresolved.
    pub fn neighbours(&self) -> &[String] {
        self.neighbours.as_deref().unwrap_or(&[])
    }
}
