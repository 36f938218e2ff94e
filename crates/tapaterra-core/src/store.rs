// crates/tapaterra-core/src/store.rs

//! # Details Document
//!
//! The on-disk `country_details.json`: a single JSON object keyed by ISO2
//! code. It is read once, mutated in memory and rewritten wholesale.
//!
//! Records are held as raw JSON objects so that a load/save cycle reproduces
//! every record it did not modify: key order, integer-valued reals and keys
//! the app model does not know about all survive. [`CountryDetails`] is the
//! typed view used to build new records and to read existing ones.

use crate::error::{PipelineError, Result};
use crate::model::{CountryDetails, NeighbourStatus};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub const DEFAULT_DETAILS_FILE: &str = "country_details.json";

const NEIGHBOURS_KEY: &str = "neighbours";
const ISO_CODE_KEY: &str = "isoCode";

/// All country records, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetailsDocument {
    entries: IndexMap<String, Map<String, Value>>,
}

impl DetailsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every top-level value must be an object.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PipelineError::file(path, e))?;
        let doc = serde_json::from_reader(BufReader::new(file))?;
        Ok(doc)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Pretty-printed (two-space indent), UTF-8 verbatim.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| PipelineError::file(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(|e| PipelineError::file(path, e))?;
        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Inserts or replaces the record under its own `iso_code`.
    pub fn insert(&mut self, details: &CountryDetails) -> Result<()> {
        let record = match serde_json::to_value(details)? {
            Value::Object(map) => map,
            other => {
                return Err(PipelineError::InvalidData(format!(
                    "record for {} is not an object: {other}",
                    details.iso_code
                )))
            }
        };
        self.entries.insert(details.iso_code.clone(), record);
        Ok(())
    }

    /// Typed view of one record, `None` when the code is absent.
    pub fn get(&self, code: &str) -> Option<Result<CountryDetails>> {
        self.entries
            .get(code)
            .map(|record| CountryDetails::from_record(code, &Value::Object(record.clone())))
    }

    /// The record exactly as stored.
    pub fn record(&self, code: &str) -> Option<&Map<String, Value>> {
        self.entries.get(code)
    }

    /// The record's own `isoCode`, or the document key when it has none.
    pub fn iso_code<'a>(&'a self, code: &'a str) -> &'a str {
        self.entries
            .get(code)
            .and_then(|r| r.get(ISO_CODE_KEY))
            .and_then(Value::as_str)
            .unwrap_or(code)
    }

    /// [`NeighbourStatus::Missing`] for absent codes.
    pub fn neighbour_status(&self, code: &str) -> NeighbourStatus {
        NeighbourStatus::of_value(self.entries.get(code).and_then(|r| r.get(NEIGHBOURS_KEY)))
    }

    /// Writes only the `neighbours` key of an existing record; every other
    /// key keeps its value and position. Returns `false` for absent codes.
    pub fn set_neighbours(&mut self, code: &str, names: Vec<String>) -> bool {
        match self.entries.get_mut(code) {
            Some(record) => {
                let names = names.into_iter().map(Value::String).collect();
                record.insert(NEIGHBOURS_KEY.to_string(), Value::Array(names));
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPED: &str = r#"{
  "IT": {
    "isoCode": "IT",
    "flagEmoji": "x",
    "neighbours": [
      "France"
    ],
    "area": 301336
  },
  "IS": {
    "capital": "Reykjavik"
  }
}"#;

    #[test]
    fn untouched_document_round_trips_verbatim() {
        let doc = DetailsDocument::from_json(SHAPED).unwrap();
        assert_eq!(doc.to_json_string().unwrap(), SHAPED);
    }

    #[test]
    fn set_neighbours_keeps_key_position() {
        let mut doc = DetailsDocument::from_json(SHAPED).unwrap();
        assert!(doc.set_neighbours("IT", vec!["Austria".into()]));
        let keys: Vec<_> = doc.record("IT").unwrap().keys().cloned().collect();
        assert_eq!(keys, ["isoCode", "flagEmoji", "neighbours", "area"]);
        assert!(!doc.set_neighbours("ZZ", vec![]));
    }

    #[test]
    fn missing_iso_code_falls_back_to_key() {
        let doc = DetailsDocument::from_json(SHAPED).unwrap();
        assert_eq!(doc.iso_code("IS"), "IS");
        assert_eq!(doc.iso_code("IT"), "IT");
        assert_eq!(doc.get("IS").unwrap().unwrap().iso_code, "IS");
        assert_eq!(doc.neighbour_status("IS"), NeighbourStatus::Missing);
        assert_eq!(doc.neighbour_status("IT"), NeighbourStatus::Known);
    }

    #[test]
    fn non_object_record_is_rejected() {
        assert!(DetailsDocument::from_json(r#"{"IT": ["Rome"]}"#).is_err());
    }
}
