// crates/tapaterra-core/src/raw.rs
use crate::error::{PipelineError, Result};
use indexmap::IndexMap;
use serde::Deserialize;

/// `name` block of a REST Countries v3.1 entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NameRaw {
    #[serde(default)]
    pub common: Option<String>,
    #[serde(default)]
    pub official: Option<String>,
}

/// One currency entry: `"EUR": { "name": "Euro", "symbol": "€" }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrencyRaw {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Raw country structure as it comes from `GET /alpha/{code}`.
///
/// Only the fields the pipeline reads are modelled; everything else in the
/// payload is ignored. `currencies` and `languages` keep the payload's key
/// order so that "first currency" / "first language" mean what the service
/// returned first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestCountryRaw {
    #[serde(default)]
    pub name: NameRaw,
    #[serde(default)]
    pub cca2: Option<String>,
    #[serde(default)]
    pub cca3: Option<String>,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub borders: Vec<String>,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub currencies: IndexMap<String, CurrencyRaw>,
    #[serde(default)]
    pub languages: IndexMap<String, String>,
}

impl RestCountryRaw {
    /// Decode a response body. The service answers `/alpha/{code}` with
    /// either a bare object or a one-element array; both are accepted.
    pub fn from_body(body: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        match value {
            serde_json::Value::Array(items) => match items.into_iter().next() {
                Some(first) => Ok(serde_json::from_value(first)?),
                None => Err(PipelineError::NotFound("empty result list".into())),
            },
            other => Ok(serde_json::from_value(other)?),
        }
    }

    pub fn common_name(&self) -> Option<&str> {
        self.name.common.as_deref()
    }

    /// First listed capital.
    pub fn capital(&self) -> Option<&str> {
        self.capital.first().map(String::as_str)
    }

    /// Three-letter codes of bordering countries.
    pub fn border_codes(&self) -> &[String] {
        &self.borders
    }

    /// Name of the first listed currency.
    pub fn currency(&self) -> Option<&str> {
        self.currencies
            .values()
            .next()
            .and_then(|c| c.name.as_deref())
    }

    /// First listed language.
    pub fn language(&self) -> Option<&str> {
        self.languages.values().next().map(String::as_str)
    }
}
