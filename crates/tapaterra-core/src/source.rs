// crates/tapaterra-core/src/source.rs

//! # Country Sources
//!
//! Where remote country data comes from. [`CountrySource`] is the seam:
//! the real implementation talks to restcountries.com, [`MemorySource`]
//! answers from a fixed set of payloads (offline runs, tests).

use crate::error::{PipelineError, Result};
use crate::raw::RestCountryRaw;
use std::cell::Cell;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

pub const REST_COUNTRIES_BASE: &str = "https://restcountries.com/v3.1";

/// Timeout for the main per-country lookup.
pub const DETAIL_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for border-name and backfill lookups.
pub const BORDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Lookup of a single country by ISO2 or ISO3 code.
pub trait CountrySource {
    fn lookup(&self, code: &str, timeout: Duration) -> Result<RestCountryRaw>;
}

impl<S: CountrySource + ?Sized> CountrySource for &S {
    fn lookup(&self, code: &str, timeout: Duration) -> Result<RestCountryRaw> {
        (**self).lookup(code, timeout)
    }
}

// -----------------------------------------------------------------------------
// HTTP CLIENT
// -----------------------------------------------------------------------------

/// Blocking client for `GET {base}/alpha/{code}`.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

#[cfg(feature = "fetch")]
impl RestCountriesClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(REST_COUNTRIES_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("tapaterra-tools/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(feature = "fetch")]
impl CountrySource for RestCountriesClient {
    fn lookup(&self, code: &str, timeout: Duration) -> Result<RestCountryRaw> {
        let url = format!("{}/alpha/{}", self.base_url, code.to_lowercase());
        debug!(%url, "GET");
        let response = self.http.get(&url).timeout(timeout).send()?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(PipelineError::NotFound(format!("no country for code {code}")));
        }
        let body = response.error_for_status()?.text()?;
        RestCountryRaw::from_body(&body)
    }
}

// -----------------------------------------------------------------------------
// IN-MEMORY SOURCE
// -----------------------------------------------------------------------------

/// Answers lookups from canned payloads keyed by upper-cased code.
/// Unknown codes fail with [`PipelineError::NotFound`].
#[derive(Debug, Default)]
pub struct MemorySource {
    countries: HashMap<String, RestCountryRaw>,
    calls: Cell<usize>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `country` under its `cca2` and `cca3` codes.
    pub fn with(mut self, country: RestCountryRaw) -> Self {
        for code in [&country.cca2, &country.cca3].into_iter().flatten() {
            self.countries.insert(code.to_uppercase(), country.clone());
        }
        self
    }

    /// Registers a raw JSON payload (object or one-element array).
    pub fn with_json(self, body: &str) -> Result<Self> {
        Ok(self.with(RestCountryRaw::from_body(body)?))
    }

    /// Number of lookups served so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl CountrySource for MemorySource {
    fn lookup(&self, code: &str, _timeout: Duration) -> Result<RestCountryRaw> {
        self.calls.set(self.calls.get() + 1);
        self.countries
            .get(&code.to_uppercase())
            .cloned()
            .ok_or_else(|| PipelineError::NotFound(format!("no country for code {code}")))
    }
}

// -----------------------------------------------------------------------------
// RATE LIMITING + MEMOIZATION
// -----------------------------------------------------------------------------

/// Fixed pause between remote calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Throttle(pub Duration);

impl Throttle {
    pub const fn millis(ms: u64) -> Self {
        Throttle(Duration::from_millis(ms))
    }

    pub const fn none() -> Self {
        Throttle(Duration::ZERO)
    }

    pub fn pause(&self) {
        if !self.0.is_zero() {
            std::thread::sleep(self.0);
        }
    }
}

/// ISO3 → common-name memo for one run.
///
/// Only successful lookups are remembered; a failed code is asked again the
/// next time it shows up.
#[derive(Debug, Default)]
pub struct NameCache {
    names: HashMap<String, String>,
    hits: usize,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.names.get(&code.to_uppercase()).map(String::as_str)
    }

    pub fn insert(&mut self, code: &str, name: impl Into<String>) {
        self.names.insert(code.to_uppercase(), name.into());
    }

    pub fn reset(&mut self) {
        self.names.clear();
        self.hits = 0;
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}

/// Common name for one border code, consulting `cache` first when given.
pub fn resolve_name<S: CountrySource>(
    source: &S,
    code: &str,
    cache: Option<&mut NameCache>,
) -> Result<String> {
    if let Some(cache) = cache {
        if let Some(name) = cache.get(code) {
            let name = name.to_string();
            cache.hits += 1;
            return Ok(name);
        }
        let name = lookup_name(source, code)?;
        cache.insert(code, name.clone());
        return Ok(name);
    }
    lookup_name(source, code)
}

fn lookup_name<S: CountrySource>(source: &S, code: &str) -> Result<String> {
    let country = source.lookup(code, BORDER_TIMEOUT)?;
    country
        .common_name()
        .map(str::to_string)
        .ok_or_else(|| PipelineError::InvalidData(format!("{code} has no common name")))
}

/// Resolves border codes to display names in order, dropping the ones that
/// cannot be resolved. `throttle` runs after every remote attempt.
pub fn resolve_border_names<S: CountrySource>(
    source: &S,
    codes: &[String],
    mut cache: Option<&mut NameCache>,
    throttle: Throttle,
) -> Vec<String> {
    let mut names = Vec::with_capacity(codes.len());
    for code in codes {
        let cached = cache.as_deref().and_then(|c| c.get(code)).is_some();
        match resolve_name(source, code, cache.as_deref_mut()) {
            Ok(name) => names.push(name),
            Err(e) => debug!(code = %code, error = %e, "could not resolve border"),
        }
        if !cached {
            throttle.pause();
        }
    }
    names
}
