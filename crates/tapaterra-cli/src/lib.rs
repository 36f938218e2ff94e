//! tapaterra-cli
//! =============
//!
//! Command-line front end for `tapaterra-core`. Every subcommand is one
//! standalone step of the app's data and asset pipeline; they only share
//! files on disk.
//!
//! Basic usage:
//!
//! ```text
//! tapaterra enrich-iso --swift-file Tapaterra/Models/FlagData.swift
//! tapaterra fetch-details -o country_details.json
//! tapaterra backfill-neighbours --fast
//! tapaterra icons --source ../tapaterra.png
//! tapaterra import-flags --source ~/flags/assets/flags --size large
//! ```
//!
//! Logging goes through `tracing`; set `RUST_LOG=tapaterra_core=debug` or
//! pass `-v` for per-request detail.
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable.
