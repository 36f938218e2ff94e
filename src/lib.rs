//! tapaterra-tools
//!
//! Umbrella crate for the workspace. Re-exports `tapaterra-core` so the demos
//! under `demos/` can `use tapaterra_tools::prelude::*`.

pub use tapaterra_core::*;
