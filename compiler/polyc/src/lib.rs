//! Command-line driver for the poly dispatch engine.
//!
//! Loads a JSON manifest of generics, candidates and guides into a
//! [`Catalog`](poly_catalog::Catalog), then runs or explains the queries it
//! lists.

pub mod commands;
pub mod manifest;
pub mod query;
mod tracing_setup;

pub use manifest::{load, LoadedManifest, ManifestError};
pub use tracing_setup::init_tracing;
