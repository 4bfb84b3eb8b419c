//! Core library for the `wunder` CLI.
//!
//! This crate defines:
//! - The persisted preference record (API key, location, unit system)
//! - The field table that drives report rendering
//! - The Weather Underground client and response classification
//!
//! It is used by `wunder-cli`, but can also be reused by other binaries.

pub mod config;
pub mod model;
pub mod provider;
pub mod report;

pub use config::{Overrides, Preferences, Settings};
pub use model::{Applicability, FIELDS, FetchOutcome, FieldSpec, UnitSystem};
pub use provider::WundergroundClient;
pub use report::{MissingField, render, render_ambiguous};
