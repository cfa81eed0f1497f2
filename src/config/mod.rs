// src/config/mod.rs

//! `gale.toml` handling.
//!
//! - [`model`] holds the raw (deserialized) and validated config types.
//! - [`validate`] turns the raw model into the validated one.
//! - [`loader`] reads the file from disk.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_or_default};
pub use model::{BsimSection, GaleConfig, MonitorSection, RawGaleConfig, ScaSection, TerminalSection};
