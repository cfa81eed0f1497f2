// src/data/mod.rs

//! Static registries: the projects, boards and targets gale knows about.
//!
//! All three are closed enums so they can be picked directly from the CLI.

pub mod boards;
pub mod projects;
pub mod targets;

pub use boards::BoardId;
pub use projects::{PROJECTS, ProjectId};
pub use targets::TargetId;
