// src/bsim/mod.rs

//! Running BabbleSim builds natively on the host.
//!
//! A simulation is a set of device processes (the app, optionally the
//! handbrake) joined by a shared simulation id, plus the PHY process that
//! drives them. Everything runs from a per-build run directory that holds
//! copies of the BabbleSim binaries, libraries and the app executable.

pub mod flash;
pub mod orchestrator;

pub use flash::FlashLayout;
pub use orchestrator::{BsimOptions, RunDir, Simulation, run_app_in_bsim};
