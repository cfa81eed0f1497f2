// src/build/mod.rs

//! Building targets with `west build` and reading back what the build
//! produced.
//!
//! - [`cmake_cache`] parses `CMakeCache.txt`.
//! - [`build_cache`] describes one finished build (triplet, dirs, cache).
//! - [`configuration`] drives the build itself.

pub mod build_cache;
pub mod cmake_cache;
pub mod configuration;

pub use build_cache::{BuildCache, BuildType, triplet};
pub use cmake_cache::CMakeCache;
pub use configuration::{BuildOptions, Configuration, WestBuild};
