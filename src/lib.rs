//! texbake - retro engine texture baking
//!
//! File-level tooling around the `retro-palette` pipeline: palette and
//! image loading, indexed PNG output, YAML batch configuration.
//! This library exposes modules for the CLI and integration testing.

pub mod error;
pub mod models;
pub mod services;
