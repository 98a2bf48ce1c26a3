//! Public API for the retro-palette crate.
//!
//! This module provides the high-level API: the [`Converter`] builder and
//! the [`ConvertError`] unified error type.

mod builder;
mod error;

pub use builder::Converter;
pub use error::ConvertError;
