//! Common types, traits, and error definitions for corridor_gen
//!
//! This module provides the foundational building blocks used across
//! the transform, geometry, randomization and generation modules.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
