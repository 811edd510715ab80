//! # Mapper Test Utilities
//!
//! Shared test infrastructure for the mapper-analyzer crates.
//!
//! - [`cursor`] - Caret extraction for IDE feature tests
//! - [`builder`] - Fluent construction of type models
//! - [`fixtures`] - The shared `User` domain used across crates
//! - [`assertions`] - Snapshot formatting helpers

// Test utilities are less strict than production code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_raw_string_hashes)]

pub mod assertions;
pub mod builder;
pub mod cursor;
pub mod fixtures;

pub use assertions::format_labels;
pub use builder::TypeModelBuilder;
pub use cursor::{extract_cursor, CURSOR_MARKER};
pub use fixtures::{user_model, PARAM_ANNOTATION, USER_MAPPER_XML};

// Re-export insta for snapshot testing
pub use insta;
