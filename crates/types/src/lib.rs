//! Foundation types for mapper-analyzer.
//!
//! This crate provides shared types used across the mapper tooling stack.
//! It has zero external dependencies, making it suitable as a foundation layer.
//!
//! # Type Categories
//!
//! - **File types**: [`FileId`], [`FileUri`], [`Language`]
//! - **Position types**: [`Position`], [`Range`], [`OffsetRange`]
//! - **Severity types**: [`DiagnosticSeverity`]

mod file;
mod position;
mod severity;

pub use file::{FileId, FileUri, Language};
pub use position::{OffsetRange, Position, Range};
pub use severity::DiagnosticSeverity;
