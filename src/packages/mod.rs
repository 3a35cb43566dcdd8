// src/packages/mod.rs

//! Package metadata helpers
//!
//! Parsing of `Key: Value` package metadata, as found in Debian control
//! files and registry info files.

pub mod control;

pub use control::{extract_attribute, read_attribute};
