// src/lib.rs

//! regver
//!
//! Finds the highest installed version of a package in an on-disk registry
//! that satisfies a version specifier such as `>=2.0.0,!=4.0.0`.
//!
//! # Architecture
//!
//! - Registry layout: `<root>/<name>/<arch>/<version>/`
//! - Versions: Debian-style `[epoch:]upstream[-revision]` ordering
//! - Filesystem access goes through the [`filesystem::FileSystem`] trait

mod error;
pub mod filesystem;
pub mod packages;
pub mod repository;
pub mod version;

pub use error::{Error, Result};
pub use filesystem::{FileSystem, RealFileSystem};
pub use packages::control::extract_attribute;
pub use repository::{Registry, get_version_from_registry, matching_versions};
pub use version::{Version, VersionSpec};
