// src/filesystem.rs

//! Filesystem access used by the registry resolver
//!
//! The resolver never touches `std::fs` directly. It goes through
//! [`FileSystem`] so tests can substitute an in-memory registry.

use crate::error::Result;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Read-only filesystem operations needed to inspect a registry
pub trait FileSystem: Send + Sync {
    /// Check whether a path exists
    fn path_exists(&self, path: &Path) -> bool;

    /// Names of the subdirectories directly under `path`
    fn get_directories(&self, path: &Path) -> Result<Vec<String>>;

    /// Read a file as UTF-8 text
    fn get_file_contents(&self, path: &Path) -> Result<String>;
}

/// [`FileSystem`] backed by the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn get_directories(&self, path: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(path)? {
            let entry = entry?;
            // Follow symlinks so a linked version directory still counts
            if !entry.path().is_dir() {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => warn!("Skipping non UTF-8 directory name: {:?}", name),
            }
        }

        Ok(names)
    }

    fn get_file_contents(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }
}
