// src/repository/mod.rs

//! Installed package registry lookups
//!
//! A registry is a directory tree laid out as:
//!
//! ```text
//! <root>/<name>/<arch>/<version>/
//! <root>/<name>/<arch>/<version>/version   (optional)
//! ```
//!
//! Each version directory name is a candidate version. The optional
//! `version` file records the canonical version string when the directory
//! name could not carry it verbatim.

use crate::error::{Error, Result};
use crate::filesystem::{FileSystem, RealFileSystem};
use crate::version::{Version, VersionSpec};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the file holding the canonical version inside a version directory
pub const VERSION_FILE: &str = "version";

/// Directory holding the installed versions of `name` for `arch`
pub fn package_dir(registry_path: &Path, name: &str, arch: &str) -> PathBuf {
    registry_path.join(name).join(arch)
}

/// All installed versions of `name`/`arch` satisfying `spec`, lowest first
///
/// A missing package directory, or a plain file in its place, yields an empty
/// list. Directory names that do not parse as versions are skipped. Each
/// version keeps the directory name exactly as listed.
pub fn matching_versions(
    registry_path: &Path,
    name: &str,
    arch: &str,
    spec: &VersionSpec,
    fs: &dyn FileSystem,
) -> Result<Vec<Version>> {
    let dir = package_dir(registry_path, name, arch);

    if !fs.path_exists(&dir) {
        debug!("No registry entry for {}/{} at {}", name, arch, dir.display());
        return Ok(Vec::new());
    }

    let entries = match fs.get_directories(&dir) {
        Ok(entries) => entries,
        Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotADirectory => {
            debug!("{} is not a directory, treating {}/{} as absent", dir.display(), name, arch);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let mut versions = Vec::new();
    for entry in entries {
        let version = match Version::parse(&entry) {
            Ok(version) => version,
            Err(e) => {
                debug!("Skipping {}: {}", entry, e);
                continue;
            }
        };

        if spec.matches(&version) {
            versions.push(version);
        } else {
            debug!("{} {} does not satisfy {}", name, version, spec);
        }
    }

    versions.sort();
    Ok(versions)
}

/// Highest installed version of `name`/`arch` satisfying `version_spec`
///
/// Returns an empty string when the package is not in the registry or no
/// installed version matches. Errors only on an invalid specifier or an I/O
/// failure.
///
/// # Example
///
/// ```no_run
/// use regver::{RealFileSystem, get_version_from_registry};
/// use std::path::Path;
///
/// let version = get_version_from_registry(
///     Path::new("/var/lib/regver/registry"),
///     "openssl",
///     "amd64",
///     ">=3.0.0,!=3.0.1",
///     &RealFileSystem,
/// )?;
/// println!("{}", version);
/// # Ok::<(), regver::Error>(())
/// ```
pub fn get_version_from_registry(
    registry_path: &Path,
    name: &str,
    arch: &str,
    version_spec: &str,
    fs: &dyn FileSystem,
) -> Result<String> {
    let spec: VersionSpec = version_spec.parse()?;
    let versions = matching_versions(registry_path, name, arch, &spec, fs)?;
    best_version(registry_path, name, arch, &spec, &versions, fs)
}

/// Resolve the highest of `versions` (sorted, lowest first) to its recorded
/// version string, or an empty string when there is none
fn best_version(
    registry_path: &Path,
    name: &str,
    arch: &str,
    spec: &VersionSpec,
    versions: &[Version],
    fs: &dyn FileSystem,
) -> Result<String> {
    let Some(best) = versions.last() else {
        info!("No installed version of {}/{} satisfies {}", name, arch, spec);
        return Ok(String::new());
    };

    recorded_version(&package_dir(registry_path, name, arch), best, fs)
}

/// The canonical version recorded for `version`, or its directory name
fn recorded_version(package_dir: &Path, version: &Version, fs: &dyn FileSystem) -> Result<String> {
    let version_file = package_dir.join(version.as_str()).join(VERSION_FILE);
    if fs.path_exists(&version_file) {
        let contents = fs.get_file_contents(&version_file)?;
        let recorded = contents.trim();
        if !recorded.is_empty() {
            debug!("Using recorded version {} from {}", recorded, version_file.display());
            return Ok(recorded.to_string());
        }
    }

    Ok(version.to_string())
}

/// Outcome of a registry lookup, for machine-readable output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveReport {
    pub name: String,
    pub arch: String,
    pub spec: String,
    /// Resolved version, empty when nothing matched
    pub version: String,
    /// Every matching installed version, lowest first
    pub candidates: Vec<String>,
}

/// A registry rooted at a directory, read through a [`FileSystem`]
pub struct Registry<F: FileSystem = RealFileSystem> {
    root: PathBuf,
    fs: F,
}

impl Registry<RealFileSystem> {
    /// Open a registry on the local disk
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self::with_filesystem(root, RealFileSystem)
    }
}

impl<F: FileSystem> Registry<F> {
    pub fn with_filesystem(root: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            root: root.into(),
            fs,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// See [`get_version_from_registry`]
    pub fn resolve(&self, name: &str, arch: &str, version_spec: &str) -> Result<String> {
        get_version_from_registry(&self.root, name, arch, version_spec, &self.fs)
    }

    /// See [`matching_versions`]
    pub fn list(&self, name: &str, arch: &str, version_spec: &str) -> Result<Vec<Version>> {
        let spec: VersionSpec = version_spec.parse()?;
        matching_versions(&self.root, name, arch, &spec, &self.fs)
    }

    /// Resolve and collect every candidate from a single directory listing
    pub fn report(&self, name: &str, arch: &str, version_spec: &str) -> Result<ResolveReport> {
        let spec: VersionSpec = version_spec.parse()?;
        let candidates = matching_versions(&self.root, name, arch, &spec, &self.fs)?;
        let version = best_version(&self.root, name, arch, &spec, &candidates, &self.fs)?;

        Ok(ResolveReport {
            name: name.to_string(),
            arch: arch.to_string(),
            spec: spec.to_string(),
            version,
            candidates: candidates.iter().map(Version::to_string).collect(),
        })
    }
}
