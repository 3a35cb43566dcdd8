// src/version/mod.rs

//! Package version parsing and ordering
//!
//! Versions follow the Debian layout `[epoch:]upstream[-revision]`:
//!
//! - `2.0.0-1ubuntu1` has revision `1ubuntu1`, compared after the upstream part
//! - `1:2.0.0` has epoch 1, which only breaks ties: it sorts above `2.0.0`
//!   and `2.0.0~rc1`, but below `2.0.0-1` and `3.0.0`
//!
//! Parsing is deliberately lenient so that any directory name or control file
//! value can be ordered. The text is kept exactly as given for display.

mod compare;
mod spec;

pub use spec::{Clause, Op, VersionSpec};

use crate::error::{Error, Result};
use compare::compare_fragment;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A parsed package version
#[derive(Debug, Clone)]
pub struct Version {
    original: String,
    epoch: Option<u64>,
    upstream: String,
    revision: Option<String>,
}

impl Version {
    /// Parse a version string
    ///
    /// Surrounding whitespace is ignored for parsing but kept in
    /// [`Version::as_str`]. Only an empty upstream part is rejected. A prefix
    /// before `:` that is not a number is kept as part of the upstream version.
    pub fn parse(s: &str) -> Result<Self> {
        let text = s.trim();

        let (epoch, rest) = match text.split_once(':') {
            Some((epoch, rest)) if !epoch.is_empty() && epoch.bytes().all(|c| c.is_ascii_digit()) => {
                let epoch = epoch
                    .parse::<u64>()
                    .map_err(|e| Error::InvalidVersion(format!("{}: bad epoch: {}", text, e)))?;
                (Some(epoch), rest)
            }
            _ => (None, text),
        };

        let (upstream, revision) = match rest.rsplit_once('-') {
            Some((upstream, revision)) if !revision.is_empty() => {
                (upstream, Some(revision.to_string()))
            }
            _ => (rest, None),
        };

        if upstream.is_empty() {
            return Err(Error::InvalidVersion(format!(
                "'{}' has no upstream version",
                text
            )));
        }

        Ok(Self {
            original: s.to_string(),
            epoch,
            upstream: upstream.to_string(),
            revision,
        })
    }

    /// The version exactly as it was written
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Epoch, `0` when none was written
    pub fn epoch(&self) -> u64 {
        self.epoch.unwrap_or(0)
    }

    /// Whether an `N:` prefix was written
    pub fn has_epoch(&self) -> bool {
        self.epoch.is_some()
    }

    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    /// Distribution revision, e.g. `1ubuntu1` in `2.0.0-1ubuntu1`
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// Dotted components of the upstream version
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.upstream.split('.')
    }

    /// Compare the upstream part only, ignoring epoch and revision
    pub fn cmp_upstream(&self, other: &Self) -> Ordering {
        compare_fragment(&self.upstream, &other.upstream)
    }

    fn cmp_revision(&self, other: &Self) -> Ordering {
        compare_fragment(
            self.revision.as_deref().unwrap_or(""),
            other.revision.as_deref().unwrap_or(""),
        )
    }

    fn cmp_epoch(&self, other: &Self) -> Ordering {
        self.epoch().cmp(&other.epoch())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_upstream(other)
            .then_with(|| self.cmp_revision(other))
            .then_with(|| self.cmp_epoch(other))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}
