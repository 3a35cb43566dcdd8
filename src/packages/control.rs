// src/packages/control.rs

//! `Key: Value` attribute extraction
//!
//! Package metadata (Debian control files, `dpkg -s` output, registry info
//! files) is a list of `Field: value` lines. A field may appear more than
//! once, e.g. when several installed versions are listed together; the
//! highest value is the one callers want.

use crate::error::{Error, Result};
use crate::filesystem::FileSystem;
use crate::version::Version;
use std::path::Path;
use tracing::debug;

/// Extract the value of `attribute` from `Key: Value` formatted text
///
/// When the attribute appears several times, the highest value by version
/// ordering is returned (the first one wins a tie). If it does not appear,
/// an [`Error::MissingAttribute`] is returned when `must_exist` is set and an
/// empty string otherwise.
///
/// # Example
///
/// ```
/// use regver::extract_attribute;
///
/// let info = "Package: foo\nVersion: 1:1.2.0\nVersion: 1.2.0-1\nVersion: 0.9\n";
/// assert_eq!(extract_attribute(info, "Version", true)?, "1.2.0-1");
/// assert_eq!(extract_attribute(info, "Homepage", false)?, "");
/// # Ok::<(), regver::Error>(())
/// ```
pub fn extract_attribute(text: &str, attribute: &str, must_exist: bool) -> Result<String> {
    let mut best: Option<(Version, &str)> = None;

    for value in attribute_values(text, attribute) {
        // Only an empty value fails to parse, and those are already skipped
        let Ok(version) = Version::parse(value) else {
            continue;
        };

        if best.as_ref().is_none_or(|(current, _)| version > *current) {
            best = Some((version, value));
        }
    }

    match best {
        Some((_, value)) => Ok(value.to_string()),
        None if must_exist => Err(Error::MissingAttribute(attribute.to_string())),
        None => {
            debug!("Attribute '{}' not present", attribute);
            Ok(String::new())
        }
    }
}

/// Read a metadata file and extract `attribute` from it
pub fn read_attribute(
    fs: &dyn FileSystem,
    path: &Path,
    attribute: &str,
    must_exist: bool,
) -> Result<String> {
    debug!("Reading attribute '{}' from {}", attribute, path.display());
    let contents = fs.get_file_contents(path)?;
    extract_attribute(&contents, attribute, must_exist)
}

/// All non-empty values of `attribute`, in order of appearance
fn attribute_values<'a>(text: &'a str, attribute: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    text.lines()
        // Continuation lines of multi-line fields start with whitespace
        .filter(|line| !line.starts_with(' ') && !line.starts_with('\t'))
        .filter_map(|line| line.split_once(':'))
        .filter(move |(field, _)| field.trim() == attribute)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}
