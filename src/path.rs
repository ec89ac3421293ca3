//! Hierarchical path handling
//!
//! Paths use `/` as separator and are bounded to `MAX_PATH_LEN` bytes. A path
//! that does not fit is refused, never truncated.

use crate::error::ConfigError;
use crate::types::MAX_PATH_LEN;
use std::fmt;

/// Separator used by the flat store between subkey names.
pub const SUBKEY_SEPARATOR: char = '\\';

/// Return the text after the last `/`, or the whole path if there is none.
pub fn last_element(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// A validated, normalized hierarchical path.
///
/// Empty segments are dropped, so `/gui//news/` and `gui/news` name the same
/// node. The empty path is the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigPath {
    normalized: String,
}

impl ConfigPath {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        check_len(raw)?;

        let mut normalized = String::with_capacity(raw.len());
        for segment in raw.split('/').filter(|s| !s.is_empty()) {
            if segment.contains(SUBKEY_SEPARATOR) {
                return Err(ConfigError::InvalidPath(format!(
                    "segment '{}' in '{}' contains '{}'",
                    segment, raw, SUBKEY_SEPARATOR
                )));
            }
            if !normalized.is_empty() {
                normalized.push('/');
            }
            normalized.push_str(segment);
        }

        Ok(Self { normalized })
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn is_root(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.normalized.split('/').filter(|s| !s.is_empty())
    }

    /// Everything before the last segment; empty for top-level keys.
    pub fn parent(&self) -> &str {
        match self.normalized.rfind('/') {
            Some(idx) => &self.normalized[..idx],
            None => "",
        }
    }

    pub fn name(&self) -> &str {
        last_element(&self.normalized)
    }

    /// Whether `other` is this path or lies beneath it.
    pub fn contains(&self, other: &str) -> bool {
        if self.is_root() {
            return true;
        }
        other == self.normalized
            || (other.starts_with(&self.normalized)
                && other.as_bytes().get(self.normalized.len()) == Some(&b'/'))
    }

    /// Append a child segment, keeping the length bound.
    pub fn join(&self, child: &str) -> Result<Self, ConfigError> {
        if self.is_root() {
            Self::parse(child)
        } else {
            Self::parse(&format!("{}/{}", self.normalized, child))
        }
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

pub(crate) fn check_len(path: &str) -> Result<(), ConfigError> {
    if path.len() > MAX_PATH_LEN {
        return Err(ConfigError::PathTooLong {
            len: path.len(),
            max: MAX_PATH_LEN,
        });
    }
    Ok(())
}
