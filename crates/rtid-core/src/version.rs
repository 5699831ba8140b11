//! Versão: números de versão de framework e de engine
//!
//! A version carries a mandatory major/minor pair and optional build and
//! revision components. An absent component is "unspecified", which is not
//! the same thing as zero.
//!
//! Two comparison rules exist and they are deliberately different:
//!
//! - **Ordering** (`Ord`): lexicographic over major, minor, build, revision,
//!   with an unspecified component sorting before any specified value.
//!   `4.5 < 4.5.0 < 4.5.1`.
//! - **Matching** ([`Version::matches`]): major and minor must be equal; build
//!   and revision are compared only when both sides specify them.
//!   `4.0` matches `4.0.30319`.

use crate::error::{Result, RuntimeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    // Field order drives the derived ordering.
    major: u32,
    minor: u32,
    build: Option<u32>,
    revision: Option<u32>,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            build: None,
            revision: None,
        }
    }

    pub const fn with_build(major: u32, minor: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            build: Some(build),
            revision: None,
        }
    }

    pub const fn with_revision(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build: Some(build),
            revision: Some(revision),
        }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn build(&self) -> Option<u32> {
        self.build
    }

    pub fn revision(&self) -> Option<u32> {
        self.revision
    }

    /// Number of components that were supplied (2 to 4).
    pub fn component_count(&self) -> usize {
        2 + self.build.is_some() as usize + self.revision.is_some() as usize
    }

    /// Engine-version matching: unspecified build or revision on either side
    /// matches anything.
    pub fn matches(&self, other: &Version) -> bool {
        self.major == other.major
            && self.minor == other.minor
            && component_matches(self.build, other.build)
            && component_matches(self.revision, other.revision)
    }

    /// True when `self` is at or above `other` at major.minor granularity,
    /// checking each component independently.
    pub fn covers_major_minor(&self, other: &Version) -> bool {
        self.major >= other.major && self.minor >= other.minor
    }
}

fn component_matches(a: Option<u32>, b: Option<u32>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{}", build)?;
            if let Some(revision) = self.revision {
                write!(f, ".{}", revision)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = RuntimeError;

    /// Parses 1 to 4 dot-separated non-negative integers. A lone major
    /// component is read as `major.0`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() > 4 {
            return Err(RuntimeError::format(s, "version has more than four components"));
        }

        let mut numbers = Vec::with_capacity(parts.len());
        for part in &parts {
            numbers.push(parse_component(s, part)?);
        }

        Ok(match numbers.as_slice() {
            [major] => Version::new(*major, 0),
            [major, minor] => Version::new(*major, *minor),
            [major, minor, build] => Version::with_build(*major, *minor, *build),
            [major, minor, build, revision] => {
                Version::with_revision(*major, *minor, *build, *revision)
            }
            _ => return Err(RuntimeError::format(s, "empty version")),
        })
    }
}

fn parse_component(input: &str, part: &str) -> Result<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RuntimeError::format(
            input,
            format!("'{}' is not a non-negative integer", part),
        ));
    }
    part.parse()
        .map_err(|_| RuntimeError::format(input, format!("'{}' is out of range", part)))
}

impl TryFrom<String> for Version {
    type Error = RuntimeError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        v.to_string()
    }
}
