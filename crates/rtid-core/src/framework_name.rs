//! Framework-name descriptors such as `.NETFramework,Version=v4.5,Profile=Client`.
use crate::error::{Result, RuntimeError};
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FrameworkName {
    pub identifier: String,
    pub version: Version,
    pub profile: Option<String>,
}

impl FrameworkName {
    pub fn new(identifier: impl Into<String>, version: Version) -> Self {
        Self {
            identifier: identifier.into(),
            version,
            profile: None,
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        let profile = profile.into();
        self.profile = if profile.is_empty() { None } else { Some(profile) };
        self
    }
}

impl fmt::Display for FrameworkName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},Version=v{}", self.identifier, self.version)?;
        if let Some(profile) = &self.profile {
            write!(f, ",Profile={}", profile)?;
        }
        Ok(())
    }
}

impl FromStr for FrameworkName {
    type Err = RuntimeError;

    /// Keys are matched case-insensitively and may appear in any order after
    /// the identifier. `Version` is required, `Profile` is optional.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(',').map(str::trim);
        let identifier = match parts.next() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(RuntimeError::format(s, "missing framework identifier")),
        };

        let mut version = None;
        let mut profile = None;
        for part in parts {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                RuntimeError::format(s, format!("'{}' is not a key=value pair", part))
            })?;
            let value = value.trim();
            match key.trim().to_ascii_lowercase().as_str() {
                "version" if version.is_none() => {
                    let digits = value
                        .strip_prefix(|c: char| c == 'v' || c == 'V')
                        .unwrap_or(value);
                    version = Some(
                        digits
                            .parse::<Version>()
                            .map_err(|e| RuntimeError::format(s, e.to_string()))?,
                    );
                }
                "profile" if profile.is_none() => {
                    if !value.is_empty() {
                        profile = Some(value.to_string());
                    }
                }
                other => {
                    return Err(RuntimeError::format(
                        s,
                        format!("unexpected or repeated key '{}'", other),
                    ))
                }
            }
        }

        let version = version.ok_or_else(|| RuntimeError::format(s, "missing Version"))?;
        Ok(Self {
            identifier,
            version,
            profile,
        })
    }
}

impl TryFrom<String> for FrameworkName {
    type Error = RuntimeError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FrameworkName> for String {
    fn from(name: FrameworkName) -> Self {
        name.to_string()
    }
}
