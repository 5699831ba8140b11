//! Known platform families.
//!
//! | token     | engine for framework V                                         |
//! |-----------|----------------------------------------------------------------|
//! | `net`     | 1.0 → 1.0.3705, 1.x → 1.1.4322, 2.x/3.x → 2.0.50727, 4.x → 4.0.30319 |
//! | `mono`    | same as `net`                                                  |
//! | `netcore` | V                                                              |
//! | `any`     | V (wildcard, matches every family)                             |

use rtid_core::{PlatformFamily, Version};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Engine versions shared by the classic desktop runtimes.
pub fn legacy_clr_version(framework_version: &Version) -> Version {
    match (framework_version.major(), framework_version.minor()) {
        (1, 0) => Version::with_build(1, 0, 3705),
        (1, _) => Version::with_build(1, 1, 4322),
        (2, _) | (3, _) => Version::with_build(2, 0, 50727),
        (4, _) => Version::with_build(4, 0, 30319),
        _ => *framework_version,
    }
}

/// The standard desktop runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetFramework;

impl PlatformFamily for NetFramework {
    fn token(&self) -> &str {
        "net"
    }

    fn display_name(&self) -> &str {
        ".NET"
    }

    fn framework_identifier(&self) -> Option<&str> {
        Some(".NETFramework")
    }

    fn clr_version_for(&self, framework_version: &Version) -> Version {
        legacy_clr_version(framework_version)
    }

    fn is_interchangeable_with(&self, token: &str) -> bool {
        token == "mono"
    }
}

/// The alternative implementation of the desktop runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mono;

impl PlatformFamily for Mono {
    fn token(&self) -> &str {
        "mono"
    }

    fn display_name(&self) -> &str {
        "Mono"
    }

    fn framework_identifier(&self) -> Option<&str> {
        Some("Mono")
    }

    fn clr_version_for(&self, framework_version: &Version) -> Version {
        legacy_clr_version(framework_version)
    }

    fn is_interchangeable_with(&self, token: &str) -> bool {
        token == "net"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NetCore;

impl PlatformFamily for NetCore {
    fn token(&self) -> &str {
        "netcore"
    }

    fn display_name(&self) -> &str {
        ".NET Core"
    }

    fn framework_identifier(&self) -> Option<&str> {
        Some(".NETCoreApp")
    }

    fn clr_version_for(&self, framework_version: &Version) -> Version {
        *framework_version
    }
}

/// Wildcard family.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyRuntime;

impl PlatformFamily for AnyRuntime {
    fn token(&self) -> &str {
        "any"
    }

    fn display_name(&self) -> &str {
        "Any"
    }

    fn framework_identifier(&self) -> Option<&str> {
        None
    }

    fn clr_version_for(&self, framework_version: &Version) -> Version {
        *framework_version
    }

    fn is_wildcard(&self) -> bool {
        true
    }
}

/// A family described in a registry file.
///
/// `engine_versions` is keyed by `"major"` or `"major.minor"`; the more
/// specific key wins and unmatched framework versions map to themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredFamily {
    pub token: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub engine_versions: BTreeMap<String, Version>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<String>,
    #[serde(default)]
    pub wildcard: bool,
}

impl DeclaredFamily {
    pub fn new(token: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            token: token.into().to_ascii_lowercase(),
            display_name: display_name.into(),
            identifier: None,
            engine_versions: BTreeMap::new(),
            matches: Vec::new(),
            wildcard: false,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_engine(mut self, key: impl Into<String>, engine: Version) -> Self {
        self.engine_versions.insert(key.into(), engine);
        self
    }

    pub fn matching(mut self, token: impl Into<String>) -> Self {
        self.matches.push(token.into());
        self
    }

    /// Keys of `engine_versions` that are neither `major` nor `major.minor`.
    pub fn invalid_engine_keys(&self) -> Vec<&str> {
        self.engine_versions
            .keys()
            .map(String::as_str)
            .filter(|key| !is_engine_key(key))
            .collect()
    }
}

fn is_engine_key(key: &str) -> bool {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match key.split_once('.') {
        Some((major, minor)) => digits(major) && digits(minor),
        None => digits(key),
    }
}

impl PlatformFamily for DeclaredFamily {
    fn token(&self) -> &str {
        &self.token
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn framework_identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    fn clr_version_for(&self, framework_version: &Version) -> Version {
        let major_minor = format!("{}.{}", framework_version.major(), framework_version.minor());
        let major = framework_version.major().to_string();
        self.engine_versions
            .get(&major_minor)
            .or_else(|| self.engine_versions.get(&major))
            .copied()
            .unwrap_or(*framework_version)
    }

    fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    fn is_interchangeable_with(&self, token: &str) -> bool {
        self.matches.iter().any(|m| m.eq_ignore_ascii_case(token))
    }
}
