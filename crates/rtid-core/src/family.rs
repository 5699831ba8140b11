//! Platform families and the resolver contract used by the parsers.
use crate::version::Version;
use std::fmt;
use std::sync::Arc;

/// A lineage of execution engines ("net", "mono", ...).
///
/// Implementations supply the family-specific rules; [`RuntimeIdentity`]
/// only ever talks to a family through this trait.
///
/// [`RuntimeIdentity`]: crate::RuntimeIdentity
pub trait PlatformFamily: fmt::Debug + Send + Sync {
    /// Canonical lowercase token used in the textual identity form.
    fn token(&self) -> &str;

    /// Human-readable name used in display names (e.g. ".NET").
    fn display_name(&self) -> &str;

    /// Identifier in the framework-name scheme (e.g. ".NETFramework").
    /// `None` when the family has no such identifier.
    fn framework_identifier(&self) -> Option<&str>;

    /// Engine version implied by a framework version.
    fn clr_version_for(&self, framework_version: &Version) -> Version;

    /// Whether this family matches every other family.
    fn is_wildcard(&self) -> bool {
        false
    }

    /// Whether the distinct family named `token` is treated as
    /// interchangeable with this one. The relation need not be symmetric.
    fn is_interchangeable_with(&self, _token: &str) -> bool {
        false
    }

    /// Whether two families are considered interchangeable.
    fn matches(&self, other: &dyn PlatformFamily) -> bool {
        self.token() == other.token()
            || self.is_wildcard()
            || other.is_wildcard()
            || self.is_interchangeable_with(other.token())
    }
}

/// Shared handle to a family.
pub type FamilyRef = Arc<dyn PlatformFamily>;

/// Looks families up for the parsers.
pub trait FamilyResolver {
    /// Resolve a family token from the `<family>-<version>` form.
    fn resolve_token(&self, token: &str) -> Option<FamilyRef>;

    /// Reverse lookup from a framework-name identifier.
    fn resolve_identifier(&self, identifier: &str) -> Option<FamilyRef>;
}
