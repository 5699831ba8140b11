//! Runtime identities: family + framework version + engine version + profile.
//!
//! Textual form is `<family>-<version>` (`net-4.5`, `mono-2.0`). Display
//! names read `<Family Display Name> <version>[ - <profile>]`.

use crate::error::{Result, RuntimeError};
use crate::family::{FamilyRef, FamilyResolver};
use crate::framework_name::FrameworkName;
use crate::version::Version;
use serde::{Serialize, Serializer};
use std::fmt;

/// Profile that never shows up in display names.
pub const FULL_PROFILE: &str = "Full";

const VERSION_RULE: &str =
    "framework version must have major > 0, build 0-2 if given, and no revision";

/// An identity describing one runtime environment.
///
/// `clr_version` and `display_name` are computed when the identity is built
/// and can be overwritten afterwards with [`set_clr_version`] and
/// [`set_display_name`]. Neither is recomputed automatically, so after an
/// overwrite they need not agree with `family`/`framework_version`. The
/// setters take `&mut self`; sharing an identity while correcting it is the
/// caller's business.
///
/// [`set_clr_version`]: RuntimeIdentity::set_clr_version
/// [`set_display_name`]: RuntimeIdentity::set_display_name
#[derive(Debug, Clone)]
pub struct RuntimeIdentity {
    family: FamilyRef,
    framework_version: Version,
    clr_version: Version,
    profile: Option<String>,
    display_name: String,
}

impl RuntimeIdentity {
    /// Build an identity, validating the framework version and asking the
    /// family for the matching engine version.
    pub fn new(family: FamilyRef, version: Version, profile: Option<&str>) -> Result<Self> {
        validate_framework_version(&version)?;

        let profile = profile.filter(|p| !p.is_empty()).map(str::to_string);
        let clr_version = family.clr_version_for(&version);
        let display_name =
            default_display_name(family.display_name(), &version, profile.as_deref());

        Ok(Self {
            family,
            framework_version: version,
            clr_version,
            profile,
            display_name,
        })
    }

    /// Parse `<family>-<version>`, resolving the family token through `resolver`.
    pub fn parse(text: &str, resolver: &dyn FamilyResolver) -> Result<Self> {
        let (family_token, version_token) = split_identity(text)?;

        let family = resolver.resolve_token(family_token).ok_or_else(|| {
            RuntimeError::format(text, format!("unknown platform family '{}'", family_token))
        })?;
        let version: Version = version_token
            .parse()
            .map_err(|e: RuntimeError| RuntimeError::format(text, e.to_string()))?;

        Self::new(family, version, None)
    }

    /// Like [`parse`](Self::parse) but yields `None` on any failure.
    pub fn try_parse(text: &str, resolver: &dyn FamilyResolver) -> Option<Self> {
        match Self::parse(text, resolver) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::debug!(input = %text, error = %e, "runtime identity rejected");
                None
            }
        }
    }

    /// Build an identity from a framework-name descriptor, mapping its
    /// identifier back to a family.
    pub fn from_framework_name(
        name: &FrameworkName,
        resolver: &dyn FamilyResolver,
    ) -> Result<Self> {
        let family = resolver.resolve_identifier(&name.identifier).ok_or_else(|| {
            RuntimeError::format(
                name.to_string(),
                format!("unknown framework identifier '{}'", name.identifier),
            )
        })?;
        Self::new(family, name.version, name.profile.as_deref())
    }

    /// Canonical `<family>-<version>` string, rebuilt on every call.
    pub fn id(&self) -> String {
        format!("{}-{}", self.family.token().to_lowercase(), self.framework_version)
    }

    pub fn family(&self) -> &FamilyRef {
        &self.family
    }

    pub fn framework_version(&self) -> Version {
        self.framework_version
    }

    pub fn clr_version(&self) -> Version {
        self.clr_version
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Record the engine version actually discovered for this runtime.
    pub fn set_clr_version(&mut self, clr_version: Version) {
        tracing::debug!(
            id = %self.id(),
            from = %self.clr_version,
            to = %clr_version,
            "engine version overwritten"
        );
        self.clr_version = clr_version;
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        let display_name = display_name.into();
        tracing::debug!(id = %self.id(), display_name = %display_name, "display name overwritten");
        self.display_name = display_name;
    }

    /// Can something built against `target` run in the environment `self`
    /// describes? Families must match, engine versions must match (with
    /// unspecified components ignored), and `self` must be at or above
    /// `target` at major.minor granularity.
    pub fn supports(&self, target: &RuntimeIdentity) -> bool {
        if !self.family.matches(target.family.as_ref()) {
            return false;
        }

        if !self.clr_version.matches(&target.clr_version) {
            return false;
        }

        self.framework_version.covers_major_minor(&target.framework_version)
    }

    /// Can `self` host something declaring `requested`? Plain version
    /// ordering, no family check.
    pub fn can_load(&self, requested: &RuntimeIdentity) -> bool {
        self.framework_version >= requested.framework_version
    }
}

impl fmt::Display for RuntimeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.id())
    }
}

#[derive(Serialize)]
struct IdentityView<'a> {
    id: String,
    display_name: &'a str,
    framework_version: Version,
    clr_version: Version,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<&'a str>,
}

impl Serialize for RuntimeIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        IdentityView {
            id: self.id(),
            display_name: &self.display_name,
            framework_version: self.framework_version,
            clr_version: self.clr_version,
            profile: self.profile(),
        }
        .serialize(serializer)
    }
}

fn validate_framework_version(version: &Version) -> Result<()> {
    let build_ok = version.build().map_or(true, |b| b < 3);
    if version.major() == 0 || !build_ok || version.revision().is_some() {
        return Err(RuntimeError::invalid(version, VERSION_RULE));
    }
    Ok(())
}

fn split_identity(text: &str) -> Result<(&str, &str)> {
    let mut halves = text.split('-');
    match (halves.next(), halves.next(), halves.next()) {
        (Some(family), Some(version), None) if !family.is_empty() && !version.is_empty() => {
            Ok((family, version))
        }
        _ => Err(RuntimeError::format(
            text,
            "expected <family>-<version> with a single '-'",
        )),
    }
}

fn default_display_name(family_name: &str, version: &Version, profile: Option<&str>) -> String {
    match profile {
        Some(profile) if !profile.is_empty() && profile != FULL_PROFILE => {
            format!("{} {} - {}", family_name, version, profile)
        }
        _ => format!("{} {}", family_name, version),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::PlatformFamily;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Stub {
        token: &'static str,
        wildcard: bool,
        partners: &'static [&'static str],
    }

    impl PlatformFamily for Stub {
        fn token(&self) -> &str {
            self.token
        }

        fn display_name(&self) -> &str {
            "Stub"
        }

        fn framework_identifier(&self) -> Option<&str> {
            Some("StubFramework")
        }

        fn clr_version_for(&self, v: &Version) -> Version {
            match v.major() {
                2 | 3 => Version::with_build(2, 0, 50727),
                4 => Version::with_build(4, 0, 30319),
                _ => *v,
            }
        }

        fn is_wildcard(&self) -> bool {
            self.wildcard
        }

        fn is_interchangeable_with(&self, token: &str) -> bool {
            self.partners.iter().any(|p| *p == token)
        }
    }

    struct StubResolver;

    impl FamilyResolver for StubResolver {
        fn resolve_token(&self, token: &str) -> Option<FamilyRef> {
            match token {
                "stub" => Some(stub()),
                _ => None,
            }
        }

        fn resolve_identifier(&self, identifier: &str) -> Option<FamilyRef> {
            (identifier == "StubFramework").then(stub)
        }
    }

    fn family(
        token: &'static str,
        wildcard: bool,
        partners: &'static [&'static str],
    ) -> FamilyRef {
        Arc::new(Stub {
            token,
            wildcard,
            partners,
        })
    }

    fn stub() -> FamilyRef {
        family("stub", false, &[])
    }

    fn ident(v: &str) -> RuntimeIdentity {
        RuntimeIdentity::new(stub(), v.parse().unwrap(), None).unwrap()
    }

    #[test]
    fn test_new_derives_fields() {
        let rt = RuntimeIdentity::new(stub(), Version::new(3, 5), Some("Client")).unwrap();
        assert_eq!(rt.id(), "stub-3.5");
        assert_eq!(rt.clr_version(), Version::with_build(2, 0, 50727));
        assert_eq!(rt.display_name(), "Stub 3.5 - Client");
        assert_eq!(rt.profile(), Some("Client"));
    }

    #[test]
    fn test_full_or_missing_profile_has_no_suffix() {
        let full = RuntimeIdentity::new(stub(), Version::new(4, 0), Some("Full")).unwrap();
        let none = RuntimeIdentity::new(stub(), Version::new(4, 0), None).unwrap();
        let empty = RuntimeIdentity::new(stub(), Version::new(4, 0), Some("")).unwrap();
        assert_eq!(full.display_name(), "Stub 4.0");
        assert_eq!(none.display_name(), "Stub 4.0");
        assert_eq!(empty.display_name(), "Stub 4.0");
        assert_eq!(full.profile(), Some("Full"));
        assert_eq!(empty.profile(), None);
    }

    #[test]
    fn test_version_validity_boundary() {
        for build in 0..3 {
            assert!(RuntimeIdentity::new(stub(), Version::with_build(4, 5, build), None).is_ok());
        }
        for bad in [
            Version::with_build(4, 5, 3),
            Version::with_build(4, 5, 50727),
            Version::with_revision(4, 5, 1, 0),
            Version::new(0, 9),
        ] {
            let err = RuntimeIdentity::new(stub(), bad, None).unwrap_err();
            assert!(err.is_invalid_argument());
            assert!(err.to_string().contains(&bad.to_string()));
        }
    }

    #[test]
    fn test_parse_shapes() {
        let rt = RuntimeIdentity::parse("stub-4.5.1", &StubResolver).unwrap();
        assert_eq!(rt.framework_version(), Version::with_build(4, 5, 1));
        assert_eq!(rt.to_string(), "stub-4.5.1");

        for bad in ["bogus", "stub-", "-4.5", "stub-4.5-x", "stub-4.x", "nope-4.5"] {
            assert!(RuntimeIdentity::parse(bad, &StubResolver).unwrap_err().is_format(), "{}", bad);
            assert!(RuntimeIdentity::try_parse(bad, &StubResolver).is_none());
        }
    }

    #[test]
    fn test_parse_surfaces_validation_errors() {
        let err = RuntimeIdentity::parse("stub-4.5.3", &StubResolver).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(RuntimeIdentity::try_parse("stub-4.5.3", &StubResolver).is_none());
    }

    #[test]
    fn test_from_framework_name() {
        let name: FrameworkName = "StubFramework,Version=v3.5,Profile=Client".parse().unwrap();
        let rt = RuntimeIdentity::from_framework_name(&name, &StubResolver).unwrap();
        assert_eq!(rt.id(), "stub-3.5");
        assert_eq!(rt.display_name(), "Stub 3.5 - Client");

        let unknown = FrameworkName::new("Silverlight", Version::new(4, 0));
        assert!(RuntimeIdentity::from_framework_name(&unknown, &StubResolver)
            .unwrap_err()
            .is_format());
    }

    #[test]
    fn test_setters_do_not_recompute() {
        let mut rt = ident("4.5");
        rt.set_clr_version(Version::with_revision(4, 0, 30319, 42000));
        rt.set_display_name("Custom");
        assert_eq!(rt.clr_version(), Version::with_revision(4, 0, 30319, 42000));
        assert_eq!(rt.display_name(), "Custom");
        assert_eq!(rt.id(), "stub-4.5");
    }

    #[test]
    fn test_supports_is_directional() {
        assert!(ident("3.5").supports(&ident("2.0")));
        assert!(!ident("2.0").supports(&ident("3.5")));
    }

    #[test]
    fn test_supports_requires_engine_match() {
        // 4.0 runs on a different engine than 2.0
        assert!(!ident("4.0").supports(&ident("2.0")));
        assert!(ident("4.0").can_load(&ident("2.0")));
    }

    #[test]
    fn test_supports_checks_family() {
        let other = family("other", false, &[]);
        let wildcard = family("any", true, &[]);
        let partner = family("alt", false, &["stub"]);
        let v = Version::new(2, 0);

        let base = ident("2.0");
        let other = RuntimeIdentity::new(other, v, None).unwrap();
        let wildcard = RuntimeIdentity::new(wildcard, v, None).unwrap();
        let partner = RuntimeIdentity::new(partner, v, None).unwrap();

        assert!(!base.supports(&other));
        assert!(base.supports(&wildcard));
        assert!(wildcard.supports(&base));
        assert!(partner.supports(&base));
        // Only "alt" declares the pairing here.
        assert!(!base.supports(&partner));
    }

    #[test]
    fn test_can_load_ignores_family() {
        let other = RuntimeIdentity::new(family("other", false, &[]), Version::new(2, 0), None)
            .unwrap();
        assert!(ident("4.0").can_load(&other));
        assert!(!other.can_load(&ident("4.0")));
    }

    #[test]
    fn test_can_load_uses_full_ordering() {
        assert!(ident("4.5.1").can_load(&ident("4.5")));
        assert!(!ident("4.5").can_load(&ident("4.5.1")));
        assert!(!ident("2.0").can_load(&ident("4.0")));
    }

    #[test]
    fn test_self_compatibility() {
        for v in ["2.0", "3.5", "4.0", "4.5.2"] {
            let rt = ident(v);
            assert!(rt.supports(&rt));
            assert!(rt.can_load(&rt));
        }
    }

    #[test]
    fn test_serialize_view() {
        let rt = RuntimeIdentity::new(stub(), Version::new(4, 0), Some("Client")).unwrap();
        let json = serde_json::to_value(&rt).unwrap();
        assert_eq!(json["id"], "stub-4.0");
        assert_eq!(json["clr_version"], "4.0.30319");
        assert_eq!(json["profile"], "Client");
        assert_eq!(json["display_name"], "Stub 4.0 - Client");
    }
}
