//! RTID Core: Versão, Família e Identidade de runtime
//!
//! Value types describing "which runtime is this": a platform family, the
//! framework version a component declares, the engine version that framework
//! version runs on, and an optional profile. Families are injected through
//! [`PlatformFamily`]; parsers resolve them through [`FamilyResolver`].
//!
//! ```
//! use rtid_core::{FamilyRef, FamilyResolver, PlatformFamily, RuntimeIdentity, Version};
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! struct Net;
//!
//! impl PlatformFamily for Net {
//!     fn token(&self) -> &str { "net" }
//!     fn display_name(&self) -> &str { ".NET" }
//!     fn framework_identifier(&self) -> Option<&str> { Some(".NETFramework") }
//!     fn clr_version_for(&self, v: &Version) -> Version {
//!         if v.major() == 4 { Version::with_build(4, 0, 30319) } else { *v }
//!     }
//! }
//!
//! struct OnlyNet;
//!
//! impl FamilyResolver for OnlyNet {
//!     fn resolve_token(&self, token: &str) -> Option<FamilyRef> {
//!         (token == "net").then(|| Arc::new(Net) as FamilyRef)
//!     }
//!     fn resolve_identifier(&self, id: &str) -> Option<FamilyRef> {
//!         (id == ".NETFramework").then(|| Arc::new(Net) as FamilyRef)
//!     }
//! }
//!
//! let host = RuntimeIdentity::parse("net-4.5", &OnlyNet).unwrap();
//! let plugin = RuntimeIdentity::parse("net-4.0", &OnlyNet).unwrap();
//! assert!(host.supports(&plugin));
//! assert!(host.can_load(&plugin));
//! assert_eq!(host.display_name(), ".NET 4.5");
//! ```

pub mod error;
pub mod family;
pub mod framework_name;
pub mod identity;
pub mod version;

pub use error::{Result, RuntimeError};
pub use family::{FamilyRef, FamilyResolver, PlatformFamily};
pub use framework_name::FrameworkName;
pub use identity::{RuntimeIdentity, FULL_PROFILE};
pub use version::Version;
