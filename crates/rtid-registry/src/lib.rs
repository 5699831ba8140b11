//! RTID Registry: famílias conhecidas e resolução de identidades
//!
//! Concrete [`PlatformFamily`](rtid_core::PlatformFamily) implementations and
//! the [`FamilyRegistry`] that resolves family tokens and framework
//! identifiers for the parsers in `rtid-core`.
//!
//! ```
//! let net45 = rtid_registry::parse("net-4.5").unwrap();
//! let mono20 = rtid_registry::parse("mono-2.0").unwrap();
//!
//! assert_eq!(net45.to_string(), "net-4.5");
//! assert_eq!(net45.clr_version().to_string(), "4.0.30319");
//! assert!(net45.can_load(&mono20));
//! assert!(rtid_registry::try_parse("net-").is_none());
//! ```

pub mod config;
pub mod error;
pub mod families;
pub mod family_registry;

pub use config::{RegistryConfig, REGISTRY_ENV};
pub use error::RegistryError;
pub use families::{legacy_clr_version, AnyRuntime, DeclaredFamily, Mono, NetCore, NetFramework};
pub use family_registry::FamilyRegistry;

use once_cell::sync::Lazy;
use rtid_core::RuntimeIdentity;

static GLOBAL: Lazy<FamilyRegistry> = Lazy::new(FamilyRegistry::from_env);

/// Process-wide registry, built from `RTID_REGISTRY` on first use.
pub fn global() -> &'static FamilyRegistry {
    &GLOBAL
}

/// Parse `<family>-<version>` against the process-wide registry.
pub fn parse(text: &str) -> rtid_core::Result<RuntimeIdentity> {
    global().parse(text)
}

pub fn try_parse(text: &str) -> Option<RuntimeIdentity> {
    global().try_parse(text)
}
