//! Family Registry
use crate::config::{RegistryConfig, REGISTRY_ENV};
use crate::error::RegistryError;
use crate::families::{AnyRuntime, DeclaredFamily, Mono, NetCore, NetFramework};
use rtid_core::{FamilyRef, FamilyResolver, FrameworkName, RuntimeIdentity};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// The set of families a process knows about, keyed by lowercase token.
#[derive(Debug, Clone)]
pub struct FamilyRegistry {
    families: Vec<FamilyRef>,
    aliases: HashMap<String, String>,
}

impl FamilyRegistry {
    /// A registry with no families at all.
    pub fn empty() -> Self {
        Self {
            families: Vec::new(),
            aliases: HashMap::new(),
        }
    }

    /// `net`, `mono`, `netcore` and the `any` wildcard.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.families = vec![
            Arc::new(NetFramework),
            Arc::new(Mono),
            Arc::new(NetCore),
            Arc::new(AnyRuntime),
        ];
        registry
    }

    /// Built-in families extended by `config`.
    pub fn from_config(config: RegistryConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::builtin();
        for family in config.families {
            registry.declare(family)?;
        }
        for (alias, target) in config.aliases {
            registry.add_alias(alias, target)?;
        }
        Ok(registry)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, RegistryError> {
        let registry = Self::from_config(RegistryConfig::from_yaml(yaml)?)?;
        tracing::info!(
            families = registry.families.len(),
            aliases = registry.aliases.len(),
            "family registry loaded"
        );
        Ok(registry)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!("reading family registry from {}", path.display());
        Self::from_yaml(&yaml)
    }

    /// Registry named by `RTID_REGISTRY`, or the built-in one when the
    /// variable is unset or the file cannot be loaded.
    pub fn from_env() -> Self {
        match std::env::var(REGISTRY_ENV) {
            Ok(path) if !path.trim().is_empty() => match Self::from_file(path.trim()) {
                Ok(registry) => registry,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "{} unusable, falling back to built-in families",
                        REGISTRY_ENV
                    );
                    Self::builtin()
                }
            },
            _ => Self::builtin(),
        }
    }

    /// Add a family. Tokens are unique, ignoring ASCII case.
    pub fn register(&mut self, family: FamilyRef) -> Result<(), RegistryError> {
        let token = family.token();
        if token.is_empty() || token.contains('-') {
            return Err(RegistryError::InvalidToken(token.to_string()));
        }
        if self.get(token).is_some() {
            return Err(RegistryError::DuplicateToken(token.to_string()));
        }
        self.families.push(family);
        Ok(())
    }

    /// Add a configured family after checking its engine table.
    pub fn declare(&mut self, mut family: DeclaredFamily) -> Result<(), RegistryError> {
        family.token = family.token.to_ascii_lowercase();
        let bad = family.invalid_engine_keys();
        if !bad.is_empty() {
            return Err(RegistryError::EngineKey {
                token: family.token.clone(),
                keys: bad.into_iter().map(str::to_string).collect(),
            });
        }
        self.register(Arc::new(family))
    }

    pub fn add_alias(
        &mut self,
        alias: impl Into<String>,
        target: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let alias = alias.into().to_ascii_lowercase();
        let target = target.into().to_ascii_lowercase();
        if alias.is_empty() || alias.contains('-') {
            return Err(RegistryError::InvalidToken(alias));
        }
        if self.get(&alias).is_some() {
            return Err(RegistryError::DuplicateToken(alias));
        }
        if self.find(&target).is_none() {
            return Err(RegistryError::UnknownAlias { alias, target });
        }
        self.aliases.insert(alias, target);
        Ok(())
    }

    /// Family for `token` or one of its aliases, ignoring ASCII case.
    pub fn get(&self, token: &str) -> Option<FamilyRef> {
        self.find(token).or_else(|| {
            self.aliases
                .get(&token.to_ascii_lowercase())
                .and_then(|target| self.find(target))
        })
    }

    fn find(&self, token: &str) -> Option<FamilyRef> {
        self.families
            .iter()
            .find(|f| f.token().eq_ignore_ascii_case(token))
            .cloned()
    }

    pub fn families(&self) -> impl Iterator<Item = &FamilyRef> {
        self.families.iter()
    }

    pub fn tokens(&self) -> Vec<&str> {
        self.families.iter().map(|f| f.token()).collect()
    }

    pub fn parse(&self, text: &str) -> rtid_core::Result<RuntimeIdentity> {
        RuntimeIdentity::parse(text, self)
    }

    pub fn try_parse(&self, text: &str) -> Option<RuntimeIdentity> {
        RuntimeIdentity::try_parse(text, self)
    }

    pub fn from_framework_name(&self, name: &FrameworkName) -> rtid_core::Result<RuntimeIdentity> {
        RuntimeIdentity::from_framework_name(name, self)
    }

    /// Parse a descriptor like `.NETFramework,Version=v4.5,Profile=Client`.
    pub fn parse_framework_name(&self, text: &str) -> rtid_core::Result<RuntimeIdentity> {
        let name: FrameworkName = text.parse()?;
        self.from_framework_name(&name)
    }
}

impl Default for FamilyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FamilyResolver for FamilyRegistry {
    fn resolve_token(&self, token: &str) -> Option<FamilyRef> {
        self.get(token)
    }

    fn resolve_identifier(&self, identifier: &str) -> Option<FamilyRef> {
        self.families
            .iter()
            .find(|f| {
                f.framework_identifier()
                    .is_some_and(|id| id.eq_ignore_ascii_case(identifier))
            })
            .cloned()
    }
}
