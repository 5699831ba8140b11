use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("REGISTRY/YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("REGISTRY/IO {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("REGISTRY/DUPLICATE: family token '{0}' is already registered")]
    DuplicateToken(String),

    #[error("REGISTRY/ALIAS: alias '{alias}' points at unknown family '{target}'")]
    UnknownAlias { alias: String, target: String },

    #[error("REGISTRY/ENGINE: family '{token}' has invalid engine version keys {keys:?}")]
    EngineKey { token: String, keys: Vec<String> },

    #[error("REGISTRY/TOKEN: '{0}' is not a valid family token")]
    InvalidToken(String),
}
