//! Typed failures surfaced by the core.

/// Problems found while reading or validating the model registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("model registry is empty")]
    Empty,

    #[error("model at index {0} has an empty name")]
    EmptyName(usize),

    #[error("duplicate model name: {0}")]
    DuplicateName(String),

    #[error("model {name} has invalid scale {scale}")]
    InvalidScale { name: String, scale: f32 },

    #[error("portal model {0} is not in the registry")]
    UnknownPortal(String),

    #[error("portal model {0} must belong to the default facet")]
    PortalOutsideDefaultFacet(String),

    #[error("invalid registry json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Problems turning fetched bytes into a renderable model.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: gltf::Error,
    },

    #[error("{path} requires unsupported extension {extension}")]
    UnsupportedExtension { path: String, extension: String },

    #[error("{path} references buffer data outside the binary chunk")]
    ExternalBuffer { path: String },

    #[error("{path} has a primitive without positions")]
    MissingPositions { path: String },

    #[error("{path} has no renderable triangles")]
    Empty { path: String },
}
