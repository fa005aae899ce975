//! Error types for DocQA.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed cause carried by errors that wrap a third-party failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed: {}", .fields.join("; "))]
    Validation { fields: Vec<String> },

    #[error("Invalid prompt type: \"{0}\". Expected one of: default, detailed, concise, technical")]
    InvalidPromptType(String),

    #[error("Failed to load {} file at {}: {}", display_extension(.extension), .path.display(), .source)]
    Load {
        path: PathBuf,
        extension: String,
        #[source]
        source: BoxError,
    },

    #[error("{variable} is required when MODEL_PROVIDER={provider}")]
    MissingCredential { variable: String, provider: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported MODEL_PROVIDER: \"{}\". Supported providers: {}", .provider, .supported.join(", "))]
    UnsupportedProvider {
        provider: String,
        supported: Vec<String>,
    },

    #[error("{0}")]
    ModelInvocation(#[source] BoxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap a loader failure with the file it came from.
    pub fn load(
        path: impl Into<PathBuf>,
        extension: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Load {
            path: path.into(),
            extension: extension.into(),
            source: source.into(),
        }
    }

    /// Wrap a provider failure without altering its message.
    pub fn model_invocation(source: impl Into<BoxError>) -> Self {
        Self::ModelInvocation(source.into())
    }
}

fn display_extension(ext: &str) -> &str {
    if ext.is_empty() {
        "(no extension)"
    } else {
        ext
    }
}

pub type Result<T> = std::result::Result<T, Error>;
