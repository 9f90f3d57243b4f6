use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocMatchError {
    #[error("Empty search query")]
    EmptyQuery,

    #[error("Document store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    #[error("Embedding service failure: {0}")]
    EmbeddingServiceFailure(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocMatchError {
    /// Errors caused by the request itself rather than a failing dependency
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::EmptyQuery)
    }
}

pub type Result<T> = std::result::Result<T, DocMatchError>;
