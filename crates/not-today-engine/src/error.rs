use thiserror::Error;

/// Errors raised by the engine's collaborators (storage, dictionary, config).
#[derive(Debug, Error)]
pub enum Error {
    /// The key-value store could not be reached or refused the operation.
    #[error("storage unavailable: {0}")]
    Storage(String),
    /// A stored counter could not be parsed as a non-negative integer.
    #[error("stored value for `{key}` is not a valid count: {value:?}")]
    CorruptValue { key: String, value: String },
    /// No word can be chosen from an empty dictionary.
    #[error("dictionary must contain at least one word")]
    EmptyDictionary,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
