use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoloError {
    #[error("No such field: {0}")]
    NoSuchField(String),

    #[error("Invalid value for {field}: {value:?} ({reason})")]
    InvalidFieldValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid backend: {0}")]
    InvalidBackend(String),

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    #[error("No backend found for {0}")]
    NoBackendFound(String),

    #[error("Entry not found in phonebook")]
    NotFound,

    #[error("No fields specified")]
    NoFieldsSpecified,

    #[error("Not a valid URI: {0}")]
    InvalidUri(String),

    #[error("IO error at {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed data in {location}: {message}")]
    Format { location: String, message: String },
}

impl RoloError {
    /// Wrap an IO error with the location it occurred at.
    pub(crate) fn io(location: impl Into<String>, source: std::io::Error) -> Self {
        RoloError::Io {
            location: location.into(),
            source,
        }
    }

    pub(crate) fn format(location: impl Into<String>, message: impl Into<String>) -> Self {
        RoloError::Format {
            location: location.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RoloError>;
