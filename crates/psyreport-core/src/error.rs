use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid gender: {0} (expected Male, Female or Other)")]
    InvalidGender(String),

    #[error("invalid report date: {0}")]
    InvalidDate(String),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file is too large ({size} bytes, max {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("unsupported file type: {0:?} (expected a CSV or an image)")]
    UnsupportedFileType(String),

    #[error("failed to read file {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
