use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("input exceeds the model's size limit: {0}")]
    InputTooLarge(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("response did not conform to expected schema: {0}")]
    SchemaViolation(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported media: {0}")]
    UnsupportedMedia(String),

    #[error("AWS config error: {0}")]
    Config(String),
}

/// Failure of the extraction client.
///
/// `ContentTooLarge` carries a message meant for the end user; everything
/// else wraps the provider error as-is.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("{0}")]
    ContentTooLarge(String),

    #[error("extraction failed: {0}")]
    Failed(#[source] GenerationError),
}
