use thiserror::Error;

use psyreport_bedrock::error::ExtractionError;
use psyreport_core::error::{CoreError, IngestError};

/// Errors surfaced to the user by the intake commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Record(#[from] CoreError),

    #[error("export failed: {0}")]
    ExportFailed(String),
}
