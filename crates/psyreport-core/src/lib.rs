//! psyreport-core
//!
//! Pure domain types for the assessment intake pipeline: the report record,
//! extraction/synthesis results, the merge policy, and file ingestion.
//! No AWS SDK dependency: this is the shared vocabulary of the workspace.

pub mod assessments;
pub mod error;
pub mod ingest;
pub mod merge;
pub mod models;
