//! psyreport-bedrock
//!
//! Schema-constrained model invocation: the provider-agnostic
//! [`service::GenerationService`] seam, its Bedrock Converse implementation,
//! and the extraction and synthesis clients built on top of it.

pub mod bedrock;
pub mod document;
pub mod error;
pub mod extract;
pub mod service;
pub mod synthesize;
pub mod tokens;
