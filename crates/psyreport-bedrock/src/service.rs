//! The narrow seam between the intake pipeline and a hosted model.
//!
//! Callers describe *what* they want (content parts plus a JSON schema the
//! answer must satisfy) and get back the answer as JSON. Nothing above this
//! module knows which provider is on the other side, so tests swap in a
//! canned implementation.

use psyreport_core::models::token_count::TokenCount;

pub use psyreport_core::ingest::BoxFuture;

use crate::error::GenerationError;

/// One piece of the user turn sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    /// Binary content (an image), base64 encoded, with its MIME type.
    InlineData {
        mime_type: String,
        data_base64: String,
    },
}

/// The JSON shape the model's answer must follow.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    /// Identifier for the schema. Letters, digits and underscores only.
    pub name: String,
    pub description: String,
    /// A JSON Schema object describing the answer.
    pub json_schema: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_prompt: Option<String>,
    pub parts: Vec<ContentPart>,
    pub schema: OutputSchema,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutput {
    /// The answer, already parsed as JSON.
    pub json: serde_json::Value,
    pub usage: Option<TokenCount>,
}

/// A model that answers a prompt with JSON conforming to a schema.
///
/// Methods return boxed futures for dyn compatibility.
pub trait GenerationService: Send + Sync {
    fn model_id(&self) -> &str;

    fn generate(
        &self,
        request: GenerationRequest,
    ) -> BoxFuture<'_, Result<GenerationOutput, GenerationError>>;
}
