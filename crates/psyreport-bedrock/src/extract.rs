//! Structured extraction of intake fields from an uploaded image or CSV export.
//!
//! Both paths ask the model for the same six-field answer (see
//! [`extraction_schema`]). Text input is cut to [`TEXT_CHAR_BUDGET`]
//! characters first; most assessment exports carry the identifying data near
//! the top, and the cut keeps large CSVs under the provider's token limit.

use std::borrow::Cow;

use psyreport_core::ingest::IngestedPayload;
use psyreport_core::models::extraction::ExtractionResult;
use serde_json::json;
use tracing::{info, warn};

use crate::error::{ExtractionError, GenerationError};
use crate::service::{ContentPart, GenerationRequest, GenerationService, OutputSchema};

/// Maximum number of characters of text input sent for extraction.
pub const TEXT_CHAR_BUDGET: usize = 80_000;

/// Appended to text input that was cut at [`TEXT_CHAR_BUDGET`].
pub const TRUNCATION_MARKER: &str = "... [Content Truncated for Processing]";

pub const EXTRACTION_SCHEMA_NAME: &str = "record_assessment_fields";

const IMAGE_TOO_LARGE_MESSAGE: &str = "The image is too high-resolution or too large for the \
model to process in one pass. Try a smaller file or a screenshot of the relevant page.";

const TEXT_TOO_LARGE_MESSAGE: &str = "The file content is too large to process. Try uploading \
a smaller segment or a simplified CSV.";

const EXTRACTION_SYSTEM_PROMPT: &str = "\
You extract clinical psychological assessment data into a fixed set of fields. \
Map 'Client' or 'Patient' to subjectName. \
Map 'Assessment' or 'Test Battery' to assessmentType. \
Map 'Scores' to results. \
Map 'Mental Status' or 'Behavioral' notes to observations. \
subjectGender must be one of Male, Female or Other. \
Use an empty string for any field the source does not contain.";

const IMAGE_INSTRUCTION: &str = "\
Extract the clinical psychological data from this assessment image.";

const TEXT_INSTRUCTION: &str = "\
Parse the following data from a psychological test or assessment. \
Focus on identifying psychological test names (e.g. MMPI, WAIS, BDI) and clinical \
observations. If several clients appear, extract the first one. \
The data source follows.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputKind {
    Image,
    Text,
}

/// The six-field answer shape shared by every extraction request.
pub fn extraction_schema() -> OutputSchema {
    let text = |description: &str| json!({ "type": "string", "description": description });
    OutputSchema {
        name: EXTRACTION_SCHEMA_NAME.to_string(),
        description: "Record the intake fields found in the assessment source.".to_string(),
        json_schema: json!({
            "type": "object",
            "properties": {
                "subjectName": text("Full name of the client or patient."),
                "subjectAge": text("Age of the client, as written in the source."),
                "subjectGender": {
                    "type": "string",
                    "enum": ["Male", "Female", "Other"],
                    "description": "Gender of the client."
                },
                "assessmentType": text("Name of the psychological test or battery."),
                "results": text("Scores and metric data (raw, T-scores, percentiles)."),
                "observations": text("Mental status and behavioral observations.")
            },
            "required": [
                "subjectName",
                "subjectAge",
                "subjectGender",
                "assessmentType",
                "results",
                "observations"
            ]
        }),
    }
}

/// Cut `text` to its first [`TEXT_CHAR_BUDGET`] characters plus
/// [`TRUNCATION_MARKER`]. Shorter input is returned unchanged.
pub fn truncate_for_extraction(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(TEXT_CHAR_BUDGET) {
        Some((cut, _)) => Cow::Owned(format!("{}{TRUNCATION_MARKER}", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// Extract intake fields from an ingested upload.
pub async fn extract(
    service: &dyn GenerationService,
    payload: &IngestedPayload,
) -> Result<ExtractionResult, ExtractionError> {
    match payload {
        IngestedPayload::Image { mime_type, base64 } => {
            extract_from_image(service, base64, mime_type).await
        }
        IngestedPayload::Text(text) => extract_from_text(service, text).await,
    }
}

pub async fn extract_from_image(
    service: &dyn GenerationService,
    base64: &str,
    mime_type: &str,
) -> Result<ExtractionResult, ExtractionError> {
    let request = GenerationRequest {
        system_prompt: Some(EXTRACTION_SYSTEM_PROMPT.to_string()),
        parts: vec![
            ContentPart::InlineData {
                mime_type: mime_type.to_string(),
                data_base64: base64.to_string(),
            },
            ContentPart::Text(IMAGE_INSTRUCTION.to_string()),
        ],
        schema: extraction_schema(),
    };

    info!(model_id = service.model_id(), mime_type, "extracting fields from image");
    run_extraction(service, request, InputKind::Image).await
}

pub async fn extract_from_text(
    service: &dyn GenerationService,
    text: &str,
) -> Result<ExtractionResult, ExtractionError> {
    let content = truncate_for_extraction(text);
    if let Cow::Owned(_) = content {
        warn!(
            chars = text.chars().count(),
            budget = TEXT_CHAR_BUDGET,
            "text input truncated before extraction"
        );
    }

    let request = GenerationRequest {
        system_prompt: Some(EXTRACTION_SYSTEM_PROMPT.to_string()),
        parts: vec![
            ContentPart::Text(TEXT_INSTRUCTION.to_string()),
            ContentPart::Text(content.into_owned()),
        ],
        schema: extraction_schema(),
    };

    info!(model_id = service.model_id(), "extracting fields from text");
    run_extraction(service, request, InputKind::Text).await
}

async fn run_extraction(
    service: &dyn GenerationService,
    request: GenerationRequest,
    kind: InputKind,
) -> Result<ExtractionResult, ExtractionError> {
    let output = service.generate(request).await.map_err(|e| match e {
        GenerationError::InputTooLarge(detail) => {
            warn!(detail = %detail, "extraction input rejected as too large");
            ExtractionError::ContentTooLarge(
                match kind {
                    InputKind::Image => IMAGE_TOO_LARGE_MESSAGE,
                    InputKind::Text => TEXT_TOO_LARGE_MESSAGE,
                }
                .to_string(),
            )
        }
        other => ExtractionError::Failed(other),
    })?;

    let extracted: ExtractionResult = serde_json::from_value(output.json.clone()).map_err(|e| {
        ExtractionError::Failed(GenerationError::SchemaViolation(format!(
            "failed to parse ExtractionResult: {e}. Response: {}",
            output.json
        )))
    })?;

    info!(
        identifies_report = extracted.identifies_report(),
        "extraction complete"
    );

    Ok(extracted)
}
