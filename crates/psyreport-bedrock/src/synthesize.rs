//! Report title and executive summary generation.
//!
//! [`synthesize`] never fails. A provider error or an unusable answer yields
//! [`SynthesisResult::fallback`], so a clinician can always export.

use psyreport_core::models::record::ReportRecord;
use psyreport_core::models::synthesis::{DEFAULT_SUMMARY, DEFAULT_TITLE, SynthesisResult};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::error::GenerationError;
use crate::service::{ContentPart, GenerationRequest, GenerationService, OutputSchema};

pub const SYNTHESIS_SCHEMA_NAME: &str = "record_report_synthesis";

const SYNTHESIS_SYSTEM_PROMPT: &str = "\
You are an expert clinical psychologist. Based on the assessment data provided, \
suggest a formal report title and write a three-sentence executive clinical summary, \
including diagnostic impressions where applicable.";

/// Raw answer shape; fields are optional so a partial answer still parses.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SynthesisAnswer {
    suggested_title: Option<String>,
    summary: Option<String>,
}

pub fn synthesis_schema() -> OutputSchema {
    OutputSchema {
        name: SYNTHESIS_SCHEMA_NAME.to_string(),
        description: "Record the report title and executive clinical summary.".to_string(),
        json_schema: json!({
            "type": "object",
            "properties": {
                "suggestedTitle": {
                    "type": "string",
                    "description": "A formal title, e.g. 'Neuropsychological Assessment Summary' or 'Psychodiagnostic Evaluation Report'."
                },
                "summary": {
                    "type": "string",
                    "description": "A concise three-sentence clinical summary of the findings."
                }
            },
            "required": ["suggestedTitle", "summary"]
        }),
    }
}

/// The assessment data block sent to the model.
pub fn synthesis_prompt(record: &ReportRecord) -> String {
    format!(
        "Client: {name} ({age}, {gender})\n\
         Assessment: {assessment}\n\
         Scores/Data: {results}\n\
         Mental Status/Observations: {observations}",
        name = record.subject_name,
        age = record.subject_age,
        gender = record.subject_gender,
        assessment = record.assessment_type,
        results = record.results_text,
        observations = record.observations_text,
    )
}

pub async fn synthesize(service: &dyn GenerationService, record: &ReportRecord) -> SynthesisResult {
    match request_synthesis(service, record).await {
        Ok(result) => {
            info!(title = %result.suggested_title, "synthesis complete");
            result
        }
        Err(e) => {
            warn!(
                error = %e,
                assessment_type = %record.assessment_type,
                "synthesis failed, using fallback"
            );
            SynthesisResult::fallback(&record.assessment_type)
        }
    }
}

async fn request_synthesis(
    service: &dyn GenerationService,
    record: &ReportRecord,
) -> Result<SynthesisResult, GenerationError> {
    let request = GenerationRequest {
        system_prompt: Some(SYNTHESIS_SYSTEM_PROMPT.to_string()),
        parts: vec![ContentPart::Text(synthesis_prompt(record))],
        schema: synthesis_schema(),
    };

    info!(model_id = service.model_id(), "requesting report synthesis");
    let output = service.generate(request).await?;

    let answer: SynthesisAnswer = serde_json::from_value(output.json)?;

    Ok(SynthesisResult {
        suggested_title: non_empty(answer.suggested_title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        summary: non_empty(answer.summary).unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
