mod common;

use common::CannedGenerator;
use psyreport_bedrock::error::GenerationError;
use psyreport_bedrock::service::ContentPart;
use psyreport_bedrock::synthesize::{SYNTHESIS_SCHEMA_NAME, synthesize};
use psyreport_core::models::record::{Gender, ReportRecord};
use psyreport_core::models::synthesis::{DEFAULT_SUMMARY, DEFAULT_TITLE, SynthesisResult};
use serde_json::json;

fn jane_doe() -> ReportRecord {
    ReportRecord {
        subject_name: "Jane Doe".to_string(),
        subject_age: "34".to_string(),
        subject_gender: Gender::Female,
        assessment_type: "MMPI-3".to_string(),
        results_text: "T=65".to_string(),
        observations_text: "Cooperative, euthymic".to_string(),
        ..ReportRecord::default()
    }
}

#[tokio::test]
async fn successful_answer_is_returned() {
    let generator = CannedGenerator::answering(json!({
        "suggestedTitle": "Psychodiagnostic Evaluation Report",
        "summary": "Findings within normal limits."
    }));

    let result = synthesize(&generator, &jane_doe()).await;

    assert_eq!(
        result,
        SynthesisResult {
            suggested_title: "Psychodiagnostic Evaluation Report".to_string(),
            summary: "Findings within normal limits.".to_string(),
        }
    );

    let request = generator.last_request();
    assert_eq!(request.schema.name, SYNTHESIS_SCHEMA_NAME);
    let ContentPart::Text(prompt) = &request.parts[0] else {
        panic!("expected a text prompt");
    };
    assert!(prompt.contains("Client: Jane Doe (34, Female)"));
    assert!(prompt.contains("Assessment: MMPI-3"));
    assert!(prompt.contains("Scores/Data: T=65"));
    assert!(prompt.contains("Mental Status/Observations: Cooperative, euthymic"));
}

#[tokio::test]
async fn provider_failure_yields_deterministic_fallback() {
    let generator = CannedGenerator::failing(GenerationError::Invocation("boom".into()));

    let result = synthesize(&generator, &jane_doe()).await;

    assert_eq!(result.suggested_title, "Assessment Report: MMPI-3");
    assert_eq!(
        result.summary,
        "Automatic clinical summary generation unavailable. Manual review required."
    );
}

#[tokio::test]
async fn fallback_holds_for_any_record() {
    for record in [ReportRecord::default(), jane_doe()] {
        let generator = CannedGenerator::failing(GenerationError::InputTooLarge("big".into()));
        let result = synthesize(&generator, &record).await;
        assert_eq!(result, SynthesisResult::fallback(&record.assessment_type));
    }
}

#[tokio::test]
async fn unparseable_answer_yields_fallback() {
    let generator = CannedGenerator::answering(json!("just a string"));
    let result = synthesize(&generator, &jane_doe()).await;
    assert_eq!(result, SynthesisResult::fallback("MMPI-3"));
}

#[tokio::test]
async fn empty_fields_get_defaults() {
    let generator = CannedGenerator::answering(json!({ "suggestedTitle": "  " }));
    let result = synthesize(&generator, &jane_doe()).await;
    assert_eq!(result.suggested_title, DEFAULT_TITLE);
    assert_eq!(result.summary, DEFAULT_SUMMARY);
}
