//! Integration tests against a real Bedrock endpoint.
//!
//! These tests require valid AWS credentials in the environment and model
//! access for `PSYREPORT_MODEL_ID`.
//!
//! Run with: `cargo test -p psyreport-bedrock --test live_bedrock -- --ignored`

use psyreport_bedrock::bedrock::BedrockGenerator;
use psyreport_bedrock::extract::extract_from_text;
use psyreport_bedrock::synthesize::synthesize;
use psyreport_core::models::record::ReportRecord;

async fn build_generator() -> BedrockGenerator {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new("us-east-1"))
        .load()
        .await;
    let model_id = std::env::var("PSYREPORT_MODEL_ID")
        .unwrap_or_else(|_| "us.anthropic.claude-sonnet-4-20250514-v1:0".to_string());
    BedrockGenerator::new(&config, model_id)
}

#[tokio::test]
#[ignore]
async fn extracts_fields_from_csv_text() {
    let generator = build_generator().await;
    let csv = "Client,Age,Gender,Assessment,Scores,Mental Status\n\
               Jane Doe,34,Female,MMPI-3,T=65 on scale 2,Cooperative and euthymic\n";

    let extracted = extract_from_text(&generator, csv)
        .await
        .expect("extraction should succeed");

    println!("{extracted:#?}");
    assert_eq!(extracted.subject_name.as_deref(), Some("Jane Doe"));
}

#[tokio::test]
#[ignore]
async fn synthesizes_title_and_summary() {
    let generator = build_generator().await;
    let record = ReportRecord {
        subject_name: "Jane Doe".to_string(),
        assessment_type: "MMPI-3".to_string(),
        results_text: "T=65 on scale 2".to_string(),
        ..ReportRecord::default()
    };

    let result = synthesize(&generator, &record).await;

    println!("{result:#?}");
    assert!(!result.suggested_title.is_empty());
}
