use serde::{Deserialize, Serialize};

/// Summary text used when the generation service cannot produce one.
pub const FALLBACK_SUMMARY: &str =
    "Automatic clinical summary generation unavailable. Manual review required.";

/// Title used when a successful response leaves the title empty.
pub const DEFAULT_TITLE: &str = "Psychological Assessment Report";

/// Summary used when a successful response leaves the summary empty.
pub const DEFAULT_SUMMARY: &str = "Findings documented for clinical review.";

/// A formal report title and a short narrative summary for a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisResult {
    pub suggested_title: String,
    pub summary: String,
}

impl SynthesisResult {
    /// The deterministic result returned when synthesis fails.
    pub fn fallback(assessment_type: &str) -> Self {
        Self {
            suggested_title: format!("Assessment Report: {assessment_type}"),
            summary: FALLBACK_SUMMARY.to_string(),
        }
    }
}
