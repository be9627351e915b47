use serde::{Deserialize, Serialize};

use super::record::Gender;

/// A partial record extracted from an uploaded file by the generation service.
///
/// The extraction schema marks every field as required, but providers are not
/// trusted to honour it, so each field stays optional here. Wire keys match
/// the extraction schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionResult {
    pub subject_name: Option<String>,
    pub subject_age: Option<String>,
    pub subject_gender: Option<String>,
    pub assessment_type: Option<String>,
    #[serde(rename = "results")]
    pub results_text: Option<String>,
    #[serde(rename = "observations")]
    pub observations_text: Option<String>,
}

impl ExtractionResult {
    /// The extracted gender, if it names one of the known options.
    pub fn gender(&self) -> Option<Gender> {
        self.subject_gender.as_deref().and_then(|g| g.parse().ok())
    }

    /// Whether the extraction identified the subject or the assessment.
    ///
    /// Used to decide if a synthesis pass is worth running right after an
    /// upload.
    pub fn identifies_report(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.subject_name) || filled(&self.assessment_type)
    }
}
