use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assessments::OTHER_ASSESSMENT;
use crate::error::CoreError;

/// The editable intake record for one clinical report.
///
/// A fresh record has empty text fields, `Male` as the gender selection and
/// today's local date, matching the blank intake form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportRecord {
    pub subject_name: String,
    pub subject_age: String,
    pub subject_gender: Gender,
    pub assessment_type: String,
    pub results_text: String,
    pub observations_text: String,
    pub report_date: jiff::civil::Date,
}

impl Default for ReportRecord {
    fn default() -> Self {
        Self {
            subject_name: String::new(),
            subject_age: String::new(),
            subject_gender: Gender::default(),
            assessment_type: String::new(),
            results_text: String::new(),
            observations_text: String::new(),
            report_date: jiff::Zoned::now().date(),
        }
    }
}

impl ReportRecord {
    /// Apply a single-field edit coming from the intake surface.
    ///
    /// Choosing the "Other / Custom Assessment" entry from the catalog does
    /// not change the assessment type; the custom name is entered separately.
    pub fn set_field(&mut self, field: RecordField, value: &str) -> Result<(), CoreError> {
        match field {
            RecordField::SubjectName => self.subject_name = value.to_string(),
            RecordField::SubjectAge => self.subject_age = value.to_string(),
            RecordField::SubjectGender => self.subject_gender = value.parse()?,
            RecordField::AssessmentType => {
                if value != OTHER_ASSESSMENT {
                    self.assessment_type = value.to_string();
                }
            }
            RecordField::ResultsText => self.results_text = value.to_string(),
            RecordField::ObservationsText => self.observations_text = value.to_string(),
            RecordField::ReportDate => {
                self.report_date = value
                    .trim()
                    .parse()
                    .map_err(|e: jiff::Error| CoreError::InvalidDate(format!("{value:?}: {e}")))?;
            }
        }
        Ok(())
    }

    /// Fields that must be filled before synthesis or export is allowed.
    pub fn missing_required_fields(&self) -> Vec<RecordField> {
        let mut missing = Vec::new();
        if self.subject_name.trim().is_empty() {
            missing.push(RecordField::SubjectName);
        }
        if self.assessment_type.trim().is_empty() {
            missing.push(RecordField::AssessmentType);
        }
        missing
    }

    /// Fail with `MissingField` naming the first required field left blank.
    pub fn ensure_complete(&self) -> Result<(), CoreError> {
        match self.missing_required_fields().first() {
            Some(field) => Err(CoreError::MissingField(field.to_string())),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        [Gender::Male, Gender::Female, Gender::Other]
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::InvalidGender(s.to_string()))
    }
}

/// Names one editable field of a [`ReportRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    SubjectName,
    SubjectAge,
    SubjectGender,
    AssessmentType,
    ResultsText,
    ObservationsText,
    ReportDate,
}

impl RecordField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::SubjectName => "subjectName",
            RecordField::SubjectAge => "subjectAge",
            RecordField::SubjectGender => "subjectGender",
            RecordField::AssessmentType => "assessmentType",
            RecordField::ResultsText => "resultsText",
            RecordField::ObservationsText => "observationsText",
            RecordField::ReportDate => "reportDate",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
