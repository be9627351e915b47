//! Overlay of extracted fields onto the current intake record.
//!
//! The policy is asymmetric:
//!
//! - name, age, assessment type, results and observations are last-write-wins:
//!   any value the extraction carries (even an empty one) replaces the record's
//!   value, and an absent value leaves it alone.
//! - gender keeps the record's value unless the extraction names one of the
//!   known options.
//! - the report date is never touched.
//!
//! Overwrites are reported back in a [`MergeReport`]; a non-empty value that
//! gets blanked is also logged so it never disappears silently.

use tracing::{debug, warn};

use crate::models::extraction::ExtractionResult;
use crate::models::record::{RecordField, ReportRecord};

/// Which fields a merge changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Fields whose value differs after the merge.
    pub changed: Vec<RecordField>,
    /// Fields whose non-empty value was replaced by an empty extracted value.
    pub cleared: Vec<RecordField>,
}

impl MergeReport {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

pub fn merge_extraction(record: &mut ReportRecord, extracted: &ExtractionResult) -> MergeReport {
    let mut report = MergeReport::default();

    overwrite(
        &mut record.subject_name,
        extracted.subject_name.as_deref(),
        RecordField::SubjectName,
        &mut report,
    );
    overwrite(
        &mut record.subject_age,
        extracted.subject_age.as_deref(),
        RecordField::SubjectAge,
        &mut report,
    );
    overwrite(
        &mut record.assessment_type,
        extracted.assessment_type.as_deref(),
        RecordField::AssessmentType,
        &mut report,
    );
    overwrite(
        &mut record.results_text,
        extracted.results_text.as_deref(),
        RecordField::ResultsText,
        &mut report,
    );
    overwrite(
        &mut record.observations_text,
        extracted.observations_text.as_deref(),
        RecordField::ObservationsText,
        &mut report,
    );

    match extracted.gender() {
        Some(gender) => {
            if gender != record.subject_gender {
                record.subject_gender = gender;
                report.changed.push(RecordField::SubjectGender);
            }
        }
        None => {
            debug!(
                extracted = ?extracted.subject_gender,
                kept = %record.subject_gender,
                "no usable gender in extraction, keeping current value"
            );
        }
    }

    report
}

fn overwrite(
    current: &mut String,
    incoming: Option<&str>,
    field: RecordField,
    report: &mut MergeReport,
) {
    let Some(incoming) = incoming else {
        return;
    };
    if incoming == current.as_str() {
        return;
    }

    if incoming.is_empty() {
        warn!(field = %field, "extraction returned an empty value; clearing entered text");
        report.cleared.push(field);
    }

    *current = incoming.to_string();
    report.changed.push(field);
}
