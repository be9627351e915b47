use psyreport_core::merge::merge_extraction;
use psyreport_core::models::extraction::ExtractionResult;
use psyreport_core::models::record::{Gender, RecordField, ReportRecord};

fn entered_record() -> ReportRecord {
    ReportRecord {
        subject_name: "John Roe".to_string(),
        subject_age: "41".to_string(),
        subject_gender: Gender::Other,
        assessment_type: "BDI-II".to_string(),
        results_text: "Total 12".to_string(),
        observations_text: "Calm".to_string(),
        ..ReportRecord::default()
    }
}

#[test]
fn non_empty_values_replace_entered_text() {
    let mut record = entered_record();
    let date = record.report_date;
    let extracted = ExtractionResult {
        subject_name: Some("Jane Doe".to_string()),
        subject_age: Some("34".to_string()),
        subject_gender: Some("Female".to_string()),
        assessment_type: Some("MMPI-3".to_string()),
        results_text: Some("T=65".to_string()),
        observations_text: Some("Cooperative, euthymic".to_string()),
    };

    let report = merge_extraction(&mut record, &extracted);

    assert_eq!(record.subject_name, "Jane Doe");
    assert_eq!(record.subject_age, "34");
    assert_eq!(record.subject_gender, Gender::Female);
    assert_eq!(record.assessment_type, "MMPI-3");
    assert_eq!(record.results_text, "T=65");
    assert_eq!(record.observations_text, "Cooperative, euthymic");
    assert_eq!(record.report_date, date);
    assert_eq!(report.changed.len(), 6);
    assert!(report.cleared.is_empty());
}

#[test]
fn absent_gender_keeps_previous_value() {
    for gender in [None, Some(""), Some("  "), Some("unknown")] {
        let mut record = entered_record();
        let extracted = ExtractionResult {
            subject_gender: gender.map(str::to_string),
            ..ExtractionResult::default()
        };

        let report = merge_extraction(&mut record, &extracted);

        assert_eq!(record.subject_gender, Gender::Other, "gender input {gender:?}");
        assert!(!report.changed.contains(&RecordField::SubjectGender));
    }
}

#[test]
fn gender_is_matched_case_insensitively() {
    let mut record = entered_record();
    let extracted = ExtractionResult {
        subject_gender: Some(" male ".to_string()),
        ..ExtractionResult::default()
    };
    merge_extraction(&mut record, &extracted);
    assert_eq!(record.subject_gender, Gender::Male);
}

#[test]
fn absent_fields_are_left_alone() {
    let mut record = entered_record();
    let before = record.clone();

    let report = merge_extraction(&mut record, &ExtractionResult::default());

    assert_eq!(record, before);
    assert!(report.is_empty());
}

#[test]
fn empty_values_overwrite_and_are_reported() {
    let mut record = entered_record();
    let extracted = ExtractionResult {
        observations_text: Some(String::new()),
        subject_age: Some("41".to_string()),
        ..ExtractionResult::default()
    };

    let report = merge_extraction(&mut record, &extracted);

    assert_eq!(record.observations_text, "");
    assert_eq!(record.subject_age, "41");
    assert_eq!(report.changed, vec![RecordField::ObservationsText]);
    assert_eq!(report.cleared, vec![RecordField::ObservationsText]);
}
