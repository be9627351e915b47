use psyreport_core::models::record::{Gender, ReportRecord};
use psyreport_core::models::synthesis::SynthesisResult;
use psyreport_export::error::ExportError;
use psyreport_export::render::{UNSYNTHESIZED_SUMMARY, render_report, render_template};
use psyreport_export::styles::Letterhead;

fn jane_doe() -> ReportRecord {
    ReportRecord {
        subject_name: "Jane Doe".to_string(),
        subject_age: "34".to_string(),
        subject_gender: Gender::Female,
        assessment_type: "MMPI-3".to_string(),
        results_text: "T=65".to_string(),
        observations_text: "Cooperative, euthymic".to_string(),
        report_date: jiff::civil::date(2024, 5, 1),
    }
}

#[test]
fn renders_every_section_in_order() {
    let synthesis = SynthesisResult {
        suggested_title: "Psychodiagnostic Evaluation Report".to_string(),
        summary: "Findings within normal limits.".to_string(),
    };

    let rendered = render_report(&jane_doe(), Some(&synthesis), &Letterhead::default()).unwrap();

    let sections = [
        "24/7 HOSPITAL PSYCHOLOGICAL SERVICES",
        "**ASSESSMENT TITLE:** Psychodiagnostic Evaluation Report",
        "## CLIENT INFORMATION",
        "Name: Jane Doe",
        "Age/Gender: 34 / Female",
        "Date of Evaluation: 2024-05-01",
        "## ASSESSMENT BATTERY",
        "Test Type: MMPI-3",
        "Scores & Metrics: T=65",
        "## BEHAVIORAL OBSERVATIONS",
        "Cooperative, euthymic",
        "## EXECUTIVE CLINICAL SUMMARY",
        "Findings within normal limits.",
        "> _Digitally signed by Department of Psychology_",
    ];

    let mut cursor = 0;
    for section in sections {
        let found = rendered[cursor..]
            .find(section)
            .unwrap_or_else(|| panic!("missing or out of order: {section}\n{rendered}"));
        cursor += found + section.len();
    }
}

#[test]
fn missing_synthesis_uses_neutral_title_and_summary() {
    let rendered = render_report(&jane_doe(), None, &Letterhead::default()).unwrap();
    assert!(rendered.contains("**ASSESSMENT TITLE:** MMPI-3 Evaluation"));
    assert!(rendered.contains(UNSYNTHESIZED_SUMMARY));
}

#[test]
fn html_characters_in_field_values_are_kept() {
    let mut record = jane_doe();
    record.results_text = "Scale 2 <T=65> & rising".to_string();
    let rendered = render_report(&record, None, &Letterhead::default()).unwrap();
    assert!(rendered.contains("Scores & Metrics: Scale 2 <T=65> & rising"));
}

#[test]
fn custom_templates_see_the_same_context() {
    let rendered = render_template(
        "short.md",
        "{{ title }} for {{ record.subjectName }} by {{ letterhead.signature }}",
        &jane_doe(),
        None,
        &Letterhead {
            signature: "Dr. Smith".to_string(),
            ..Letterhead::default()
        },
    )
    .unwrap();
    assert_eq!(rendered, "MMPI-3 Evaluation for Jane Doe by Dr. Smith");
}

#[test]
fn broken_template_is_a_parse_error() {
    let err = render_template("bad.md", "{{ unclosed", &jane_doe(), None, &Letterhead::default())
        .unwrap_err();
    assert!(matches!(err, ExportError::TemplateParse(_)));
}
