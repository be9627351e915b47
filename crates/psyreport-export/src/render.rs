use serde::Serialize;
use tera::{Context, Tera};

use psyreport_core::models::record::ReportRecord;
use psyreport_core::models::synthesis::SynthesisResult;

use crate::docx::escape_markup;
use crate::error::ExportError;
use crate::styles::Letterhead;

pub const REPORT_TEMPLATE_NAME: &str = "psych_report.md";

/// Summary printed when no synthesis was generated.
pub const UNSYNTHESIZED_SUMMARY: &str = "Findings reviewed and documented for the clinical record.";

/// The fixed report layout. See [`crate::docx::generate_docx`] for the markup.
pub const REPORT_TEMPLATE: &str = r#"^ # {{ letterhead.organisation }}
^ _{{ letterhead.tagline }}_

**ASSESSMENT TITLE:** {{ title }}

## CLIENT INFORMATION
Name: {{ record.subjectName }}
Age/Gender: {{ record.subjectAge }} / {{ record.subjectGender }}
Date of Evaluation: {{ record.reportDate }}

## ASSESSMENT BATTERY
Test Type: {{ record.assessmentType }}
Scores & Metrics: {{ record.resultsText }}

## BEHAVIORAL OBSERVATIONS
{{ record.observationsText }}

## EXECUTIVE CLINICAL SUMMARY
{{ summary }}


> _{{ letterhead.signature }}_
"#;

#[derive(Serialize)]
struct ReportContext<'a> {
    record: &'a ReportRecord,
    letterhead: &'a Letterhead,
    title: String,
    summary: &'a str,
}

/// Render the standard report for a record and its optional synthesis.
///
/// Without a synthesis the title falls back to `"{assessment type} Evaluation"`
/// and the summary to [`UNSYNTHESIZED_SUMMARY`].
pub fn render_report(
    record: &ReportRecord,
    synthesis: Option<&SynthesisResult>,
    letterhead: &Letterhead,
) -> Result<String, ExportError> {
    render_template(REPORT_TEMPLATE_NAME, REPORT_TEMPLATE, record, synthesis, letterhead)
}

/// Render a Tera template against a record.
///
/// The template sees `record` (camelCase field names), `letterhead`, `title`
/// and `summary`. Every `{{ ... }}` string is escaped with
/// [`escape_markup`], so values come out literally in the document; `| safe`
/// opts out.
pub fn render_template(
    template_name: &str,
    template_content: &str,
    record: &ReportRecord,
    synthesis: Option<&SynthesisResult>,
    letterhead: &Letterhead,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![""]);
    tera.set_escape_fn(escape_markup);
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let report = ReportContext {
        record,
        letterhead,
        title: synthesis
            .map(|s| s.suggested_title.clone())
            .unwrap_or_else(|| format!("{} Evaluation", record.assessment_type)),
        summary: synthesis
            .map(|s| s.summary.as_str())
            .unwrap_or(UNSYNTHESIZED_SUMMARY),
    };

    let value = serde_json::to_value(&report)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}
