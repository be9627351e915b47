//! psyreport-export
//!
//! DOCX generation for a finished intake record: the record and its
//! synthesis are rendered through a Tera template into a Markdown-ish report,
//! which is then laid out as a Word document.

pub mod docx;
pub mod error;
pub mod filename;
pub mod render;
pub mod styles;

use psyreport_core::models::record::ReportRecord;
use psyreport_core::models::synthesis::SynthesisResult;
use tracing::info;

use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// A finished document, ready to be saved under `filename`.
#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Render and lay out the report for `record`.
///
/// Fails without producing any bytes if the record lacks a subject name or
/// assessment type, or if rendering or packing fails.
pub fn export_report(
    record: &ReportRecord,
    synthesis: Option<&SynthesisResult>,
    styles: &DocumentStyles,
) -> Result<ExportedReport, ExportError> {
    record.ensure_complete()?;

    let rendered = render::render_report(record, synthesis, &styles.letterhead)?;
    let bytes = docx::generate_docx(&rendered, styles)?;
    let filename = filename::report_filename(&record.subject_name);

    info!(
        filename = %filename,
        bytes = bytes.len(),
        with_synthesis = synthesis.is_some(),
        "report exported"
    );

    Ok(ExportedReport { filename, bytes })
}
