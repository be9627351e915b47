use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use psyreport_bedrock::extract::extract;
use psyreport_bedrock::synthesize::synthesize;
use psyreport_core::ingest::{FileHandle, ingest};
use psyreport_core::merge::{MergeReport, merge_extraction};
use psyreport_core::models::record::{RecordField, ReportRecord};
use psyreport_core::models::synthesis::SynthesisResult;
use psyreport_export::styles::DocumentStyles;
use psyreport_export::{ExportedReport, export_report};

use crate::error::CommandError;
use crate::session::{Action, SessionSnapshot};
use crate::state::IntakeState;

/// What an upload did to the session.
#[derive(Debug, Clone)]
pub enum UploadOutcome {
    /// The extraction was merged into the record. `synthesis` is set when the
    /// extraction identified the report and a fresh synthesis was stored.
    Merged {
        merge: MergeReport,
        synthesis: Option<SynthesisResult>,
    },
    /// A newer upload or a reset overtook this one; nothing was applied.
    Superseded,
}

/// Ingest a file, extract intake fields from it and merge them into the
/// record.
///
/// If the extraction names the subject or the assessment, the report is
/// synthesized from the merged record straight away. Ingestion and extraction
/// failures leave the record untouched.
pub async fn upload_assessment(
    state: &IntakeState,
    file: &dyn FileHandle,
) -> Result<UploadOutcome, CommandError> {
    let ticket = state.session.lock().await.activity.begin(Action::Extract);

    let extracted = match ingest_and_extract(state, file).await {
        Ok(extracted) => extracted,
        Err(e) => {
            let mut session = state.session.lock().await;
            if !session.activity.finish(ticket, false) {
                warn!(file = file.name(), error = %e, "superseded upload failed, ignoring");
                return Ok(UploadOutcome::Superseded);
            }
            warn!(file = file.name(), error = %e, "upload failed");
            return Err(e);
        }
    };

    let merge = {
        let mut session = state.session.lock().await;
        if !session.activity.finish(ticket, true) {
            warn!(
                file = file.name(),
                generation = ticket.generation,
                "discarding stale extraction result"
            );
            return Ok(UploadOutcome::Superseded);
        }
        merge_extraction(&mut session.record, &extracted)
    };

    info!(
        file = file.name(),
        changed = merge.changed.len(),
        cleared = merge.cleared.len(),
        "extraction merged into record"
    );

    let synthesis = if extracted.identifies_report() {
        synthesize_current(state).await
    } else {
        None
    };

    Ok(UploadOutcome::Merged { merge, synthesis })
}

async fn ingest_and_extract(
    state: &IntakeState,
    file: &dyn FileHandle,
) -> Result<psyreport_core::models::extraction::ExtractionResult, CommandError> {
    let payload = ingest(file).await?;
    let extracted = extract(state.generator.as_ref(), &payload).await?;
    Ok(extracted)
}

/// Synthesize a title and summary for the current record.
///
/// Requires a subject name and assessment type. Returns `None` if the request
/// was superseded before it finished.
pub async fn generate_synthesis(
    state: &IntakeState,
) -> Result<Option<SynthesisResult>, CommandError> {
    state.session.lock().await.record.ensure_complete()?;
    Ok(synthesize_current(state).await)
}

async fn synthesize_current(state: &IntakeState) -> Option<SynthesisResult> {
    let (ticket, record) = {
        let mut session = state.session.lock().await;
        let ticket = session.activity.begin(Action::Synthesize);
        (ticket, session.record.clone())
    };

    let result = synthesize(state.generator.as_ref(), &record).await;

    let mut session = state.session.lock().await;
    if !session.activity.finish(ticket, true) {
        warn!(
            generation = ticket.generation,
            "discarding stale synthesis result"
        );
        return None;
    }
    session.synthesis = Some(result.clone());
    Some(result)
}

/// Export the current record as a `.docx` into `out_dir` and return the
/// written path.
///
/// The file is written to a temporary name and renamed into place, so a
/// failed export never leaves a partial document behind.
pub async fn download_report(state: &IntakeState, out_dir: &Path) -> Result<PathBuf, CommandError> {
    let (ticket, record, synthesis) = {
        let mut session = state.session.lock().await;
        let ticket = session.activity.begin(Action::Export);
        (ticket, session.record.clone(), session.synthesis.clone())
    };

    let result = export_and_save(&record, synthesis.as_ref(), &state.styles, out_dir).await;

    let current = state
        .session
        .lock()
        .await
        .activity
        .finish(ticket, result.is_ok());

    match &result {
        Ok(path) => info!(path = %path.display(), current, "report saved"),
        Err(e) => error!(error = %e, out_dir = %out_dir.display(), "report export failed"),
    }

    result
}

async fn export_and_save(
    record: &ReportRecord,
    synthesis: Option<&SynthesisResult>,
    styles: &DocumentStyles,
    out_dir: &Path,
) -> Result<PathBuf, CommandError> {
    record.ensure_complete()?;
    let report = export_report(record, synthesis, styles)
        .map_err(|e| CommandError::ExportFailed(e.to_string()))?;
    write_report(out_dir, &report).await
}

async fn write_report(dir: &Path, report: &ExportedReport) -> Result<PathBuf, CommandError> {
    let bare_name = Path::new(&report.filename).file_name() == Some(OsStr::new(&report.filename));
    if report.filename.contains(['/', '\\']) || !bare_name {
        return Err(CommandError::ExportFailed(format!(
            "refusing to write unsafe filename {:?}",
            report.filename
        )));
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| CommandError::ExportFailed(format!("create {}: {e}", dir.display())))?;

    let target = dir.join(&report.filename);
    let partial = dir.join(format!(".{}.partial", report.filename));

    if let Err(e) = tokio::fs::write(&partial, &report.bytes).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(CommandError::ExportFailed(format!(
            "write {}: {e}",
            partial.display()
        )));
    }

    if let Err(e) = tokio::fs::rename(&partial, &target).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(CommandError::ExportFailed(format!(
            "rename to {}: {e}",
            target.display()
        )));
    }

    Ok(target)
}

pub async fn set_field(
    state: &IntakeState,
    field: RecordField,
    value: &str,
) -> Result<(), CommandError> {
    state.session.lock().await.record.set_field(field, value)?;
    Ok(())
}

/// Replace the whole record, e.g. with one loaded from disk. Any stored
/// synthesis belonged to the old record and is dropped.
pub async fn load_record(state: &IntakeState, record: ReportRecord) {
    let mut session = state.session.lock().await;
    session.record = record;
    session.synthesis = None;
}

/// Store a synthesis produced elsewhere, e.g. a previously saved one.
pub async fn set_synthesis(state: &IntakeState, synthesis: SynthesisResult) {
    state.session.lock().await.synthesis = Some(synthesis);
}

pub async fn reset_intake(state: &IntakeState) {
    state.session.lock().await.reset();
    info!("intake reset");
}

pub async fn snapshot(state: &IntakeState) -> SessionSnapshot {
    state.session.lock().await.snapshot()
}
