//! The fetch → automate-or-fallback → write loop

use crate::config::ScribeConfig;
use crate::errors::ScribeError;
use crate::format::compose;
use crate::output::{destination_for, ensure_output_dir, FallbackWriter, FsFallbackWriter};
use crate::platforms::{create_driver, EditorDriver, InertDriver};
use crate::record::Record;
use crate::source::{HttpRecordSource, RecordSource};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{error, info, instrument, warn};

/// Tally of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub fetched: usize,
    pub saved_by_editor: usize,
    pub written_by_fallback: usize,
    /// Records for which the fallback write failed too
    pub failed: usize,
    pub output_dir: PathBuf,
}

enum Disposition {
    SavedByEditor,
    WrittenByFallback,
    Failed,
}

/// Runs with the HTTP source, the platform's editor driver and plain file
/// writes. When the editor cannot be automated at all, every record goes
/// through the fallback writer.
#[instrument(skip_all, fields(api_url = %config.api_url))]
pub fn run(config: &ScribeConfig) -> Result<RunSummary, ScribeError> {
    let source = HttpRecordSource::new(&config.api_url, config.request_timeout)?;
    let driver: Box<dyn EditorDriver> = match create_driver(config) {
        Ok(driver) => driver,
        Err(e) => {
            warn!("Editor automation unavailable ({e}); every record will be written directly");
            Box::new(InertDriver::new(e.to_string()))
        }
    };
    run_with(config, &source, driver.as_ref(), &FsFallbackWriter)
}

/// The run loop with every collaborator injected.
///
/// A fetch failure is logged and returned before any record is touched.
/// Per-record failures never abort the loop.
pub fn run_with(
    config: &ScribeConfig,
    source: &dyn RecordSource,
    driver: &dyn EditorDriver,
    writer: &dyn FallbackWriter,
) -> Result<RunSummary, ScribeError> {
    let output_dir = ensure_output_dir(&config.output_dir)?;
    info!("Output directory: {}", output_dir.display());

    let mut records = source.fetch(config.record_count).map_err(|e| {
        error!("Failed to fetch records: {e}");
        e
    })?;
    records.truncate(config.record_count);

    let mut summary = RunSummary {
        fetched: records.len(),
        output_dir: output_dir.clone(),
        ..Default::default()
    };

    for record in &records {
        match process_record(record, &output_dir, driver, writer) {
            Disposition::SavedByEditor => summary.saved_by_editor += 1,
            Disposition::WrittenByFallback => summary.written_by_fallback += 1,
            Disposition::Failed => summary.failed += 1,
        }
        thread::sleep(config.record_pause);
    }

    info!(
        summary = %serde_json::to_string(&summary).unwrap_or_default(),
        "Done. Files saved to: {}",
        output_dir.display()
    );
    Ok(summary)
}

#[instrument(skip_all, fields(record = %record.id))]
fn process_record(
    record: &Record,
    output_dir: &Path,
    driver: &dyn EditorDriver,
    writer: &dyn FallbackWriter,
) -> Disposition {
    let destination = destination_for(output_dir, &record.id);
    let content = compose(record);
    info!("Processing post {} -> {}", record.id, destination.display());

    let outcome = driver.save(&record.id, &content, &destination);
    if outcome.is_saved() {
        return Disposition::SavedByEditor;
    }

    warn!("Save via Notepad failed for {} ({outcome})", destination.display());
    info!("Falling back to writing file directly for post {}", record.id);
    match writer.write(&destination, &content) {
        Ok(()) => {
            info!("WROTE (fallback) {}", destination.display());
            Disposition::WrittenByFallback
        }
        Err(e) => {
            error!("Fallback write failed for {}: {e}", destination.display());
            Disposition::Failed
        }
    }
}
