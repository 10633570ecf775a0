// src/pipeline.rs

use std::{fs, path::PathBuf, time::Instant};
use tracing::{error, info, Instrument, Span};

use crate::{
    config::Config,
    error::{EtlError, Result},
    extract::extract_tar_gz,
    fetch::{archive_client, download_archive},
    process::{process_csv_files, LoadSummary},
};

/// Which phase of the run is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Idle,
    Downloading,
    Extracting,
    Loading,
    Done,
    Failed,
}

impl Stage {
    pub fn as_str(&self) -> &str {
        match self {
            Stage::Idle => "idle",
            Stage::Downloading => "downloading",
            Stage::Extracting => "extracting",
            Stage::Loading => "loading",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }
}

/// A stage error tagged with the stage it came from.
#[derive(Debug, thiserror::Error)]
#[error("{} stage failed", .stage.as_str())]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: EtlError,
}

/// Fetch, extract and load the configured dump.
///
/// Stages run strictly one after another; the first failure is logged and
/// returned with the stage it happened in. The `dump` span's `stage` field
/// tracks progress and ends as `done` or `failed`.
pub async fn process_data_dump(cfg: &Config) -> std::result::Result<LoadSummary, StageError> {
    let mut stage = Stage::Idle;
    let start = Instant::now();
    let span = tracing::info_span!(
        "dump",
        url = %cfg.download_url,
        stage = Stage::Idle.as_str()
    );

    let result = run_stages(cfg, &mut stage).instrument(span.clone()).await;

    match result {
        Ok(summary) => {
            info!(
                organizations = summary.organizations,
                customers = summary.customers,
                elapsed = ?start.elapsed(),
                "✅ Data processing completed!"
            );
            Ok(summary)
        }
        Err(source) => {
            span.record("stage", Stage::Failed.as_str());
            error!(
                parent: &span,
                stage = stage.as_str(),
                kind = source.kind().as_str(),
                error = %source,
                "❌ Error processing data"
            );
            Err(StageError { stage, source })
        }
    }
}

/// Move to `next` and mirror it onto the current span.
fn advance(stage: &mut Stage, next: Stage) {
    *stage = next;
    Span::current().record("stage", next.as_str());
}

async fn run_stages(cfg: &Config, stage: &mut Stage) -> Result<LoadSummary> {
    let work_dir = cfg.work_dir.clone();
    fs::create_dir_all(&work_dir).map_err(|e| EtlError::io(&work_dir, e))?;
    let archive = cfg.archive_path();

    advance(stage, Stage::Downloading);
    info!("Downloading dump file...");
    let client = archive_client().map_err(|source| EtlError::Download {
        url: cfg.download_url.to_string(),
        source,
    })?;
    download_archive(&client, &cfg.download_url, &archive).await?;

    advance(stage, Stage::Extracting);
    info!("Extracting dump file...");
    {
        let work_dir = work_dir.clone();
        tokio::task::spawn_blocking(move || extract_tar_gz(&archive, &work_dir)).await??;
    }

    advance(stage, Stage::Loading);
    info!("Processing CSV files...");
    let db_path: PathBuf = cfg.database_path.clone();
    let batch_size = cfg.batch_size;
    let summary = tokio::task::spawn_blocking(move || {
        process_csv_files(&work_dir, &db_path, batch_size)
    })
    .await??;

    advance(stage, Stage::Done);
    Ok(summary)
}
