// ABOUTME: Fans a record set out to one document per chunk on blocking workers
// ABOUTME: Joins every worker and reports each chunk's outcome in index order

use super::{chunk_records, part_file_name, DocumentWriter, ReportRow, Table};
use anyhow::{anyhow, Result};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Parameters of a chunked export
#[derive(Debug, Clone)]
pub struct ChunkedExport {
    /// File name stem; parts are written as `<stem>_part_<n>.<ext>`
    pub stem: String,
    /// Document title; each part is titled `<title> Part <n>`
    pub title: String,
    pub chunk_size: usize,
    pub output_dir: PathBuf,
    pub show_progress: bool,
}

/// Result of writing one chunk
#[derive(Debug)]
pub struct ChunkOutcome {
    /// 1-based chunk index
    pub index: usize,
    pub path: PathBuf,
    pub rows: usize,
    pub result: Result<()>,
}

/// Outcomes of every chunk, ordered by chunk index
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub outcomes: Vec<ChunkOutcome>,
}

impl ExportSummary {
    pub fn succeeded(&self) -> impl Iterator<Item = &ChunkOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ChunkOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Write one document per chunk of `records`, all chunks in parallel
///
/// Each chunk is copied into its own table and rendered on a blocking
/// worker. Workers are not cancelled when a sibling fails; the call returns
/// once every worker has finished, with one outcome per chunk.
///
/// # Errors
///
/// Only an invalid chunk size fails the call itself. Per-chunk failures
/// (including a panicking writer) land in the summary.
pub async fn export_chunked<R: ReportRow>(
    records: &[R],
    options: &ChunkedExport,
    writer: Arc<dyn DocumentWriter>,
) -> Result<ExportSummary> {
    let chunks = chunk_records(records, options.chunk_size)?;

    tracing::info!(
        "Exporting {} record(s) as {} {} document(s) of up to {} rows",
        records.len(),
        chunks.len(),
        writer.extension(),
        options.chunk_size
    );

    let progress = if options.show_progress {
        let bar = ProgressBar::new(chunks.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut pending = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.into_iter().enumerate() {
        let index = i + 1;
        let path = options
            .output_dir
            .join(part_file_name(&options.stem, index, writer.extension()));
        let table = Table::from_records(format!("{} Part {}", options.title, index), chunk);
        let rows = chunk.len();

        let writer = Arc::clone(&writer);
        let progress = progress.clone();
        let worker_path = path.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let result = writer.write(&table, &worker_path);
            progress.inc(1);
            result
        });

        pending.push((index, path, rows, handle));
    }

    let (meta, handles): (Vec<_>, Vec<_>) = pending
        .into_iter()
        .map(|(index, path, rows, handle)| ((index, path, rows), handle))
        .unzip();

    let joined = join_all(handles).await;
    progress.finish_and_clear();

    let outcomes = meta
        .into_iter()
        .zip(joined)
        .map(|((index, path, rows), joined)| {
            let result = match joined {
                Ok(result) => result,
                Err(e) => Err(anyhow!("export worker for chunk {} panicked: {}", index, e)),
            };
            ChunkOutcome {
                index,
                path,
                rows,
                result,
            }
        })
        .collect();

    Ok(ExportSummary { outcomes })
}

/// Write every record into a single document at `path`
pub fn export_single<R: ReportRow>(
    records: &[R],
    title: &str,
    path: &Path,
    writer: &dyn DocumentWriter,
) -> Result<()> {
    tracing::info!(
        "Exporting {} record(s) to {}",
        records.len(),
        path.display()
    );

    let table = Table::from_records(title, records);
    writer.write(&table, path)
}
