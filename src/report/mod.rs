// ABOUTME: Tabular report model and the document-writer seam
// ABOUTME: Turns typed records into titled tables and splits them into chunks

pub mod exporter;
pub mod pdf;
pub mod xlsx;

pub use exporter::{export_chunked, export_single, ChunkOutcome, ChunkedExport, ExportSummary};
pub use pdf::PdfWriter;
pub use xlsx::XlsxWriter;

use anyhow::{bail, Context, Result};
use std::fmt;
use std::fs::File;
use std::path::Path;

/// A single report value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Integer(i64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Integer(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// A record type that knows how to lay itself out as a report row
///
/// `cells()` must return one value per entry of `COLUMNS`, in the same order.
pub trait ReportRow {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<Cell>;
}

/// An owned, titled table ready to hand to a writer
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn from_records<R: ReportRow>(title: impl Into<String>, records: &[R]) -> Self {
        Self {
            title: title.into(),
            columns: R::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: records.iter().map(R::cells).collect(),
        }
    }
}

/// Renders a table into a file of one document format
pub trait DocumentWriter: Send + Sync {
    /// File extension without the leading dot
    fn extension(&self) -> &'static str;

    fn write(&self, table: &Table, path: &Path) -> Result<()>;
}

/// Split records into contiguous chunks of at most `chunk_size`
///
/// Every chunk but the last holds exactly `chunk_size` records; an empty
/// input gives no chunks.
///
/// # Examples
///
/// ```
/// # use projects_db_tools::report::chunk_records;
/// let records: Vec<u32> = (1..=10).collect();
/// let sizes: Vec<usize> = chunk_records(&records, 4)
///     .unwrap()
///     .iter()
///     .map(|c| c.len())
///     .collect();
/// assert_eq!(sizes, vec![4, 4, 2]);
/// ```
pub fn chunk_records<R>(records: &[R], chunk_size: usize) -> Result<Vec<&[R]>> {
    if chunk_size == 0 {
        bail!("Chunk size must be at least 1");
    }

    Ok(records.chunks(chunk_size).collect())
}

/// File name for the 1-based `index`-th part of a chunked export
///
/// ```
/// # use projects_db_tools::report::part_file_name;
/// assert_eq!(part_file_name("projects_report", 3, "pdf"), "projects_report_part_3.pdf");
/// ```
pub fn part_file_name(stem: &str, index: usize, extension: &str) -> String {
    format!("{}_part_{}.{}", stem, index, extension)
}

/// Write a file through a temp file in the same directory, then rename it
/// into place so a failed render never leaves a truncated document behind.
pub(crate) fn write_atomically<F>(path: &Path, render: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;

    render(tmp.as_file_mut())?;

    tmp.persist(path)
        .with_context(|| format!("Failed to persist {}", path.display()))?;

    Ok(())
}
