// ABOUTME: Export commands: projects to a spreadsheet or to chunked PDF reports
// ABOUTME: Reads every project once, closes the connection, then renders documents

use crate::config::Settings;
use crate::mysql;
use crate::projects::{self, Project};
use crate::report::{
    export_chunked, export_single, ChunkedExport, ExportSummary, PdfWriter, XlsxWriter,
};
use anyhow::{anyhow, bail, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Write every project into one spreadsheet under the output directory
pub async fn export_excel(settings: &Settings, file_name: &str) -> Result<PathBuf> {
    let projects = fetch_projects(settings).await?;
    ensure_output_dir(settings)?;

    let path = settings.output_dir.join(file_name);
    let target = path.clone();
    tokio::task::spawn_blocking(move || {
        export_single(&projects, "Projects", &target, &XlsxWriter)
    })
    .await
    .map_err(|e| anyhow!("Excel export worker panicked: {}", e))??;

    tracing::info!("✓ Data exported successfully to {}", path.display());
    Ok(path)
}

/// Write projects as `projects_report_part_<n>.pdf`, one file per chunk
///
/// Every chunk is attempted. Each generated file and each failure is logged;
/// the call fails afterwards if any chunk failed.
pub async fn export_pdf(settings: &Settings) -> Result<ExportSummary> {
    let projects = fetch_projects(settings).await?;
    ensure_output_dir(settings)?;

    let options = ChunkedExport {
        stem: "projects_report".to_string(),
        title: "Projects Report".to_string(),
        chunk_size: settings.chunk_size,
        output_dir: settings.output_dir.clone(),
        show_progress: true,
    };

    let summary = export_chunked(&projects, &options, Arc::new(PdfWriter)).await?;
    report_summary(&summary)?;

    Ok(summary)
}

/// Log every generated file and every failed chunk, then fail if any chunk did
fn report_summary(summary: &ExportSummary) -> Result<()> {
    for outcome in summary.succeeded() {
        tracing::info!("✓ Generated: {}", outcome.path.display());
    }

    let mut failures = 0;
    for outcome in summary.failed() {
        failures += 1;
        if let Err(e) = &outcome.result {
            tracing::error!("✗ Error in chunk {}: {:#}", outcome.index, e);
        }
    }

    if failures > 0 {
        bail!(
            "{} of {} PDF chunk(s) failed",
            failures,
            summary.outcomes.len()
        );
    }

    tracing::info!("🎉 All PDF chunks generated successfully!");
    Ok(())
}

async fn fetch_projects(settings: &Settings) -> Result<Vec<Project>> {
    let mut conn = mysql::connect_mysql(&settings.database_url).await?;
    let projects = projects::get_all(&mut conn).await.context("Fetch error")?;

    if let Err(e) = conn.disconnect().await {
        tracing::warn!("Failed to close MySQL connection cleanly: {}", e);
    }

    Ok(projects)
}

fn ensure_output_dir(settings: &Settings) -> Result<()> {
    std::fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            settings.output_dir.display()
        )
    })
}
