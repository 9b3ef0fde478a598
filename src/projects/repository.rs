// ABOUTME: Row source for the projects table
// ABOUTME: Materializes every project into memory for the report exporters

use super::{Project, ProjectStore};
use anyhow::{Context, Result};

/// Read every project
///
/// The result is fully materialized; a query or decoding error fails the
/// whole call and no partial list is returned. No ORDER BY is applied.
pub async fn get_all<S: ProjectStore>(store: &mut S) -> Result<Vec<Project>> {
    tracing::info!("Reading all rows from table 'projects'");

    let projects = store
        .fetch_projects()
        .await
        .context("Failed to read projects")?;

    tracing::info!("Read {} rows from table 'projects'", projects.len());

    Ok(projects)
}
