// ABOUTME: The projects table: record type and storage operations
// ABOUTME: Exposes the row source and seeder over a connection passed in by the caller

pub mod repository;
pub mod seed;

pub use repository::get_all;
pub use seed::{seed_projects, SeedOutcome, SEED_PROJECTS};

use crate::report::{Cell, ReportRow};
use anyhow::{Context, Result};
use mysql_async::{prelude::*, Conn, Row};
use std::future::Future;

/// A row of the `projects` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub tech_stack: String,
}

impl ReportRow for Project {
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Tech Stack"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Integer(self.id),
            Cell::Text(self.name.clone()),
            Cell::Text(self.tech_stack.clone()),
        ]
    }
}

/// Storage operations the seeder and row source need
pub trait ProjectStore {
    /// Number of rows currently in `projects`
    fn count_projects(&mut self) -> impl Future<Output = Result<u64>> + Send;

    /// Insert one project, letting the server assign its id
    fn insert_project(
        &mut self,
        name: &str,
        tech_stack: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Every row of `projects`, in whatever order the server returns them
    fn fetch_projects(&mut self) -> impl Future<Output = Result<Vec<Project>>> + Send;
}

impl ProjectStore for Conn {
    async fn count_projects(&mut self) -> Result<u64> {
        let count: Option<u64> = self
            .query_first("SELECT COUNT(*) FROM projects")
            .await
            .context("Failed to check existing data")?;

        Ok(count.unwrap_or(0))
    }

    async fn insert_project(&mut self, name: &str, tech_stack: &str) -> Result<()> {
        self.exec_drop(
            "INSERT INTO projects (name, tech_stack) VALUES (?, ?)",
            (name, tech_stack),
        )
        .await
        .with_context(|| format!("Failed to insert project '{}'", name))?;

        Ok(())
    }

    async fn fetch_projects(&mut self) -> Result<Vec<Project>> {
        let rows: Vec<Row> = self
            .query("SELECT id, name, tech_stack FROM projects")
            .await
            .context("Failed to query projects")?;

        rows.into_iter()
            .map(|row| {
                let (id, name, tech_stack) =
                    mysql_async::from_row_opt::<(i64, String, String)>(row)
                        .context("Failed to decode project row")?;
                Ok(Project {
                    id,
                    name,
                    tech_stack,
                })
            })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_cells_follow_columns() {
        let project = Project {
            id: 7,
            name: "IoT Device Manager".to_string(),
            tech_stack: "Go, MQTT, Flutter".to_string(),
        };

        let cells = project.cells();
        assert_eq!(cells.len(), Project::COLUMNS.len());
        assert_eq!(cells[0], Cell::Integer(7));
        assert_eq!(cells[1], Cell::Text("IoT Device Manager".to_string()));
        assert_eq!(cells[2].to_string(), "Go, MQTT, Flutter");
    }
}
