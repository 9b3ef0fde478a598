// ABOUTME: Applies SQL migration scripts statement by statement
// ABOUTME: Stops at the first failing statement and reports the originating file

use anyhow::{Context, Result};
use mysql_async::{prelude::*, Conn};
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

/// Something that can run a single SQL statement
///
/// Implemented for `mysql_async::Conn`; tests substitute an in-memory
/// recorder.
pub trait StatementExecutor {
    fn execute(&mut self, statement: &str) -> impl Future<Output = Result<()>> + Send;
}

impl StatementExecutor for Conn {
    async fn execute(&mut self, statement: &str) -> Result<()> {
        self.query_drop(statement).await?;
        Ok(())
    }
}

/// Summary of a completed migration run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Script file names, in the order they were applied
    pub files: Vec<String>,
    /// Total number of statements executed across all files
    pub statements: usize,
}

/// List the `.sql` files of a directory, sorted by file name
///
/// Subdirectories and files with any other extension are skipped.
pub fn list_scripts(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read migrations directory {}", dir.display()))?;

    let mut scripts = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".sql") {
            continue;
        }

        scripts.push((name, path));
    }

    scripts.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(scripts)
}

/// Split script text into executable statements
///
/// Splits on every `;`, so a semicolon inside a string literal or comment
/// also ends a statement. Scripts are expected to avoid that.
///
/// # Examples
///
/// ```
/// # use projects_db_tools::migration::split_statements;
/// let sql = "CREATE TABLE a (id INT);\n\n  INSERT INTO a VALUES (1);\n";
/// assert_eq!(
///     split_statements(sql),
///     vec!["CREATE TABLE a (id INT)", "INSERT INTO a VALUES (1)"]
/// );
/// ```
pub fn split_statements(sql: &str) -> Vec<&str> {
    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .collect()
}

/// Apply every script in `dir` against `executor`
///
/// Scripts run in file name order, statements in textual order. The first
/// failure aborts the run; statements and files applied before it stay
/// applied, since no transaction spans them.
///
/// # Errors
///
/// Returns an error naming the script if it cannot be read or if any of its
/// statements fails.
pub async fn apply_scripts<E: StatementExecutor>(
    executor: &mut E,
    dir: &Path,
) -> Result<MigrationReport> {
    let scripts = list_scripts(dir)?;
    if scripts.is_empty() {
        tracing::warn!("⚠ No .sql scripts found in {}", dir.display());
    }

    let mut report = MigrationReport::default();

    for (name, path) in scripts {
        tracing::info!("Running migration: {}", name);

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read migration file {}", name))?;

        for (idx, statement) in split_statements(&content).into_iter().enumerate() {
            tracing::debug!("{} [{}]: {}", name, idx + 1, statement);
            executor.execute(statement).await.with_context(|| {
                format!(
                    "Failed to execute migration {} (statement {})",
                    name,
                    idx + 1
                )
            })?;
            report.statements += 1;
        }

        tracing::info!("✓ Migration completed: {}", name);
        report.files.push(name);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[derive(Default)]
    struct Recorder {
        executed: Vec<String>,
    }

    impl StatementExecutor for Recorder {
        async fn execute(&mut self, statement: &str) -> Result<()> {
            if statement.contains("SYNTAX ERROR") {
                anyhow::bail!("You have an error in your SQL syntax");
            }
            self.executed.push(statement.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_split_skips_empty_fragments() {
        assert!(split_statements("").is_empty());
        assert!(split_statements(" ;\n;\t; ").is_empty());
        assert_eq!(split_statements("SELECT 1"), vec!["SELECT 1"]);
        assert_eq!(
            split_statements("SELECT 1;;SELECT 2;"),
            vec!["SELECT 1", "SELECT 2"]
        );
    }

    #[test]
    fn test_list_scripts_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("010_late.sql"), "SELECT 10;").unwrap();
        fs::write(dir.path().join("002_second.sql"), "SELECT 2;").unwrap();
        fs::write(dir.path().join("001_first.sql"), "SELECT 1;").unwrap();
        fs::write(dir.path().join("README.md"), "notes").unwrap();
        fs::create_dir(dir.path().join("003_dir.sql")).unwrap();

        let names: Vec<String> = list_scripts(dir.path())
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        assert_eq!(names, vec!["001_first.sql", "002_second.sql", "010_late.sql"]);
    }

    #[tokio::test]
    async fn test_apply_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("002_add_index.sql"),
            "CREATE INDEX idx_projects_name ON projects (name);",
        )
        .unwrap();
        fs::write(
            dir.path().join("001_init.sql"),
            "CREATE TABLE projects (id INT);\n\nINSERT INTO projects VALUES (1);\n",
        )
        .unwrap();

        let mut recorder = Recorder::default();
        let report = apply_scripts(&mut recorder, dir.path()).await.unwrap();

        assert_eq!(report.files, vec!["001_init.sql", "002_add_index.sql"]);
        assert_eq!(report.statements, 3);
        assert_eq!(
            recorder.executed,
            vec![
                "CREATE TABLE projects (id INT)",
                "INSERT INTO projects VALUES (1)",
                "CREATE INDEX idx_projects_name ON projects (name)",
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_stops_run_and_names_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("001_ok.sql"), "SELECT 1;").unwrap();
        fs::write(
            dir.path().join("002_broken.sql"),
            "SELECT 2; SYNTAX ERROR; SELECT 3;",
        )
        .unwrap();
        fs::write(dir.path().join("003_never.sql"), "SELECT 4;").unwrap();

        let mut recorder = Recorder::default();
        let err = apply_scripts(&mut recorder, dir.path()).await.unwrap_err();

        let msg = format!("{:#}", err);
        assert!(msg.contains("002_broken.sql"), "got: {}", msg);
        assert!(msg.contains("SQL syntax"), "got: {}", msg);
        assert_eq!(recorder.executed, vec!["SELECT 1", "SELECT 2"]);
    }

    #[tokio::test]
    async fn test_empty_directory_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::default();

        let report = apply_scripts(&mut recorder, dir.path()).await.unwrap();

        assert_eq!(report, MigrationReport::default());
        assert!(recorder.executed.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_script_names_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("001_binary.sql"), [0xff, 0xfe, 0x00]).unwrap();

        let mut recorder = Recorder::default();
        let err = apply_scripts(&mut recorder, dir.path()).await.unwrap_err();

        assert!(err.to_string().contains("001_binary.sql"));
    }
}
