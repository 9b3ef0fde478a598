// ABOUTME: Migration script discovery and application
// ABOUTME: Resolves the script directory and applies every script in filename order

pub mod apply;
pub mod locate;

pub use apply::{apply_scripts, list_scripts, split_statements, MigrationReport, StatementExecutor};
pub use locate::{candidate_dirs, first_existing, locate_script_dir, ScriptSet};

use anyhow::Result;
use std::path::Path;

/// Resolve the directory for `set` and apply all of its scripts
///
/// `explicit_dir` short-circuits the search order when the operator pointed
/// at a directory through the CLI or the config file.
pub async fn run<E: StatementExecutor>(
    executor: &mut E,
    set: ScriptSet,
    explicit_dir: Option<&Path>,
) -> Result<MigrationReport> {
    let dir = locate_script_dir(set, explicit_dir)?;
    apply_scripts(executor, &dir).await
}
