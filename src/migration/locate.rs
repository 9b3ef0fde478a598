// ABOUTME: Search order for the migrations and refresh-migrations directories
// ABOUTME: Tries working-directory and executable-relative candidates in a fixed order

use anyhow::{bail, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// The two script sets the tool knows how to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptSet {
    /// Ordinary schema migrations (`migrations/`)
    Migrations,
    /// Scripts that rebuild the schema in place (`refresh-migrations/`)
    Refresh,
}

impl ScriptSet {
    pub fn dir_name(&self) -> &'static str {
        match self {
            ScriptSet::Migrations => "migrations",
            ScriptSet::Refresh => "refresh-migrations",
        }
    }
}

impl fmt::Display for ScriptSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Build the ordered list of places a script directory may live
///
/// The first four candidates are relative to the working directory, the
/// rest to the directory of the invoked executable, so the tool works both
/// from the repository root and from `target/<profile>/`.
pub fn candidate_dirs(dir_name: &str, cwd: &Path, exe_dir: &Path) -> Vec<PathBuf> {
    vec![
        PathBuf::from("db").join(dir_name),
        PathBuf::from(".").join("db").join(dir_name),
        cwd.join("db").join(dir_name),
        exe_dir.join(dir_name),
        exe_dir.join("..").join(dir_name),
        exe_dir.join("..").join("..").join("db").join(dir_name),
        exe_dir.join("..").join("..").join("..").join("db").join(dir_name),
    ]
}

/// Locate the directory for a script set
///
/// An explicit directory must exist; it is never silently replaced by a
/// search result.
///
/// # Errors
///
/// Returns an error listing every attempted path when no candidate exists.
pub fn locate_script_dir(set: ScriptSet, explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        if !dir.is_dir() {
            bail!(
                "{} directory not found at configured path: {}",
                set,
                dir.display()
            );
        }
        tracing::info!("Using {} directory at: {}", set, dir.display());
        return Ok(dir.to_path_buf());
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let exe_path = std::env::args_os()
        .next()
        .map(PathBuf::from)
        .unwrap_or_default();
    let exe_dir = match exe_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let candidates = candidate_dirs(set.dir_name(), &cwd, &exe_dir);
    first_existing(set, &candidates).inspect_err(|_| {
        tracing::warn!("Current working directory: {}", cwd.display());
        tracing::warn!("Executable path: {}", exe_path.display());
        tracing::warn!("Executable directory: {}", exe_dir.display());
    })
}

/// Pick the first candidate that is an existing directory
///
/// # Errors
///
/// Returns an error listing every candidate when none exists.
pub fn first_existing(set: ScriptSet, candidates: &[PathBuf]) -> Result<PathBuf> {
    if let Some(found) = candidates.iter().find(|path| path.is_dir()) {
        tracing::info!("Found {} directory at: {}", set, found.display());
        return Ok(found.clone());
    }

    let tried: Vec<String> = candidates
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    bail!(
        "{} directory not found in any of the expected locations. Tried: [{}]",
        set,
        tried.join(", ")
    )
}
