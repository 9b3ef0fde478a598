// ABOUTME: Checks and quotes the database name spliced into DROP/CREATE DATABASE
// ABOUTME: The exact string that is checked is the string that gets quoted

use anyhow::{bail, Result};

/// MySQL's limit on database name length
const MAX_DATABASE_NAME_LEN: usize = 64;

/// Check a database name and return it backtick-quoted for DDL
///
/// `DROP DATABASE` cannot take a bound parameter, so the name is spliced in.
/// Only ASCII letters, digits and underscores are accepted, the name must not
/// start with a digit, and nothing is trimmed: a name with surrounding
/// whitespace is rejected rather than silently altered.
///
/// # Examples
///
/// ```
/// # use projects_db_tools::utils::quoted_database_name;
/// assert_eq!(quoted_database_name("testdb").unwrap(), "`testdb`");
/// assert!(quoted_database_name(" testdb").is_err());
/// assert!(quoted_database_name("db`; DROP DATABASE prod; --").is_err());
/// ```
pub fn quoted_database_name(name: &str) -> Result<String> {
    if name.is_empty() {
        bail!("Database name cannot be empty");
    }

    if name.len() > MAX_DATABASE_NAME_LEN {
        bail!(
            "Database name is {} characters long; MySQL allows at most {}",
            name.len(),
            MAX_DATABASE_NAME_LEN
        );
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        bail!("Database name {:?} must not start with a digit", name);
    }

    if let Some(bad) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '_')
    {
        bail!(
            "Database name {:?} contains {:?}; only letters, digits, and underscores are allowed",
            name,
            bad
        );
    }

    Ok(format!("`{}`", name))
}
