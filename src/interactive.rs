// ABOUTME: Typed confirmation gate for destructive commands
// ABOUTME: Requires the operator to type exactly "yes" before fresh/refresh proceed

use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{BufRead, IsTerminal};

const PROMPT: &str = "Are you sure? Type 'yes' to confirm";

/// Whether the operator's reply counts as confirmation
///
/// Only the exact word `yes` (surrounding whitespace ignored) confirms;
/// `y`, `YES`, or an empty reply all cancel.
pub fn is_confirmation(reply: &str) -> bool {
    reply.trim() == "yes"
}

/// Print a warning banner and ask the operator to type `yes`
///
/// Returns `Ok(false)` when the operator declines. `assume_yes` skips the
/// prompt entirely, for scripted runs.
///
/// # Examples
///
/// ```no_run
/// # use projects_db_tools::interactive::confirm_destructive;
/// # fn example() -> anyhow::Result<()> {
/// if !confirm_destructive(&["All data will be lost!"], false)? {
///     return Ok(());
/// }
/// # Ok(())
/// # }
/// ```
pub fn confirm_destructive(warnings: &[&str], assume_yes: bool) -> Result<bool> {
    println!();
    for line in warnings {
        println!("⚠️  WARNING: {}", line);
    }
    println!();

    if assume_yes {
        tracing::info!("Confirmation skipped (--yes)");
        return Ok(true);
    }

    let reply = if std::io::stdin().is_terminal() {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(PROMPT)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read confirmation")?
    } else {
        println!("{}: ", PROMPT);
        read_reply(&mut std::io::stdin().lock())?
    };

    if !is_confirmation(&reply) {
        tracing::warn!("⚠ Operation cancelled");
        return Ok(false);
    }

    Ok(true)
}

/// Read one line of piped input; end of input counts as an empty reply
fn read_reply<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Failed to read confirmation")?;
    Ok(line)
}
