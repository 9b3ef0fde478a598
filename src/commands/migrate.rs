// ABOUTME: Schema commands: migrate, seed, migrate-and-seed, fresh, refresh
// ABOUTME: Each command opens one connection and threads it through the steps in order

use crate::config::Settings;
use crate::migration::{self, MigrationReport, ScriptSet};
use crate::projects::{seed_projects, SeedOutcome};
use crate::{interactive, mysql};
use anyhow::{Context, Result};
use mysql_async::Conn;

/// Apply every script in the migrations directory
pub async fn migrate(settings: &Settings) -> Result<()> {
    tracing::info!("🔄 Running database migrations...");

    let mut conn = mysql::connect_mysql(&settings.database_url).await?;
    apply(&mut conn, settings, ScriptSet::Migrations).await?;
    disconnect(conn).await;

    tracing::info!("✓ All migrations completed successfully!");
    Ok(())
}

/// Insert the sample projects if the table is empty
pub async fn seed(settings: &Settings) -> Result<()> {
    tracing::info!("🌱 Seeding database...");

    let mut conn = mysql::connect_mysql(&settings.database_url).await?;
    run_seed(&mut conn).await?;
    disconnect(conn).await;

    tracing::info!("✓ Database seeded successfully!");
    Ok(())
}

/// Apply migrations, then seed, over one connection
pub async fn migrate_and_seed(settings: &Settings) -> Result<()> {
    tracing::info!("🔄 Running migrations and seeding database...");

    let mut conn = mysql::connect_mysql(&settings.database_url).await?;
    apply(&mut conn, settings, ScriptSet::Migrations).await?;
    run_seed(&mut conn).await?;
    disconnect(conn).await;

    tracing::info!("✓ Migrations and seeding completed successfully!");
    Ok(())
}

/// Drop and recreate the configured database, then migrate and seed it
///
/// The drop runs on a server-level connection with no database selected.
/// Nothing happens unless the operator types `yes` (or passed `--yes`).
pub async fn fresh(settings: &Settings, assume_yes: bool) -> Result<()> {
    tracing::info!("🔄 Fresh migration: drop database and recreate with seed data...");

    let confirmed = interactive::confirm_destructive(
        &[
            "This will DROP the entire database and recreate it fresh!",
            "All data will be lost!",
        ],
        assume_yes,
    )?;
    if !confirmed {
        return Ok(());
    }

    let db_name = mysql::database_name(&settings.database_url)?;

    let mut server = mysql::connect_server(&settings.database_url)
        .await
        .context("Failed to connect to MySQL server")?;
    mysql::recreate_database(&mut server, &db_name).await?;
    disconnect(server).await;

    tracing::info!("Running migrations and seeding database...");
    let mut conn = mysql::connect_mysql(&settings.database_url).await?;
    apply(&mut conn, settings, ScriptSet::Migrations).await?;
    run_seed(&mut conn).await?;
    disconnect(conn).await;

    tracing::info!("✓ Fresh migration completed successfully!");
    tracing::info!("✓ Database '{}' dropped, recreated, and seeded", db_name);
    Ok(())
}

/// Apply the refresh-migrations script set after confirmation
pub async fn refresh(settings: &Settings, assume_yes: bool) -> Result<()> {
    tracing::info!("🔄 Refresh migration: rebuild schema from the refresh scripts...");

    let confirmed = interactive::confirm_destructive(
        &[
            "The refresh scripts will DROP and recreate tables!",
            "All data will be lost!",
        ],
        assume_yes,
    )?;
    if !confirmed {
        return Ok(());
    }

    let mut conn = mysql::connect_mysql(&settings.database_url).await?;
    apply(&mut conn, settings, ScriptSet::Refresh).await?;
    disconnect(conn).await;

    tracing::info!("✓ Refresh migration completed successfully!");
    Ok(())
}

async fn apply(conn: &mut Conn, settings: &Settings, set: ScriptSet) -> Result<MigrationReport> {
    let explicit = match set {
        ScriptSet::Migrations => settings.migrations_dir.as_deref(),
        ScriptSet::Refresh => settings.refresh_dir.as_deref(),
    };

    let report = migration::run(conn, set, explicit)
        .await
        .context("Migration failed")?;

    tracing::info!(
        "Applied {} file(s), {} statement(s) from {}",
        report.files.len(),
        report.statements,
        set
    );

    Ok(report)
}

async fn run_seed(conn: &mut Conn) -> Result<SeedOutcome> {
    seed_projects(conn).await.context("Seeding failed")
}

async fn disconnect(conn: Conn) {
    if let Err(e) = conn.disconnect().await {
        tracing::warn!("Failed to close MySQL connection cleanly: {}", e);
    }
}
