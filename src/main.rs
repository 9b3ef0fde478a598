// ABOUTME: CLI entry point for the projects database migration tool
// ABOUTME: Parses commands and routes to the migrate/seed/fresh/refresh handlers

use clap::{Parser, Subcommand};
use projects_db_tools::commands;
use projects_db_tools::config::{Overrides, Settings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "projects-migrate")]
#[command(about = "Database migration tool for the projects database")]
#[command(
    after_help = "The 'fresh' command will DROP the entire database and recreate it.\n\
                  Use with caution! You will be prompted for confirmation."
)]
struct Cli {
    /// MySQL connection URL
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Use this migrations directory instead of searching for one
    #[arg(long, global = true)]
    migrations_dir: Option<PathBuf>,
    /// Use this refresh-migrations directory instead of searching for one
    #[arg(long, global = true)]
    refresh_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all migrations
    Migrate,
    /// Seed the database with sample data
    Seed,
    /// Run migrations and seed in one command
    MigrateAndSeed,
    /// Drop database and recreate it fresh with seed data
    Fresh {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Rebuild the schema from the refresh-migrations scripts
    Refresh {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    projects_db_tools::init_tracing();

    let cli = Cli::parse();

    let settings = Settings::load(
        cli.config.as_deref(),
        Overrides {
            database_url: cli.database_url,
            migrations_dir: cli.migrations_dir,
            refresh_dir: cli.refresh_dir,
            ..Default::default()
        },
    )?;

    match cli.command {
        Commands::Migrate => commands::migrate(&settings).await,
        Commands::Seed => commands::seed(&settings).await,
        Commands::MigrateAndSeed => commands::migrate_and_seed(&settings).await,
        Commands::Fresh { yes } => commands::fresh(&settings, yes).await,
        Commands::Refresh { yes } => commands::refresh(&settings, yes).await,
    }
}
