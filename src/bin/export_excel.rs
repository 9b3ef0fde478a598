// ABOUTME: CLI entry point for exporting the projects table to a spreadsheet
// ABOUTME: Writes every row into projects.xlsx in the output directory

use clap::Parser;
use projects_db_tools::commands;
use projects_db_tools::config::{Overrides, Settings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "export-excel")]
#[command(about = "Export the projects table to an .xlsx spreadsheet")]
struct Cli {
    /// MySQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory the spreadsheet is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Spreadsheet file name
    #[arg(long, default_value = "projects.xlsx")]
    file_name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    projects_db_tools::init_tracing();

    let cli = Cli::parse();
    let settings = Settings::load(
        cli.config.as_deref(),
        Overrides {
            database_url: cli.database_url,
            output_dir: cli.output_dir,
            ..Default::default()
        },
    )?;

    commands::export_excel(&settings, &cli.file_name).await?;
    Ok(())
}
