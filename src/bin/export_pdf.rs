// ABOUTME: CLI entry point for exporting the projects table to PDF reports
// ABOUTME: Renders one projects_report_part_<n>.pdf per chunk, in parallel

use clap::Parser;
use projects_db_tools::commands;
use projects_db_tools::config::{Overrides, Settings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "export-pdf")]
#[command(about = "Export the projects table to chunked PDF reports")]
struct Cli {
    /// MySQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Rows per PDF file
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    chunk_size: Option<u64>,
    /// Directory the PDF files are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    projects_db_tools::init_tracing();

    let cli = Cli::parse();
    let settings = Settings::load(
        cli.config.as_deref(),
        Overrides {
            database_url: cli.database_url,
            chunk_size: cli.chunk_size.map(|n| n as usize),
            output_dir: cli.output_dir,
            ..Default::default()
        },
    )?;

    commands::export_pdf(&settings).await?;
    Ok(())
}
