// ABOUTME: Library module for projects-db-tools
// ABOUTME: Exports all core functionality for use in the binaries and tests

pub mod commands;
pub mod config;
pub mod interactive;
pub mod migration;
pub mod mysql;
pub mod projects;
pub mod report;
pub mod utils;

/// Install the tracing subscriber used by every binary
///
/// Defaults to INFO level when RUST_LOG is not set.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
