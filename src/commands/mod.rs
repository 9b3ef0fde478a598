// ABOUTME: Command implementations for the migration and export binaries
// ABOUTME: Exports migrate, seed, migrate-and-seed, fresh, refresh, and the exporters

pub mod export;
pub mod migrate;

pub use export::{export_excel, export_pdf};
pub use migrate::{fresh, migrate, migrate_and_seed, refresh, seed};
