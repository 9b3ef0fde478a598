// ABOUTME: Seeds the projects table with a fixed sample set
// ABOUTME: Skips entirely when the table already holds rows

use super::ProjectStore;
use anyhow::{Context, Result};

/// Sample rows inserted into an empty `projects` table, as (name, tech_stack)
pub const SEED_PROJECTS: &[(&str, &str)] = &[
    ("E-Commerce Platform", "Go, PostgreSQL, React"),
    ("Real-time Chat Application", "Go, WebSocket, Vue.js"),
    ("Data Analytics Dashboard", "Go, MySQL, Angular"),
    ("Mobile API Gateway", "Go, gRPC, Kubernetes"),
    ("Content Management System", "Go, MongoDB, Next.js"),
    ("IoT Device Manager", "Go, MQTT, Flutter"),
    ("Microservices Framework", "Go, Docker, Kubernetes"),
    ("Machine Learning Pipeline", "Go, Python, TensorFlow"),
    ("Payment Processing System", "Go, MySQL, React"),
    ("Social Media Backend", "Go, Redis, PostgreSQL"),
];

/// What a seeding run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The table already had `existing` rows; nothing was inserted
    Skipped { existing: u64 },
    /// The table was empty and this many rows were inserted
    Inserted(usize),
}

/// Insert the sample projects if the table is empty
///
/// The emptiness check and the inserts are separate statements with no lock
/// between them, so two concurrent seeders can both insert.
///
/// # Errors
///
/// The first failing insert aborts the run. Rows inserted before it are kept.
pub async fn seed_projects<S: ProjectStore>(store: &mut S) -> Result<SeedOutcome> {
    let existing = store.count_projects().await?;
    if existing > 0 {
        tracing::info!(
            "Projects table already contains {} records. Skipping seed.",
            existing
        );
        return Ok(SeedOutcome::Skipped { existing });
    }

    for (name, tech_stack) in SEED_PROJECTS {
        store
            .insert_project(name, tech_stack)
            .await
            .context("Failed to insert seed data")?;
    }

    tracing::info!("✓ Seeded {} projects into the database", SEED_PROJECTS.len());

    Ok(SeedOutcome::Inserted(SEED_PROJECTS.len()))
}
