// ABOUTME: Integration tests against a real MySQL database
// ABOUTME: Exercises migrate, seed, row source, and failure scenarios end to end

use mysql_async::prelude::*;
use projects_db_tools::migration::{self, ScriptSet};
use projects_db_tools::projects::{self, ProjectStore, SeedOutcome};
use projects_db_tools::mysql;
use std::env;
use std::fs;
use std::path::Path;

/// Helper to get test MySQL URL from environment
///
/// The database it names is wiped by these tests.
fn get_test_mysql_url() -> String {
    env::var("TEST_MYSQL_URL").expect("TEST_MYSQL_URL must be set")
}

async fn reset_tables(url: &str) -> anyhow::Result<()> {
    let mut conn = mysql::connect_mysql(url).await?;
    for query in ["DROP TABLE IF EXISTS projects", "DROP TABLE IF EXISTS later"] {
        conn.query_drop(query).await?;
    }
    conn.disconnect().await?;
    Ok(())
}

fn bundled_migrations() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("db").join("migrations")
}

#[tokio::test]
#[ignore]
async fn test_migrate_then_seed_gives_ten_rows() {
    let url = get_test_mysql_url();
    reset_tables(&url).await.unwrap();

    let mut conn = mysql::connect_mysql(&url).await.unwrap();
    let report = migration::run(&mut conn, ScriptSet::Migrations, Some(&bundled_migrations()))
        .await
        .unwrap();
    assert_eq!(report.files, vec!["001_init.sql", "002_add_index.sql"]);

    let outcome = projects::seed_projects(&mut conn).await.unwrap();
    assert_eq!(outcome, SeedOutcome::Inserted(10));
    assert_eq!(conn.count_projects().await.unwrap(), 10);

    let outcome = projects::seed_projects(&mut conn).await.unwrap();
    assert_eq!(outcome, SeedOutcome::Skipped { existing: 10 });
    assert_eq!(conn.count_projects().await.unwrap(), 10);

    conn.disconnect().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_row_source_round_trip() {
    let url = get_test_mysql_url();
    reset_tables(&url).await.unwrap();

    let mut conn = mysql::connect_mysql(&url).await.unwrap();
    migration::run(&mut conn, ScriptSet::Migrations, Some(&bundled_migrations()))
        .await
        .unwrap();
    conn.insert_project("X", "Y").await.unwrap();

    let rows = projects::get_all(&mut conn).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "X");
    assert_eq!(rows[0].tech_stack, "Y");
    assert!(rows[0].id > 0);

    conn.disconnect().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_syntax_error_aborts_before_later_files() {
    let url = get_test_mysql_url();
    reset_tables(&url).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("001_init.sql"),
        "CREATE TABLE IF NOT EXISTS projects (id INT AUTO_INCREMENT PRIMARY KEY, \
         name VARCHAR(255) NOT NULL, tech_stack VARCHAR(255) NOT NULL);",
    )
    .unwrap();
    fs::write(dir.path().join("002_broken.sql"), "CREAT TABLE oops (id INT);").unwrap();
    fs::write(dir.path().join("003_later.sql"), "CREATE TABLE later (id INT);").unwrap();

    let mut conn = mysql::connect_mysql(&url).await.unwrap();
    let err = migration::run(&mut conn, ScriptSet::Migrations, Some(dir.path()))
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("002_broken.sql"));

    let later: Option<String> = conn
        .query_first("SHOW TABLES LIKE 'later'")
        .await
        .unwrap();
    assert!(later.is_none());
    assert_eq!(conn.count_projects().await.unwrap(), 0);

    conn.disconnect().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_idempotent_migrations_twice() {
    let url = get_test_mysql_url();
    reset_tables(&url).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    fs::copy(
        bundled_migrations().join("001_init.sql"),
        dir.path().join("001_init.sql"),
    )
    .unwrap();

    let mut conn = mysql::connect_mysql(&url).await.unwrap();
    migration::run(&mut conn, ScriptSet::Migrations, Some(dir.path()))
        .await
        .unwrap();
    conn.insert_project("kept", "Rust").await.unwrap();
    migration::run(&mut conn, ScriptSet::Migrations, Some(dir.path()))
        .await
        .unwrap();

    let rows = projects::get_all(&mut conn).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "kept");

    conn.disconnect().await.unwrap();
}
