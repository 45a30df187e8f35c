//! Database schema and migrations
//!
//! Schema state is inferred by probing table columns rather than a
//! version counter: startup creates any missing table, adds any column
//! an older version lacked, and never fails because a column already
//! exists. One destructive path remains from the app's history: a
//! `layouts` table still carrying the obsolete serialized `plants`
//! column is dropped and recreated along with `layout_items`.

use crate::error::Result;
use sqlx::{sqlite::SqlitePool, Row};

/// Initialize database with schema
pub async fn initialize_database(pool: &SqlitePool) -> Result<()> {
    tracing::info!("Initializing database schema");

    // Enable WAL mode for better performance and crash safety
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(pool)
        .await?;

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(pool)
        .await?;

    drop_obsolete_layouts(pool).await?;
    create_tables(pool).await?;
    add_missing_columns(pool).await?;

    tracing::info!("Database initialization complete");
    Ok(())
}

async fn create_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS favorites (
            id INTEGER PRIMARY KEY,
            common_name TEXT,
            scientific_name TEXT,
            family TEXT,
            genus TEXT,
            year TEXT,
            bibliography TEXT,
            edible TEXT,
            vegetable TEXT,
            image_url TEXT,
            habit TEXT,
            harvest TEXT,
            light TEXT,
            notes TEXT,
            added_date TEXT NOT NULL,
            last_watered TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reminders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            task TEXT NOT NULL,
            due_date TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS journal_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT,
            content TEXT NOT NULL,
            entry_date TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS layouts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            kind TEXT NOT NULL,
            created_date TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // plant_id carries no foreign key: favorites added by older app
    // versions could leave dangling references, and the item listing
    // is expected to surface those rows rather than lose them.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS layout_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            layout_id INTEGER NOT NULL REFERENCES layouts(id) ON DELETE CASCADE,
            plant_id INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Columns that older app versions lacked, added with NULL defaults.
const FAVORITE_UPGRADES: &[(&str, &str)] = &[
    ("genus", "genus TEXT"),
    ("edible", "edible TEXT"),
    ("vegetable", "vegetable TEXT"),
    ("habit", "habit TEXT"),
    ("harvest", "harvest TEXT"),
    ("light", "light TEXT"),
    ("notes", "notes TEXT"),
    ("last_watered", "last_watered TEXT"),
];

async fn add_missing_columns(pool: &SqlitePool) -> Result<()> {
    let existing = table_columns(pool, "favorites").await?;

    for (name, ddl) in FAVORITE_UPGRADES {
        if existing.iter().any(|c| c == name) {
            continue;
        }

        tracing::info!("Adding missing column favorites.{}", name);

        let result = sqlx::query(&format!("ALTER TABLE favorites ADD COLUMN {}", ddl))
            .execute(pool)
            .await;

        match result {
            Ok(_) => {}
            // A concurrent upgrade may have raced us; not an error.
            Err(e) if e.to_string().contains("duplicate column name") => {}
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// An early iteration stored layout membership as a serialized `plants`
/// column on the layouts table. Detecting it means the table predates
/// the join-table design: both tables are dropped and recreated, losing
/// their contents. Kept as-is rather than migrated.
async fn drop_obsolete_layouts(pool: &SqlitePool) -> Result<()> {
    let columns = table_columns(pool, "layouts").await?;

    if columns.iter().any(|c| c == "plants") {
        tracing::warn!("Obsolete layouts schema detected, dropping layouts and layout_items");
        sqlx::query("DROP TABLE IF EXISTS layout_items")
            .execute(pool)
            .await?;
        sqlx::query("DROP TABLE IF EXISTS layouts")
            .execute(pool)
            .await?;
    }

    Ok(())
}

/// Column names of a table; empty if the table does not exist.
/// PRAGMA cannot be parameterized, so callers pass fixed table names.
async fn table_columns(pool: &SqlitePool, table: &str) -> Result<Vec<String>> {
    let rows = sqlx::query(&format!("PRAGMA table_info({})", table))
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(|row| row.get("name")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_initialize_database() {
        let pool = memory_pool().await;

        initialize_database(&pool).await.unwrap();

        let count: i32 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let pool = memory_pool().await;

        initialize_database(&pool).await.unwrap();
        initialize_database(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let pool = memory_pool().await;

        initialize_database(&pool).await.unwrap();

        let foreign_keys: i32 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(foreign_keys, 1);
    }

    #[tokio::test]
    async fn test_old_favorites_table_gains_columns() {
        let pool = memory_pool().await;

        // Simulate a database created before the care fields existed
        sqlx::query(
            r#"
            CREATE TABLE favorites (
                id INTEGER PRIMARY KEY,
                common_name TEXT,
                scientific_name TEXT,
                family TEXT,
                year TEXT,
                bibliography TEXT,
                image_url TEXT,
                added_date TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query("INSERT INTO favorites (id, common_name, added_date) VALUES (1, 'Pothos', '2025-01-01')")
            .execute(&pool)
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        let columns = table_columns(&pool, "favorites").await.unwrap();
        for (name, _) in FAVORITE_UPGRADES {
            assert!(columns.iter().any(|c| c == name), "missing {}", name);
        }

        // Existing data survives the upgrade
        let name: String = sqlx::query_scalar("SELECT common_name FROM favorites WHERE id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(name, "Pothos");
    }

    #[tokio::test]
    async fn test_obsolete_layouts_table_is_recreated() {
        let pool = memory_pool().await;

        sqlx::query("CREATE TABLE layouts (id INTEGER PRIMARY KEY, name TEXT, plants TEXT)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO layouts (name, plants) VALUES ('Old', '1,2,3')")
            .execute(&pool)
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        let columns = table_columns(&pool, "layouts").await.unwrap();
        assert!(!columns.iter().any(|c| c == "plants"));
        assert!(columns.iter().any(|c| c == "kind"));

        // The obsolete table's contents are gone
        let count: i32 = sqlx::query_scalar("SELECT COUNT(*) FROM layouts")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
