//! Repository layer for database operations
//!
//! One method per user-facing action. Every statement is parameterized,
//! including the substring filters, and commits immediately; the only
//! multi-statement paths are the two delete cascades.

use super::models::*;
use crate::error::Result;
use chrono::Local;
use sqlx::SqlitePool;

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ===== Favorites =====

    /// Add a plant to the garden. Returns `false` when the id is
    /// already favorited, leaving the existing row unchanged.
    pub async fn add_favorite(&self, fav: NewFavorite) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO favorites
                (id, common_name, scientific_name, family, genus, year, bibliography,
                 edible, vegetable, image_url, habit, harvest, light, notes, added_date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(fav.id)
        .bind(&fav.common_name)
        .bind(&fav.scientific_name)
        .bind(&fav.family)
        .bind(&fav.genus)
        .bind(&fav.year)
        .bind(&fav.bibliography)
        .bind(&fav.edible)
        .bind(&fav.vegetable)
        .bind(&fav.image_url)
        .bind(&fav.habit)
        .bind(&fav.harvest)
        .bind(&fav.light)
        .bind(&fav.notes)
        .bind(today())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                tracing::debug!("Added favorite: {}", fav.id);
                Ok(true)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                tracing::debug!("Favorite already exists: {}", fav.id);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a favorite and all of its layout memberships
    pub async fn remove_favorite(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM layout_items WHERE plant_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let rows = sqlx::query("DELETE FROM favorites WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::debug!("Removed favorite: {}", id);
        Ok(rows > 0)
    }

    /// Update a favorite's editable fields. The image is replaced only
    /// when the update carries one.
    pub async fn update_favorite(&self, update: FavoriteUpdate) -> Result<bool> {
        let rows = if let Some(image_url) = &update.image_url {
            sqlx::query(
                r#"
                UPDATE favorites SET
                    common_name = ?, scientific_name = ?, family = ?, genus = ?,
                    year = ?, bibliography = ?, edible = ?, vegetable = ?,
                    habit = ?, harvest = ?, light = ?, notes = ?, image_url = ?
                WHERE id = ?
                "#,
            )
            .bind(&update.common_name)
            .bind(&update.scientific_name)
            .bind(&update.family)
            .bind(&update.genus)
            .bind(&update.year)
            .bind(&update.bibliography)
            .bind(&update.edible)
            .bind(&update.vegetable)
            .bind(&update.habit)
            .bind(&update.harvest)
            .bind(&update.light)
            .bind(&update.notes)
            .bind(image_url)
            .bind(update.id)
            .execute(&self.pool)
            .await?
            .rows_affected()
        } else {
            sqlx::query(
                r#"
                UPDATE favorites SET
                    common_name = ?, scientific_name = ?, family = ?, genus = ?,
                    year = ?, bibliography = ?, edible = ?, vegetable = ?,
                    habit = ?, harvest = ?, light = ?, notes = ?
                WHERE id = ?
                "#,
            )
            .bind(&update.common_name)
            .bind(&update.scientific_name)
            .bind(&update.family)
            .bind(&update.genus)
            .bind(&update.year)
            .bind(&update.bibliography)
            .bind(&update.edible)
            .bind(&update.vegetable)
            .bind(&update.habit)
            .bind(&update.harvest)
            .bind(&update.light)
            .bind(&update.notes)
            .bind(update.id)
            .execute(&self.pool)
            .await?
            .rows_affected()
        };

        Ok(rows > 0)
    }

    /// Touch the last-watered timestamp
    pub async fn water_favorite(&self, id: i64) -> Result<bool> {
        let stamp = Local::now().format("%Y-%m-%d %H:%M").to_string();

        let rows = sqlx::query("UPDATE favorites SET last_watered = ? WHERE id = ?")
            .bind(&stamp)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!("Watered favorite {} at {}", id, stamp);
        Ok(rows > 0)
    }

    /// Get a favorite by id
    pub async fn get_favorite(&self, id: i64) -> Result<Option<Favorite>> {
        let favorite = sqlx::query_as::<_, Favorite>("SELECT * FROM favorites WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(favorite)
    }

    /// List favorites, optionally filtered by a case-insensitive
    /// substring match over both name fields
    pub async fn list_favorites(&self, filter: Option<&str>) -> Result<Vec<Favorite>> {
        let favorites = match filter.map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => {
                let pattern = format!("%{}%", query.to_lowercase());
                sqlx::query_as::<_, Favorite>(
                    r#"
                    SELECT * FROM favorites
                    WHERE LOWER(COALESCE(common_name, '')) LIKE ?
                       OR LOWER(COALESCE(scientific_name, '')) LIKE ?
                    ORDER BY common_name
                    "#,
                )
                .bind(&pattern)
                .bind(&pattern)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Favorite>("SELECT * FROM favorites ORDER BY common_name")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(favorites)
    }

    pub async fn count_favorites(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM favorites")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Plants most in need of watering: never-watered first (NULLs sort
    /// ahead), then by oldest timestamp.
    pub async fn watering_queue(&self, limit: i64) -> Result<Vec<Favorite>> {
        let favorites = sqlx::query_as::<_, Favorite>(
            "SELECT * FROM favorites ORDER BY last_watered ASC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(favorites)
    }

    // ===== Reminders =====

    /// Create a reminder
    pub async fn add_reminder(&self, task: &str, due_date: &str) -> Result<Reminder> {
        let reminder = sqlx::query_as::<_, Reminder>(
            r#"
            INSERT INTO reminders (task, due_date, completed)
            VALUES (?, ?, 0)
            RETURNING *
            "#,
        )
        .bind(task)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created reminder: {}", reminder.id);
        Ok(reminder)
    }

    /// List active reminders, due date ascending
    pub async fn get_reminders(&self) -> Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders WHERE completed = 0 ORDER BY due_date ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders)
    }

    /// Mark a reminder completed. Hides it from the active list without
    /// deleting the row.
    pub async fn complete_reminder(&self, id: i64) -> Result<bool> {
        let rows = sqlx::query("UPDATE reminders SET completed = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    /// Permanently delete a reminder
    pub async fn delete_reminder(&self, id: i64) -> Result<bool> {
        let rows = sqlx::query("DELETE FROM reminders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    // ===== Journal =====

    /// Create a journal entry dated today
    pub async fn add_journal_entry(
        &self,
        title: Option<&str>,
        content: &str,
    ) -> Result<JournalEntry> {
        let entry = sqlx::query_as::<_, JournalEntry>(
            r#"
            INSERT INTO journal_entries (title, content, entry_date)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(today())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created journal entry: {}", entry.id);
        Ok(entry)
    }

    /// List journal entries, newest first
    pub async fn get_journal_entries(&self) -> Result<Vec<JournalEntry>> {
        let entries = sqlx::query_as::<_, JournalEntry>(
            "SELECT * FROM journal_entries ORDER BY entry_date DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Edit an entry in place; its id and date are preserved
    pub async fn update_journal_entry(
        &self,
        id: i64,
        title: Option<&str>,
        content: &str,
    ) -> Result<bool> {
        let rows = sqlx::query("UPDATE journal_entries SET title = ?, content = ? WHERE id = ?")
            .bind(title)
            .bind(content)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    pub async fn delete_journal_entry(&self, id: i64) -> Result<bool> {
        let rows = sqlx::query("DELETE FROM journal_entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    // ===== Layouts =====

    /// Create a named collection of plants
    pub async fn create_layout(&self, name: &str, kind: LayoutKind) -> Result<Layout> {
        let layout = sqlx::query_as::<_, Layout>(
            r#"
            INSERT INTO layouts (name, kind, created_date)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(kind)
        .bind(today())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created layout: {} ({})", layout.id, name);
        Ok(layout)
    }

    pub async fn update_layout(&self, id: i64, name: &str, kind: LayoutKind) -> Result<bool> {
        let rows = sqlx::query("UPDATE layouts SET name = ?, kind = ? WHERE id = ?")
            .bind(name)
            .bind(kind)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    /// Delete a layout. Its item rows cascade; the referenced favorites
    /// are untouched.
    pub async fn delete_layout(&self, id: i64) -> Result<bool> {
        let rows = sqlx::query("DELETE FROM layouts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!("Deleted layout: {}", id);
        Ok(rows > 0)
    }

    /// List layouts, newest first
    pub async fn get_layouts(&self) -> Result<Vec<Layout>> {
        let layouts = sqlx::query_as::<_, Layout>(
            "SELECT * FROM layouts ORDER BY created_date DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(layouts)
    }

    /// Items of a layout with their plant's name and image. LEFT JOIN:
    /// a dangling plant reference still yields a row.
    pub async fn get_layout_items(&self, layout_id: i64) -> Result<Vec<LayoutItem>> {
        let items = sqlx::query_as::<_, LayoutItem>(
            r#"
            SELECT li.id, li.layout_id, li.plant_id, f.common_name, f.image_url
            FROM layout_items li
            LEFT JOIN favorites f ON f.id = li.plant_id
            WHERE li.layout_id = ?
            ORDER BY li.id
            "#,
        )
        .bind(layout_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn add_layout_item(&self, layout_id: i64, plant_id: i64) -> Result<i64> {
        let id = sqlx::query_scalar(
            "INSERT INTO layout_items (layout_id, plant_id) VALUES (?, ?) RETURNING id",
        )
        .bind(layout_id)
        .bind(plant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Remove a plant from a layout. Matches by (layout, plant) pair,
    /// so duplicate memberships all go at once.
    pub async fn remove_layout_item(&self, layout_id: i64, plant_id: i64) -> Result<u64> {
        let rows = sqlx::query("DELETE FROM layout_items WHERE layout_id = ? AND plant_id = ?")
            .bind(layout_id)
            .bind(plant_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows)
    }

    /// Layouts that contain the given plant
    pub async fn layouts_for_plant(&self, plant_id: i64) -> Result<Vec<Layout>> {
        let layouts = sqlx::query_as::<_, Layout>(
            r#"
            SELECT DISTINCT l.id, l.name, l.kind, l.created_date
            FROM layouts l
            JOIN layout_items li ON li.layout_id = l.id
            WHERE li.plant_id = ?
            ORDER BY l.created_date DESC, l.id DESC
            "#,
        )
        .bind(plant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(layouts)
    }

    /// Remove a plant from every layout
    pub async fn clear_plant_memberships(&self, plant_id: i64) -> Result<u64> {
        let rows = sqlx::query("DELETE FROM layout_items WHERE plant_id = ?")
            .bind(plant_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows)
    }

    pub async fn count_layouts(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM layouts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
