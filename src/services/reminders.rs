//! Reminders service
//!
//! Reminder CRUD with minimal shape validation, plus iCalendar
//! export/import of the active list.

use crate::database::{Reminder, Repository};
use crate::error::{AppError, Result};
use crate::ics;
use chrono::NaiveDate;

/// Service for watering/care reminders
#[derive(Clone)]
pub struct RemindersService {
    repo: Repository,
}

impl RemindersService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create a reminder. The task must be non-empty and the due date a
    /// valid `YYYY-MM-DD`.
    pub async fn add_reminder(&self, task: &str, due_date: &str) -> Result<Reminder> {
        let task = task.trim();
        if task.is_empty() {
            return Err(AppError::Generic("Task is required".to_string()));
        }

        let due_date = due_date.trim();
        if NaiveDate::parse_from_str(due_date, "%Y-%m-%d").is_err() {
            return Err(AppError::InvalidDate(due_date.to_string()));
        }

        self.repo.add_reminder(task, due_date).await
    }

    /// Active reminders, due date ascending
    pub async fn list_active(&self) -> Result<Vec<Reminder>> {
        self.repo.get_reminders().await
    }

    pub async fn complete_reminder(&self, id: i64) -> Result<bool> {
        self.repo.complete_reminder(id).await
    }

    pub async fn delete_reminder(&self, id: i64) -> Result<bool> {
        self.repo.delete_reminder(id).await
    }

    /// Export the active reminders as an iCalendar document
    pub async fn export_ics(&self) -> Result<String> {
        let pairs: Vec<(String, String)> = self
            .repo
            .get_reminders()
            .await?
            .into_iter()
            .map(|r| (r.task, r.due_date))
            .collect();

        Ok(ics::write_calendar(&pairs))
    }

    /// Import reminders from an iCalendar document. Malformed events
    /// are skipped by the parser; only the count of successfully
    /// applied items is reported.
    pub async fn import_ics(&self, document: &str) -> Result<usize> {
        let mut applied = 0;

        for (task, due_date) in ics::parse_calendar(document) {
            match self.add_reminder(&task, &due_date).await {
                Ok(_) => applied += 1,
                Err(e) => {
                    tracing::warn!("Skipping imported reminder '{}': {}", task, e);
                }
            }
        }

        tracing::info!("Imported {} reminders", applied);
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::initialize_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> RemindersService {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();
        initialize_database(&pool).await.unwrap();

        RemindersService::new(Repository::new(pool))
    }

    #[tokio::test]
    async fn test_add_validates_shape() {
        let service = create_test_service().await;

        assert!(matches!(
            service.add_reminder("   ", "2025-03-01").await,
            Err(AppError::Generic(_))
        ));
        assert!(matches!(
            service.add_reminder("Water fern", "tomorrow").await,
            Err(AppError::InvalidDate(_))
        ));

        let reminder = service.add_reminder("Water fern", "2025-03-01").await.unwrap();
        assert_eq!(reminder.task, "Water fern");
        assert!(!reminder.completed);
    }

    #[tokio::test]
    async fn test_ics_round_trip_through_store() {
        let service = create_test_service().await;

        service.add_reminder("Water fern", "2025-03-01").await.unwrap();
        service.add_reminder("Repot monstera", "2025-04-15").await.unwrap();

        let ics = service.export_ics().await.unwrap();

        // Import into a fresh store and compare the resulting pairs
        let other = create_test_service().await;
        let applied = other.import_ics(&ics).await.unwrap();
        assert_eq!(applied, 2);

        let restored: Vec<(String, String)> = other
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|r| (r.task, r.due_date))
            .collect();

        assert_eq!(
            restored,
            vec![
                ("Water fern".to_string(), "2025-03-01".to_string()),
                ("Repot monstera".to_string(), "2025-04-15".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_completed_reminders_are_not_exported() {
        let service = create_test_service().await;

        let done = service.add_reminder("Done already", "2025-01-01").await.unwrap();
        service.add_reminder("Still due", "2025-02-01").await.unwrap();
        service.complete_reminder(done.id).await.unwrap();

        let ics = service.export_ics().await.unwrap();
        assert!(!ics.contains("Done already"));
        assert!(ics.contains("Still due"));
    }

    #[tokio::test]
    async fn test_import_reports_only_applied_count() {
        let service = create_test_service().await;

        let ics = concat!(
            "BEGIN:VCALENDAR\r\n",
            "BEGIN:VEVENT\r\n",
            "SUMMARY:Good\r\n",
            "DTSTART;VALUE=DATE:20250301\r\n",
            "END:VEVENT\r\n",
            "BEGIN:VEVENT\r\n",
            "DTSTART;VALUE=DATE:20250302\r\n",
            "END:VEVENT\r\n",
            "END:VCALENDAR\r\n",
        );

        let applied = service.import_ics(ics).await.unwrap();
        assert_eq!(applied, 1);
        assert_eq!(service.list_active().await.unwrap().len(), 1);
    }
}
