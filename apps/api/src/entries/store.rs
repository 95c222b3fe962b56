use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::entries::filter::EntryFilter;
use crate::entries::summary::{SummaryStats, SummaryWindow};
use crate::errors::AppError;
use crate::models::entry::{EntryStatus, NewEntry, ProductivityEntry};

/// Persistence seam for productivity entries.
///
/// Carried in `AppState` as `Arc<dyn EntryStore>`. Every method maps to a
/// single query against the backing store.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Stores a validated entry as `active`, dated `today`.
    async fn insert(&self, entry: NewEntry, today: NaiveDate)
        -> Result<ProductivityEntry, AppError>;

    async fn get(&self, id: i64) -> Result<Option<ProductivityEntry>, AppError>;

    /// Entries matching `filter`, newest first.
    async fn list(&self, filter: &EntryFilter) -> Result<Vec<ProductivityEntry>, AppError>;

    async fn summary(&self, window: SummaryWindow) -> Result<SummaryStats, AppError>;

    /// Marks the entry archived. Returns `false` when no entry has this id;
    /// an already archived entry still returns `true`.
    async fn archive(&self, id: i64) -> Result<bool, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PgEntryStore
// ────────────────────────────────────────────────────────────────────────────

pub struct PgEntryStore {
    pool: PgPool,
}

impl PgEntryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore for PgEntryStore {
    async fn insert(
        &self,
        entry: NewEntry,
        today: NaiveDate,
    ) -> Result<ProductivityEntry, AppError> {
        Ok(sqlx::query_as::<_, ProductivityEntry>(
            r#"
            INSERT INTO productivity (name, task_count, focus_hours, stress_level, date, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, task_count, focus_hours, stress_level, date, status
            "#,
        )
        .bind(&entry.name)
        .bind(entry.task_count)
        .bind(entry.focus_hours)
        .bind(entry.stress_level)
        .bind(today)
        .bind(EntryStatus::Active)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn get(&self, id: i64) -> Result<Option<ProductivityEntry>, AppError> {
        Ok(sqlx::query_as::<_, ProductivityEntry>(
            r#"
            SELECT id, name, task_count, focus_hours, stress_level, date, status
            FROM productivity
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn list(&self, filter: &EntryFilter) -> Result<Vec<ProductivityEntry>, AppError> {
        // A NULL start disables the range; both ends are bound together.
        Ok(sqlx::query_as::<_, ProductivityEntry>(
            r#"
            SELECT id, name, task_count, focus_hours, stress_level, date, status
            FROM productivity
            WHERE status = $1
              AND ($2::date IS NULL OR date BETWEEN $2 AND $3)
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(filter.status)
        .bind(filter.range.map(|r| r.start))
        .bind(filter.range.map(|r| r.end))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn summary(&self, window: SummaryWindow) -> Result<SummaryStats, AppError> {
        Ok(sqlx::query_as::<_, SummaryStats>(
            r#"
            SELECT COUNT(*)                   AS total_entries,
                   AVG(task_count)::float8    AS avg_tasks,
                   AVG(focus_hours)::float8   AS avg_focus_hours,
                   AVG(stress_level)::float8  AS avg_stress_level,
                   MAX(task_count)            AS max_tasks,
                   MIN(stress_level)          AS min_stress
            FROM productivity
            WHERE status = $1
              AND date BETWEEN $2 AND $3
            "#,
        )
        .bind(EntryStatus::Active)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn archive(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE productivity SET status = $1 WHERE id = $2")
            .bind(EntryStatus::Archived)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
