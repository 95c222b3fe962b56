use std::sync::{Mutex, MutexGuard};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entries::filter::EntryFilter;
use crate::entries::store::EntryStore;
use crate::entries::summary::{summarize, SummaryStats, SummaryWindow};
use crate::errors::AppError;
use crate::models::entry::{EntryStatus, NewEntry, ProductivityEntry};

/// Vec-backed store used by tests and by `DATABASE_URL=memory` local runs.
/// Nothing survives a restart. Ids start at 1 and only grow.
#[derive(Default)]
pub struct MemoryEntryStore {
    rows: Mutex<Vec<ProductivityEntry>>,
}

impl MemoryEntryStore {
    fn rows(&self) -> Result<MutexGuard<'_, Vec<ProductivityEntry>>, AppError> {
        self.rows
            .lock()
            .map_err(|_| AppError::Internal(anyhow!("memory store lock poisoned")))
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn insert(
        &self,
        entry: NewEntry,
        today: NaiveDate,
    ) -> Result<ProductivityEntry, AppError> {
        let mut rows = self.rows()?;
        let id = rows.last().map_or(1, |r| r.id + 1);
        let row = ProductivityEntry {
            id,
            name: entry.name,
            task_count: entry.task_count,
            focus_hours: entry.focus_hours,
            stress_level: entry.stress_level,
            date: today,
            status: EntryStatus::Active,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn get(&self, id: i64) -> Result<Option<ProductivityEntry>, AppError> {
        Ok(self.rows()?.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, filter: &EntryFilter) -> Result<Vec<ProductivityEntry>, AppError> {
        let mut matched: Vec<_> = self
            .rows()?
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(matched)
    }

    async fn summary(&self, window: SummaryWindow) -> Result<SummaryStats, AppError> {
        Ok(summarize(&self.rows()?, window))
    }

    async fn archive(&self, id: i64) -> Result<bool, AppError> {
        match self.rows()?.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.status = EntryStatus::Archived;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
