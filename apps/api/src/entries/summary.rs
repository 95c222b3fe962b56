use chrono::{Days, NaiveDate};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::entry::ProductivityEntry;

/// Inclusive `[start, end]` window the summary aggregates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SummaryWindow {
    /// Window ending at `today` and reaching back `days` days.
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Aggregates over the active entries of a window.
/// With no matching rows the count is zero and every other field is `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_entries: i64,
    pub avg_tasks: Option<f64>,
    pub avg_focus_hours: Option<f64>,
    pub avg_stress_level: Option<f64>,
    pub max_tasks: Option<i32>,
    pub min_stress: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub stats: SummaryStats,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
}

impl SummaryResponse {
    pub fn new(stats: SummaryStats, window: SummaryWindow) -> Self {
        Self {
            stats,
            window_start: window.start,
            window_end: window.end,
        }
    }
}

/// Computes the summary over an in-memory slice, mirroring the SQL aggregate.
pub fn summarize(entries: &[ProductivityEntry], window: SummaryWindow) -> SummaryStats {
    let rows: Vec<_> = entries
        .iter()
        .filter(|e| e.is_active() && window.contains(e.date))
        .collect();

    if rows.is_empty() {
        return SummaryStats::default();
    }

    let n = rows.len() as f64;
    let (tasks, focus, stress) = rows.iter().fold((0.0, 0.0, 0.0), |(t, f, s), e| {
        (
            t + f64::from(e.task_count),
            f + e.focus_hours,
            s + f64::from(e.stress_level),
        )
    });

    SummaryStats {
        total_entries: rows.len() as i64,
        avg_tasks: Some(tasks / n),
        avg_focus_hours: Some(focus / n),
        avg_stress_level: Some(stress / n),
        max_tasks: rows.iter().map(|e| e.task_count).max(),
        min_stress: rows.iter().map(|e| e.stress_level).min(),
    }
}
