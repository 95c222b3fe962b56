use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::models::entry::{EntryStatus, ProductivityEntry};

/// Query string accepted by the listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    #[serde(rename = "startDate", alias = "start_date")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", alias = "end_date")]
    pub end_date: Option<String>,
}

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryFilter {
    pub status: EntryStatus,
    pub range: Option<DateRange>,
}

impl EntryFilter {
    /// Builds a filter from raw query parameters.
    ///
    /// An unknown `status` is rejected. Malformed dates are ignored, and the
    /// range only applies when both ends parse.
    pub fn from_params(params: &ListParams) -> Result<Self, AppError> {
        let status = match params.status.as_deref().map(str::trim) {
            None | Some("") => EntryStatus::default(),
            Some(raw) => raw.parse().map_err(|_| {
                AppError::validation("status", "status must be 'active' or 'archived'")
            })?,
        };

        let start = parse_date("startDate", params.start_date.as_deref());
        let end = parse_date("endDate", params.end_date.as_deref());
        let range = match (start, end) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        };

        Ok(EntryFilter { status, range })
    }

    pub fn matches(&self, entry: &ProductivityEntry) -> bool {
        entry.status == self.status
            && self.range.map_or(true, |r| r.contains(entry.date))
    }
}

fn parse_date(param: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            debug!("Ignoring malformed {param} '{raw}': {e}");
            None
        }
    }
}
