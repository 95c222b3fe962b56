use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ProductivityEntry {
    pub id: i64,
    pub name: String,
    pub task_count: i32,
    pub focus_hours: f64,
    pub stress_level: i32,
    pub date: NaiveDate,
    pub status: EntryStatus,
}

impl ProductivityEntry {
    pub fn is_active(&self) -> bool {
        self.status == EntryStatus::Active
    }
}

/// Lifecycle status. Entries only move from `Active` to `Archived`.
/// Stored as lowercase text in the `status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Active,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for EntryStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(EntryStatus::Active),
            "archived" => Ok(EntryStatus::Archived),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// A validated submission, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub name: String,
    pub task_count: i32,
    pub focus_hours: f64,
    pub stress_level: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("Archived".parse::<EntryStatus>(), Ok(EntryStatus::Archived));
        assert_eq!(" active ".parse::<EntryStatus>(), Ok(EntryStatus::Active));
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert!("deleted".parse::<EntryStatus>().is_err());
    }

    #[test]
    fn test_entry_serializes_date_as_iso() {
        let entry = ProductivityEntry {
            id: 1,
            name: "Ana".to_string(),
            task_count: 5,
            focus_hours: 3.5,
            stress_level: 2,
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            status: EntryStatus::Active,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2024-03-09");
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn test_archived_status_serializes_lowercase() {
        let json = serde_json::to_value(EntryStatus::Archived).unwrap();
        assert_eq!(json, "archived");
    }
}
