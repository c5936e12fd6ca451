use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::AppError;
use crate::extractors::optional_field;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

lazy_static! {
    /// chrono alone accepts single-digit months and days, so the shape is checked first
    static ref ISO_DATE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid date regex");
}

/// Which ledger table an entry lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Expense,
    Income,
}

impl EntryKind {
    pub fn table(&self) -> &'static str {
        match self {
            EntryKind::Expense => "expense",
            EntryKind::Income => "income",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Expense => "Expense",
            EntryKind::Income => "Income",
        }
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date
pub fn parse_entry_date(value: &str) -> Result<NaiveDate, AppError> {
    if !ISO_DATE.is_match(value) {
        return Err(AppError::InternalError(format!(
            "Invalid date '{value}': expected format YYYY-MM-DD"
        )));
    }
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| AppError::InternalError(format!("Invalid date '{value}': {e}")))?;
    // Calendar years start at 0001
    if date.year() < 1 {
        return Err(AppError::InternalError(format!(
            "Invalid date '{value}': year is out of range"
        )));
    }
    Ok(date)
}

pub fn format_entry_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Persisted expense or income row
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Entry {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
}

/// In-memory record that has passed the storage constraints but is not yet persisted
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewEntry {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl NewEntry {
    /// Build a record from raw input. Fails on a malformed date or an oversized name.
    pub fn create(name: String, amount: f64, date: &str) -> Result<Self, AppError> {
        let entry = Self {
            name,
            amount,
            date: parse_entry_date(date)?,
        };
        entry
            .validate()
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        Ok(entry)
    }
}

/// Request body for creating an expense
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateEntryDto {
    /// Entry name (at most 100 characters)
    #[schema(example = "Groceries")]
    pub name: Option<String>,
    /// Amount
    #[schema(example = 50.5)]
    pub amount: Option<f64>,
    /// Date in YYYY-MM-DD format
    #[schema(example = "2023-07-22")]
    pub date: Option<String>,
}

impl CreateEntryDto {
    /// Read the fields out of a request body, naming any field of the wrong type
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        Ok(Self {
            name: optional_field(body, "name")?,
            amount: optional_field(body, "amount")?,
            date: optional_field(body, "date")?,
        })
    }

    /// Check that every field is present and hand them back
    pub fn into_fields(self) -> Result<(String, f64, String), AppError> {
        let missing = |field: &str| AppError::BadRequest(format!("Missing required field: {field}"));
        let name = self.name.ok_or_else(|| missing("name"))?;
        let amount = self.amount.ok_or_else(|| missing("amount"))?;
        let date = self.date.ok_or_else(|| missing("date"))?;
        Ok((name, amount, date))
    }
}

/// Expense or income as returned by the listing endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct EntryResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Rent")]
    pub name: String,
    #[schema(example = 1200.0)]
    pub amount: f64,
    /// Date in YYYY-MM-DD format
    #[schema(example = "2024-07-22")]
    pub date: String,
}

impl From<Entry> for EntryResponse {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            amount: entry.amount,
            date: format_entry_date(entry.date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_date() {
        let date = parse_entry_date("2023-07-22").expect("Should parse");
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 7, 22).unwrap());
    }

    #[test]
    fn test_parse_rejects_day_first_format() {
        let result = parse_entry_date("22-07-2023");
        assert!(matches!(result, Err(AppError::InternalError(_))));
    }

    #[test]
    fn test_parse_rejects_unpadded_components() {
        assert!(parse_entry_date("2023-7-2").is_err());
    }

    #[test]
    fn test_parse_rejects_impossible_calendar_date() {
        assert!(parse_entry_date("2023-02-30").is_err());
    }

    #[test]
    fn test_parse_rejects_year_zero() {
        assert!(matches!(parse_entry_date("0000-01-01"), Err(AppError::InternalError(_))));
        assert!(parse_entry_date("0001-01-01").is_ok());
    }

    #[test]
    fn test_format_round_trips() {
        let date = parse_entry_date("2024-01-05").expect("Should parse");
        assert_eq!(format_entry_date(date), "2024-01-05");
    }

    #[test]
    fn test_create_new_entry() {
        let entry = NewEntry::create("Groceries".into(), 50.5, "2023-07-22").expect("Should build");
        assert_eq!(entry.name, "Groceries");
        assert_eq!(entry.amount, 50.5);
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2023, 7, 22).unwrap());
    }

    #[test]
    fn test_create_rejects_long_name() {
        let name = "x".repeat(101);
        let result = NewEntry::create(name, 1.0, "2023-07-22");
        assert!(matches!(result, Err(AppError::InternalError(_))));
    }

    #[test]
    fn test_create_accepts_name_at_limit() {
        assert!(NewEntry::create("x".repeat(100), 1.0, "2023-07-22").is_ok());
    }

    #[test]
    fn test_into_fields_reports_missing_field() {
        let dto = CreateEntryDto {
            name: Some("Rent".into()),
            amount: None,
            date: Some("2024-07-22".into()),
        };
        match dto.into_fields() {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Missing required field: amount"),
            other => panic!("Expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn test_from_body_names_wrong_typed_field() {
        let body = serde_json::json!({"name": "Groceries", "amount": "lots", "date": "2023-07-22"});
        let body = body.as_object().expect("Should be an object");
        match CreateEntryDto::from_body(body) {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("'amount'"), "got {msg}"),
            other => panic!("Expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn test_from_body_leaves_absent_fields_empty() {
        let body = serde_json::json!({"name": "Groceries", "amount": 1.5});
        let dto = CreateEntryDto::from_body(body.as_object().unwrap()).expect("Should read body");
        assert_eq!(dto.name.as_deref(), Some("Groceries"));
        assert_eq!(dto.amount, Some(1.5));
        assert!(dto.date.is_none());
    }

    #[test]
    fn test_response_renders_iso_date() {
        let response = EntryResponse::from(Entry {
            id: 7,
            name: "Salary".into(),
            amount: 5000.0,
            date: NaiveDate::from_ymd_opt(2024, 7, 22).unwrap(),
        });
        assert_eq!(response.date, "2024-07-22");
        assert_eq!(response.id, 7);
    }
}
