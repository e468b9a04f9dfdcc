use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::case::CaseRecord;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column order of the transfer shape, as shown in the grid header.
pub const FIELD_NAMES: [&str; 7] = [
    "id",
    "front",
    "back",
    "tags",
    "keywords",
    "next_review",
    "modified",
];

/// A record flattened for the UI. Timestamps are pre-formatted strings and
/// `id` is `null` on the placeholder row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaseTuple {
    pub id: Option<i64>,
    pub front: String,
    pub back: String,
    pub tags: String,
    pub keywords: String,
    pub next_review: String,
    pub modified: String,
}

impl CaseTuple {
    /// `None` gives the empty placeholder row.
    pub fn from_record(record: Option<&CaseRecord>) -> Self {
        let Some(record) = record else {
            return Self::default();
        };
        CaseTuple {
            id: Some(record.id),
            front: record.front.clone(),
            back: record.back.clone(),
            tags: record.tags.clone(),
            keywords: record.keywords.clone(),
            next_review: record
                .next_review
                .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_default(),
            modified: record.modified.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// A client-editable column of `cases`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseField {
    Front,
    Back,
    Tags,
    Keywords,
    NextReview,
}

/// Parsed value ready to be bound to the field's column.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Timestamp(Option<NaiveDateTime>),
}

type FieldParser = fn(&Value) -> Result<FieldValue, AppError>;

const EDITABLE_FIELDS: [(&str, CaseField); 5] = [
    ("front", CaseField::Front),
    ("back", CaseField::Back),
    ("tags", CaseField::Tags),
    ("keywords", CaseField::Keywords),
    ("next_review", CaseField::NextReview),
];

impl CaseField {
    pub fn column(self) -> &'static str {
        match self {
            CaseField::Front => "front",
            CaseField::Back => "back",
            CaseField::Tags => "tags",
            CaseField::Keywords => "keywords",
            CaseField::NextReview => "next_review",
        }
    }

    /// Converts a raw JSON value from the grid into the stored representation.
    pub fn parse(self, raw: &Value) -> Result<FieldValue, AppError> {
        (self.parser())(raw)
    }

    fn parser(self) -> FieldParser {
        match self {
            CaseField::Front | CaseField::Back | CaseField::Tags | CaseField::Keywords => {
                parse_text
            }
            CaseField::NextReview => parse_optional_timestamp,
        }
    }
}

impl FromStr for CaseField {
    type Err = AppError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if let Some((_, field)) = EDITABLE_FIELDS.iter().find(|(n, _)| *n == name) {
            return Ok(*field);
        }
        if FIELD_NAMES.contains(&name) {
            Err(AppError::Validation(format!("Field '{name}' is not editable")))
        } else {
            Err(AppError::Validation(format!("Unknown field '{name}'")))
        }
    }
}

fn parse_text(raw: &Value) -> Result<FieldValue, AppError> {
    match raw {
        Value::Null => Ok(FieldValue::Text(String::new())),
        Value::String(s) => Ok(FieldValue::Text(s.clone())),
        Value::Number(n) => Ok(FieldValue::Text(n.to_string())),
        Value::Bool(b) => Ok(FieldValue::Text(b.to_string())),
        other => Err(AppError::Validation(format!(
            "Expected text, got {other}"
        ))),
    }
}

fn parse_optional_timestamp(raw: &Value) -> Result<FieldValue, AppError> {
    match raw {
        Value::Null => Ok(FieldValue::Timestamp(None)),
        Value::String(s) if s.trim().is_empty() => Ok(FieldValue::Timestamp(None)),
        Value::String(s) => parse_timestamp(s.trim())
            .map(|ts| FieldValue::Timestamp(Some(ts)))
            .ok_or_else(|| AppError::Validation(format!("Invalid timestamp '{s}'"))),
        other => Err(AppError::Validation(format!(
            "Expected a timestamp string, got {other}"
        ))),
    }
}

/// Accepts RFC 3339 and the usual `date [time]` spellings.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
