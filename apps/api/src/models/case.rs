use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CaseRecord {
    pub id: i64,
    pub front: String,
    pub back: String,
    pub tags: String,
    pub keywords: String,
    pub next_review: Option<NaiveDateTime>,
    pub modified: NaiveDateTime,
}
