use chrono::NaiveDateTime;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::cases::tags::tag_reader;
use crate::models::case::CaseRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueFilter {
    /// Due now or never reviewed.
    #[default]
    Due,
    /// Never scheduled for review.
    New,
    Any,
}

impl DueFilter {
    fn accepts(self, record: &CaseRecord, now: NaiveDateTime) -> bool {
        match self {
            DueFilter::Any => true,
            DueFilter::Due => record.next_review.map_or(true, |next| next < now),
            DueFilter::New => record.next_review.is_none(),
        }
    }
}

/// Filters `records` (expected most-recently-modified first) by due state and
/// tag, then shuffles them. Every call gives a fresh order.
pub fn build_quiz<R: Rng + ?Sized>(
    records: Vec<CaseRecord>,
    due: DueFilter,
    tag: Option<&str>,
    now: NaiveDateTime,
    rng: &mut R,
) -> Vec<CaseRecord> {
    let tag = tag.filter(|t| !t.is_empty());
    let mut queue: Vec<CaseRecord> = records
        .into_iter()
        .filter(|record| due.accepts(record, now))
        .filter(|record| match tag {
            Some(tag) => tag_reader(&record.tags).iter().any(|t| t == tag),
            None => true,
        })
        .collect();
    queue.shuffle(rng);
    queue
}
