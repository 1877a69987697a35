use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The four fields the scheduler owns on every card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleState {
  pub repetitions: i64,
  pub interval_days: i64,
  pub ease_factor: f64,
  pub next_review_date: NaiveDate,
}

/// A spaced-repetition card created from an approved student mistake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCard {
  pub card_id: i64,
  pub student_id: String,
  /// Decision log that approved this card (None for manually created cards)
  pub decision_log_id: Option<i64>,
  pub question: String,
  pub answer: String,

  // SM-2 fields
  pub repetitions: i64,
  pub interval_days: i64,
  pub ease_factor: f64,
  pub next_review_date: NaiveDate,
  pub last_reviewed_at: Option<DateTime<Utc>>,

  pub created_at: DateTime<Utc>,
}

impl ReviewCard {
  pub fn schedule(&self) -> ScheduleState {
    ScheduleState {
      repetitions: self.repetitions,
      interval_days: self.interval_days,
      ease_factor: self.ease_factor,
      next_review_date: self.next_review_date,
    }
  }
}

/// Fields needed to insert a new card; the schedule comes from `srs::initial_schedule`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCard {
  pub student_id: String,
  pub decision_log_id: Option<i64>,
  pub question: String,
  pub answer: String,
}
