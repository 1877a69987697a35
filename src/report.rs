//! Weekly progress report drafts for coaches and parents.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;
use serde::Serialize;

use crate::db::{self, LogFilter, LogOnError};
use crate::domain::{CoachFeedback, CoachMemo, Decision, DecisionLog, ReviewCard, Student};
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Serialize)]
pub struct ReportCardSummary {
  pub card_id: i64,
  pub question: String,
  pub repetitions: i64,
  pub interval_days: i64,
  pub ease_factor: f64,
  pub next_review_date: NaiveDate,
  pub last_reviewed_at: Option<DateTime<Utc>>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportDecisionSummary {
  pub log_id: i64,
  pub submission_id: i64,
  pub decision: Decision,
  pub reason: Option<String>,
  pub coach_feedback: Option<CoachFeedback>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyReport {
  pub student_id: String,
  pub student_name: String,
  pub report_period_start: NaiveDate,
  pub report_period_end: NaiveDate,
  pub decisions_count: usize,
  pub anki_cards_reviewed_count: usize,
  pub new_anki_cards_created_count: usize,
  pub coach_memo_count: usize,
  pub anki_card_summaries: Vec<ReportCardSummary>,
  pub decision_summaries: Vec<ReportDecisionSummary>,
  pub coach_memo_summaries: Vec<CoachMemo>,
  pub overall_summary: String,
}

fn in_period(ts: DateTime<Utc>, start: NaiveDate, end: NaiveDate) -> bool {
  let d = ts.date_naive();
  d >= start && d <= end
}

/// Aggregate already-fetched period data into a report
pub fn summarize(
  student: &Student,
  start: NaiveDate,
  end: NaiveDate,
  cards: &[ReviewCard],
  logs: &[DecisionLog],
  memos: Vec<CoachMemo>,
) -> WeeklyReport {
  let reviewed = cards
    .iter()
    .filter(|c| c.last_reviewed_at.is_some_and(|ts| in_period(ts, start, end)))
    .count();
  let created = cards
    .iter()
    .filter(|c| in_period(c.created_at, start, end))
    .count();

  let mut overall_summary = format!(
    "Weekly learning report for {} from {} to {}.\n",
    student.name, start, end
  );
  overall_summary.push_str(&format!(
    "{} mistake decisions were made, and {} new review cards were created.\n",
    logs.len(),
    created
  ));
  overall_summary.push_str(&format!("{} review cards were studied.\n", reviewed));
  if !memos.is_empty() {
    overall_summary.push_str(&format!("{} coach memos were recorded.\n", memos.len()));
  }

  WeeklyReport {
    student_id: student.student_id.clone(),
    student_name: student.name.clone(),
    report_period_start: start,
    report_period_end: end,
    decisions_count: logs.len(),
    anki_cards_reviewed_count: reviewed,
    new_anki_cards_created_count: created,
    coach_memo_count: memos.len(),
    anki_card_summaries: cards
      .iter()
      .map(|c| ReportCardSummary {
        card_id: c.card_id,
        question: c.question.clone(),
        repetitions: c.repetitions,
        interval_days: c.interval_days,
        ease_factor: c.ease_factor,
        next_review_date: c.next_review_date,
        last_reviewed_at: c.last_reviewed_at,
        created_at: c.created_at,
      })
      .collect(),
    decision_summaries: logs
      .iter()
      .map(|l| ReportDecisionSummary {
        log_id: l.log_id,
        submission_id: l.submission_id,
        decision: l.decision,
        reason: l.reason.clone(),
        coach_feedback: l.coach_feedback,
        created_at: l.created_at,
      })
      .collect(),
    coach_memo_summaries: memos,
    overall_summary,
  }
}

/// Build a draft report for `[start, end]` (inclusive)
pub fn generate_weekly_report(
  conn: &Connection,
  student_id: &str,
  start: NaiveDate,
  end: NaiveDate,
) -> ApiResult<WeeklyReport> {
  if end < start {
    return Err(ApiError::InvalidInput(format!(
      "end_date {} is before start_date {}",
      end, start
    )));
  }

  let student = db::get_student(conn, student_id)?.ok_or(ApiError::NotFound("Student"))?;

  let logs = db::list_decision_logs(
    conn,
    &LogFilter {
      skip: 0,
      limit: i64::MAX,
      start_date: start,
      end_date: end,
      student_id: Some(student_id.to_string()),
    },
  )?;
  let cards = db::get_cards_touched_between(conn, student_id, start, end)?;
  // Memos are supplementary; a failed read still yields a report
  let memos = db::get_memos_between(conn, student_id, start, end)
    .log_warn_default("Failed to load coach memos for report");

  tracing::debug!(
    "Weekly report for {}: {} logs, {} cards, {} memos",
    student_id,
    logs.len(),
    cards.len(),
    memos.len()
  );

  Ok(summarize(&student, start, end, &cards, &logs, memos))
}
