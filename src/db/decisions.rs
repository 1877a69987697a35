//! Decision log storage and coach feedback

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Result, Row};

use crate::domain::{CoachFeedback, Decision, DecisionLog, Judgment};

const LOG_COLUMNS: &str = "log_id, student_id, submission_id, decision, reason, coach_id, \
     coach_feedback, reason_code, memo, created_at";

fn row_to_log(row: &Row) -> Result<DecisionLog> {
    let decision: String = row.get(3)?;
    let feedback: Option<String> = row.get(6)?;
    Ok(DecisionLog {
        log_id: row.get(0)?,
        student_id: row.get(1)?,
        submission_id: row.get(2)?,
        decision: Decision::from_str(&decision),
        reason: row.get(4)?,
        coach_id: row.get(5)?,
        coach_feedback: feedback.as_deref().and_then(CoachFeedback::from_str),
        reason_code: row.get(7)?,
        memo: row.get(8)?,
        created_at: row.get(9)?,
    })
}

/// Filters for listing decision logs; dates are inclusive
#[derive(Debug, Clone)]
pub struct LogFilter {
    pub skip: i64,
    pub limit: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub student_id: Option<String>,
}

pub fn insert_decision_log(
    conn: &Connection,
    student_id: &str,
    submission_id: i64,
    judgment: &Judgment,
    now: DateTime<Utc>,
) -> Result<DecisionLog> {
    conn.execute(
        r#"
    INSERT INTO decision_logs (student_id, submission_id, decision, reason, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
        params![student_id, submission_id, judgment.decision.as_str(), judgment.reason, now],
    )?;

    Ok(DecisionLog {
        log_id: conn.last_insert_rowid(),
        student_id: student_id.to_string(),
        submission_id,
        decision: judgment.decision,
        reason: Some(judgment.reason.clone()),
        coach_id: None,
        coach_feedback: None,
        reason_code: None,
        memo: None,
        created_at: now,
    })
}

pub fn get_decision_log(conn: &Connection, log_id: i64) -> Result<Option<DecisionLog>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM decision_logs WHERE log_id = ?1",
        LOG_COLUMNS
    ))?;

    let mut rows = stmt.query(params![log_id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_log(row)?))
    } else {
        Ok(None)
    }
}

/// Newest first
pub fn list_decision_logs(conn: &Connection, filter: &LogFilter) -> Result<Vec<DecisionLog>> {
    let end_exclusive = filter.end_date.succ_opt().unwrap_or(filter.end_date);
    let mut stmt = conn.prepare(&format!(
        r#"
    SELECT {}
    FROM decision_logs
    WHERE created_at >= ?1 AND created_at < ?2
      AND (?3 IS NULL OR student_id = ?3)
    ORDER BY created_at DESC, log_id DESC
    LIMIT ?4 OFFSET ?5
    "#,
        LOG_COLUMNS
    ))?;

    let logs = stmt
        .query_map(
            params![
                filter.start_date,
                end_exclusive,
                filter.student_id,
                filter.limit,
                filter.skip
            ],
            row_to_log,
        )?
        .collect::<Result<Vec<_>>>()?;
    Ok(logs)
}

/// Record a coach's verdict on a decision; None if the log does not exist
pub fn update_decision_feedback(
    conn: &Connection,
    log_id: i64,
    coach_id: &str,
    feedback: CoachFeedback,
    reason_code: Option<&str>,
    memo: Option<&str>,
) -> Result<Option<DecisionLog>> {
    let updated = conn.execute(
        r#"
    UPDATE decision_logs
    SET coach_id = ?1, coach_feedback = ?2, reason_code = ?3, memo = ?4
    WHERE log_id = ?5
    "#,
        params![coach_id, feedback.as_str(), reason_code, memo, log_id],
    )?;

    if updated == 0 {
        return Ok(None);
    }
    get_decision_log(conn, log_id)
}
