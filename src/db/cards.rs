//! Review card CRUD and due-card queries

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Result, Row};

use crate::domain::{NewCard, ReviewCard, ScheduleState};
use crate::srs::initial_schedule;

const CARD_COLUMNS: &str = "card_id, student_id, decision_log_id, question, answer, repetitions, \
     interval_days, ease_factor, next_review_date, last_reviewed_at, created_at";

fn row_to_card(row: &Row) -> Result<ReviewCard> {
    Ok(ReviewCard {
        card_id: row.get(0)?,
        student_id: row.get(1)?,
        decision_log_id: row.get(2)?,
        question: row.get(3)?,
        answer: row.get(4)?,
        repetitions: row.get(5)?,
        interval_days: row.get(6)?,
        ease_factor: row.get(7)?,
        next_review_date: row.get(8)?,
        last_reviewed_at: row.get(9)?,
        created_at: row.get(10)?,
    })
}

/// Insert a card with the initial SM-2 schedule relative to `today`
pub fn insert_card(
    conn: &Connection,
    card: &NewCard,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<ReviewCard> {
    let schedule = initial_schedule(today);
    conn.execute(
        r#"
    INSERT INTO anki_cards (student_id, decision_log_id, question, answer, repetitions,
                            interval_days, ease_factor, next_review_date, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    "#,
        params![
            card.student_id,
            card.decision_log_id,
            card.question,
            card.answer,
            schedule.repetitions,
            schedule.interval_days,
            schedule.ease_factor,
            schedule.next_review_date,
            now,
        ],
    )?;

    Ok(ReviewCard {
        card_id: conn.last_insert_rowid(),
        student_id: card.student_id.clone(),
        decision_log_id: card.decision_log_id,
        question: card.question.clone(),
        answer: card.answer.clone(),
        repetitions: schedule.repetitions,
        interval_days: schedule.interval_days,
        ease_factor: schedule.ease_factor,
        next_review_date: schedule.next_review_date,
        last_reviewed_at: None,
        created_at: now,
    })
}

pub fn get_card_by_id(conn: &Connection, card_id: i64) -> Result<Option<ReviewCard>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM anki_cards WHERE card_id = ?1",
        CARD_COLUMNS
    ))?;

    let mut rows = stmt.query(params![card_id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_card(row)?))
    } else {
        Ok(None)
    }
}

/// All cards for a student with `next_review_date <= today`, in review priority order
pub fn get_due_cards(conn: &Connection, student_id: &str, today: NaiveDate) -> Result<Vec<ReviewCard>> {
    let mut stmt = conn.prepare(&format!(
        r#"
    SELECT {}
    FROM anki_cards
    WHERE student_id = ?1 AND next_review_date <= ?2
    ORDER BY next_review_date ASC, ease_factor ASC, card_id ASC
    "#,
        CARD_COLUMNS
    ))?;

    let cards = stmt
        .query_map(params![student_id, today], row_to_card)?
        .collect::<Result<Vec<_>>>()?;
    Ok(cards)
}

pub fn get_student_cards(conn: &Connection, student_id: &str) -> Result<Vec<ReviewCard>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM anki_cards WHERE student_id = ?1 ORDER BY card_id ASC",
        CARD_COLUMNS
    ))?;

    let cards = stmt
        .query_map(params![student_id], row_to_card)?
        .collect::<Result<Vec<_>>>()?;
    Ok(cards)
}

/// Cards created or reviewed in `[start, end]` (inclusive dates), newest first
pub fn get_cards_touched_between(
    conn: &Connection,
    student_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<ReviewCard>> {
    let end_exclusive = end.succ_opt().unwrap_or(end);
    let mut stmt = conn.prepare(&format!(
        r#"
    SELECT {}
    FROM anki_cards
    WHERE student_id = ?1
      AND ((created_at >= ?2 AND created_at < ?3)
           OR (last_reviewed_at >= ?2 AND last_reviewed_at < ?3))
    ORDER BY created_at DESC, card_id DESC
    "#,
        CARD_COLUMNS
    ))?;

    let cards = stmt
        .query_map(params![student_id, start, end_exclusive], row_to_card)?
        .collect::<Result<Vec<_>>>()?;
    Ok(cards)
}

/// Write a reviewed schedule back, only if the stored schedule still equals
/// `expected` (the state the new schedule was computed from).
///
/// Returns false when another review got there first.
pub fn update_card_schedule(
    conn: &Connection,
    card_id: i64,
    expected: &ScheduleState,
    next: &ScheduleState,
    reviewed_at: DateTime<Utc>,
) -> Result<bool> {
    let updated = conn.execute(
        r#"
    UPDATE anki_cards
    SET repetitions = ?1, interval_days = ?2, ease_factor = ?3, next_review_date = ?4,
        last_reviewed_at = ?5
    WHERE card_id = ?6
      AND repetitions = ?7 AND interval_days = ?8 AND ease_factor = ?9 AND next_review_date = ?10
    "#,
        params![
            next.repetitions,
            next.interval_days,
            next.ease_factor,
            next.next_review_date,
            reviewed_at,
            card_id,
            expected.repetitions,
            expected.interval_days,
            expected.ease_factor,
            expected.next_review_date,
        ],
    )?;
    Ok(updated == 1)
}
