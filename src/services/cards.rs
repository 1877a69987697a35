//! Card creation, review write-back and deck assembly.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;

use crate::db;
use crate::domain::{NewCard, Quality, ReviewCard};
use crate::error::{ApiError, ApiResult};
use crate::srs::{build_daily_deck, next_schedule, ReviewDeck};

use super::students::require_student;

pub fn create_card(
    conn: &Connection,
    card: &NewCard,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> ApiResult<ReviewCard> {
    require_student(conn, &card.student_id)?;

    let created = db::insert_card(conn, card, today, now)?;
    tracing::info!(
        "Created card {} for {} (due {})",
        created.card_id,
        created.student_id,
        created.next_review_date
    );
    Ok(created)
}

/// Apply one review to a stored card and persist the new schedule.
///
/// The write only lands if the stored schedule is unchanged since it was
/// read; a concurrent review in between yields `Conflict`.
pub fn review_card(
    conn: &Connection,
    card_id: i64,
    quality: Quality,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> ApiResult<ReviewCard> {
    let card = db::get_card_by_id(conn, card_id)?.ok_or(ApiError::NotFound("Card"))?;

    let current = card.schedule();
    let next = next_schedule(&current, quality, today)?;

    if !db::update_card_schedule(conn, card_id, &current, &next, now)? {
        tracing::warn!("Card {} changed while being reviewed", card_id);
        return Err(ApiError::Conflict(format!(
            "Card {} was reviewed concurrently, retry with fresh state",
            card_id
        )));
    }

    tracing::info!(
        "Reviewed card {} q={}: reps {}->{}, interval {}->{}, ease {:.2}->{:.2}, next {}",
        card_id,
        quality.value(),
        current.repetitions,
        next.repetitions,
        current.interval_days,
        next.interval_days,
        current.ease_factor,
        next.ease_factor,
        next.next_review_date
    );

    Ok(ReviewCard {
        repetitions: next.repetitions,
        interval_days: next.interval_days,
        ease_factor: next.ease_factor,
        next_review_date: next.next_review_date,
        last_reviewed_at: Some(now),
        ..card
    })
}

/// Today's prioritized, budget-limited deck for a student
pub fn daily_deck(conn: &Connection, student_id: &str, today: NaiveDate) -> ApiResult<ReviewDeck> {
    let student = require_student(conn, student_id)?;
    let budget = student.settings.budget_per_day();

    let due = db::get_due_cards(conn, student_id, today)?;
    let deck = build_daily_deck(student_id, due, budget);

    tracing::debug!(
        "Deck for {}: {} due, {} in deck (budget {}, applied: {})",
        student_id,
        deck.total_due,
        deck.cards_in_deck,
        budget,
        deck.budget_applied
    );
    Ok(deck)
}
