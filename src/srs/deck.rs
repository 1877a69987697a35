//! Daily review deck assembly.
//!
//! Orders a student's due cards by priority and truncates them to the
//! student's daily budget:
//! - Most overdue cards first (earliest `next_review_date`)
//! - Among equally overdue cards, lower ease factor (harder card) first
//! - Remaining ties keep their input order

use std::cmp::Ordering;

use serde::Serialize;

use crate::domain::ReviewCard;

#[derive(Debug, Clone, Serialize)]
pub struct ReviewDeck {
  pub student_id: String,
  pub due_cards: Vec<ReviewCard>,
  /// True when more cards were due than the budget allowed
  pub budget_applied: bool,
  pub total_due: usize,
  pub cards_in_deck: usize,
}

/// Priority order for review: earlier date first, then lower ease factor.
pub fn review_priority(a: &ReviewCard, b: &ReviewCard) -> Ordering {
  a.next_review_date
    .cmp(&b.next_review_date)
    .then_with(|| a.ease_factor.total_cmp(&b.ease_factor))
}

/// Build today's deck from the full set of due cards.
///
/// The whole due set is sorted before truncation. `budget_per_day` is taken
/// as given; callers resolve missing settings to the default first.
pub fn build_daily_deck(
  student_id: &str,
  mut due_cards: Vec<ReviewCard>,
  budget_per_day: usize,
) -> ReviewDeck {
  let total_due = due_cards.len();

  // Stable sort: equal keys stay in input (identifier) order
  due_cards.sort_by(review_priority);
  due_cards.truncate(budget_per_day);

  ReviewDeck {
    student_id: student_id.to_string(),
    cards_in_deck: due_cards.len(),
    due_cards,
    budget_applied: total_due > budget_per_day,
    total_due,
  }
}
