use chrono::{Duration, NaiveDate};

use crate::domain::{Quality, ScheduleState, SrsError};

pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const INITIAL_EASE_FACTOR: f64 = 2.5;
pub const INITIAL_INTERVAL_DAYS: i64 = 1;
/// Interval after the first successful recall (new card or after a lapse)
pub const FIRST_SUCCESS_INTERVAL_DAYS: i64 = 6;
/// Interval after a failed recall
pub const LAPSE_INTERVAL_DAYS: i64 = 1;
/// Upper bound on any interval (about 100 years); keeps review dates representable
pub const MAX_INTERVAL_DAYS: i64 = 36_500;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sm2Result {
  pub repetitions: i64,
  pub interval_days: i64,
  pub ease_factor: f64,
}

/// Schedule assigned to every new card before its first review.
pub fn initial_schedule(today: NaiveDate) -> ScheduleState {
  ScheduleState {
    repetitions: 0,
    interval_days: INITIAL_INTERVAL_DAYS,
    ease_factor: INITIAL_EASE_FACTOR,
    next_review_date: today + Duration::days(INITIAL_INTERVAL_DAYS),
  }
}

/// SM-2 step. Total over valid input: `current_ease_factor >= 1.3`,
/// non-negative interval and repetitions.
///
/// Growth uses the ease factor *before* this review, and rounds half away
/// from zero (`f64::round`), so 4.5 days becomes 5. Intervals are capped
/// at [`MAX_INTERVAL_DAYS`].
pub fn calculate_sm2(
  quality: Quality,
  current_ease_factor: f64,
  current_interval: i64,
  current_repetitions: i64,
) -> Sm2Result {
  let (interval_days, repetitions) = if quality.is_success() {
    let interval = if current_repetitions == 0 {
      FIRST_SUCCESS_INTERVAL_DAYS
    } else {
      ((current_interval as f64) * current_ease_factor)
        .round()
        .min(MAX_INTERVAL_DAYS as f64) as i64
    };
    (interval, current_repetitions + 1)
  } else {
    (LAPSE_INTERVAL_DAYS, 0)
  };

  // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored at 1.3
  let q = quality.value() as f64;
  let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
  let ease_factor = (current_ease_factor + ease_delta).max(MIN_EASE_FACTOR);

  Sm2Result {
    repetitions,
    interval_days,
    ease_factor,
  }
}

/// Apply a review to a card's schedule, deriving the next review date from `today`.
///
/// Fails only when `today + interval` falls outside the representable date range.
pub fn next_schedule(
  state: &ScheduleState,
  quality: Quality,
  today: NaiveDate,
) -> Result<ScheduleState, SrsError> {
  let result = calculate_sm2(quality, state.ease_factor, state.interval_days, state.repetitions);
  let next_review_date = today
    .checked_add_signed(Duration::days(result.interval_days))
    .ok_or(SrsError::DateOutOfRange {
      from: today,
      days: result.interval_days,
    })?;

  Ok(ScheduleState {
    repetitions: result.repetitions,
    interval_days: result.interval_days,
    ease_factor: result.ease_factor,
    next_review_date,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn q(value: u8) -> Quality {
    Quality::new(value).unwrap()
  }

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn test_initial_schedule() {
    let state = initial_schedule(date(2024, 1, 1));
    assert_eq!(state.next_review_date, date(2024, 1, 2));
    assert_eq!(state.interval_days, 1);
    assert!((state.ease_factor - 2.5).abs() < f64::EPSILON);
    assert_eq!(state.repetitions, 0);
  }

  #[test]
  fn test_initial_schedule_crosses_year_end() {
    let state = initial_schedule(date(2023, 12, 31));
    assert_eq!(state.next_review_date, date(2024, 1, 1));
  }

  #[test]
  fn test_first_review_perfect() {
    let result = calculate_sm2(q(5), 2.5, 1, 0);
    assert_eq!(result.repetitions, 1);
    assert_eq!(result.interval_days, 6);
    assert!((result.ease_factor - 2.6).abs() < 1e-9);
  }

  #[test]
  fn test_second_review_perfect() {
    let result = calculate_sm2(q(5), 2.6, 6, 1);
    assert_eq!(result.repetitions, 2);
    // 6 * 2.6 = 15.6
    assert_eq!(result.interval_days, 16);
    assert!((result.ease_factor - 2.7).abs() < 1e-9);
  }

  #[test]
  fn test_lapse_after_long_streak() {
    let result = calculate_sm2(q(1), 2.0, 20, 3);
    assert_eq!(result.repetitions, 0);
    assert_eq!(result.interval_days, 1);
    // 2.0 + (0.1 - 4 * (0.08 + 4 * 0.02)) = 1.46
    assert!((result.ease_factor - 1.46).abs() < 1e-9);
  }

  #[test]
  fn test_quality_three_lowers_ease_but_succeeds() {
    let result = calculate_sm2(q(3), 2.5, 6, 2);
    assert_eq!(result.repetitions, 3);
    assert_eq!(result.interval_days, 15);
    // 2.5 + (0.1 - 2 * (0.08 + 2 * 0.02)) = 2.36
    assert!((result.ease_factor - 2.36).abs() < 1e-9);
  }

  #[test]
  fn test_quality_four_keeps_ease() {
    let result = calculate_sm2(q(4), 2.5, 6, 2);
    assert!((result.ease_factor - 2.5).abs() < 1e-9);
  }

  #[test]
  fn test_growth_uses_ease_before_review() {
    // Quality 3 drops EF to 2.36; growth still uses 2.5: 10 * 2.5 = 25
    let result = calculate_sm2(q(3), 2.5, 10, 4);
    assert_eq!(result.interval_days, 25);
  }

  #[test]
  fn test_rounding_half_goes_up() {
    // 3 * 1.5 = 4.5 exactly
    let result = calculate_sm2(q(4), 1.5, 3, 2);
    assert_eq!(result.interval_days, 5);
  }

  #[test]
  fn test_ease_factor_floor() {
    let result = calculate_sm2(q(0), 1.3, 10, 5);
    assert!((result.ease_factor - MIN_EASE_FACTOR).abs() < f64::EPSILON);

    // Repeated blackouts never go below the floor
    let mut ef = 2.5;
    let mut interval = 10;
    let mut reps = 5;
    for _ in 0..10 {
      let result = calculate_sm2(q(0), ef, interval, reps);
      ef = result.ease_factor;
      interval = result.interval_days;
      reps = result.repetitions;
    }
    assert!((ef - MIN_EASE_FACTOR).abs() < f64::EPSILON);
  }

  #[test]
  fn test_no_upper_clamp() {
    let mut ef = 2.5;
    for _ in 0..30 {
      ef = calculate_sm2(q(5), ef, 1, 1).ease_factor;
    }
    assert!((ef - 5.5).abs() < 1e-6);
  }

  #[test]
  fn test_zero_interval_never_reviewed_card() {
    let result = calculate_sm2(q(4), 2.5, 0, 0);
    assert_eq!(result.interval_days, 6);
    assert_eq!(result.repetitions, 1);
  }

  #[test]
  fn test_floor_holds_for_all_inputs() {
    for quality in 0..=5 {
      for ef in [1.3, 1.31, 1.5, 2.0, 2.5, 3.7] {
        for reps in 0..4 {
          for interval in [0, 1, 6, 40] {
            let result = calculate_sm2(q(quality), ef, interval, reps);
            assert!(result.ease_factor >= MIN_EASE_FACTOR);
          }
        }
      }
    }
  }

  #[test]
  fn test_lapse_resets_for_all_inputs() {
    for quality in 0..3 {
      for reps in [0, 1, 2, 9] {
        for interval in [0, 1, 6, 120] {
          let result = calculate_sm2(q(quality), 2.2, interval, reps);
          assert_eq!(result.repetitions, 0);
          assert_eq!(result.interval_days, 1);
        }
      }
    }
  }

  #[test]
  fn test_first_success_interval_is_fixed() {
    for interval in [0, 1, 3, 50] {
      for ef in [1.3, 2.5, 4.0] {
        assert_eq!(calculate_sm2(q(4), ef, interval, 0).interval_days, 6);
      }
    }
  }

  #[test]
  fn test_repetitions_increment_on_success() {
    for quality in 3..=5 {
      for reps in [0, 1, 2, 10] {
        assert_eq!(calculate_sm2(q(quality), 2.5, 6, reps).repetitions, reps + 1);
      }
    }
  }

  #[test]
  fn test_interval_grows_over_good_reviews() {
    let today = date(2024, 1, 1);
    let mut state = initial_schedule(today);

    for i in 0..5 {
      state = next_schedule(&state, q(4), today).unwrap();
      match i {
        0 => assert_eq!(state.interval_days, 6),
        _ => assert!(state.interval_days > 6),
      }
    }

    // 6 -> 15 -> 38 -> 95 -> 238
    assert_eq!(state.interval_days, 238);
  }

  #[test]
  fn test_next_schedule_sets_review_date() {
    let today = date(2024, 2, 27);
    let state = initial_schedule(date(2024, 2, 26));
    let next = next_schedule(&state, q(5), today).unwrap();
    assert_eq!(next.interval_days, 6);
    assert_eq!(next.next_review_date, date(2024, 3, 4));
  }

  #[test]
  fn test_interval_is_capped() {
    let result = calculate_sm2(q(5), 3.0, 20_000, 9);
    assert_eq!(result.interval_days, MAX_INTERVAL_DAYS);
    assert_eq!(result.repetitions, 10);
  }

  #[test]
  fn test_long_perfect_streak_stays_bounded() {
    let today = date(2024, 1, 1);
    let mut state = initial_schedule(today);
    for _ in 0..30 {
      state = next_schedule(&state, q(5), today).unwrap();
      assert!(state.interval_days <= MAX_INTERVAL_DAYS);
    }
    assert_eq!(state.interval_days, MAX_INTERVAL_DAYS);
    assert_eq!(state.repetitions, 30);
  }

  #[test]
  fn test_review_date_past_calendar_end_is_an_error() {
    let state = ScheduleState {
      repetitions: 3,
      interval_days: 100,
      ease_factor: 2.5,
      next_review_date: NaiveDate::MAX,
    };
    let err = next_schedule(&state, q(5), NaiveDate::MAX).unwrap_err();
    assert!(matches!(err, SrsError::DateOutOfRange { days: 250, .. }));
  }
}
