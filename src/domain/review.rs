use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised around the scheduler: bad input at the boundary, or an
/// unrepresentable review date
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SrsError {
  #[error("quality must be between 0 and 5, got {0}")]
  InvalidInput(i64),

  #[error("next review date {from} + {days} days is out of range")]
  DateOutOfRange { from: NaiveDate, days: i64 },
}

/// Self-reported quality of recall, 0 (blackout) to 5 (perfect).
///
/// Constructing one is the only validation step; the scheduler itself
/// assumes a valid value and never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Quality(u8);

impl Quality {
  pub const MAX: u8 = 5;
  /// Lowest score that counts as a successful recall
  pub const PASSING: u8 = 3;

  pub fn new(value: u8) -> Result<Self, SrsError> {
    if value <= Self::MAX {
      Ok(Self(value))
    } else {
      Err(SrsError::InvalidInput(value as i64))
    }
  }

  pub fn value(self) -> u8 {
    self.0
  }

  pub fn is_success(self) -> bool {
    self.0 >= Self::PASSING
  }
}

impl TryFrom<i64> for Quality {
  type Error = SrsError;

  fn try_from(value: i64) -> Result<Self, Self::Error> {
    u8::try_from(value)
      .map_err(|_| SrsError::InvalidInput(value))
      .and_then(Self::new)
  }
}

/// Body of a review submission; quality is validated after deserialization
#[derive(Debug, Clone, Deserialize)]
pub struct CardReviewRequest {
  pub quality: i64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_quality_accepts_full_range() {
    for q in 0..=5 {
      let quality = Quality::new(q).unwrap();
      assert_eq!(quality.value(), q);
    }
  }

  #[test]
  fn test_quality_rejects_above_five() {
    assert_eq!(Quality::new(6), Err(SrsError::InvalidInput(6)));
    assert_eq!(Quality::new(255), Err(SrsError::InvalidInput(255)));
  }

  #[test]
  fn test_quality_try_from_negative() {
    assert_eq!(Quality::try_from(-1), Err(SrsError::InvalidInput(-1)));
  }

  #[test]
  fn test_quality_try_from_large() {
    assert_eq!(Quality::try_from(1000), Err(SrsError::InvalidInput(1000)));
  }

  #[test]
  fn test_quality_success_threshold() {
    assert!(!Quality::new(0).unwrap().is_success());
    assert!(!Quality::new(2).unwrap().is_success());
    assert!(Quality::new(3).unwrap().is_success());
    assert!(Quality::new(5).unwrap().is_success());
  }

  #[test]
  fn test_invalid_input_message() {
    let err = Quality::try_from(7).unwrap_err();
    assert_eq!(err.to_string(), "quality must be between 0 and 5, got 7");
  }
}
