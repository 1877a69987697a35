use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single graded mistake extracted from a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorContext {
  pub question_type: String,
  pub concept_name: String,
  pub student_mistake_summary: String,
}

/// Outcome of the decision layer for one mistake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
  Approve,
  Reject,
}

impl Decision {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Approve => "APPROVE",
      Self::Reject => "REJECT",
    }
  }

  /// Unknown values are treated as a rejection
  pub fn from_str(s: &str) -> Self {
    match s {
      "APPROVE" => Self::Approve,
      _ => Self::Reject,
    }
  }

  pub fn is_approved(&self) -> bool {
    matches!(self, Self::Approve)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Judgment {
  pub decision: Decision,
  pub reason: String,
}

/// Coach verdict on a logged decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoachFeedback {
  Good,
  Bad,
}

impl CoachFeedback {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Good => "GOOD",
      Self::Bad => "BAD",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "GOOD" => Some(Self::Good),
      "BAD" => Some(Self::Bad),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct DecisionLog {
  pub log_id: i64,
  pub student_id: String,
  pub submission_id: i64,
  pub decision: Decision,
  pub reason: Option<String>,
  pub coach_id: Option<String>,
  pub coach_feedback: Option<CoachFeedback>,
  pub reason_code: Option<String>,
  pub memo: Option<String>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JudgeRequest {
  pub student_id: String,
  pub submission_id: i64,
  pub error_context: ErrorContext,
}

#[derive(Debug, Clone, Serialize)]
pub struct JudgeResponse {
  pub log_id: i64,
  pub decision: Decision,
  pub reason: String,
  /// Card created from an approved decision
  pub card_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
  pub log_id: i64,
  pub coach_id: String,
  /// "GOOD" or "BAD"
  pub feedback: String,
  pub reason_code: Option<String>,
  pub memo: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoachMemo {
  pub memo_id: i64,
  pub student_id: String,
  pub coach_id: String,
  pub content: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoachMemoCreate {
  pub student_id: String,
  pub coach_id: String,
  pub content: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_decision_from_str() {
    assert_eq!(Decision::from_str("APPROVE"), Decision::Approve);
    assert_eq!(Decision::from_str("REJECT"), Decision::Reject);
    assert_eq!(Decision::from_str("maybe"), Decision::Reject);
    assert_eq!(Decision::from_str("approve"), Decision::Reject);
  }

  #[test]
  fn test_decision_serde_uppercase() {
    assert_eq!(serde_json::to_string(&Decision::Approve).unwrap(), "\"APPROVE\"");
    let parsed: Decision = serde_json::from_str("\"REJECT\"").unwrap();
    assert_eq!(parsed, Decision::Reject);
  }

  #[test]
  fn test_coach_feedback_from_str() {
    assert_eq!(CoachFeedback::from_str("GOOD"), Some(CoachFeedback::Good));
    assert_eq!(CoachFeedback::from_str("BAD"), Some(CoachFeedback::Bad));
    assert_eq!(CoachFeedback::from_str("good"), None);
    assert_eq!(CoachFeedback::from_str(""), None);
  }

  #[test]
  fn test_decision_is_approved() {
    assert!(Decision::Approve.is_approved());
    assert!(!Decision::Reject.is_approved());
  }
}
