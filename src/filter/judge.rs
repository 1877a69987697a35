//! Decision layer: should a mistake become a review card?

use crate::domain::{Decision, ErrorContext, Judgment};

/// Question types treated as slips rather than concept gaps
const SLIP_QUESTION_TYPES: [&str; 4] = ["BASIC_ARITHMETIC", "CALCULATION", "TYPO", "SIMPLE_MISTAKE"];

/// Decides whether a mistake is worth a flashcard.
///
/// Implementations must be cheap and side-effect free; persistence of the
/// outcome is done by the caller.
pub trait MistakeJudge: Send + Sync {
  fn judge(&self, context: &ErrorContext) -> Judgment;
}

/// Keyword rules over the question type.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedJudge;

impl MistakeJudge for RuleBasedJudge {
  fn judge(&self, context: &ErrorContext) -> Judgment {
    if context.student_mistake_summary.trim().is_empty() {
      return Judgment {
        decision: Decision::Reject,
        reason: "No mistake description to build a card from.".to_string(),
      };
    }

    let question_type = context.question_type.trim();
    if SLIP_QUESTION_TYPES
      .iter()
      .any(|t| t.eq_ignore_ascii_case(question_type))
    {
      return Judgment {
        decision: Decision::Reject,
        reason: format!(
          "'{}' mistakes are usually slips, not a misunderstanding of {}.",
          question_type, context.concept_name
        ),
      };
    }

    Judgment {
      decision: Decision::Approve,
      reason: format!("Core concept error on {}.", context.concept_name),
    }
  }
}

/// Card content derived from an approved mistake
pub fn card_content(context: &ErrorContext) -> (String, String) {
  let question = format!("Explain the concept: {}", context.concept_name);
  let answer = format!(
    "{} (previous mistake: {})",
    context.concept_name, context.student_mistake_summary
  );
  (question, answer)
}
